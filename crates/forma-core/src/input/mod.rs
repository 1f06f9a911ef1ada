//! Input subsystem.
//!
//! Public API is platform-agnostic and does not expose winit types.
//! Platform code translates window system events into `InputEvent`s
//! (see `platform::winit`, behind the `winit` feature).

pub mod platform;
mod state;
mod types;

pub use state::InputState;
pub use types::{
    InputEvent,
    Key,
    KeyState,
    Modifiers,
    MouseButton,
    MouseButtonState,
    TouchPhase,
};
