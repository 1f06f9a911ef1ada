//! Paint model consumed by the slider's visual state.
//!
//! Scope:
//! - color representation (straight alpha, byte-range RGB)
//! - gradient stops and their rendered form
//!
//! Geometry types remain in `coords`.

pub mod color;
pub mod gradient;

pub use color::{Color, HexColorError};
pub use gradient::{ColorStop, Gradient};
