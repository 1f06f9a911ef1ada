use forma_core::coords::Point;
use forma_core::input::Key;

pub use forma_core::input::Modifiers;

/// Input events routed to widgets by the [`crate::form::Form`] host.
///
/// `PointerDown`, `TextInput` and `KeyPress` are *targeted*: they reach the
/// hit-tested or focused widget through [`crate::widget::Widget::on_event`].
/// The remaining pointer events are *window-level*: they reach every widget
/// holding a window subscription through
/// [`crate::widget::Widget::on_window_event`], wherever the pointer is.
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    /// Primary button or a touch went down at `pos`.
    ///
    /// `touches` is the number of touch points in contact, 0 for a mouse.
    PointerDown { pos: Point, touches: usize },
    /// Pointer or touch moved to `pos`.
    PointerMove { pos: Point, touches: usize },
    /// Primary button released or a touch lifted.
    PointerUp { pos: Point },
    /// The platform cancelled the touch sequence.
    PointerCancel,
    /// The pointer left the interaction surface.
    PointerLeave,
    /// Committed text input (one or more characters).
    TextInput { text: String },
    /// Named key pressed (Backspace, Enter, arrow keys, ...).
    KeyPress { key: Key, modifiers: Modifiers },
}

impl UiEvent {
    /// True for events delivered to window subscribers instead of a target.
    pub fn is_window_level(&self) -> bool {
        matches!(
            self,
            UiEvent::PointerMove { .. } | UiEvent::PointerUp { .. } | UiEvent::PointerCancel | UiEvent::PointerLeave
        )
    }
}

/// Result returned by [`crate::widget::Widget::on_event`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResult {
    /// Event was handled.
    Consumed,
    /// Event was not handled.
    Ignored,
}

impl EventResult {
    #[inline]
    pub fn is_consumed(self) -> bool {
        self == EventResult::Consumed
    }
}
