use std::fmt;

/// Keyboard key identifier.
///
/// Only the keys form controls react to are named; printable text arrives
/// separately as [`InputEvent::Text`]. Everything else maps to
/// `Key::Unknown(u32)` with a stable platform code.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Key {
    Escape,
    Enter,
    Tab,
    Backspace,
    Delete,
    Home,
    End,

    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,

    // Letters used by editing shortcuts (Ctrl+A/C/V/X).
    A,
    C,
    V,
    X,

    /// Platform-dependent key not represented here.
    Unknown(u32),
}

impl Key {
    /// Parses the `KeyboardEvent.code`-style names used by scripts and tests.
    pub fn from_name(name: &str) -> Option<Key> {
        Some(match name {
            "Escape" => Key::Escape,
            "Enter" => Key::Enter,
            "Tab" => Key::Tab,
            "Backspace" => Key::Backspace,
            "Delete" => Key::Delete,
            "Home" => Key::Home,
            "End" => Key::End,
            "ArrowUp" => Key::ArrowUp,
            "ArrowDown" => Key::ArrowDown,
            "ArrowLeft" => Key::ArrowLeft,
            "ArrowRight" => Key::ArrowRight,
            "KeyA" => Key::A,
            "KeyC" => Key::C,
            "KeyV" => Key::V,
            "KeyX" => Key::X,
            _ => return None,
        })
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum KeyState {
    Pressed,
    Released,
}

/// Mouse button identifier.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    Other(u16),
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum MouseButtonState {
    Pressed,
    Released,
}

/// Lifecycle of a single touch point.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum TouchPhase {
    Started,
    Moved,
    Ended,
    Cancelled,
}

/// Modifier keys state.
///
/// Stored as booleans rather than bitflags to keep it explicit and stable.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    pub const SHIFT: Modifiers = Modifiers { shift: true, ctrl: false, alt: false, meta: false };

    pub fn any(&self) -> bool {
        self.shift || self.ctrl || self.alt || self.meta
    }
}

/// Platform-agnostic input events emitted by a platform layer.
///
/// Coordinates are logical pixels relative to the interaction surface.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    ModifiersChanged(Modifiers),

    Key {
        key: Key,
        state: KeyState,
        modifiers: Modifiers,
        /// True when event is a key-repeat.
        repeat: bool,
    },

    PointerMoved { x: f64, y: f64 },

    PointerButton {
        button: MouseButton,
        state: MouseButtonState,
        x: f64,
        y: f64,
        modifiers: Modifiers,
    },

    Touch {
        /// Stable for the lifetime of the touch point.
        id: u64,
        phase: TouchPhase,
        x: f64,
        y: f64,
    },

    /// Committed text (not IME composition).
    Text(String),

    /// Pointer left the surface.
    PointerLeft,

    /// Surface focus change.
    Focused(bool),
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}
