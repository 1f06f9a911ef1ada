use ::winit::dpi::PhysicalPosition;
use ::winit::event::{
    ElementState, Ime, MouseButton as WinitMouseButton, TouchPhase as WinitTouchPhase, WindowEvent,
};
use ::winit::keyboard::{KeyCode, ModifiersState, NativeKeyCode, PhysicalKey};

use crate::input::{
    InputEvent, InputState, Key, KeyState, Modifiers, MouseButton, MouseButtonState, TouchPhase,
};

/// Translates a winit `WindowEvent` into a forma `InputEvent`.
///
/// `scale_factor` is the window's current DPI scale; positions are reported
/// in logical pixels. Returns `None` for events forms do not consume.
pub fn translate_window_event(
    scale_factor: f64,
    state: &InputState,
    event: &WindowEvent,
) -> Option<InputEvent> {
    match event {
        WindowEvent::ModifiersChanged(m) => Some(InputEvent::ModifiersChanged(map_modifiers(m.state()))),

        WindowEvent::Focused(f) => Some(InputEvent::Focused(*f)),

        WindowEvent::CursorLeft { .. } => Some(InputEvent::PointerLeft),

        WindowEvent::CursorMoved { position, .. } => {
            let (x, y) = to_logical(scale_factor, *position);
            Some(InputEvent::PointerMoved { x, y })
        }

        WindowEvent::MouseInput { state: st, button, .. } => {
            let st = match st {
                ElementState::Pressed => MouseButtonState::Pressed,
                ElementState::Released => MouseButtonState::Released,
            };
            // winit 0.30 does not expose a cursor query; use the tracked position.
            let pos = state.pointer_pos.unwrap_or_default();
            Some(InputEvent::PointerButton {
                button: map_mouse_button(*button),
                state: st,
                x: pos.x,
                y: pos.y,
                modifiers: state.modifiers,
            })
        }

        WindowEvent::Touch(touch) => {
            let (x, y) = to_logical(scale_factor, touch.location);
            let phase = match touch.phase {
                WinitTouchPhase::Started => TouchPhase::Started,
                WinitTouchPhase::Moved => TouchPhase::Moved,
                WinitTouchPhase::Ended => TouchPhase::Ended,
                WinitTouchPhase::Cancelled => TouchPhase::Cancelled,
            };
            Some(InputEvent::Touch { id: touch.id, phase, x, y })
        }

        WindowEvent::KeyboardInput { event, .. } => {
            let st = match event.state {
                ElementState::Pressed => KeyState::Pressed,
                ElementState::Released => KeyState::Released,
            };
            Some(InputEvent::Key {
                key: map_key(event.physical_key),
                state: st,
                modifiers: state.modifiers,
                repeat: event.repeat,
            })
        }

        WindowEvent::Ime(Ime::Commit(text)) if !text.is_empty() => Some(InputEvent::Text(text.clone())),

        _ => None,
    }
}

fn to_logical(scale_factor: f64, pos: PhysicalPosition<f64>) -> (f64, f64) {
    let logical = pos.to_logical::<f64>(scale_factor);
    (logical.x, logical.y)
}

fn map_modifiers(m: ModifiersState) -> Modifiers {
    Modifiers {
        shift: m.shift_key(),
        ctrl: m.control_key(),
        alt: m.alt_key(),
        meta: m.super_key(),
    }
}

fn map_mouse_button(b: WinitMouseButton) -> MouseButton {
    match b {
        WinitMouseButton::Left => MouseButton::Left,
        WinitMouseButton::Right => MouseButton::Right,
        WinitMouseButton::Middle => MouseButton::Middle,
        WinitMouseButton::Back => MouseButton::Other(3),
        WinitMouseButton::Forward => MouseButton::Other(4),
        WinitMouseButton::Other(v) => MouseButton::Other(v),
    }
}

fn map_key(pk: PhysicalKey) -> Key {
    match pk {
        PhysicalKey::Code(code) => match code {
            KeyCode::Escape => Key::Escape,
            KeyCode::Enter | KeyCode::NumpadEnter => Key::Enter,
            KeyCode::Tab => Key::Tab,
            KeyCode::Backspace => Key::Backspace,
            KeyCode::Delete => Key::Delete,
            KeyCode::Home => Key::Home,
            KeyCode::End => Key::End,
            KeyCode::ArrowUp => Key::ArrowUp,
            KeyCode::ArrowDown => Key::ArrowDown,
            KeyCode::ArrowLeft => Key::ArrowLeft,
            KeyCode::ArrowRight => Key::ArrowRight,
            KeyCode::KeyA => Key::A,
            KeyCode::KeyC => Key::C,
            KeyCode::KeyV => Key::V,
            KeyCode::KeyX => Key::X,
            _ => Key::Unknown(0),
        },
        PhysicalKey::Unidentified(native) => Key::Unknown(native_code(native)),
    }
}

fn native_code(native: NativeKeyCode) -> u32 {
    match native {
        NativeKeyCode::Android(c) | NativeKeyCode::Xkb(c) => c,
        NativeKeyCode::MacOS(c) | NativeKeyCode::Windows(c) => u32::from(c),
        NativeKeyCode::Unidentified => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_keys_used_by_forms() {
        assert_eq!(map_key(PhysicalKey::Code(KeyCode::NumpadEnter)), Key::Enter);
        assert_eq!(map_key(PhysicalKey::Code(KeyCode::ArrowLeft)), Key::ArrowLeft);
        assert_eq!(map_key(PhysicalKey::Code(KeyCode::F1)), Key::Unknown(0));
        assert_eq!(map_key(PhysicalKey::Unidentified(NativeKeyCode::Xkb(42))), Key::Unknown(42));
    }

    #[test]
    fn maps_modifiers() {
        let m = map_modifiers(ModifiersState::SHIFT | ModifiersState::SUPER);
        assert_eq!(m, Modifiers { shift: true, ctrl: false, alt: false, meta: true });
    }

    #[test]
    fn translates_window_events() {
        let state = InputState::new();
        let ev = WindowEvent::Ime(Ime::Commit("é".to_string()));
        assert_eq!(translate_window_event(2.0, &state, &ev), Some(InputEvent::Text("é".to_string())));
        let empty = WindowEvent::Ime(Ime::Commit(String::new()));
        assert_eq!(translate_window_event(2.0, &state, &empty), None);
        assert_eq!(translate_window_event(1.0, &state, &WindowEvent::Focused(false)), Some(InputEvent::Focused(false)));
        assert_eq!(to_logical(2.0, PhysicalPosition::new(200.0, 64.0)), (100.0, 32.0));
    }
}
