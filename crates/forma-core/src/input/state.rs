use std::collections::{BTreeMap, HashSet};

use crate::coords::Point;

use super::types::{InputEvent, MouseButton, MouseButtonState, TouchPhase};

/// Current input state for one interaction surface.
///
/// Holds "is down" information, the pointer position, and the set of touch
/// points currently in contact. The host reads it to enrich raw events (e.g.
/// how many touches a move belongs to).
#[derive(Debug, Default)]
pub struct InputState {
    pub modifiers: super::types::Modifiers,

    /// Whether the surface is focused.
    pub focused: bool,

    /// Pointer position in logical pixels.
    pub pointer_pos: Option<Point>,

    /// Currently held mouse buttons.
    pub buttons_down: HashSet<MouseButton>,

    /// Touch points in contact, keyed by platform touch id.
    touches: BTreeMap<u64, Point>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies a platform-agnostic input event to the current state.
    pub fn apply_event(&mut self, ev: &InputEvent) {
        match ev {
            InputEvent::ModifiersChanged(m) => {
                self.modifiers = *m;
            }

            InputEvent::Focused(f) => {
                self.focused = *f;
                if !*f {
                    // On focus loss, clear "down" sets so nothing stays stuck.
                    self.buttons_down.clear();
                    self.touches.clear();
                }
            }

            InputEvent::PointerMoved { x, y } => {
                self.pointer_pos = Some(Point::new(*x, *y));
            }

            InputEvent::PointerLeft => {
                self.pointer_pos = None;
            }

            InputEvent::Key { modifiers, .. } => {
                self.modifiers = *modifiers;
            }

            InputEvent::PointerButton { button, state, x, y, modifiers } => {
                self.pointer_pos = Some(Point::new(*x, *y));
                self.modifiers = *modifiers;
                match state {
                    MouseButtonState::Pressed => {
                        self.buttons_down.insert(*button);
                    }
                    MouseButtonState::Released => {
                        self.buttons_down.remove(button);
                    }
                }
            }

            InputEvent::Touch { id, phase, x, y } => match phase {
                TouchPhase::Started | TouchPhase::Moved => {
                    self.touches.insert(*id, Point::new(*x, *y));
                }
                TouchPhase::Ended | TouchPhase::Cancelled => {
                    self.touches.remove(id);
                }
            },

            InputEvent::Text(_) => {}
        }
    }

    pub fn button_down(&self, btn: MouseButton) -> bool {
        self.buttons_down.contains(&btn)
    }

    /// Number of touch points currently in contact.
    pub fn touch_count(&self) -> usize {
        self.touches.len()
    }

    pub fn touch_pos(&self, id: u64) -> Option<Point> {
        self.touches.get(&id).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Modifiers;

    fn touch(id: u64, phase: TouchPhase) -> InputEvent {
        InputEvent::Touch { id, phase, x: 10.0, y: 5.0 }
    }

    #[test]
    fn touches_are_counted_until_lifted() {
        let mut s = InputState::new();
        s.apply_event(&touch(1, TouchPhase::Started));
        s.apply_event(&touch(2, TouchPhase::Started));
        assert_eq!(s.touch_count(), 2);
        s.apply_event(&touch(1, TouchPhase::Ended));
        assert_eq!(s.touch_count(), 1);
        s.apply_event(&touch(2, TouchPhase::Cancelled));
        assert_eq!(s.touch_count(), 0);
    }

    #[test]
    fn focus_loss_releases_everything() {
        let mut s = InputState::new();
        s.apply_event(&InputEvent::PointerButton {
            button: MouseButton::Left,
            state: MouseButtonState::Pressed,
            x: 1.0,
            y: 2.0,
            modifiers: Modifiers::default(),
        });
        s.apply_event(&touch(7, TouchPhase::Started));
        assert!(s.button_down(MouseButton::Left));
        s.apply_event(&InputEvent::Focused(false));
        assert!(!s.button_down(MouseButton::Left));
        assert_eq!(s.touch_count(), 0);
    }

    #[test]
    fn pointer_position_tracks_moves_and_leave() {
        let mut s = InputState::new();
        s.apply_event(&InputEvent::PointerMoved { x: 3.0, y: 4.0 });
        assert_eq!(s.pointer_pos, Some(Point::new(3.0, 4.0)));
        s.apply_event(&InputEvent::PointerLeft);
        assert_eq!(s.pointer_pos, None);
    }
}
