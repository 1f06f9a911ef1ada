//! Keyboard focus bookkeeping for a [`crate::form::Form`].
//!
//! [`FocusManager`] only records *which* widget is focused and the Tab order;
//! the host is responsible for calling `focus`/`blur` on the widgets
//! themselves so that they notify.
//!
//! # How focus moves
//!
//! 1. Widgets enter the Tab order when attached ([`FocusManager::register`])
//!    and leave it when detached ([`FocusManager::unregister`]).
//! 2. Pointer-down on a widget, a programmatic `Form::focus`, or a request
//!    left in the `EventCtx` moves focus to that widget.
//! 3. Tab / Shift+Tab asks [`FocusManager::next`] for the neighbour in attach
//!    order, skipping widgets that currently refuse focus (disabled).

use crate::widget::WidgetId;

/// Tracks keyboard focus across the widgets of one form.
#[derive(Debug, Default)]
pub struct FocusManager {
    focused: Option<WidgetId>,
    /// Registered widgets in attach order (Tab order).
    order: Vec<WidgetId>,
}

impl FocusManager {
    pub fn new() -> Self {
        Self { focused: None, order: Vec::new() }
    }

    #[inline]
    pub fn focused(&self) -> Option<WidgetId> {
        self.focused
    }

    /// Returns `true` if `id` is the currently focused widget.
    #[inline]
    pub fn is_focused(&self, id: WidgetId) -> bool {
        self.focused == Some(id)
    }

    /// Append `id` to the Tab order.
    pub fn register(&mut self, id: WidgetId) {
        if !self.order.contains(&id) {
            self.order.push(id);
        }
    }

    /// Remove `id` from the Tab order, dropping focus if it held it.
    ///
    /// Returns `true` if `id` was focused.
    pub fn unregister(&mut self, id: WidgetId) -> bool {
        self.order.retain(|&x| x != id);
        if self.focused == Some(id) {
            self.focused = None;
            true
        } else {
            false
        }
    }

    /// Record `id` as focused, returning the previously focused widget.
    pub fn set(&mut self, id: WidgetId) -> Option<WidgetId> {
        self.focused.replace(id)
    }

    /// Clear focus, returning the previously focused widget.
    pub fn clear(&mut self) -> Option<WidgetId> {
        self.focused.take()
    }

    /// The widget Tab (or Shift+Tab, if `reverse`) would move focus to.
    ///
    /// Only widgets for which `can_focus` holds are candidates. Wraps around
    /// at either end.
    pub fn next(&self, reverse: bool, can_focus: impl Fn(WidgetId) -> bool) -> Option<WidgetId> {
        let n = self.order.len();
        if n == 0 {
            return None;
        }
        let start = match self.focused.and_then(|f| self.order.iter().position(|&x| x == f)) {
            Some(i) => i,
            // Nothing focused: the first step lands on the first (or last) entry.
            None if reverse => 0,
            None => n - 1,
        };
        (1..=n)
            .map(|k| if reverse { (start + n - k) % n } else { (start + k) % n })
            .map(|i| self.order[i])
            .find(|&id| can_focus(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(n: usize) -> Vec<WidgetId> {
        (0..n).map(|_| WidgetId::new()).collect()
    }

    #[test]
    fn tab_cycles_in_attach_order() {
        let w = ids(3);
        let mut fm = FocusManager::new();
        w.iter().for_each(|&id| fm.register(id));

        assert_eq!(fm.next(false, |_| true), Some(w[0]));
        fm.set(w[0]);
        assert_eq!(fm.next(false, |_| true), Some(w[1]));
        fm.set(w[2]);
        assert_eq!(fm.next(false, |_| true), Some(w[0]));
    }

    #[test]
    fn shift_tab_goes_backwards() {
        let w = ids(3);
        let mut fm = FocusManager::new();
        w.iter().for_each(|&id| fm.register(id));

        assert_eq!(fm.next(true, |_| true), Some(w[2]));
        fm.set(w[0]);
        assert_eq!(fm.next(true, |_| true), Some(w[2]));
    }

    #[test]
    fn unfocusable_widgets_are_skipped() {
        let w = ids(3);
        let mut fm = FocusManager::new();
        w.iter().for_each(|&id| fm.register(id));
        fm.set(w[0]);
        let skip = w[1];
        assert_eq!(fm.next(false, |id| id != skip), Some(w[2]));
        assert_eq!(fm.next(false, |_| false), None);
    }

    #[test]
    fn unregister_drops_focus() {
        let w = ids(2);
        let mut fm = FocusManager::new();
        w.iter().for_each(|&id| fm.register(id));
        fm.set(w[1]);
        assert!(!fm.unregister(w[0]));
        assert!(fm.unregister(w[1]));
        assert_eq!(fm.focused(), None);
        assert_eq!(fm.next(false, |_| true), None);
    }
}
