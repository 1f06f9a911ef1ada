//! Headless host for a set of inputs.
//!
//! A [`Form`] owns its widgets and their bounding rectangles, routes input to
//! them and applies what they ask for in return. Each call to
//! [`Form::dispatch`], [`Form::dispatch_ui`] or [`Form::activate`] is one
//! *turn*:
//!
//! 1. The event goes to its target: pointer-down to the topmost widget under
//!    the pointer, text and keys to the focused widget, window-level pointer
//!    events to every widget holding a window subscription.
//! 2. Focus requests left in the [`EventCtx`] are applied immediately;
//!    deferred tasks are queued.
//! 3. Once the event has been fully handled, the queued tasks run
//!    ([`Form::run_deferred`]), before the call returns.

use std::cell::RefCell;
use std::rc::Rc;

use forma_core::coords::{Point, Rect};
use forma_core::input::{InputEvent, InputState, Key, KeyState, MouseButton, MouseButtonState, TouchPhase};
use forma_core::runtime::{TurnQueue, WindowListeners};

use crate::contract::{FormNotification, NotificationLog};
use crate::event::{EventResult, UiEvent};
use crate::focus::FocusManager;
use crate::widget::{Affordance, AttachCtx, DeferredTask, Element, EventCtx, Widget, WidgetId};

struct Slot {
    id: WidgetId,
    name: String,
    rect: Rect,
    element: Element,
}

/// Owns attached widgets and drives their turns.
pub struct Form {
    slots: Vec<Slot>,
    listeners: WindowListeners<WidgetId>,
    tasks: TurnQueue<DeferredTask>,
    focus: FocusManager,
    input: InputState,
    log: NotificationLog,
}

impl Form {
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            listeners: WindowListeners::new(),
            tasks: TurnQueue::new(),
            focus: FocusManager::new(),
            input: InputState::new(),
            log: Rc::new(RefCell::new(Vec::new())),
        }
    }

    // ── Widgets ───────────────────────────────────────────────────────────

    /// Attach `element` under `name` at `rect`. Later widgets sit on top.
    pub fn attach(&mut self, name: impl Into<String>, rect: Rect, element: impl Into<Element>) -> WidgetId {
        let mut element = element.into();
        let id = element.id();
        let name = name.into();
        element.attached(&AttachCtx::new(&self.listeners, &self.log));
        self.focus.register(id);
        log::debug!("attached {} {} {:?}", element.kind(), id, name);
        self.slots.push(Slot { id, name, rect, element });
        id
    }

    /// Detach and return the widget.
    ///
    /// A focused widget loses focus silently. Deferred tasks still aimed at
    /// it become no-ops.
    pub fn detach(&mut self, id: WidgetId) -> Option<Element> {
        let index = self.index_of(id)?;
        let mut slot = self.slots.remove(index);
        slot.element.detached();
        if self.focus.unregister(id) {
            log::debug!("detached {} while focused", id);
        }
        log::debug!("detached {} {} {:?}", slot.element.kind(), id, slot.name);
        Some(slot.element)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Attached widgets in attach order.
    pub fn ids(&self) -> impl Iterator<Item = WidgetId> + '_ {
        self.slots.iter().map(|s| s.id)
    }

    pub fn find(&self, name: &str) -> Option<WidgetId> {
        self.slots.iter().find(|s| s.name == name).map(|s| s.id)
    }

    pub fn name_of(&self, id: WidgetId) -> Option<&str> {
        self.slot(id).map(|s| s.name.as_str())
    }

    pub fn rect_of(&self, id: WidgetId) -> Option<Rect> {
        self.slot(id).map(|s| s.rect)
    }

    pub fn set_rect(&mut self, id: WidgetId, rect: Rect) -> bool {
        match self.slot_mut(id) {
            Some(slot) => {
                slot.rect = rect;
                true
            }
            None => false,
        }
    }

    pub fn element(&self, id: WidgetId) -> Option<&Element> {
        self.slot(id).map(|s| &s.element)
    }

    pub fn element_mut(&mut self, id: WidgetId) -> Option<&mut Element> {
        self.slot_mut(id).map(|s| &mut s.element)
    }

    /// The widget `id` as its concrete type.
    pub fn get<W: Widget>(&self, id: WidgetId) -> Option<&W> {
        self.element(id)?.downcast_ref::<W>()
    }

    pub fn get_mut<W: Widget>(&mut self, id: WidgetId) -> Option<&mut W> {
        self.element_mut(id)?.downcast_mut::<W>()
    }

    // ── Focus and value ───────────────────────────────────────────────────

    pub fn focused(&self) -> Option<WidgetId> {
        self.focus.focused()
    }

    /// Focus `id`, blurring whichever other widget held focus.
    ///
    /// Refocusing the focused widget notifies again. Returns `false` when
    /// `id` is not attached or refuses focus.
    pub fn focus(&mut self, id: WidgetId) -> bool {
        match self.element(id) {
            Some(el) if el.is_focusable() => {}
            _ => return false,
        }
        if let Some(prev) = self.focus.focused().filter(|&p| p != id) {
            self.blur(prev);
        }
        let Some(slot) = self.slot_mut(id) else {
            return false;
        };
        if !slot.element.focus() {
            return false;
        }
        self.focus.set(id);
        true
    }

    /// Blur `id`. Always notifies when `id` is attached.
    pub fn blur(&mut self, id: WidgetId) -> bool {
        let Some(slot) = self.slot_mut(id) else {
            return false;
        };
        slot.element.blur();
        if self.focus.is_focused(id) {
            self.focus.clear();
        }
        true
    }

    /// Reset `id` to its default value.
    pub fn clear(&mut self, id: WidgetId) -> bool {
        match self.slot_mut(id) {
            Some(slot) => {
                slot.element.clear_value();
                true
            }
            None => false,
        }
    }

    /// Apply a markup attribute to `id`.
    ///
    /// A focused widget that stops accepting focus (disabled) is blurred.
    pub fn set_attribute(&mut self, id: WidgetId, name: &str, value: Option<&str>) -> bool {
        let Some(slot) = self.slot_mut(id) else {
            return false;
        };
        let known = slot.element.set_attribute(name, value);
        let lost_focus = !slot.element.is_focusable();
        if !known {
            log::warn!("{} {} has no attribute {:?}", slot.element.kind(), id, name);
        }
        if lost_focus && self.focus.is_focused(id) {
            self.blur(id);
        }
        known
    }

    /// Press an affordance of `id` (clear button, visibility toggle). One turn.
    pub fn activate(&mut self, id: WidgetId, affordance: Affordance) -> bool {
        let mut ctx = EventCtx::new();
        let Some(slot) = self.slot_mut(id) else {
            return false;
        };
        let pressed = slot.element.activate(affordance, &mut ctx);
        self.apply(ctx);
        self.run_deferred();
        pressed
    }

    // ── Turns ─────────────────────────────────────────────────────────────

    /// Feed a raw platform event. One turn.
    pub fn dispatch(&mut self, event: &InputEvent) -> EventResult {
        self.input.apply_event(event);
        match self.translate(event) {
            Some(ui) => self.dispatch_ui(ui),
            None => EventResult::Ignored,
        }
    }

    /// Feed an already translated event. One turn.
    pub fn dispatch_ui(&mut self, event: UiEvent) -> EventResult {
        let result = self.route(&event);
        self.run_deferred();
        result
    }

    /// Run the tasks deferred so far.
    ///
    /// Every turn ends with this; call it directly after driving widgets
    /// through [`Form::get_mut`]. Tasks aimed at a widget that is no longer
    /// attached are dropped. Returns how many tasks ran.
    pub fn run_deferred(&mut self) -> usize {
        let mut ran = 0;
        for task in self.tasks.take_batch() {
            match task {
                DeferredTask::Refocus(id) if self.index_of(id).is_some() => {
                    log::debug!("deferred refocus of {}", id);
                    self.focus(id);
                    ran += 1;
                }
                DeferredTask::Refocus(id) => {
                    log::debug!("deferred refocus of {} dropped, widget detached", id);
                }
            }
        }
        ran
    }

    fn route(&mut self, event: &UiEvent) -> EventResult {
        if event.is_window_level() {
            return self.broadcast(event);
        }
        match event {
            UiEvent::PointerDown { pos, .. } => self.pointer_down(*pos, event),
            UiEvent::KeyPress { key: Key::Tab, modifiers } => {
                let next = self.focus.next(modifiers.shift, |id| {
                    self.element(id).is_some_and(|el| el.is_focusable())
                });
                if let Some(next) = next {
                    self.focus(next);
                }
                EventResult::Consumed
            }
            _ => match self.focus.focused() {
                Some(id) => self.deliver(id, event),
                None => EventResult::Ignored,
            },
        }
    }

    /// Tasks queued and not yet run.
    pub fn pending_tasks(&self) -> usize {
        self.tasks.len()
    }

    /// Whether `id` currently receives window-level pointer events.
    pub fn is_subscribed(&self, id: WidgetId) -> bool {
        self.listeners.contains(id)
    }

    /// Drain the notification log.
    pub fn take_notifications(&mut self) -> Vec<FormNotification> {
        self.log.borrow_mut().drain(..).collect()
    }

    // ── internal ──────────────────────────────────────────────────────────

    fn index_of(&self, id: WidgetId) -> Option<usize> {
        self.slots.iter().position(|s| s.id == id)
    }

    fn slot(&self, id: WidgetId) -> Option<&Slot> {
        self.slots.iter().find(|s| s.id == id)
    }

    fn slot_mut(&mut self, id: WidgetId) -> Option<&mut Slot> {
        self.slots.iter_mut().find(|s| s.id == id)
    }

    fn translate(&self, event: &InputEvent) -> Option<UiEvent> {
        let touches = self.input.touch_count();
        Some(match *event {
            InputEvent::PointerButton { button: MouseButton::Left, state, x, y, .. } => match state {
                MouseButtonState::Pressed => UiEvent::PointerDown { pos: Point::new(x, y), touches: 0 },
                MouseButtonState::Released => UiEvent::PointerUp { pos: Point::new(x, y) },
            },
            InputEvent::PointerMoved { x, y } => UiEvent::PointerMove { pos: Point::new(x, y), touches: 0 },
            InputEvent::PointerLeft => UiEvent::PointerLeave,
            InputEvent::Touch { phase, x, y, .. } => {
                let pos = Point::new(x, y);
                match phase {
                    TouchPhase::Started => UiEvent::PointerDown { pos, touches },
                    TouchPhase::Moved => UiEvent::PointerMove { pos, touches },
                    TouchPhase::Ended => UiEvent::PointerUp { pos },
                    TouchPhase::Cancelled => UiEvent::PointerCancel,
                }
            }
            InputEvent::Text(ref text) => UiEvent::TextInput { text: text.clone() },
            InputEvent::Key { key, state: KeyState::Pressed, modifiers, .. } => UiEvent::KeyPress { key, modifiers },
            _ => return None,
        })
    }

    fn pointer_down(&mut self, pos: Point, event: &UiEvent) -> EventResult {
        let hit = self.slots.iter().rev().find(|s| s.rect.contains(pos)).map(|s| s.id);
        match hit {
            Some(id) if self.element(id).is_some_and(|el| el.is_focusable()) => {
                if !self.focus.is_focused(id) {
                    self.focus(id);
                }
            }
            _ => {
                if let Some(prev) = self.focus.focused() {
                    self.blur(prev);
                }
            }
        }
        match hit {
            Some(id) => self.deliver(id, event),
            None => EventResult::Ignored,
        }
    }

    fn deliver(&mut self, id: WidgetId, event: &UiEvent) -> EventResult {
        let mut ctx = EventCtx::new();
        let Some(slot) = self.slot_mut(id) else {
            return EventResult::Ignored;
        };
        let result = slot.element.on_event(event, slot.rect, &mut ctx);
        self.apply(ctx);
        result
    }

    fn broadcast(&mut self, event: &UiEvent) -> EventResult {
        let mut result = EventResult::Ignored;
        for id in self.listeners.snapshot() {
            let mut ctx = EventCtx::new();
            let Some(slot) = self.slot_mut(id) else {
                continue;
            };
            if slot.element.on_window_event(event, slot.rect, &mut ctx).is_consumed() {
                result = EventResult::Consumed;
            }
            self.apply(ctx);
        }
        result
    }

    fn apply(&mut self, ctx: EventCtx) {
        let (focus_request, deferred) = ctx.into_parts();
        if let Some(id) = focus_request {
            self.focus(id);
        }
        for task in deferred {
            self.tasks.defer(task);
        }
    }
}

impl Default for Form {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use forma_core::input::Modifiers;

    use crate::contract::{NotificationKind, ValueHolder};
    use crate::widgets::{InputNumber, InputPassword, InputSliderGradient, InputText};

    const ROW: f64 = 40.0;

    fn row(i: usize) -> Rect {
        Rect::new(0.0, i as f64 * ROW, 232.0, 32.0)
    }

    fn kinds(form: &mut Form) -> Vec<(NotificationKind, WidgetId)> {
        form.take_notifications().into_iter().map(|n| (n.kind, n.widget)).collect()
    }

    fn press(key: Key) -> UiEvent {
        UiEvent::KeyPress { key, modifiers: Modifiers::default() }
    }

    #[test]
    fn attach_find_detach() {
        let mut form = Form::new();
        let a = form.attach("a", row(0), InputText::new());
        let b = form.attach("b", row(1), InputNumber::new());
        assert_eq!(form.find("b"), Some(b));
        assert_eq!(form.name_of(a), Some("a"));
        assert!(form.get::<InputNumber>(b).is_some());
        assert!(form.get::<InputText>(b).is_none());

        let el = form.detach(a);
        assert!(el.is_some_and(|el| el.downcast_ref::<InputText>().is_some()));
        assert_eq!(form.find("a"), None);
        assert_eq!(form.ids().collect::<Vec<_>>(), vec![b]);
        assert!(form.detach(a).is_none());
    }

    #[test]
    fn pointer_down_moves_focus() {
        let mut form = Form::new();
        let a = form.attach("a", row(0), InputText::new());
        let b = form.attach("b", row(1), InputText::new());

        form.dispatch_ui(UiEvent::PointerDown { pos: Point::new(5.0, 5.0), touches: 0 });
        form.dispatch_ui(UiEvent::PointerDown { pos: Point::new(5.0, 6.0), touches: 0 });
        form.dispatch_ui(UiEvent::PointerDown { pos: Point::new(5.0, 45.0), touches: 0 });
        assert_eq!(form.focused(), Some(b));
        form.dispatch_ui(UiEvent::PointerDown { pos: Point::new(500.0, 500.0), touches: 0 });
        assert_eq!(form.focused(), None);

        assert_eq!(kinds(&mut form), vec![
            (NotificationKind::Focus, a),
            (NotificationKind::Blur, a),
            (NotificationKind::Focus, b),
            (NotificationKind::Blur, b),
        ]);
    }

    #[test]
    fn keys_reach_the_focused_widget() {
        let mut form = Form::new();
        let n = form.attach("n", row(0), InputNumber::new());
        assert_eq!(form.dispatch_ui(press(Key::ArrowUp)), EventResult::Ignored);
        assert!(form.focus(n));
        form.dispatch_ui(press(Key::ArrowUp));
        form.dispatch_ui(UiEvent::TextInput { text: "5".to_string() });
        assert_eq!(*form.get::<InputNumber>(n).map(|w| w.value()).unwrap_or(&0.0), 15.0);
    }

    #[test]
    fn tab_skips_disabled_widgets_and_wraps() {
        let mut form = Form::new();
        let a = form.attach("a", row(0), InputText::new());
        let _b = form.attach("b", row(1), InputText::new().disabled(true));
        let c = form.attach("c", row(2), InputSliderGradient::new());

        form.dispatch_ui(press(Key::Tab));
        assert_eq!(form.focused(), Some(a));
        form.dispatch_ui(press(Key::Tab));
        assert_eq!(form.focused(), Some(c));
        form.dispatch_ui(press(Key::Tab));
        assert_eq!(form.focused(), Some(a));
        form.dispatch_ui(UiEvent::KeyPress { key: Key::Tab, modifiers: Modifiers::SHIFT });
        assert_eq!(form.focused(), Some(c));
    }

    #[test]
    fn clear_button_refocuses_immediately() {
        let mut form = Form::new();
        let t = form.attach("t", row(0), InputText::new().with_value("abc"));
        assert!(form.activate(t, Affordance::Clear));
        assert_eq!(form.focused(), Some(t));
        assert_eq!(kinds(&mut form), vec![(NotificationKind::Update, t), (NotificationKind::Focus, t)]);
    }

    #[test]
    fn visibility_toggle_refocuses_when_the_turn_ends() {
        let mut form = Form::new();
        let pw = form.attach("pw", row(0), InputPassword::new());
        assert!(form.activate(pw, Affordance::ToggleVisibility));
        assert_eq!(form.focused(), Some(pw));
        assert_eq!(form.pending_tasks(), 0);
        assert_eq!(kinds(&mut form), vec![(NotificationKind::Focus, pw)]);
    }

    #[test]
    fn refocus_runs_after_the_rest_of_the_turn() {
        let mut form = Form::new();
        let t = form.attach("t", row(0), InputText::new());
        let pw = form.attach("pw", row(1), InputPassword::new());
        form.focus(t);
        form.take_notifications();

        let mut ctx = EventCtx::new();
        ctx.defer_focus(pw);
        ctx.request_focus(t);
        form.apply(ctx);
        assert_eq!(form.focused(), Some(t));
        assert_eq!(form.pending_tasks(), 1);

        assert_eq!(form.run_deferred(), 1);
        assert_eq!(form.focused(), Some(pw));
    }

    #[test]
    fn deferred_refocus_of_detached_widget_is_a_no_op() {
        let mut form = Form::new();
        let pw = form.attach("pw", row(0), InputPassword::new());
        form.tasks.defer(DeferredTask::Refocus(pw));
        let el = form.detach(pw);
        assert!(el.is_some());

        assert_eq!(form.run_deferred(), 0);
        assert_eq!(form.pending_tasks(), 0);
        assert_eq!(form.focused(), None);
        assert!(form.take_notifications().is_empty());
    }

    #[test]
    fn detaching_focused_widget_clears_focus_silently() {
        let mut form = Form::new();
        let t = form.attach("t", row(0), InputText::new());
        form.focus(t);
        form.take_notifications();
        form.detach(t);
        assert_eq!(form.focused(), None);
        assert!(form.take_notifications().is_empty());
    }

    #[test]
    fn slider_listener_lives_while_attached() {
        let mut form = Form::new();
        let s = form.attach("s", row(0), InputSliderGradient::new());
        assert!(form.is_subscribed(s));
        form.detach(s);
        assert!(!form.is_subscribed(s));
    }

    #[test]
    fn mouse_drag_continues_outside_the_control() {
        let mut form = Form::new();
        let s = form.attach("s", row(0), InputSliderGradient::new());
        let button = |state, x, y| InputEvent::PointerButton {
            button: MouseButton::Left,
            state,
            x,
            y,
            modifiers: Modifiers::default(),
        };
        form.dispatch(&InputEvent::PointerMoved { x: 116.0, y: 16.0 });
        form.dispatch(&button(MouseButtonState::Pressed, 116.0, 16.0));
        assert_eq!(form.get::<InputSliderGradient>(s).map(|w| *w.value()), Some(50.0));
        assert_eq!(form.focused(), Some(s));

        form.dispatch(&InputEvent::PointerMoved { x: 600.0, y: 300.0 });
        assert_eq!(form.get::<InputSliderGradient>(s).map(|w| *w.value()), Some(100.0));
        form.dispatch(&button(MouseButtonState::Released, 600.0, 300.0));
        form.dispatch(&InputEvent::PointerMoved { x: 16.0, y: 16.0 });
        assert_eq!(form.get::<InputSliderGradient>(s).map(|w| *w.value()), Some(100.0));
    }

    #[test]
    fn second_touch_freezes_the_drag() {
        let mut form = Form::new();
        let s = form.attach("s", row(0), InputSliderGradient::new());
        let touch = |id, phase, x| InputEvent::Touch { id, phase, x, y: 16.0 };

        form.dispatch(&touch(1, TouchPhase::Started, 116.0));
        form.dispatch(&touch(2, TouchPhase::Started, 150.0));
        form.dispatch(&touch(1, TouchPhase::Moved, 200.0));
        assert_eq!(form.get::<InputSliderGradient>(s).map(|w| *w.value()), Some(50.0));

        form.dispatch(&touch(2, TouchPhase::Ended, 150.0));
        form.dispatch(&touch(1, TouchPhase::Moved, 216.0));
        assert_eq!(form.get::<InputSliderGradient>(s).map(|w| *w.value()), Some(50.0));
    }

    #[test]
    fn disabling_the_focused_widget_blurs_it() {
        let mut form = Form::new();
        let t = form.attach("t", row(0), InputText::new());
        form.focus(t);
        assert!(form.set_attribute(t, "disabled", Some("")));
        assert_eq!(form.focused(), None);
        assert!(!form.set_attribute(t, "color-steps", Some("#fff")));
        assert!(!form.focus(t));
    }
}
