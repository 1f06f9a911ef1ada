use std::any::Any;
use std::rc::Rc;

use forma_core::coords::Rect;
use forma_core::input::Key;
use forma_core::numbers::{format_number, limit, remap, round_half_up};
use forma_core::paint::Gradient;
use forma_core::runtime::ListenerGuard;

use crate::attrs::{self, apply_attribute, AttributeSpec};
use crate::contract::{Clearable, Focusable, ValueCell, ValueHolder};
use crate::event::{EventResult, UiEvent};
use crate::filter::{FilterError, FilterPipeline};
use crate::widget::{AttachCtx, EventCtx, Widget, WidgetId};

const DEFAULT_MIN: f64 = 0.0;
const DEFAULT_MAX: f64 = 100.0;

/// Derived state handed to the rendering layer.
///
/// Recomputed after every commit, every property change and on attach.
#[derive(Debug, Clone, PartialEq)]
pub struct SliderVisual {
    /// Handle position along the track, `0.0` at `min` and `1.0` at `max`.
    pub track_ratio: f64,
    pub gradient_css: String,
    /// A step is set; the renderer animates handle jumps.
    pub stepping: bool,
    pub handle_visible: bool,
}

impl Default for SliderVisual {
    fn default() -> Self {
        Self {
            track_ratio: 0.0,
            gradient_css: Gradient::neutral().to_css(),
            stepping: false,
            handle_visible: true,
        }
    }
}

/// Horizontal position of `x` along the handle's travel, unclamped.
///
/// The handle is a circle of diameter `rect.height`, so its centre travels
/// `width - height` pixels, starting half a diameter in from the left edge.
/// A track with no travel reports `0.0`.
pub fn pointer_ratio(x: f64, rect: Rect) -> f64 {
    let travel = rect.width - rect.height;
    if travel <= 0.0 {
        return 0.0;
    }
    let ratio = (x - rect.left - rect.height / 2.0) / travel;
    if ratio.is_finite() { ratio } else { 0.0 }
}

/// A bounded numeric value picked by dragging a handle over a gradient.
///
/// Dragging starts on a pointer-down over the control and follows the
/// pointer across the whole surface until it is released, cancelled or
/// leaves the surface. Arrow keys move the value by `step`, or by a
/// hundredth of the range when no step is set.
///
/// # Example
/// ```rust
/// use forma_inputs::prelude::*;
///
/// let mut hue = InputSliderGradient::new().color_steps("#f00,#0f0,#00f");
/// assert_eq!(hue.value_at(116.0, Rect::new(0.0, 0.0, 232.0, 32.0)), 50.0);
/// hue.set_value(25.0).unwrap();
/// assert_eq!(hue.visual().track_ratio, 0.25);
/// ```
pub struct InputSliderGradient {
    id: WidgetId,
    name: String,
    min: f64,
    max: f64,
    step: Option<f64>,
    cell: ValueCell<f64>,
    gradient: Gradient,
    disabled: bool,
    read_only: bool,
    focused: bool,
    pointer_active: bool,
    window: Option<ListenerGuard<WidgetId>>,
    visual: SliderVisual,
}

static SLIDER_ATTRIBUTES: &[AttributeSpec<InputSliderGradient>] = &[
    AttributeSpec {
        name: "color-steps",
        apply: |w, raw| w.set_gradient(attrs::color_steps("color-steps", raw)),
    },
    AttributeSpec {
        name: "value",
        apply: |w, raw| {
            let _ = w.set_value(attrs::number_or_nan(raw));
        },
    },
    AttributeSpec {
        name: "min",
        apply: |w, raw| w.set_min(attrs::number_or_null("min", raw).unwrap_or(DEFAULT_MIN)),
    },
    AttributeSpec {
        name: "max",
        apply: |w, raw| w.set_max(attrs::number_or_null("max", raw).unwrap_or(DEFAULT_MAX)),
    },
    AttributeSpec { name: "step", apply: |w, raw| w.set_step(attrs::number_or_null("step", raw)) },
    AttributeSpec { name: "disabled", apply: |w, raw| w.set_disabled(attrs::flag(raw)) },
    AttributeSpec { name: "readonly", apply: |w, raw| w.set_read_only(attrs::flag(raw)) },
];

impl InputSliderGradient {
    pub fn new() -> Self {
        let mut w = Self {
            id: WidgetId::new(),
            name: String::new(),
            min: DEFAULT_MIN,
            max: DEFAULT_MAX,
            step: None,
            cell: ValueCell::new(DEFAULT_MIN),
            gradient: Gradient::neutral(),
            disabled: false,
            read_only: false,
            focused: false,
            pointer_active: false,
            window: None,
            visual: SliderVisual::default(),
        };
        w.update_ui();
        w
    }

    // ── builder ───────────────────────────────────────────────────────────

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn min(mut self, v: f64) -> Self {
        self.set_min(v);
        self
    }

    pub fn max(mut self, v: f64) -> Self {
        self.set_max(v);
        self
    }

    pub fn step(mut self, v: f64) -> Self {
        self.set_step(Some(v));
        self
    }

    /// Initial value, limited to the range but unfiltered, without notifying.
    pub fn with_value(mut self, v: f64) -> Self {
        self.cell.init(limit(v, self.min, self.max));
        self.update_ui();
        self
    }

    /// Comma-separated hex colors, evenly spaced.
    pub fn color_steps(mut self, hex_list: &str) -> Self {
        self.set_gradient(attrs::color_steps("color-steps", Some(hex_list)));
        self
    }

    pub fn gradient(mut self, gradient: Gradient) -> Self {
        self.set_gradient(gradient);
        self
    }

    pub fn disabled(mut self, v: bool) -> Self {
        self.set_disabled(v);
        self
    }

    pub fn read_only(mut self, v: bool) -> Self {
        self.set_read_only(v);
        self
    }

    pub fn filters(mut self, filters: Rc<FilterPipeline<f64>>) -> Self {
        self.cell.set_filters(filters);
        self
    }

    pub fn on_update(mut self, f: impl FnMut(&f64) + 'static) -> Self {
        self.cell.observers_mut().on_update(f);
        self
    }

    pub fn on_focus(mut self, f: impl FnMut() + 'static) -> Self {
        self.cell.observers_mut().on_focus(f);
        self
    }

    pub fn on_blur(mut self, f: impl FnMut() + 'static) -> Self {
        self.cell.observers_mut().on_blur(f);
        self
    }

    // ── properties ────────────────────────────────────────────────────────

    pub fn name(&self) -> &str { &self.name }
    pub fn range(&self) -> (f64, f64) { (self.min, self.max) }
    pub fn step_size(&self) -> Option<f64> { self.step }
    pub fn gradient_stops(&self) -> &Gradient { &self.gradient }
    pub fn is_disabled(&self) -> bool { self.disabled }
    pub fn is_read_only(&self) -> bool { self.read_only }
    pub fn pointer_active(&self) -> bool { self.pointer_active }
    pub fn is_subscribed(&self) -> bool { self.window.is_some() }
    pub fn visual(&self) -> &SliderVisual { &self.visual }

    /// Default value follows `min`, so the cell's default is kept in step.
    pub fn set_min(&mut self, v: f64) {
        self.min = v;
        self.cell.set_default(v);
        self.reclamp();
    }

    pub fn set_max(&mut self, v: f64) {
        self.max = v;
        self.reclamp();
    }

    pub fn set_step(&mut self, v: Option<f64>) {
        self.step = v;
        self.update_ui();
    }

    pub fn set_gradient(&mut self, gradient: Gradient) {
        self.gradient = gradient;
        self.update_ui();
    }

    /// Disabling ends any pointer session.
    pub fn set_disabled(&mut self, v: bool) {
        self.disabled = v;
        if v {
            self.pointer_active = false;
        }
        self.update_ui();
    }

    /// Like [`Self::set_disabled`], without leaving the focus order.
    pub fn set_read_only(&mut self, v: bool) {
        self.read_only = v;
        if v {
            self.pointer_active = false;
        }
        self.update_ui();
    }

    /// `--x-value`-style track position, three decimals.
    pub fn track_css(&self) -> String {
        format!("{:.3}", self.visual.track_ratio)
    }

    pub fn gradient_css(&self) -> &str {
        &self.visual.gradient_css
    }

    // ── interaction ───────────────────────────────────────────────────────

    fn is_inert(&self) -> bool {
        self.disabled || self.read_only
    }

    /// Quantization step. Zero and `NaN` count as no step.
    fn quantum(&self) -> Option<f64> {
        self.step.filter(|s| *s != 0.0 && !s.is_nan())
    }

    /// The value a pointer at horizontal position `x` selects.
    ///
    /// The position is mapped over the handle's travel, limited to the range
    /// and snapped to the nearest step. A snap landing outside the range
    /// falls back by one step, or to the range edge if that does not help.
    pub fn value_at(&self, x: f64, rect: Rect) -> f64 {
        let ratio = pointer_ratio(x, rect);
        let value = limit(remap(ratio, 0.0, 1.0, self.min, self.max), self.min, self.max);
        let Some(step) = self.quantum() else {
            return value;
        };
        let snapped = round_half_up(value / step) * step;
        let (lo, hi) = (self.min.min(self.max), self.min.max(self.max));
        if (lo..=hi).contains(&snapped) {
            return snapped;
        }
        let back = if snapped > hi { snapped - step.abs() } else { snapped + step.abs() };
        if (lo..=hi).contains(&back) { back } else { limit(snapped, self.min, self.max) }
    }

    /// Pointer drag to `x`. Commits only when the value actually moves.
    pub fn drag_to(&mut self, x: f64, rect: Rect) -> bool {
        let value = self.value_at(x, rect);
        self.commit_if_changed(value)
    }

    /// Arrow-key move; `Left`/`Up` decrease, `Right`/`Down` increase.
    ///
    /// Returns `false` for any other key.
    pub fn key_step(&mut self, key: Key, shift: bool) -> bool {
        let direction = match key {
            Key::ArrowUp | Key::ArrowLeft => -1.0,
            Key::ArrowDown | Key::ArrowRight => 1.0,
            _ => return false,
        };
        let movement = self.step.unwrap_or((self.max - self.min) / 100.0);
        let factor = if shift { 10.0 } else { 1.0 };
        let value = limit(*self.cell.get() + direction * movement * factor, self.min, self.max);
        self.commit_if_changed(value);
        true
    }

    fn commit_if_changed(&mut self, value: f64) -> bool {
        if value != *self.cell.get() {
            let _ = self.cell.commit(value);
            self.update_ui();
            true
        } else {
            false
        }
    }

    fn end_session(&mut self) {
        if self.pointer_active {
            log::debug!("slider {} pointer session ended", self.id);
        }
        self.pointer_active = false;
    }

    fn reclamp(&mut self) {
        let current = *self.cell.get();
        let limited = limit(current, self.min, self.max);
        if limited != current && !current.is_nan() {
            let _ = self.cell.commit(limited);
        }
        self.update_ui();
    }

    fn update_ui(&mut self) {
        let ratio = (*self.cell.get() - self.min) / (self.max - self.min);
        self.visual = SliderVisual {
            track_ratio: if ratio.is_finite() { ratio } else { 0.0 },
            gradient_css: self.gradient.to_css(),
            stepping: self.quantum().is_some(),
            handle_visible: !self.disabled,
        };
    }
}

impl Default for InputSliderGradient {
    fn default() -> Self {
        Self::new()
    }
}

impl ValueHolder<f64> for InputSliderGradient {
    fn value(&self) -> &f64 {
        self.cell.get()
    }

    fn default_value(&self) -> f64 {
        self.min
    }

    /// Limited to the range, then filtered.
    fn set_value(&mut self, candidate: f64) -> Result<(), FilterError> {
        let result = self.cell.commit(limit(candidate, self.min, self.max));
        self.update_ui();
        result
    }
}

impl Clearable for InputSliderGradient {
    fn clear_value(&mut self) {
        self.cell.set_default(self.min);
        let _ = self.cell.clear();
        self.update_ui();
    }
}

impl Focusable for InputSliderGradient {
    fn focus(&mut self) -> bool {
        if self.disabled {
            return false;
        }
        self.focused = true;
        self.cell.emit_focus();
        true
    }

    fn blur(&mut self) {
        self.focused = false;
        self.cell.emit_blur();
    }

    fn is_focused(&self) -> bool {
        self.focused
    }

    fn is_focusable(&self) -> bool {
        !self.disabled
    }
}

impl Widget for InputSliderGradient {
    fn id(&self) -> WidgetId {
        self.id
    }

    fn kind(&self) -> &'static str {
        "InputSliderGradient"
    }

    fn on_event(&mut self, event: &UiEvent, rect: Rect, _ctx: &mut EventCtx) -> EventResult {
        if self.is_inert() {
            return EventResult::Ignored;
        }
        match event {
            UiEvent::PointerDown { pos, touches } => {
                self.pointer_active = true;
                if *touches < 2 {
                    self.drag_to(pos.x, rect);
                }
                EventResult::Consumed
            }
            UiEvent::KeyPress { key, modifiers } => {
                if self.key_step(*key, modifiers.shift) {
                    EventResult::Consumed
                } else {
                    EventResult::Ignored
                }
            }
            _ => EventResult::Ignored,
        }
    }

    fn on_window_event(&mut self, event: &UiEvent, rect: Rect, _ctx: &mut EventCtx) -> EventResult {
        if self.is_inert() {
            return EventResult::Ignored;
        }
        match event {
            UiEvent::PointerMove { pos, touches } => {
                if !self.pointer_active || *touches >= 2 {
                    return EventResult::Ignored;
                }
                self.drag_to(pos.x, rect);
                EventResult::Consumed
            }
            UiEvent::PointerUp { .. } | UiEvent::PointerCancel | UiEvent::PointerLeave => {
                self.end_session();
                EventResult::Ignored
            }
            _ => EventResult::Ignored,
        }
    }

    fn attached(&mut self, ctx: &AttachCtx<'_>) {
        self.window = Some(ctx.subscribe_window(self.id));
        self.cell.bind(self.id, ctx.log());
        self.update_ui();
    }

    fn detached(&mut self) {
        self.window = None;
        self.cell.unbind();
        self.pointer_active = false;
        self.focused = false;
    }

    fn set_attribute(&mut self, name: &str, value: Option<&str>) -> bool {
        apply_attribute(SLIDER_ATTRIBUTES, self, name, value)
    }

    fn display_value(&self) -> String {
        format_number(*self.cell.get())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    use forma_core::coords::Point;
    use forma_core::runtime::WindowListeners;

    use crate::contract::NotificationLog;
    use crate::event::Modifiers;

    const TRACK: Rect = Rect::new(0.0, 0.0, 232.0, 32.0);

    fn recorder(w: InputSliderGradient) -> (InputSliderGradient, Rc<RefCell<Vec<f64>>>) {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        (w.on_update(move |v: &f64| sink.borrow_mut().push(*v)), seen)
    }

    fn down(x: f64, touches: usize) -> UiEvent {
        UiEvent::PointerDown { pos: Point::new(x, 16.0), touches }
    }

    fn moved(x: f64, touches: usize) -> UiEvent {
        UiEvent::PointerMove { pos: Point::new(x, 16.0), touches }
    }

    fn key(key: Key, shift: bool) -> UiEvent {
        UiEvent::KeyPress { key, modifiers: Modifiers { shift, ..Modifiers::default() } }
    }

    #[test]
    fn pointer_maps_over_handle_travel() {
        let w = InputSliderGradient::new();
        assert_eq!(w.value_at(116.0, TRACK), 50.0);
        assert_eq!(w.value_at(16.0, TRACK), 0.0);
        assert_eq!(w.value_at(216.0, TRACK), 100.0);
        assert_eq!(w.value_at(-40.0, TRACK), 0.0);
        assert_eq!(w.value_at(400.0, TRACK), 100.0);
    }

    #[test]
    fn pointer_respects_rect_offset() {
        let w = InputSliderGradient::new().min(-1.0).max(1.0);
        let rect = Rect::new(100.0, 40.0, 232.0, 32.0);
        assert_eq!(w.value_at(216.0, rect), 0.0);
    }

    #[test]
    fn zero_travel_reads_as_min() {
        assert_eq!(pointer_ratio(10.0, Rect::new(0.0, 0.0, 32.0, 32.0)), 0.0);
        assert_eq!(pointer_ratio(10.0, Rect::new(0.0, 0.0, 20.0, 32.0)), 0.0);
        let w = InputSliderGradient::new().min(10.0).max(20.0);
        assert_eq!(w.value_at(30.0, Rect::new(0.0, 0.0, 32.0, 32.0)), 10.0);
    }

    #[test]
    fn step_quantizes_and_stays_in_range() {
        let w = InputSliderGradient::new().step(25.0);
        assert_eq!(w.value_at(116.0 + 24.0, TRACK), 50.0);
        assert_eq!(w.value_at(116.0 + 26.0, TRACK), 75.0);

        let w = InputSliderGradient::new().max(10.0).step(4.0);
        assert_eq!(w.value_at(216.0, TRACK), 8.0);

        let w = InputSliderGradient::new().step(0.0);
        assert_eq!(w.value_at(66.0, TRACK), 25.0);
        assert!(!w.visual().stepping);
    }

    #[test]
    fn snap_outside_the_range_falls_back_one_step() {
        let w = InputSliderGradient::new().min(1.0).max(10.0).step(4.0);
        assert_eq!(w.value_at(16.0, TRACK), 4.0);
        assert_eq!(w.value_at(-100.0, TRACK), 4.0);
        assert_eq!(w.value_at(216.0, TRACK), 8.0);
    }

    #[test]
    fn drag_commits_through_filters() {
        let tenths = Rc::new(FilterPipeline::new().with(|v: f64| v / 10.0));
        let (mut w, seen) = recorder(InputSliderGradient::new().filters(tenths));
        let mut ctx = EventCtx::new();
        w.on_event(&down(116.0, 0), TRACK, &mut ctx);
        assert_eq!(*w.value(), 5.0);
        assert_eq!(*seen.borrow(), vec![5.0]);
    }

    #[test]
    fn clear_rejected_by_a_filter_keeps_the_value() {
        let at_least_ten = Rc::new(FilterPipeline::new().with_fallible(|v: f64| {
            if v < 10.0 { Err(FilterError::new("below 10")) } else { Ok(v) }
        }));
        let (mut w, seen) = recorder(InputSliderGradient::new().filters(at_least_ten));
        assert_eq!(w.set_value(40.0), Ok(()));
        w.clear_value();
        assert_eq!(*w.value(), 40.0);
        assert_eq!(*seen.borrow(), vec![40.0]);
        assert_eq!(w.track_css(), "0.400");
    }

    #[test]
    fn drag_session_commits_only_on_change() {
        let (mut w, seen) = recorder(InputSliderGradient::new());
        let mut ctx = EventCtx::new();

        assert_eq!(w.on_window_event(&moved(116.0, 0), TRACK, &mut ctx), EventResult::Ignored);
        assert!(seen.borrow().is_empty());

        w.on_event(&down(116.0, 0), TRACK, &mut ctx);
        assert!(w.pointer_active());
        w.on_window_event(&moved(116.0, 0), TRACK, &mut ctx);
        w.on_window_event(&moved(166.0, 0), TRACK, &mut ctx);
        w.on_window_event(&UiEvent::PointerUp { pos: Point::new(500.0, 0.0) }, TRACK, &mut ctx);
        w.on_window_event(&moved(16.0, 0), TRACK, &mut ctx);

        assert!(!w.pointer_active());
        assert_eq!(*seen.borrow(), vec![50.0, 75.0]);
        assert_eq!(w.track_css(), "0.750");
    }

    #[test]
    fn multi_touch_moves_never_change_value() {
        let (mut w, seen) = recorder(InputSliderGradient::new());
        let mut ctx = EventCtx::new();
        w.on_event(&down(116.0, 2), TRACK, &mut ctx);
        assert!(w.pointer_active());
        assert_eq!(w.on_window_event(&moved(200.0, 2), TRACK, &mut ctx), EventResult::Ignored);
        w.on_window_event(&moved(200.0, 3), TRACK, &mut ctx);
        assert_eq!(*w.value(), 0.0);
        assert!(seen.borrow().is_empty());
    }

    #[test]
    fn leave_and_cancel_end_the_session() {
        let mut w = InputSliderGradient::new();
        let mut ctx = EventCtx::new();
        w.on_event(&down(50.0, 1), TRACK, &mut ctx);
        w.on_window_event(&UiEvent::PointerCancel, TRACK, &mut ctx);
        assert!(!w.pointer_active());
        w.on_event(&down(50.0, 0), TRACK, &mut ctx);
        w.on_window_event(&UiEvent::PointerLeave, TRACK, &mut ctx);
        assert!(!w.pointer_active());
    }

    #[test]
    fn keyboard_moves_by_step_or_hundredth() {
        let (mut w, seen) = recorder(InputSliderGradient::new().with_value(50.0));
        let mut ctx = EventCtx::new();
        w.on_event(&key(Key::ArrowRight, false), TRACK, &mut ctx);
        assert_eq!(*w.value(), 51.0);
        w.on_event(&key(Key::ArrowUp, true), TRACK, &mut ctx);
        assert_eq!(*w.value(), 41.0);
        w.on_event(&key(Key::ArrowDown, false), TRACK, &mut ctx);
        assert_eq!(*w.value(), 42.0);
        assert_eq!(w.on_event(&key(Key::Enter, false), TRACK, &mut ctx), EventResult::Ignored);

        w.set_step(Some(5.0));
        w.on_event(&key(Key::ArrowLeft, true), TRACK, &mut ctx);
        assert_eq!(*w.value(), 0.0);
        w.on_event(&key(Key::ArrowLeft, false), TRACK, &mut ctx);
        assert_eq!(*seen.borrow(), vec![51.0, 41.0, 42.0, 0.0]);
    }

    #[test]
    fn disabled_and_read_only_are_inert_but_clearable() {
        let (mut w, seen) = recorder(InputSliderGradient::new().with_value(40.0));
        let mut ctx = EventCtx::new();
        w.on_event(&down(10.0, 0), TRACK, &mut ctx);
        assert!(w.pointer_active());

        w.set_read_only(true);
        assert!(!w.pointer_active());
        w.on_event(&down(200.0, 0), TRACK, &mut ctx);
        w.on_window_event(&moved(200.0, 0), TRACK, &mut ctx);
        w.on_event(&key(Key::ArrowRight, false), TRACK, &mut ctx);
        assert!(w.focus());
        assert_eq!(*seen.borrow(), vec![0.0]);

        w.set_read_only(false);
        w.set_disabled(true);
        w.on_event(&key(Key::ArrowRight, false), TRACK, &mut ctx);
        assert!(!w.visual().handle_visible);
        assert!(!w.is_focusable());

        w.clear_value();
        assert_eq!(*seen.borrow(), vec![0.0, 0.0]);
    }

    #[test]
    fn clear_resets_to_current_min() {
        let (mut w, seen) = recorder(InputSliderGradient::new().min(10.0).with_value(60.0));
        w.set_min(20.0);
        w.clear_value();
        assert_eq!(*w.value(), 20.0);
        assert_eq!(*seen.borrow(), vec![20.0]);
        assert_eq!(w.default_value(), 20.0);
    }

    #[test]
    fn visual_state_tracks_value_and_stops() {
        let mut w = InputSliderGradient::new().color_steps("#000,#fff");
        assert_eq!(w.track_css(), "0.000");
        assert_eq!(
            w.gradient_css(),
            "linear-gradient(90deg, rgba(0.000, 0.000, 0.000, 1.000) 25.000%, \
             rgba(255.000, 255.000, 255.000, 1.000) 75.000%)"
        );
        w.set_value(100.0).unwrap();
        assert_eq!(w.track_css(), "1.000");

        w.set_gradient(Gradient::new(Vec::new()));
        assert_eq!(
            w.gradient_css(),
            "linear-gradient(90deg, rgba(0.000, 0.000, 0.000, 0.000) 25.000%)"
        );
    }

    #[test]
    fn single_color_spans_the_track() {
        let w = InputSliderGradient::new().color_steps("#f00");
        let offsets: Vec<f64> = w.gradient_stops().stops().iter().map(|s| s.display_offset()).collect();
        assert_eq!(offsets, vec![25.0, 75.0]);
    }

    #[test]
    fn degenerate_range_has_zero_track_ratio() {
        let w = InputSliderGradient::new().min(5.0).max(5.0);
        assert_eq!(w.visual().track_ratio, 0.0);
    }

    #[test]
    fn attributes() {
        let mut w = InputSliderGradient::new();
        assert!(w.set_attribute("max", Some("nope")));
        assert_eq!(w.range(), (0.0, 100.0));
        assert!(w.set_attribute("MIN", Some("10")));
        assert!(w.set_attribute("step", Some("5")));
        assert!(w.visual().stepping);
        assert!(w.set_attribute("value", Some("500")));
        assert_eq!(*w.value(), 100.0);
        assert!(w.set_attribute("color-steps", Some("#fff,#bad-color")));
        assert_eq!(w.gradient_stops(), &Gradient::neutral());
        assert!(w.set_attribute("disabled", Some("")));
        assert!(w.is_disabled());
        assert!(!w.set_attribute("placeholder", Some("x")));
    }

    #[test]
    fn attach_subscribes_and_detach_releases() {
        let listeners = WindowListeners::new();
        let log: NotificationLog = Rc::new(RefCell::new(Vec::new()));
        let mut w = InputSliderGradient::new();
        w.attached(&AttachCtx::new(&listeners, &log));
        assert!(listeners.contains(w.id()));
        assert!(w.is_subscribed());

        w.detached();
        assert!(listeners.is_empty());
        assert!(!w.is_subscribed());
    }
}
