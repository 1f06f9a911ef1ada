use std::any::Any;
use std::rc::Rc;

use forma_core::coords::Rect;
use forma_core::input::Key;
use forma_core::numbers::{clamp_optional, format_number, parse_float, same_value_zero};

use crate::attrs::{self, apply_attribute, AttributeSpec};
use crate::contract::{Clearable, Focusable, ValueCell, ValueHolder};
use crate::event::{EventResult, UiEvent};
use crate::filter::{FilterError, FilterPipeline};
use crate::text_edit::{EditPolicy, TextEditState};
use crate::widget::{Affordance, AttachCtx, EventCtx, Widget, WidgetId};

use super::common::{
    apply_autocomplete, apply_disabled, apply_input_mode, apply_placeholder, apply_read_only,
    CommonProps, HasCommonProps,
};

// ── Text parsing ──────────────────────────────────────────────────────────

fn is_separator(c: char) -> bool {
    c == '.' || c == ','
}

fn remove_first(s: &mut String, pred: impl Fn(char) -> bool) {
    if let Some(i) = s.find(pred) {
        s.remove(i);
    }
}

/// Keep `[0-9,.+\- ]`, drop spaces, then one separator and one `+`.
fn clean_part(part: &str) -> String {
    let mut s: String = part
        .chars()
        .filter(|&c| c.is_ascii_digit() || matches!(c, ',' | '.' | '+' | '-'))
        .collect();
    remove_first(&mut s, is_separator);
    remove_first(&mut s, |c| c == '+');
    s
}

/// Parses what a user typed into a numeric input.
///
/// Tolerates either `.` or `,` as the decimal separator. The text is split
/// at the first separator; everything after it, with further separators
/// removed, is the fraction. Each part is stripped of anything but digits
/// and signs, and an empty part reads as `0`. The result is `parse_float`
/// of `"<int>.<fraction>"`, so a malformed sign yields `NaN`.
///
/// Text that is not blank but contains no digit at all is `NaN` rather than
/// an empty (zero) number.
pub fn parse_number_text(raw: &str) -> f64 {
    if !raw.trim().is_empty() && !raw.chars().any(|c| c.is_ascii_digit()) {
        return f64::NAN;
    }
    let (int_raw, frac_raw) = match raw.find(is_separator) {
        Some(i) => {
            let rest: String = raw[i + 1..].chars().filter(|&c| !is_separator(c)).collect();
            (&raw[..i], rest)
        }
        None => (raw, String::new()),
    };
    let int = clean_part(int_raw);
    let frac = clean_part(&frac_raw);
    let int = if int.is_empty() { "0" } else { int.as_str() };
    let frac = if frac.is_empty() { "0" } else { frac.as_str() };
    parse_float(&format!("{int}.{frac}"))
}

/// How a numeric input shows its value when not being edited: `.` becomes `,`.
pub fn format_number_text(n: f64) -> String {
    format_number(n).replacen('.', ",", 1)
}

// ── InputNumber ───────────────────────────────────────────────────────────

/// Optional bounds and step of an [`InputNumber`].
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct NumberBounds {
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub step: Option<f64>,
}

impl NumberBounds {
    /// Upper bound first, then lower bound: with `min > max`, `min` wins.
    #[inline]
    pub fn clamp(&self, value: f64) -> f64 {
        clamp_optional(value, self.min, self.max)
    }
}

/// A numeric input with optional bounds, arrow-key stepping and a clear
/// button.
///
/// While focused the surface keeps whatever the user typed; the stored value
/// is the parsed, clamped and filtered number. Losing focus, or any change
/// not made by typing, rewrites the surface from the stored value.
///
/// # Example
/// ```rust
/// use forma_inputs::prelude::*;
///
/// let mut qty = InputNumber::new().min(5.0).max(2.0);
/// qty.set_value(10.0).unwrap();
/// assert_eq!(*qty.value(), 5.0);
/// ```
pub struct InputNumber {
    id: WidgetId,
    name: String,
    cell: ValueCell<f64>,
    props: CommonProps,
    bounds: NumberBounds,
    surface: TextEditState,
    focused: bool,
}

static NUMBER_ATTRIBUTES: &[AttributeSpec<InputNumber>] = &[
    AttributeSpec {
        name: "value",
        apply: |w, raw| {
            let v = raw.map_or(*w.cell.default_value(), parse_float);
            let _ = w.set_value(v);
        },
    },
    AttributeSpec { name: "min", apply: |w, raw| w.set_min(attrs::number_or_null("min", raw)) },
    AttributeSpec { name: "max", apply: |w, raw| w.set_max(attrs::number_or_null("max", raw)) },
    AttributeSpec { name: "step", apply: |w, raw| w.set_step(attrs::number_or_null("step", raw)) },
    AttributeSpec { name: "placeholder", apply: apply_placeholder::<InputNumber> },
    AttributeSpec { name: "disabled", apply: apply_disabled::<InputNumber> },
    AttributeSpec { name: "readonly", apply: apply_read_only::<InputNumber> },
    AttributeSpec { name: "autocomplete", apply: apply_autocomplete::<InputNumber> },
    AttributeSpec { name: "inputmode", apply: apply_input_mode::<InputNumber> },
];

impl InputNumber {
    pub fn new() -> Self {
        Self {
            id: WidgetId::new(),
            name: String::new(),
            cell: ValueCell::new(0.0),
            props: CommonProps::default(),
            bounds: NumberBounds::default(),
            surface: TextEditState::new(format_number_text(0.0)),
            focused: false,
        }
    }

    // ── builder ───────────────────────────────────────────────────────────

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Initial value, clamped but unfiltered, without notifying.
    pub fn with_value(mut self, v: f64) -> Self {
        self.cell.init(self.bounds.clamp(v));
        self.reformat();
        self
    }

    pub fn with_default(mut self, v: f64) -> Self {
        self.cell.set_default(v);
        self
    }

    pub fn min(mut self, v: f64) -> Self { self.bounds.min = Some(v); self.init_clamped(); self }
    pub fn max(mut self, v: f64) -> Self { self.bounds.max = Some(v); self.init_clamped(); self }
    pub fn step(mut self, v: f64) -> Self { self.bounds.step = Some(v); self }
    pub fn disabled(mut self, v: bool) -> Self { self.props.disabled = v; self }
    pub fn read_only(mut self, v: bool) -> Self { self.props.read_only = v; self }
    pub fn autocomplete(mut self, v: impl Into<String>) -> Self { self.props.autocomplete = v.into(); self }
    pub fn input_mode(mut self, v: impl Into<String>) -> Self { self.props.input_mode = v.into(); self }

    pub fn placeholder(mut self, text: impl Into<String>) -> Self {
        let text: String = text.into();
        self.props.placeholder = attrs::placeholder(Some(text.as_str()));
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

    // ── accessors ─────────────────────────────────────────────────────────

    pub fn name(&self) -> &str { &self.name }
    pub fn props(&self) -> &CommonProps { &self.props }
    pub fn bounds(&self) -> NumberBounds { self.bounds }
    pub fn surface(&self) -> &TextEditState { &self.surface }
    pub fn set_disabled(&mut self, v: bool) { self.props.disabled = v; }
    pub fn set_read_only(&mut self, v: bool) { self.props.read_only = v; }

    /// Input-mode hint handed to the platform keyboard.
    ///
    /// `"default"` resolves to `"decimal"` for an integer step and
    /// `"numeric"` otherwise (including no step).
    pub fn effective_input_mode(&self) -> &str {
        if self.props.input_mode != "default" {
            return &self.props.input_mode;
        }
        match self.bounds.step {
            Some(s) if s.is_finite() && s.fract() == 0.0 => "decimal",
            _ => "numeric",
        }
    }

    pub fn set_min(&mut self, v: Option<f64>) {
        self.bounds.min = v;
        self.reclamp();
    }

    pub fn set_max(&mut self, v: Option<f64>) {
        self.bounds.max = v;
        self.reclamp();
    }

    pub fn set_step(&mut self, v: Option<f64>) {
        self.bounds.step = v;
    }

    /// Whether the clear button is shown.
    pub fn clear_visible(&self) -> bool {
        self.props.is_interactive() && !self.has_same_value_as(self.cell.default_value())
    }

    /// Clear button pressed: clear, then take focus.
    pub fn press_clear(&mut self, ctx: &mut EventCtx) -> bool {
        if !self.clear_visible() {
            return false;
        }
        self.clear_value();
        ctx.request_focus(self.id);
        true
    }

    /// Arrow-key step: `step` (default 1), ten times with Shift.
    pub fn step_by(&mut self, direction: f64, shift: bool) {
        let step = self.bounds.step.unwrap_or(1.0);
        let delta = step * if shift { 10.0 } else { 1.0 } * direction;
        let _ = self.commit(self.cell.get() + delta);
        self.reformat();
    }

    // ── internal ──────────────────────────────────────────────────────────

    /// Clamp, then through the filters.
    fn commit(&mut self, candidate: f64) -> Result<(), FilterError> {
        self.cell.commit(self.bounds.clamp(candidate))
    }

    fn reclamp(&mut self) {
        let current = *self.cell.get();
        let clamped = self.bounds.clamp(current);
        if !same_value_zero(clamped, current) {
            log::debug!("number {} re-clamped {} -> {}", self.id, current, clamped);
            let _ = self.cell.commit(clamped);
            self.reformat();
        }
    }

    fn init_clamped(&mut self) {
        let clamped = self.bounds.clamp(*self.cell.get());
        self.cell.init(clamped);
        self.reformat();
    }

    fn reformat(&mut self) {
        self.surface.set_text(format_number_text(*self.cell.get()));
    }

    fn on_typed(&mut self, event: &UiEvent) -> EventResult {
        let policy = EditPolicy { editable: !self.props.read_only, ..EditPolicy::SINGLE_LINE };
        let out = self.surface.on_event(event, policy);
        if out.changed {
            let parsed = parse_number_text(self.surface.text());
            let _ = self.commit(parsed);
        }
        if out.consumed { EventResult::Consumed } else { EventResult::Ignored }
    }
}

impl Default for InputNumber {
    fn default() -> Self {
        Self::new()
    }
}

impl HasCommonProps for InputNumber {
    fn common_mut(&mut self) -> &mut CommonProps {
        &mut self.props
    }
}

impl ValueHolder<f64> for InputNumber {
    fn value(&self) -> &f64 {
        self.cell.get()
    }

    fn default_value(&self) -> f64 {
        *self.cell.default_value()
    }

    fn set_value(&mut self, candidate: f64) -> Result<(), FilterError> {
        let result = self.commit(candidate);
        self.reformat();
        result
    }
}

impl Clearable for InputNumber {
    fn clear_value(&mut self) {
        // The default is clamped like any candidate; a rejection keeps the value.
        let _ = self.commit(*self.cell.default_value());
        self.reformat();
    }
}

impl Focusable for InputNumber {
    fn focus(&mut self) -> bool {
        if self.props.disabled {
            return false;
        }
        self.focused = true;
        self.cell.emit_focus();
        true
    }

    fn blur(&mut self) {
        self.focused = false;
        self.reformat();
        self.cell.emit_blur();
    }

    fn is_focused(&self) -> bool {
        self.focused
    }

    fn is_focusable(&self) -> bool {
        !self.props.disabled
    }
}

impl Widget for InputNumber {
    fn id(&self) -> WidgetId {
        self.id
    }

    fn kind(&self) -> &'static str {
        "InputNumber"
    }

    fn on_event(&mut self, event: &UiEvent, _rect: Rect, _ctx: &mut EventCtx) -> EventResult {
        if self.props.disabled {
            return EventResult::Ignored;
        }
        match event {
            UiEvent::PointerDown { .. } => EventResult::Consumed,
            UiEvent::KeyPress { key: key @ (Key::ArrowUp | Key::ArrowDown), modifiers } => {
                if !self.props.read_only {
                    let dir = if *key == Key::ArrowUp { 1.0 } else { -1.0 };
                    self.step_by(dir, modifiers.shift);
                }
                EventResult::Consumed
            }
            _ => self.on_typed(event),
        }
    }

    fn attached(&mut self, ctx: &AttachCtx<'_>) {
        self.cell.bind(self.id, ctx.log());
    }

    fn detached(&mut self) {
        self.cell.unbind();
        self.focused = false;
    }

    fn set_attribute(&mut self, name: &str, value: Option<&str>) -> bool {
        apply_attribute(NUMBER_ATTRIBUTES, self, name, value)
    }

    fn activate(&mut self, affordance: Affordance, ctx: &mut EventCtx) -> bool {
        affordance == Affordance::Clear && self.press_clear(ctx)
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
