//! Pieces shared by the text-family and numeric inputs.

use std::rc::Rc;

use crate::attrs;
use crate::contract::ValueCell;
use crate::event::{EventResult, UiEvent};
use crate::filter::{FilterError, FilterPipeline};
use crate::text_edit::{EditPolicy, TextEditState};
use crate::widget::{AttachCtx, WidgetId};

// ── CommonProps ───────────────────────────────────────────────────────────

/// Properties every text-like input carries.
///
/// `autocomplete` and `input_mode` are hints for the platform keyboard and
/// autofill; nothing here interprets them.
#[derive(Debug, Clone, PartialEq)]
pub struct CommonProps {
    pub placeholder: Option<String>,
    pub disabled: bool,
    pub read_only: bool,
    pub autocomplete: String,
    pub input_mode: String,
}

impl CommonProps {
    /// Neither disabled nor read-only.
    #[inline]
    pub fn is_interactive(&self) -> bool {
        !self.disabled && !self.read_only
    }
}

impl Default for CommonProps {
    fn default() -> Self {
        Self {
            placeholder: None,
            disabled: false,
            read_only: false,
            autocomplete: "off".to_string(),
            input_mode: "default".to_string(),
        }
    }
}

pub(crate) trait HasCommonProps {
    fn common_mut(&mut self) -> &mut CommonProps;
}

pub(crate) fn apply_placeholder<W: HasCommonProps>(w: &mut W, raw: Option<&str>) {
    w.common_mut().placeholder = attrs::placeholder(raw);
}

pub(crate) fn apply_disabled<W: HasCommonProps>(w: &mut W, raw: Option<&str>) {
    w.common_mut().disabled = attrs::flag(raw);
}

pub(crate) fn apply_read_only<W: HasCommonProps>(w: &mut W, raw: Option<&str>) {
    w.common_mut().read_only = attrs::flag(raw);
}

pub(crate) fn apply_autocomplete<W: HasCommonProps>(w: &mut W, raw: Option<&str>) {
    w.common_mut().autocomplete = raw.unwrap_or("off").to_string();
}

pub(crate) fn apply_input_mode<W: HasCommonProps>(w: &mut W, raw: Option<&str>) {
    w.common_mut().input_mode = raw.unwrap_or("default").to_string();
}

// ── TextCore ──────────────────────────────────────────────────────────────

/// State and behaviour shared by the string-valued inputs.
///
/// Every edit on the surface commits the whole surface text. After each
/// commit the surface is brought back in line with the stored value, so a
/// filter that rewrites or rejects input shows immediately.
pub struct TextCore {
    pub(crate) id: WidgetId,
    pub(crate) name: String,
    pub(crate) cell: ValueCell<String>,
    pub(crate) props: CommonProps,
    pub(crate) surface: TextEditState,
    pub(crate) focused: bool,
}

impl TextCore {
    pub fn new() -> Self {
        Self {
            id: WidgetId::new(),
            name: String::new(),
            cell: ValueCell::new(String::new()),
            props: CommonProps::default(),
            surface: TextEditState::default(),
            focused: false,
        }
    }

    /// Builder-time value: stored unfiltered and without notifying.
    pub fn init_value(&mut self, value: String) {
        self.surface.set_text(value.clone());
        self.cell.init(value);
    }

    pub fn set_filters(&mut self, filters: Rc<FilterPipeline<String>>) {
        self.cell.set_filters(filters);
    }

    pub fn set_value(&mut self, value: String) -> Result<(), FilterError> {
        let result = self.cell.commit(value);
        self.sync_surface();
        result
    }

    pub fn clear(&mut self) {
        // A rejection is logged by the cell.
        let _ = self.cell.clear();
        self.sync_surface();
    }

    pub fn focus(&mut self) -> bool {
        if self.props.disabled {
            return false;
        }
        self.focused = true;
        self.cell.emit_focus();
        true
    }

    pub fn blur(&mut self) {
        self.focused = false;
        self.cell.emit_blur();
    }

    /// The clear button shows only on an interactive, non-default input.
    pub fn clear_visible(&self) -> bool {
        self.props.is_interactive() && self.cell.get() != self.cell.default_value()
    }

    /// Route an editing event through the surface.
    pub fn edit(&mut self, event: &UiEvent, mut policy: EditPolicy) -> EventResult {
        if self.props.disabled {
            return EventResult::Ignored;
        }
        policy.editable &= !self.props.read_only;
        let out = self.surface.on_event(event, policy);
        if out.changed {
            let text = self.surface.text().to_string();
            // A rejection is logged by the cell; the surface snaps back below.
            let _ = self.cell.commit(text);
            self.sync_surface();
        }
        if out.consumed { EventResult::Consumed } else { EventResult::Ignored }
    }

    pub fn attached(&mut self, ctx: &AttachCtx<'_>) {
        self.cell.bind(self.id, ctx.log());
    }

    pub fn detached(&mut self) {
        self.cell.unbind();
        self.focused = false;
    }

    fn sync_surface(&mut self) {
        if self.surface.text() != self.cell.get() {
            self.surface.set_text(self.cell.get().clone());
        }
    }
}

impl Default for TextCore {
    fn default() -> Self {
        Self::new()
    }
}

pub(crate) trait HasTextCore: HasCommonProps {
    fn core_mut(&mut self) -> &mut TextCore;
}

pub(crate) fn apply_text_value<W: HasTextCore>(w: &mut W, raw: Option<&str>) {
    // Rejections are logged by the cell.
    let _ = w.core_mut().set_value(raw.unwrap_or_default().to_string());
}

// ── String-valued widget boilerplate ────────────────────────────────────

/// Builder methods and contract impls for widgets wrapping a `core: TextCore`.
macro_rules! text_widget {
    ($ty:ident) => {
        impl $ty {
            /// Name reported to the host (e.g. the form field name).
            pub fn named(mut self, name: impl Into<String>) -> Self {
                self.core.name = name.into();
                self
            }
            /// Initial value, stored as is and without notifying.
            pub fn with_value(mut self, value: impl Into<String>) -> Self {
                self.core.init_value(value.into());
                self
            }
            /// The value [`Clearable::clear_value`] resets to.
            pub fn with_default(mut self, value: impl Into<String>) -> Self {
                self.core.cell.set_default(value.into());
                self
            }
            pub fn placeholder(mut self, text: impl Into<String>) -> Self {
                let text: String = text.into();
                self.core.props.placeholder = $crate::attrs::placeholder(Some(text.as_str()));
                self
            }
            pub fn disabled(mut self, v: bool) -> Self { self.core.props.disabled = v; self }
            pub fn read_only(mut self, v: bool) -> Self { self.core.props.read_only = v; self }
            pub fn autocomplete(mut self, v: impl Into<String>) -> Self { self.core.props.autocomplete = v.into(); self }
            pub fn input_mode(mut self, v: impl Into<String>) -> Self { self.core.props.input_mode = v.into(); self }
            pub fn filters(mut self, filters: Rc<FilterPipeline<String>>) -> Self {
                self.core.set_filters(filters);
                self
            }
            pub fn on_update(mut self, f: impl FnMut(&String) + 'static) -> Self {
                self.core.cell.observers_mut().on_update(f);
                self
            }
            pub fn on_focus(mut self, f: impl FnMut() + 'static) -> Self {
                self.core.cell.observers_mut().on_focus(f);
                self
            }
            pub fn on_blur(mut self, f: impl FnMut() + 'static) -> Self {
                self.core.cell.observers_mut().on_blur(f);
                self
            }

            pub fn name(&self) -> &str { &self.core.name }
            pub fn props(&self) -> &CommonProps { &self.core.props }
            /// The text currently shown on the editing surface.
            pub fn surface(&self) -> &TextEditState { &self.core.surface }
            pub fn set_disabled(&mut self, v: bool) { self.core.props.disabled = v; }
            pub fn set_read_only(&mut self, v: bool) { self.core.props.read_only = v; }
        }

        impl HasCommonProps for $ty {
            fn common_mut(&mut self) -> &mut CommonProps { &mut self.core.props }
        }

        impl HasTextCore for $ty {
            fn core_mut(&mut self) -> &mut TextCore { &mut self.core }
        }

        impl ValueHolder<String> for $ty {
            fn value(&self) -> &String { self.core.cell.get() }
            fn default_value(&self) -> String { self.core.cell.default_value().clone() }
            fn set_value(&mut self, candidate: String) -> Result<(), FilterError> {
                self.core.set_value(candidate)
            }
        }

        impl Clearable for $ty {
            fn clear_value(&mut self) { self.core.clear(); }
        }

        impl Focusable for $ty {
            fn focus(&mut self) -> bool { self.core.focus() }
            fn blur(&mut self) { self.core.blur(); }
            fn is_focused(&self) -> bool { self.core.focused }
            fn is_focusable(&self) -> bool { !self.core.props.disabled }
        }

        impl Default for $ty {
            fn default() -> Self { Self::new() }
        }
    };
}

pub(crate) use text_widget;

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    use crate::event::Modifiers;
    use forma_core::input::Key;

    fn typed(text: &str) -> UiEvent {
        UiEvent::TextInput { text: text.to_string() }
    }

    #[test]
    fn filter_rewrite_shows_on_the_surface() {
        let mut core = TextCore::new();
        core.set_filters(Rc::new(FilterPipeline::new().with(|s: String| s.to_lowercase())));
        core.edit(&typed("AB"), EditPolicy::SINGLE_LINE);
        assert_eq!(core.cell.get(), "ab");
        assert_eq!(core.surface.text(), "ab");
    }

    #[test]
    fn rejected_edit_snaps_surface_back() {
        let mut core = TextCore::new();
        core.set_filters(Rc::new(FilterPipeline::new().with_fallible(|s: String| {
            if s.chars().all(|c| c.is_ascii_digit()) { Ok(s) } else { Err(FilterError::new("digits only")) }
        })));
        core.edit(&typed("12"), EditPolicy::SINGLE_LINE);
        core.edit(&typed("x"), EditPolicy::SINGLE_LINE);
        assert_eq!(core.cell.get(), "12");
        assert_eq!(core.surface.text(), "12");
    }

    #[test]
    fn read_only_keeps_value_and_disabled_ignores_everything() {
        let mut core = TextCore::new();
        core.init_value("v".to_string());
        core.props.read_only = true;
        assert_eq!(core.edit(&typed("x"), EditPolicy::SINGLE_LINE), EventResult::Consumed);
        assert_eq!(core.cell.get(), "v");

        core.props.disabled = true;
        let home = UiEvent::KeyPress { key: Key::Home, modifiers: Modifiers::default() };
        assert_eq!(core.edit(&home, EditPolicy::SINGLE_LINE), EventResult::Ignored);
        assert!(!core.focus());
    }

    #[test]
    fn each_edit_notifies_once() {
        let mut core = TextCore::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        core.cell.observers_mut().on_update(move |v: &String| sink.borrow_mut().push(v.clone()));
        core.edit(&typed("a"), EditPolicy::SINGLE_LINE);
        core.edit(&typed("b"), EditPolicy::SINGLE_LINE);
        assert_eq!(*seen.borrow(), vec!["a".to_string(), "ab".to_string()]);
    }

    #[test]
    fn clear_visibility() {
        let mut core = TextCore::new();
        assert!(!core.clear_visible());
        core.init_value("x".to_string());
        assert!(core.clear_visible());
        core.props.read_only = true;
        assert!(!core.clear_visible());
    }
}
