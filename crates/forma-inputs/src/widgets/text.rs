use std::any::Any;
use std::rc::Rc;

use forma_core::coords::Rect;

use crate::attrs::{apply_attribute, AttributeSpec};
use crate::contract::{Clearable, Focusable, ValueHolder};
use crate::event::{EventResult, UiEvent};
use crate::filter::{FilterError, FilterPipeline};
use crate::text_edit::{EditPolicy, TextEditState};
use crate::widget::{Affordance, AttachCtx, EventCtx, Widget, WidgetId};

use super::common::{
    apply_autocomplete, apply_disabled, apply_input_mode, apply_placeholder, apply_read_only,
    apply_text_value, text_widget, CommonProps, HasCommonProps, HasTextCore, TextCore,
};

/// A single-line text input with a clear button.
///
/// # Example
/// ```rust
/// use forma_inputs::prelude::*;
///
/// let email = InputText::new()
///     .named("email")
///     .placeholder("you@example.com")
///     .autocomplete("email")
///     .on_update(|v: &String| println!("email: {v}"));
/// assert_eq!(email.value(), "");
/// ```
pub struct InputText {
    core: TextCore,
}

static TEXT_ATTRIBUTES: &[AttributeSpec<InputText>] = &[
    AttributeSpec { name: "value", apply: apply_text_value::<InputText> },
    AttributeSpec { name: "placeholder", apply: apply_placeholder::<InputText> },
    AttributeSpec { name: "disabled", apply: apply_disabled::<InputText> },
    AttributeSpec { name: "readonly", apply: apply_read_only::<InputText> },
    AttributeSpec { name: "autocomplete", apply: apply_autocomplete::<InputText> },
    AttributeSpec { name: "inputmode", apply: apply_input_mode::<InputText> },
];

impl InputText {
    pub fn new() -> Self {
        Self { core: TextCore::new() }
    }

    /// Whether the clear button is shown.
    pub fn clear_visible(&self) -> bool {
        self.core.clear_visible()
    }

    /// Clear button pressed: clear, then take focus.
    pub fn press_clear(&mut self, ctx: &mut EventCtx) -> bool {
        if !self.clear_visible() {
            return false;
        }
        self.clear_value();
        ctx.request_focus(self.core.id);
        true
    }
}

text_widget!(InputText);

impl Widget for InputText {
    fn id(&self) -> WidgetId {
        self.core.id
    }

    fn kind(&self) -> &'static str {
        "InputText"
    }

    fn on_event(&mut self, event: &UiEvent, _rect: Rect, _ctx: &mut EventCtx) -> EventResult {
        match event {
            UiEvent::PointerDown { .. } if !self.core.props.disabled => EventResult::Consumed,
            _ => self.core.edit(event, EditPolicy::SINGLE_LINE),
        }
    }

    fn attached(&mut self, ctx: &AttachCtx<'_>) {
        self.core.attached(ctx);
    }

    fn detached(&mut self) {
        self.core.detached();
    }

    fn set_attribute(&mut self, name: &str, value: Option<&str>) -> bool {
        apply_attribute(TEXT_ATTRIBUTES, self, name, value)
    }

    fn activate(&mut self, affordance: Affordance, ctx: &mut EventCtx) -> bool {
        affordance == Affordance::Clear && self.press_clear(ctx)
    }

    fn display_value(&self) -> String {
        self.core.cell.get().clone()
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

    use crate::event::Modifiers;
    use forma_core::input::Key;

    fn typed(text: &str) -> UiEvent {
        UiEvent::TextInput { text: text.to_string() }
    }

    fn rect() -> Rect {
        Rect::new(0.0, 0.0, 200.0, 32.0)
    }

    #[test]
    fn typing_commits_verbatim() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        let mut w = InputText::new().on_update(move |v: &String| sink.borrow_mut().push(v.clone()));
        let mut ctx = EventCtx::new();

        w.on_event(&typed("  hi "), rect(), &mut ctx);
        assert_eq!(w.value(), "  hi ");
        assert_eq!(*seen.borrow(), vec!["  hi ".to_string()]);
    }

    #[test]
    fn clear_always_notifies() {
        let count = Rc::new(RefCell::new(0));
        let sink = count.clone();
        let mut w = InputText::new().on_update(move |_: &String| *sink.borrow_mut() += 1);
        w.clear_value();
        assert_eq!(*count.borrow(), 1);
        assert_eq!(w.value(), "");
    }

    #[test]
    fn clear_button_clears_then_requests_focus() {
        let mut w = InputText::new().with_value("abc");
        let mut ctx = EventCtx::new();
        assert!(w.activate(Affordance::Clear, &mut ctx));
        assert_eq!(w.value(), "");
        assert_eq!(ctx.focus_request(), Some(w.id()));

        let mut ctx = EventCtx::new();
        assert!(!w.activate(Affordance::Clear, &mut ctx));
        assert_eq!(ctx.focus_request(), None);
    }

    #[test]
    fn custom_default_value() {
        let mut w = InputText::new().with_default("n/a").with_value("x");
        assert!(w.clear_visible());
        w.clear_value();
        assert_eq!(w.value(), "n/a");
        assert!(!w.clear_visible());
    }

    #[test]
    fn disabled_and_read_only_block_typing_but_not_clear() {
        let mut w = InputText::new().with_value("keep").read_only(true);
        let mut ctx = EventCtx::new();
        w.on_event(&typed("x"), rect(), &mut ctx);
        let bs = UiEvent::KeyPress { key: Key::Backspace, modifiers: Modifiers::default() };
        w.on_event(&bs, rect(), &mut ctx);
        assert_eq!(w.value(), "keep");
        assert!(!w.activate(Affordance::Clear, &mut ctx));

        w.set_read_only(false);
        w.set_disabled(true);
        w.on_event(&typed("x"), rect(), &mut ctx);
        assert_eq!(w.value(), "keep");
        assert!(!w.focus());

        w.clear_value();
        assert_eq!(w.value(), "");
    }

    #[test]
    fn focus_and_blur_notify() {
        let events = Rc::new(RefCell::new(Vec::new()));
        let (f, b) = (events.clone(), events.clone());
        let mut w = InputText::new()
            .on_focus(move || f.borrow_mut().push("focus"))
            .on_blur(move || b.borrow_mut().push("blur"));
        assert!(w.focus());
        assert!(w.is_focused());
        w.blur();
        assert_eq!(*events.borrow(), vec!["focus", "blur"]);
    }

    #[test]
    fn attributes() {
        let mut w = InputText::new();
        assert!(w.set_attribute("placeholder", Some("  ")));
        assert_eq!(w.props().placeholder, None);
        assert!(w.set_attribute("readOnly", Some("")));
        assert!(w.props().read_only);
        assert!(w.set_attribute("readonly", None));
        assert!(!w.props().read_only);
        assert!(w.set_attribute("value", Some("v")));
        assert_eq!(w.value(), "v");
        assert_eq!(w.surface().text(), "v");
        assert!(!w.set_attribute("min", Some("1")));
    }

    #[test]
    fn shared_pipeline() {
        let pipeline = Rc::new(FilterPipeline::new().with(|s: String| s.replace(' ', "")));
        let mut a = InputText::new().filters(pipeline.clone());
        let mut b = InputText::new().filters(pipeline);
        assert_eq!(a.set_value("a b".to_string()), Ok(()));
        assert_eq!(b.set_value("c d".to_string()), Ok(()));
        assert_eq!((a.value().as_str(), b.value().as_str()), ("ab", "cd"));
    }
}
