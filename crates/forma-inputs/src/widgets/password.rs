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

/// A password input with a show/hide toggle.
///
/// Toggling visibility never touches the value. The toggle hands focus back
/// to the input after the current turn, the way a click on the eye icon
/// would leave the caret in the field.
pub struct InputPassword {
    core: TextCore,
    visible: bool,
}

static PASSWORD_ATTRIBUTES: &[AttributeSpec<InputPassword>] = &[
    AttributeSpec { name: "value", apply: apply_text_value::<InputPassword> },
    AttributeSpec { name: "placeholder", apply: apply_placeholder::<InputPassword> },
    AttributeSpec { name: "disabled", apply: apply_disabled::<InputPassword> },
    AttributeSpec { name: "readonly", apply: apply_read_only::<InputPassword> },
    AttributeSpec { name: "autocomplete", apply: apply_autocomplete::<InputPassword> },
    AttributeSpec { name: "inputmode", apply: apply_input_mode::<InputPassword> },
];

impl InputPassword {
    pub fn new() -> Self {
        let mut core = TextCore::new();
        core.cell.set_redacted(true);
        Self { core, visible: false }
    }

    #[inline]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// `"text"` while revealed, `"password"` otherwise.
    pub fn input_type(&self) -> &'static str {
        if self.visible { "text" } else { "password" }
    }

    /// Whether the show/hide toggle is shown.
    pub fn toggle_visible(&self) -> bool {
        self.core.props.is_interactive()
    }

    /// Show or hide the value and schedule a refocus for after this turn.
    ///
    /// Refused while disabled or read-only.
    pub fn toggle_visibility(&mut self, ctx: &mut EventCtx) -> bool {
        if !self.toggle_visible() {
            return false;
        }
        self.visible = !self.visible;
        log::debug!("password {} visibility -> {}", self.core.id, self.visible);
        ctx.defer_focus(self.core.id);
        true
    }

    fn policy(&self) -> EditPolicy {
        EditPolicy { copyable: self.visible, ..EditPolicy::SINGLE_LINE }
    }
}

text_widget!(InputPassword);

impl Widget for InputPassword {
    fn id(&self) -> WidgetId {
        self.core.id
    }

    fn kind(&self) -> &'static str {
        "InputPassword"
    }

    fn on_event(&mut self, event: &UiEvent, _rect: Rect, _ctx: &mut EventCtx) -> EventResult {
        match event {
            UiEvent::PointerDown { .. } if !self.core.props.disabled => EventResult::Consumed,
            _ => {
                let policy = self.policy();
                self.core.edit(event, policy)
            }
        }
    }

    fn attached(&mut self, ctx: &AttachCtx<'_>) {
        self.core.attached(ctx);
    }

    fn detached(&mut self) {
        self.core.detached();
    }

    fn set_attribute(&mut self, name: &str, value: Option<&str>) -> bool {
        apply_attribute(PASSWORD_ATTRIBUTES, self, name, value)
    }

    fn activate(&mut self, affordance: Affordance, ctx: &mut EventCtx) -> bool {
        affordance == Affordance::ToggleVisibility && self.toggle_visibility(ctx)
    }

    fn display_value(&self) -> String {
        if self.visible {
            self.core.cell.get().clone()
        } else {
            "\u{2022}".repeat(self.core.cell.get().chars().count())
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
