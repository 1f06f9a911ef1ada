use std::any::Any;
use std::rc::Rc;

use forma_core::coords::Rect;

use crate::attrs::{apply_attribute, AttributeSpec};
use crate::contract::{Clearable, Focusable, ValueHolder};
use crate::event::{EventResult, UiEvent};
use crate::filter::{FilterError, FilterPipeline};
use crate::text_edit::{EditPolicy, TextEditState};
use crate::widget::{AttachCtx, EventCtx, Widget, WidgetId};

use super::common::{
    apply_autocomplete, apply_disabled, apply_input_mode, apply_placeholder, apply_read_only,
    apply_text_value, text_widget, CommonProps, HasCommonProps, HasTextCore, TextCore,
};

/// A multi-line text input. Enter inserts a line break.
pub struct InputTextarea {
    core: TextCore,
}

static TEXTAREA_ATTRIBUTES: &[AttributeSpec<InputTextarea>] = &[
    AttributeSpec { name: "value", apply: apply_text_value::<InputTextarea> },
    AttributeSpec { name: "placeholder", apply: apply_placeholder::<InputTextarea> },
    AttributeSpec { name: "disabled", apply: apply_disabled::<InputTextarea> },
    AttributeSpec { name: "readonly", apply: apply_read_only::<InputTextarea> },
    AttributeSpec { name: "autocomplete", apply: apply_autocomplete::<InputTextarea> },
    AttributeSpec { name: "inputmode", apply: apply_input_mode::<InputTextarea> },
];

impl InputTextarea {
    pub fn new() -> Self {
        Self { core: TextCore::new() }
    }

    /// Number of lines in the value; an empty value has one.
    pub fn line_count(&self) -> usize {
        self.core.cell.get().split('\n').count()
    }
}

text_widget!(InputTextarea);

impl Widget for InputTextarea {
    fn id(&self) -> WidgetId {
        self.core.id
    }

    fn kind(&self) -> &'static str {
        "InputTextarea"
    }

    fn on_event(&mut self, event: &UiEvent, _rect: Rect, _ctx: &mut EventCtx) -> EventResult {
        match event {
            UiEvent::PointerDown { .. } if !self.core.props.disabled => EventResult::Consumed,
            _ => self.core.edit(event, EditPolicy::MULTI_LINE),
        }
    }

    fn attached(&mut self, ctx: &AttachCtx<'_>) {
        self.core.attached(ctx);
    }

    fn detached(&mut self) {
        self.core.detached();
    }

    fn set_attribute(&mut self, name: &str, value: Option<&str>) -> bool {
        apply_attribute(TEXTAREA_ATTRIBUTES, self, name, value)
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
