//! Forma inputs: form controls sharing one value contract.
//!
//! Every widget stores its value in a [`contract::ValueCell`]: a candidate is
//! passed through the widget's [`filter::FilterPipeline`], stored, and
//! observers are notified once. Widgets are driven by a headless
//! [`form::Form`] host that routes input, tracks focus and runs deferred
//! work between turns.
//!
//! # Quick start
//!
//! ```rust
//! use std::rc::Rc;
//! use forma_inputs::prelude::*;
//!
//! let trim = Rc::new(FilterPipeline::new().with(|s: String| s.trim().to_string()));
//!
//! let mut form = Form::new();
//! let email = form.attach(
//!     "email",
//!     Rect::new(0.0, 0.0, 232.0, 32.0),
//!     InputText::new().filters(trim),
//! );
//! form.focus(email);
//! form.dispatch_ui(UiEvent::TextInput { text: " a@b.c ".to_string() });
//!
//! let text = form.get::<InputText>(email).unwrap();
//! assert_eq!(text.value(), "a@b.c");
//! ```
//!
//! # Extending with custom widgets
//!
//! Implement [`widget::Widget`] (plus [`contract::Focusable`] and
//! [`contract::Clearable`]) for any type and attach it like the built-in
//! ones.

pub mod attrs;
pub mod contract;
pub mod dsl;
pub mod event;
pub mod filter;
pub mod focus;
pub mod form;
pub mod text_edit;
pub mod widget;
pub mod widgets;

pub use form::Form;

/// Everything needed to build and drive forms.
pub mod prelude {
    pub use crate::contract::{
        Clearable, Focusable, FormNotification, FormValue, NotificationKind, ValueHolder,
    };
    pub use crate::dsl::{FormLoadError, FormLoader};
    pub use crate::event::{EventResult, Modifiers, UiEvent};
    pub use crate::filter::{FilterError, FilterPipeline};
    pub use crate::form::Form;
    pub use crate::widget::{Affordance, Element, EventCtx, Widget, WidgetId};
    pub use crate::widgets::{
        CommonProps, InputNumber, InputPassword, InputSliderGradient, InputText, InputTextarea,
        NumberBounds, SliderVisual,
    };

    pub use forma_core::coords::{Point, Rect};
    pub use forma_core::input::Key;
    pub use forma_core::paint::{Color, ColorStop, Gradient};
}
