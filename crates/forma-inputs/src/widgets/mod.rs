//! The concrete inputs.

pub mod common;
pub mod number;
pub mod password;
pub mod slider_gradient;
pub mod text;
pub mod textarea;

pub use common::CommonProps;
pub use number::{InputNumber, NumberBounds};
pub use password::InputPassword;
pub use slider_gradient::{InputSliderGradient, SliderVisual};
pub use text::InputText;
pub use textarea::InputTextarea;
