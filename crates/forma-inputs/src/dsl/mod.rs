//! Loading forms from `.fml` markup.
//!
//! ## Format
//!
//! ```fml
//! Form {
//!     InputText "email" { placeholder: "you@example.com" autocomplete: email }
//!     InputNumber "qty" { top: 40 min: 0 max: 10 step: 1 }
//!     InputSliderGradient "hue" { top: 80 color-steps: "#f00,#0f0,#00f" }
//! }
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use forma_inputs::dsl::FormLoader;
//!
//! let form = FormLoader::new()
//!     .load(r#"Form { InputNumber "qty" { min: 0 max: 10 } }"#)
//!     .unwrap();
//! assert!(form.find("qty").is_some());
//! ```

pub mod builder;
pub mod error;

pub use builder::FormLoader;
pub use error::FormLoadError;
