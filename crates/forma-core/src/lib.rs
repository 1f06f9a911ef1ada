//! Forma core crate.
//!
//! Platform-agnostic pieces shared by the widget layer: geometry, paint
//! sources, raw input, JS-compatible number handling, the single-threaded
//! turn runtime and logging setup.

pub mod coords;
pub mod input;
pub mod logging;
pub mod numbers;
pub mod paint;
pub mod runtime;
