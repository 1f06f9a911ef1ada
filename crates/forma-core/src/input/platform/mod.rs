//! Platform event translation.
//!
//! Enable the `winit` feature to translate `winit` window events.

#[cfg(feature = "winit")]
pub mod winit;
