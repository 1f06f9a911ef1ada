//! Logging utilities.
//!
//! Widgets log through the `log` facade only; this module owns the one place
//! a backend (`env_logger`) gets installed.

mod init;

pub use init::{init_logging, LoggingConfig};
