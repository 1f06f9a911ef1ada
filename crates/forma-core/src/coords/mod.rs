//! Coordinate and geometry types shared by the input model and the host.
//!
//! Canonical space:
//! - Logical pixels (DPI-aware)
//! - Origin top-left
//! - +X right, +Y down

mod point;
mod rect;

pub use point::Point;
pub use rect::Rect;
