use std::cmp::Ordering;

use super::color::{Color, HexColorError};

/// A single gradient stop.
///
/// `offset` is the logical position in `[0, 1]`; it is not enforced.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ColorStop {
    pub offset: f64,
    pub color: Color,
}

impl ColorStop {
    #[inline]
    pub const fn new(offset: f64, color: Color) -> Self {
        Self { offset, color }
    }

    /// Rendered position in percent.
    ///
    /// The logical `[0, 1]` range is compressed into the central `[25, 75]`
    /// band; the outer quarters are covered by the handle's travel margin.
    #[inline]
    pub fn display_offset(&self) -> f64 {
        (self.offset / 2.0 + 0.25) * 100.0
    }
}

/// Horizontal (90deg) gradient behind a slider track.
///
/// Stops are kept sorted ascending by offset. Sorting is stable, so stops
/// sharing an offset keep their insertion order.
#[derive(Debug, Clone, PartialEq)]
pub struct Gradient {
    stops: Vec<ColorStop>,
}

impl Gradient {
    pub fn new(mut stops: Vec<ColorStop>) -> Self {
        stops.sort_by(|a, b| a.offset.partial_cmp(&b.offset).unwrap_or(Ordering::Equal));
        Self { stops }
    }

    /// Builds evenly spaced stops from hex literals, in input order.
    ///
    /// The first color sits at offset 0 and the last at offset 1. A single
    /// color is spread over both ends so the spacing never divides by zero.
    pub fn from_hex_colors<I, S>(colors: I) -> Result<Self, HexColorError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let colors = colors
            .into_iter()
            .map(|hex| Color::from_hex(hex.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;

        let stops = match colors.as_slice() {
            [] => Vec::new(),
            [only] => vec![ColorStop::new(0.0, *only), ColorStop::new(1.0, *only)],
            many => {
                let last = (many.len() - 1) as f64;
                many.iter()
                    .enumerate()
                    .map(|(i, c)| ColorStop::new(i as f64 / last, *c))
                    .collect()
            }
        };
        Ok(Self { stops })
    }

    /// Two-stop neutral gray, transparent to opaque (`#8880` → `#888f`).
    pub fn neutral() -> Self {
        Self {
            stops: vec![
                ColorStop::new(0.0, Color::rgba(136.0, 136.0, 136.0, 0.0)),
                ColorStop::new(1.0, Color::rgba(136.0, 136.0, 136.0, 1.0)),
            ],
        }
    }

    #[inline]
    pub fn stops(&self) -> &[ColorStop] {
        &self.stops
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    /// Stops as they are handed to the renderer.
    ///
    /// An empty gradient renders as a single fully transparent black stop.
    pub fn rendered_stops(&self) -> Vec<ColorStop> {
        if self.stops.is_empty() {
            vec![ColorStop::new(0.0, Color::transparent())]
        } else {
            self.stops.clone()
        }
    }

    /// CSS `linear-gradient(90deg, ...)` with display offsets.
    pub fn to_css(&self) -> String {
        let parts: Vec<String> = self
            .rendered_stops()
            .iter()
            .map(|s| format!("{} {:.3}%", s.color.to_css(), s.display_offset()))
            .collect();
        format!("linear-gradient(90deg, {})", parts.join(", "))
    }
}

impl Default for Gradient {
    fn default() -> Self {
        Self::neutral()
    }
}
