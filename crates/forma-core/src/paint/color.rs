use std::fmt;

/// Straight-alpha RGBA color.
///
/// Channel ranges:
/// - `red`, `green`, `blue` in `[0, 255]`
/// - `alpha` in `[0, 1]`
///
/// This is the shape gradient stops are expressed in; renderers convert to
/// whatever their pipeline needs.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Color {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
    pub alpha: f64,
}

impl Color {
    #[inline]
    pub const fn transparent() -> Self {
        Self { red: 0.0, green: 0.0, blue: 0.0, alpha: 0.0 }
    }

    #[inline]
    pub const fn rgba(red: f64, green: f64, blue: f64, alpha: f64) -> Self {
        Self { red, green, blue, alpha }
    }

    /// Creates a color from straight RGBA bytes; alpha is rescaled to `[0, 1]`.
    #[inline]
    pub fn from_rgba_u8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self::rgba(f64::from(r), f64::from(g), f64::from(b), f64::from(a) / 255.0)
    }

    /// Parses a hex color literal.
    ///
    /// Accepted forms (leading `#` optional, surrounding whitespace ignored):
    /// `rgb`, `rgba`, `rrggbb`, `rrggbbaa`. Missing alpha means opaque.
    pub fn from_hex(src: &str) -> Result<Self, HexColorError> {
        let trimmed = src.trim();
        let hex = trimmed.strip_prefix('#').unwrap_or(trimmed);
        let err = || HexColorError { input: src.to_string() };

        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(err());
        }

        let nibble = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).map_err(|_| err());
        let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| err());

        match hex.len() {
            3 | 4 => {
                let r = nibble(0)? * 17;
                let g = nibble(1)? * 17;
                let b = nibble(2)? * 17;
                let a = if hex.len() == 4 { nibble(3)? * 17 } else { 255 };
                Ok(Self::from_rgba_u8(r, g, b, a))
            }
            6 | 8 => {
                let r = byte(0)?;
                let g = byte(2)?;
                let b = byte(4)?;
                let a = if hex.len() == 8 { byte(6)? } else { 255 };
                Ok(Self::from_rgba_u8(r, g, b, a))
            }
            _ => Err(err()),
        }
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.red.is_finite() && self.green.is_finite() && self.blue.is_finite() && self.alpha.is_finite()
    }

    /// CSS `rgba(...)` form with three decimals per channel.
    pub fn to_css(self) -> String {
        format!(
            "rgba({:.3}, {:.3}, {:.3}, {:.3})",
            self.red, self.green, self.blue, self.alpha
        )
    }
}

/// A hex color literal that could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HexColorError {
    pub input: String,
}

impl fmt::Display for HexColorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid hex color {:?}", self.input)
    }
}

impl std::error::Error for HexColorError {}
