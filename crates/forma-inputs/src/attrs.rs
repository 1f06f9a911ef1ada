//! Typed attribute schema.
//!
//! Markup hands widgets raw attribute text. Each widget declares a static
//! table of [`AttributeSpec`]s mapping an attribute name to a function that
//! parses the text and applies the typed result. Parse failures never cross
//! the widget boundary: they are logged and the property falls back to
//! "unset".

use std::fmt;

use forma_core::numbers::parse_float;
use forma_core::paint::Gradient;

/// One entry of a widget's attribute table.
pub struct AttributeSpec<W> {
    /// Attribute name, matched case-insensitively.
    pub name: &'static str,
    /// Parse and apply. `None` means the attribute was removed.
    pub apply: fn(&mut W, Option<&str>),
}

/// Look `name` up in `table` and apply `raw` to `widget`.
///
/// Returns `false` for unknown attributes.
pub fn apply_attribute<W>(table: &[AttributeSpec<W>], widget: &mut W, name: &str, raw: Option<&str>) -> bool {
    match table.iter().find(|spec| spec.name.eq_ignore_ascii_case(name)) {
        Some(spec) => {
            log::debug!("attribute {} = {:?}", spec.name, raw);
            (spec.apply)(widget, raw);
            true
        }
        None => false,
    }
}

// ── AttributeError ────────────────────────────────────────────────────────

/// An attribute whose text could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeError {
    pub attribute: String,
    pub raw: String,
    pub reason: String,
}

impl AttributeError {
    pub fn new(attribute: &str, raw: &str, reason: impl Into<String>) -> Self {
        Self { attribute: attribute.to_string(), raw: raw.to_string(), reason: reason.into() }
    }
}

impl fmt::Display for AttributeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "attribute {} has unexpected value {:?}: {}", self.attribute, self.raw, self.reason)
    }
}

impl std::error::Error for AttributeError {}

// ── Parsers ───────────────────────────────────────────────────────────────

/// Strict numeric parse: the text must start with a number.
pub fn parse_number(attribute: &str, raw: &str) -> Result<f64, AttributeError> {
    let n = parse_float(raw);
    if n.is_nan() {
        Err(AttributeError::new(attribute, raw, "not a number"))
    } else {
        Ok(n)
    }
}

/// Number or unset. Unparseable text is logged and treated as unset.
pub fn number_or_null(attribute: &str, raw: Option<&str>) -> Option<f64> {
    let raw = raw?;
    match parse_number(attribute, raw) {
        Ok(n) => Some(n),
        Err(e) => {
            log::error!("{e}");
            None
        }
    }
}

/// Lenient numeric parse: missing or empty text and garbage become `NaN`.
pub fn number_or_nan(raw: Option<&str>) -> f64 {
    match raw {
        Some(s) if !s.is_empty() => parse_float(s),
        _ => f64::NAN,
    }
}

/// Placeholder text. Blank or whitespace-only text counts as unset.
pub fn placeholder(raw: Option<&str>) -> Option<String> {
    raw.filter(|s| !s.trim().is_empty()).map(str::to_string)
}

/// Boolean attribute: present means `true`, whatever the text.
#[inline]
pub fn flag(raw: Option<&str>) -> bool {
    raw.is_some()
}

/// Comma-separated hex colors to an evenly spaced gradient.
///
/// Missing or empty text gives the neutral default, as does a bad color
/// (which is also logged).
pub fn color_steps(attribute: &str, raw: Option<&str>) -> Gradient {
    let Some(raw) = raw.filter(|s| !s.is_empty()) else {
        return Gradient::neutral();
    };
    match Gradient::from_hex_colors(raw.split(',')) {
        Ok(g) => g,
        Err(e) => {
            log::error!("{}", AttributeError::new(attribute, raw, e.to_string()));
            Gradient::neutral()
        }
    }
}
