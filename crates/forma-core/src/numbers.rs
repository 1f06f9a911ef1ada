//! Number handling with browser semantics.
//!
//! Form values travel as `f64` and must behave the way markup hosts expect:
//! `NaN` propagates through clamping, `parse_float` accepts a numeric prefix,
//! rounding is half-up. `std` differs on each of these points, so every widget
//! goes through the helpers here instead.

/// Parses the longest numeric prefix of `src`, like `parseFloat`.
///
/// Leading whitespace is skipped. Accepts an optional sign, digits with an
/// optional fraction, an optional exponent, and `Infinity`. Returns `NaN`
/// when no numeric prefix exists.
pub fn parse_float(src: &str) -> f64 {
    let s = src.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }
    if s[end..].starts_with("Infinity") {
        return if bytes[0] == b'-' { f64::NEG_INFINITY } else { f64::INFINITY };
    }

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let mut frac_end = end + 1;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        digits += frac_end - end - 1;
        if digits > 0 {
            end = frac_end;
        }
    }
    if digits == 0 {
        return f64::NAN;
    }

    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits {
            end = exp_end;
        }
    }

    s[..end].parse::<f64>().unwrap_or(f64::NAN)
}

/// `Math.min`: `NaN` in either operand wins.
#[inline]
pub fn js_min(a: f64, b: f64) -> f64 {
    if a.is_nan() || b.is_nan() { f64::NAN } else { a.min(b) }
}

/// `Math.max`: `NaN` in either operand wins.
#[inline]
pub fn js_max(a: f64, b: f64) -> f64 {
    if a.is_nan() || b.is_nan() { f64::NAN } else { a.max(b) }
}

/// Clamps against optional bounds, upper bound first.
///
/// With `min > max` the lower bound wins, whatever the input.
#[inline]
pub fn clamp_optional(value: f64, min: Option<f64>, max: Option<f64>) -> f64 {
    let mut v = value;
    if let Some(max) = max {
        v = js_min(v, max);
    }
    if let Some(min) = min {
        v = js_max(v, min);
    }
    v
}

/// Clamps to `[lo, hi]` with the same ordering as [`clamp_optional`].
///
/// Unlike `f64::clamp` this never panics on inverted bounds.
#[inline]
pub fn limit(value: f64, lo: f64, hi: f64) -> f64 {
    clamp_optional(value, Some(lo), Some(hi))
}

/// Linear remap of `value` from `[a1, a2]` to `[b1, b2]`, unclamped.
#[inline]
pub fn remap(value: f64, a1: f64, a2: f64, b1: f64, b2: f64) -> f64 {
    b1 + (value - a1) * (b2 - b1) / (a2 - a1)
}

/// `Math.round`: halves round toward positive infinity.
#[inline]
pub fn round_half_up(x: f64) -> f64 {
    let floor = x.floor();
    if x - floor >= 0.5 { floor + 1.0 } else { floor }
}

/// `SameValueZero`: like `==`, except that `NaN` equals `NaN`.
#[inline]
pub fn same_value_zero(a: f64, b: f64) -> bool {
    a == b || (a.is_nan() && b.is_nan())
}

/// Renders a number the way `Number#toString` does for the values forms
/// produce: plain decimal notation, `NaN`, `Infinity`, `-Infinity`.
pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n.is_infinite() {
        if n > 0.0 { "Infinity".to_string() } else { "-Infinity".to_string() }
    } else if n == 0.0 {
        "0".to_string()
    } else {
        format!("{n}")
    }
}
