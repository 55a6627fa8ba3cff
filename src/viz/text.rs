//! Number formatting for tick labels and the hover readout.

use crate::models::Sample;

/// Format with `p` significant digits the way `Number.prototype.toPrecision`
/// does: fixed notation for moderate exponents, `d.de+X` otherwise.
pub fn to_precision(v: f64, p: usize) -> String {
    let p = p.max(1);
    if !v.is_finite() {
        return v.to_string();
    }
    if v == 0.0 {
        return format!("{:.*}", p - 1, 0.0);
    }
    let sci = format!("{:.*e}", p - 1, v);
    let Some((mantissa, exp)) = sci.split_once('e') else {
        return sci;
    };
    let e: i32 = exp.parse().unwrap_or(0);
    if e < -6 || e >= p as i32 {
        let sign = if e < 0 { '-' } else { '+' };
        format!("{mantissa}e{sign}{}", e.abs())
    } else {
        let decimals = (p as i32 - 1 - e) as usize;
        format!("{:.*}", decimals, v)
    }
}

/// Tick label: two significant digits, right-aligned to width 5.
pub fn format_tick(v: f64) -> String {
    format!("{:>5}", to_precision(v, 2))
}

/// Shortest round-trip form, switching to `de±X` below `1e-6` and from
/// `1e21` up, like JavaScript's number-to-string conversion.
pub fn shortest(v: f64) -> String {
    if v == 0.0 {
        return "0".into();
    }
    if v.is_infinite() {
        return if v > 0.0 { "Infinity" } else { "-Infinity" }.into();
    }
    if v.is_nan() {
        return "NaN".into();
    }
    let sci = format!("{v:e}");
    let Some((mantissa, exp)) = sci.split_once('e') else {
        return sci;
    };
    let e: i32 = exp.parse().unwrap_or(0);
    if e < -6 || e >= 21 {
        let sign = if e < 0 { '-' } else { '+' };
        format!("{mantissa}e{sign}{}", e.abs())
    } else {
        v.to_string()
    }
}

/// Hover readout, `"x, y ± error"`.
pub fn readout(s: &Sample) -> String {
    format!(
        "{}, {} \u{00B1} {}",
        shortest(s.x),
        shortest(s.y),
        shortest(s.error)
    )
}
