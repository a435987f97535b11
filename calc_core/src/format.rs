//! # Result Formatting
//!
//! Display-side rounding and suffixing. Calculations keep full precision;
//! these helpers are the only place numbers are rounded.
//!
//! Non-finite values render as `"undefined"` so a stray NaN never reaches a label.

/// Text shown for non-finite values
pub const UNDEFINED: &str = "undefined";

/// Round to a number of decimal places.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let scale = 10f64.powi(decimals as i32);
    (value * scale).round() / scale
}

/// Fixed-point text with no grouping, e.g. `"1234.57"`.
pub fn format_fixed(value: f64, decimals: usize) -> String {
    if !value.is_finite() {
        return UNDEFINED.to_string();
    }
    let text = format!("{value:.decimals$}");
    // Avoid "-0.00" for values that round to zero
    if text.starts_with('-') && text[1..].chars().all(|c| c == '0' || c == '.') {
        text[1..].to_string()
    } else {
        text
    }
}

/// Fixed-point text with thousands separators, e.g. `"1,234.57"`.
pub fn format_number(value: f64, decimals: usize) -> String {
    let fixed = format_fixed(value, decimals);
    if fixed == UNDEFINED {
        return fixed;
    }

    let (sign, unsigned) = match fixed.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", fixed.as_str()),
    };
    let (int_part, frac_part) = match unsigned.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (unsigned, None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    match frac_part {
        Some(frac) => format!("{sign}{grouped}.{frac}"),
        None => format!("{sign}{grouped}"),
    }
}

/// Currency with two decimals, e.g. `"-$1,234.50"`.
pub fn format_currency(value: f64, symbol: &str) -> String {
    let number = format_number(value, 2);
    if number == UNDEFINED {
        return number;
    }
    match number.strip_prefix('-') {
        Some(rest) => format!("-{symbol}{rest}"),
        None => format!("{symbol}{number}"),
    }
}

/// Percentage from a fraction: `0.0512` → `"5.12%"`.
pub fn format_percent(fraction: f64, decimals: usize) -> String {
    let number = format_fixed(fraction * 100.0, decimals);
    if number == UNDEFINED {
        return number;
    }
    format!("{number}%")
}

/// Value with a unit suffix, e.g. `"9.29 m²"`.
pub fn format_with_unit(value: f64, decimals: usize, symbol: &str) -> String {
    let number = format_number(value, decimals);
    if number == UNDEFINED {
        return number;
    }
    format!("{number} {symbol}")
}

/// Format an optional value, `"undefined"` for `None`.
pub fn format_optional(value: Option<f64>, decimals: usize) -> String {
    match value {
        Some(v) => format_number(v, decimals),
        None => UNDEFINED.to_string(),
    }
}
