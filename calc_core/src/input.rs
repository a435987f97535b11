//! # Numeric Input Normalizer
//!
//! Text fields hold numbers as *strings* so that partial entries such as `""`,
//! `"0."` or `"-"` survive between keystrokes. Every keystroke goes through
//! [`normalize`]; anything that is not a prefix of a decimal number is dropped
//! and the field keeps its previous text.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::input::NumericField;
//!
//! let mut principal = NumericField::new("1000");
//! assert!(principal.accept("1000."));
//! assert!(!principal.accept("1000.5.")); // swallowed
//! assert_eq!(principal.text(), "1000.");
//! assert_eq!(principal.value(), 1000.0);
//! ```

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static UNSIGNED_DECIMAL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]*\.?[0-9]*$").expect("static regex is valid"));

static SIGNED_DECIMAL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^-?[0-9]*\.?[0-9]*$").expect("static regex is valid"));

/// Normalize raw field text.
///
/// Returns `None` when the text must be rejected. The caller keeps its
/// previous value in that case; no error is ever reported for a keystroke.
pub fn normalize(raw: &str, allow_negative: bool) -> Option<String> {
    if raw.is_empty() {
        return Some(String::new());
    }
    if raw == "." || raw == "0." {
        return Some("0.".to_string());
    }
    if allow_negative && raw == "-." {
        return Some("-0.".to_string());
    }

    let grammar = if allow_negative { &*SIGNED_DECIMAL } else { &*UNSIGNED_DECIMAL };
    if !grammar.is_match(raw) {
        return None;
    }

    if raw.contains('.') {
        return Some(raw.to_string());
    }
    Some(strip_leading_zeros(raw))
}

/// Strip leading zeros from an integer string, keeping at least one digit.
fn strip_leading_zeros(raw: &str) -> String {
    let (sign, digits) = match raw.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", raw),
    };
    if digits.is_empty() {
        return raw.to_string();
    }
    let trimmed = digits.trim_start_matches('0');
    let trimmed = if trimmed.is_empty() { "0" } else { trimmed };
    format!("{sign}{trimmed}")
}

/// Parse normalized text, treating empty or partial input as zero.
pub fn parse_or_zero(text: &str) -> f64 {
    text.parse::<f64>().unwrap_or(0.0)
}

/// A numeric form field stored as text.
///
/// The invariant is that `text` is always empty or a valid (possibly partial)
/// decimal number under the field's sign policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NumericField {
    text: String,
    allow_negative: bool,
}

impl NumericField {
    /// Create a non-negative field with a default value.
    ///
    /// A default that does not satisfy the grammar starts the field empty.
    pub fn new(default: &str) -> Self {
        Self::with_sign_policy(default, false)
    }

    /// Create a field that also accepts a leading minus sign.
    pub fn signed(default: &str) -> Self {
        Self::with_sign_policy(default, true)
    }

    fn with_sign_policy(default: &str, allow_negative: bool) -> Self {
        NumericField {
            text: normalize(default, allow_negative).unwrap_or_default(),
            allow_negative,
        }
    }

    /// Offer new raw text to the field.
    ///
    /// Returns `true` if the text was accepted.
    pub fn accept(&mut self, raw: &str) -> bool {
        match normalize(raw, self.allow_negative) {
            Some(text) => {
                self.text = text;
                true
            }
            None => false,
        }
    }

    /// Current stored text
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Numeric value, 0.0 for empty or partial entries
    pub fn value(&self) -> f64 {
        parse_or_zero(&self.text)
    }

    /// True when nothing has been entered
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn allows_negative(&self) -> bool {
        self.allow_negative
    }
}

impl Default for NumericField {
    fn default() -> Self {
        NumericField::new("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_passes_through() {
        assert_eq!(normalize("", false), Some(String::new()));
        assert_eq!(normalize("", true), Some(String::new()));
    }

    #[test]
    fn test_decimal_point_coercion() {
        assert_eq!(normalize(".", false).as_deref(), Some("0."));
        assert_eq!(normalize("0.", false).as_deref(), Some("0."));
        assert_eq!(normalize("-.", true).as_deref(), Some("-0."));
        assert_eq!(normalize("-.", false), None);
    }

    #[test]
    fn test_leading_zeros_stripped_on_integers() {
        assert_eq!(normalize("007", false).as_deref(), Some("7"));
        assert_eq!(normalize("000", false).as_deref(), Some("0"));
        assert_eq!(normalize("-007", true).as_deref(), Some("-7"));
        // Decimals keep their text as typed
        assert_eq!(normalize("0.05", false).as_deref(), Some("0.05"));
        assert_eq!(normalize("00.5", false).as_deref(), Some("00.5"));
    }

    #[test]
    fn test_minus_sign_policy() {
        assert_eq!(normalize("-5", false), None);
        assert_eq!(normalize("-5", true).as_deref(), Some("-5"));
        assert_eq!(normalize("-", true).as_deref(), Some("-"));
        assert_eq!(normalize("5-", true), None);
    }

    #[test]
    fn test_malformed_rejected() {
        for bad in ["12.3.4", "abc", "--5", "1e5", " 1", "1,000", "+3"] {
            assert_eq!(normalize(bad, true), None, "{bad:?} should be rejected");
        }
    }

    #[test]
    fn test_non_ascii_digits_rejected() {
        // f64 parsing only understands ASCII digits
        for bad in ["٧٠", "１２", "1٢", "-３"] {
            assert_eq!(normalize(bad, true), None, "{bad:?} should be rejected");
            assert_eq!(normalize(bad, false), None, "{bad:?} should be rejected");
        }
        let mut field = NumericField::new("5");
        assert!(!field.accept("٧٠"));
        assert_eq!(field.value(), 5.0);
    }

    #[test]
    fn test_field_keeps_previous_value_on_rejection() {
        let mut field = NumericField::signed("12.3");
        for bad in ["12.3.4", "abc", "--5"] {
            assert!(!field.accept(bad));
            assert_eq!(field.text(), "12.3");
        }
        assert!(field.accept("-4"));
        assert_eq!(field.value(), -4.0);
    }

    #[test]
    fn test_partial_entries_read_as_zero() {
        let mut field = NumericField::signed("");
        assert_eq!(field.value(), 0.0);
        field.accept("-");
        assert_eq!(field.value(), 0.0);
        field.accept("0.");
        assert_eq!(field.value(), 0.0);
        field.accept("0.25");
        assert_eq!(field.value(), 0.25);
    }

    #[test]
    fn test_invalid_default_starts_empty() {
        let field = NumericField::new("-3");
        assert!(field.is_empty());
        assert!(!field.allows_negative());
    }
}
