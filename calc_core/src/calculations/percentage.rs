//! # Percentages and Ratios
//!
//! | Operation        | Formula                    |
//! |------------------|----------------------------|
//! | `PercentOf`      | `a% of b = a / 100 × b`    |
//! | `WhatPercent`    | `a is ?% of b = a / b × 100` |
//! | `Change`         | `(b − a) / |a| × 100`      |
//! | `Ratio`          | `a : b` reduced by the GCD |
//!
//! Division by zero yields [`CalcError::Undefined`].

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// Decimal places kept when reducing non-integer ratios
const RATIO_SCALE_DIGITS: i32 = 6;

/// 2^53, the largest range where every integer is an f64
const EXACT_INTEGER_LIMIT: f64 = 9_007_199_254_740_992.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PercentageOp {
    PercentOf,
    WhatPercent,
    Change,
    Ratio,
}

impl PercentageOp {
    pub fn from_str_flexible(s: &str) -> CalcResult<Self> {
        match s.trim().to_lowercase().replace(['-', ' '], "_").as_str() {
            "of" | "percent_of" => Ok(PercentageOp::PercentOf),
            "what" | "what_percent" | "is" => Ok(PercentageOp::WhatPercent),
            "change" | "diff" | "difference" => Ok(PercentageOp::Change),
            "ratio" => Ok(PercentageOp::Ratio),
            _ => Err(CalcError::invalid_input(
                "operation",
                s,
                "Expected one of: of, what, change, ratio",
            )),
        }
    }
}

/// Input for the percentage calculator.
///
/// ## JSON Example
///
/// ```json
/// { "label": "Raise", "operation": "change", "a": 52000.0, "b": 55000.0 }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PercentageInput {
    #[serde(default)]
    pub label: String,
    pub operation: PercentageOp,
    pub a: f64,
    pub b: f64,
}

impl PercentageInput {
    pub fn validate(&self) -> CalcResult<()> {
        if !self.a.is_finite() {
            return Err(CalcError::invalid_input("a", self.a.to_string(), "Must be a finite number"));
        }
        if !self.b.is_finite() {
            return Err(CalcError::invalid_input("b", self.b.to_string(), "Must be a finite number"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PercentageResult {
    pub operation: PercentageOp,
    pub value: f64,
    /// Reduced `(a, b)` terms, only for [`PercentageOp::Ratio`]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ratio: Option<(f64, f64)>,
}

pub fn percent_of(percent: f64, whole: f64) -> f64 {
    percent / 100.0 * whole
}

pub fn what_percent(part: f64, whole: f64) -> CalcResult<f64> {
    if whole == 0.0 {
        return Err(CalcError::undefined("percentage", "the whole is zero"));
    }
    Ok(part / whole * 100.0)
}

/// Percentage change from `from` to `to`, relative to `|from|`.
pub fn percent_change(from: f64, to: f64) -> CalcResult<f64> {
    if from == 0.0 {
        return Err(CalcError::undefined("percentage change", "the starting value is zero"));
    }
    Ok((to - from) / from.abs() * 100.0)
}

fn gcd(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

/// Reduce `a : b` to lowest terms. Fractions are scaled to integers first.
pub fn simplify_ratio(a: f64, b: f64) -> CalcResult<(f64, f64)> {
    if a == 0.0 && b == 0.0 {
        return Err(CalcError::undefined("ratio", "both terms are zero"));
    }
    if a < 0.0 || b < 0.0 {
        return Err(CalcError::invalid_input(
            "ratio",
            format!("{a}:{b}"),
            "Ratio terms cannot be negative",
        ));
    }

    // Use as many decimal places as keep both terms exact integers in f64
    for digits in (0..=RATIO_SCALE_DIGITS).rev() {
        let scale = 10f64.powi(digits);
        let (sa, sb) = ((a * scale).round(), (b * scale).round());
        if sa <= EXACT_INTEGER_LIMIT && sb <= EXACT_INTEGER_LIMIT {
            let (x, y) = (sa as u64, sb as u64);
            let divisor = gcd(x, y).max(1);
            return Ok(((x / divisor) as f64, (y / divisor) as f64));
        }
    }
    Err(CalcError::invalid_input(
        "ratio",
        format!("{a}:{b}"),
        "Ratio terms are too large to simplify",
    ))
}

pub fn calculate(input: &PercentageInput) -> CalcResult<PercentageResult> {
    input.validate()?;

    let (value, ratio) = match input.operation {
        PercentageOp::PercentOf => (percent_of(input.a, input.b), None),
        PercentageOp::WhatPercent => (what_percent(input.a, input.b)?, None),
        PercentageOp::Change => (percent_change(input.a, input.b)?, None),
        PercentageOp::Ratio => {
            let reduced = simplify_ratio(input.a, input.b)?;
            if reduced.1 == 0.0 {
                return Err(CalcError::undefined("ratio", "second term is zero"));
            }
            (reduced.0 / reduced.1, Some(reduced))
        }
    };

    Ok(PercentageResult {
        operation: input.operation,
        value,
        ratio,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(operation: PercentageOp, a: f64, b: f64) -> CalcResult<PercentageResult> {
        calculate(&PercentageInput {
            label: String::new(),
            operation,
            a,
            b,
        })
    }

    #[test]
    fn test_percent_of() {
        let result = run(PercentageOp::PercentOf, 15.0, 80.0).unwrap();
        assert!((result.value - 12.0).abs() < 1e-12);
    }

    #[test]
    fn test_what_percent() {
        let result = run(PercentageOp::WhatPercent, 12.0, 80.0).unwrap();
        assert!((result.value - 15.0).abs() < 1e-12);
        assert_eq!(run(PercentageOp::WhatPercent, 1.0, 0.0).unwrap_err().error_code(), "UNDEFINED");
    }

    #[test]
    fn test_change() {
        let result = run(PercentageOp::Change, 50.0, 75.0).unwrap();
        assert!((result.value - 50.0).abs() < 1e-12);
        let result = run(PercentageOp::Change, -50.0, -25.0).unwrap();
        assert!((result.value - 50.0).abs() < 1e-12);
        assert!(run(PercentageOp::Change, 0.0, 10.0).is_err());
    }

    #[test]
    fn test_ratio() {
        assert_eq!(simplify_ratio(1920.0, 1080.0).unwrap(), (16.0, 9.0));
        assert_eq!(simplify_ratio(1.5, 0.5).unwrap(), (3.0, 1.0));
        assert!(simplify_ratio(0.0, 0.0).is_err());
        let result = run(PercentageOp::Ratio, 4.0, 0.0).unwrap_err();
        assert_eq!(result.error_code(), "UNDEFINED");
    }

    #[test]
    fn test_ratio_large_terms() {
        assert_eq!(simplify_ratio(1e14, 2e14).unwrap(), (1.0, 2.0));
        assert_eq!(simplify_ratio(3e15, 1e15).unwrap(), (3.0, 1.0));
        let err = simplify_ratio(1e300, 1.0).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
        assert!(simplify_ratio(f64::INFINITY, 1.0).is_err());
    }
}
