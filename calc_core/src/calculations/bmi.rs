//! # Body Mass Index
//!
//! `BMI = weight (kg) / height (m)²`, classified with the WHO adult table.
//! Imperial inputs go through the unit engine before the formula.
//!
//! | Category     | BMI range      |
//! |--------------|----------------|
//! | Underweight  | < 18.5         |
//! | Normal       | 18.5 – < 25    |
//! | Overweight   | 25 – < 30      |
//! | Obese I      | 30 – < 35      |
//! | Obese II     | 35 – < 40      |
//! | Obese III    | ≥ 40           |

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::lookup::{RangeBucket, RangeTable};
use crate::units::{convert, LengthUnit, MassUnit};

/// Weight class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BmiCategory {
    Underweight,
    Normal,
    Overweight,
    ObeseClass1,
    ObeseClass2,
    ObeseClass3,
}

impl BmiCategory {
    pub fn display_name(self) -> &'static str {
        match self {
            BmiCategory::Underweight => "Underweight",
            BmiCategory::Normal => "Normal weight",
            BmiCategory::Overweight => "Overweight",
            BmiCategory::ObeseClass1 => "Obesity class I",
            BmiCategory::ObeseClass2 => "Obesity class II",
            BmiCategory::ObeseClass3 => "Obesity class III",
        }
    }
}

impl fmt::Display for BmiCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Lower bound of the normal range
pub const NORMAL_MIN: f64 = 18.5;
/// Upper (exclusive) bound of the normal range
pub const NORMAL_MAX: f64 = 25.0;

static BMI_BUCKETS: [RangeBucket<BmiCategory>; 6] = [
    RangeBucket::new(0.0, NORMAL_MIN, BmiCategory::Underweight),
    RangeBucket::new(NORMAL_MIN, NORMAL_MAX, BmiCategory::Normal),
    RangeBucket::new(NORMAL_MAX, 30.0, BmiCategory::Overweight),
    RangeBucket::new(30.0, 35.0, BmiCategory::ObeseClass1),
    RangeBucket::new(35.0, 40.0, BmiCategory::ObeseClass2),
    RangeBucket::new(40.0, f64::INFINITY, BmiCategory::ObeseClass3),
];

/// WHO adult BMI classification
pub static BMI_TABLE: RangeTable<BmiCategory> = RangeTable::new(&BMI_BUCKETS);

/// Classify a BMI value; `None` for negative or non-finite values.
pub fn classify(bmi: f64) -> Option<BmiCategory> {
    BMI_TABLE.lookup(bmi).copied()
}

/// Body measurements in either system
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "system", rename_all = "snake_case")]
pub enum BodyMeasurements {
    Metric { weight_kg: f64, height_cm: f64 },
    Imperial { weight_lb: f64, height_ft: f64, height_in: f64 },
}

impl BodyMeasurements {
    /// `(kilograms, metres)`
    pub fn to_metric(&self) -> (f64, f64) {
        match *self {
            BodyMeasurements::Metric { weight_kg, height_cm } => {
                (weight_kg, convert(height_cm, LengthUnit::Centimeter, LengthUnit::Meter))
            }
            BodyMeasurements::Imperial {
                weight_lb,
                height_ft,
                height_in,
            } => {
                let kg = convert(weight_lb, MassUnit::Pound, MassUnit::Kilogram);
                let m = convert(height_ft, LengthUnit::Foot, LengthUnit::Meter)
                    + convert(height_in, LengthUnit::Inch, LengthUnit::Meter);
                (kg, m)
            }
        }
    }
}

/// Input for the BMI calculator.
///
/// ## JSON Example
///
/// ```json
/// { "label": "Me", "measurements": { "system": "metric", "weight_kg": 70.0, "height_cm": 175.0 } }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BmiInput {
    #[serde(default)]
    pub label: String,
    pub measurements: BodyMeasurements,
}

impl BmiInput {
    pub fn validate(&self) -> CalcResult<()> {
        let (kg, m) = self.measurements.to_metric();
        if !kg.is_finite() || kg < 0.0 {
            return Err(CalcError::invalid_input("weight", kg.to_string(), "Weight cannot be negative"));
        }
        if !m.is_finite() || m < 0.0 {
            return Err(CalcError::invalid_input("height", m.to_string(), "Height cannot be negative"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BmiResult {
    pub bmi: f64,
    pub category: BmiCategory,
    /// Weight range (kg) that would put this height in the normal category
    pub healthy_weight_min_kg: f64,
    pub healthy_weight_max_kg: f64,
}

/// BMI from kilograms and metres; zero height is undefined.
pub fn bmi(weight_kg: f64, height_m: f64) -> CalcResult<f64> {
    if height_m <= 0.0 {
        return Err(CalcError::undefined("BMI", "height must be greater than zero"));
    }
    Ok(weight_kg / (height_m * height_m))
}

pub fn calculate(input: &BmiInput) -> CalcResult<BmiResult> {
    input.validate()?;
    let (kg, m) = input.measurements.to_metric();
    let value = bmi(kg, m)?;
    let category = classify(value)
        .ok_or_else(|| CalcError::undefined("BMI category", format!("no category for {value}")))?;

    Ok(BmiResult {
        bmi: value,
        category,
        healthy_weight_min_kg: NORMAL_MIN * m * m,
        healthy_weight_max_kg: NORMAL_MAX * m * m,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metric(weight_kg: f64, height_cm: f64) -> BmiInput {
        BmiInput {
            label: String::new(),
            measurements: BodyMeasurements::Metric { weight_kg, height_cm },
        }
    }

    #[test]
    fn test_metric_bmi() {
        let result = calculate(&metric(70.0, 175.0)).unwrap();
        assert!((result.bmi - 22.857).abs() < 0.001);
        assert_eq!(result.category, BmiCategory::Normal);
        assert!((result.healthy_weight_min_kg - 56.66).abs() < 0.01);
    }

    #[test]
    fn test_imperial_matches_metric() {
        let imperial = BmiInput {
            label: String::new(),
            measurements: BodyMeasurements::Imperial {
                weight_lb: 154.323_583_529_414,
                height_ft: 5.0,
                height_in: 10.0,
            },
        };
        // 5'10" = 177.8 cm, 154.32 lb = 70 kg
        let a = calculate(&imperial).unwrap();
        let b = calculate(&metric(70.0, 177.8)).unwrap();
        assert!((a.bmi - b.bmi).abs() < 1e-9);
    }

    #[test]
    fn test_boundary_is_half_open() {
        assert_eq!(classify(24.999), Some(BmiCategory::Normal));
        assert_eq!(classify(25.0), Some(BmiCategory::Overweight));
        assert_eq!(classify(18.5), Some(BmiCategory::Normal));
        assert_eq!(classify(40.0), Some(BmiCategory::ObeseClass3));
    }

    #[test]
    fn test_zero_height_is_undefined() {
        let err = calculate(&metric(70.0, 0.0)).unwrap_err();
        assert_eq!(err.error_code(), "UNDEFINED");
    }

    #[test]
    fn test_negative_weight_rejected() {
        let err = calculate(&metric(-1.0, 170.0)).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_measurement_serialization() {
        let json = r#"{"system":"imperial","weight_lb":150.0,"height_ft":5.0,"height_in":6.0}"#;
        let parsed: BodyMeasurements = serde_json::from_str(json).unwrap();
        assert!(matches!(parsed, BodyMeasurements::Imperial { .. }));
    }
}
