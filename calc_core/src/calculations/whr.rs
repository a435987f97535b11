//! # Waist-to-Hip Ratio
//!
//! `WHR = waist / hip` (any length unit, as long as both match), with
//! sex-specific risk buckets following the WHO cut-offs: substantially
//! increased risk from 0.90 for men and 0.85 for women.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::lookup::{RangeBucket, RangeTable};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sex {
    Male,
    Female,
}

impl Sex {
    pub fn from_str_flexible(s: &str) -> CalcResult<Self> {
        match s.trim().to_lowercase().as_str() {
            "m" | "male" | "man" => Ok(Sex::Male),
            "f" | "female" | "woman" => Ok(Sex::Female),
            _ => Err(CalcError::invalid_input("sex", s, "Expected male or female")),
        }
    }
}

/// Health risk associated with a WHR
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WhrRisk {
    Low,
    Moderate,
    High,
}

impl WhrRisk {
    pub fn display_name(self) -> &'static str {
        match self {
            WhrRisk::Low => "Low risk",
            WhrRisk::Moderate => "Moderate risk",
            WhrRisk::High => "High risk",
        }
    }
}

impl fmt::Display for WhrRisk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Fat distribution implied by the ratio
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BodyShape {
    /// Weight carried around the hips
    Pear,
    /// Weight carried around the waist
    Apple,
}

static MALE_BUCKETS: [RangeBucket<WhrRisk>; 3] = [
    RangeBucket::new(0.0, 0.90, WhrRisk::Low),
    RangeBucket::new(0.90, 1.0, WhrRisk::Moderate),
    RangeBucket::new(1.0, f64::INFINITY, WhrRisk::High),
];

static FEMALE_BUCKETS: [RangeBucket<WhrRisk>; 3] = [
    RangeBucket::new(0.0, 0.80, WhrRisk::Low),
    RangeBucket::new(0.80, 0.85, WhrRisk::Moderate),
    RangeBucket::new(0.85, f64::INFINITY, WhrRisk::High),
];

pub static MALE_WHR_TABLE: RangeTable<WhrRisk> = RangeTable::new(&MALE_BUCKETS);
pub static FEMALE_WHR_TABLE: RangeTable<WhrRisk> = RangeTable::new(&FEMALE_BUCKETS);

pub fn risk_table(sex: Sex) -> &'static RangeTable<WhrRisk> {
    match sex {
        Sex::Male => &MALE_WHR_TABLE,
        Sex::Female => &FEMALE_WHR_TABLE,
    }
}

/// Input for the waist-to-hip calculator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WhrInput {
    #[serde(default)]
    pub label: String,
    pub waist: f64,
    pub hip: f64,
    pub sex: Sex,
}

impl WhrInput {
    pub fn validate(&self) -> CalcResult<()> {
        if !self.waist.is_finite() || self.waist < 0.0 {
            return Err(CalcError::invalid_input("waist", self.waist.to_string(), "Waist cannot be negative"));
        }
        if !self.hip.is_finite() || self.hip < 0.0 {
            return Err(CalcError::invalid_input("hip", self.hip.to_string(), "Hip cannot be negative"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WhrResult {
    pub ratio: f64,
    pub risk: WhrRisk,
    pub shape: BodyShape,
}

pub fn calculate(input: &WhrInput) -> CalcResult<WhrResult> {
    input.validate()?;
    if input.hip == 0.0 {
        return Err(CalcError::undefined("waist-to-hip ratio", "hip measurement is zero"));
    }

    let ratio = input.waist / input.hip;
    let risk = risk_table(input.sex)
        .lookup(ratio)
        .copied()
        .ok_or_else(|| CalcError::undefined("WHR risk", format!("no category for {ratio}")))?;
    let shape = if risk == WhrRisk::Low { BodyShape::Pear } else { BodyShape::Apple };

    Ok(WhrResult { ratio, risk, shape })
}
