//! # Calculators
//!
//! Every calculator follows the same pattern:
//!
//! - `*Input` - Input parameters (JSON-serializable), with `validate()`
//! - `*Result` - Calculation results (JSON-serializable)
//! - `calculate(input) -> Result<*Result, CalcError>` - Pure calculation function
//!
//! Results keep full precision; rounding happens in [`crate::format`].
//!
//! ## Available Calculations
//!
//! - [`interest`] - Simple and compound interest, APY
//! - [`loan`] - Amortized loan payment and schedule
//! - [`irr`] - Internal rate of return (Newton–Raphson)
//! - [`savings_goal`] - Months to reach a savings target
//! - [`bmi`] - Body mass index with WHO categories
//! - [`whr`] - Waist-to-hip ratio with risk buckets
//! - [`energy_cost`] - Appliance running cost
//! - [`percentage`] - Percent-of, percentage change, ratios
//! - [`elapsed`] - Time since a date
//!
//! Unit and temperature conversions are wrapped here as well so that a
//! [`CalculationItem`] can describe any request the library answers.

pub mod bmi;
pub mod elapsed;
pub mod energy_cost;
pub mod interest;
pub mod irr;
pub mod loan;
pub mod percentage;
pub mod savings_goal;
pub mod whr;

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::temperature::{convert_temperature, TemperatureScale};
use crate::units::{convert_named, NamedConversion, Quantity};

// Re-export commonly used types
pub use bmi::{BmiInput, BmiResult};
pub use elapsed::{ElapsedInput, ElapsedResult};
pub use energy_cost::{EnergyCostInput, EnergyCostResult};
pub use interest::{CompoundInterestInput, CompoundInterestResult, SimpleInterestInput, SimpleInterestResult};
pub use irr::{IrrInput, IrrResult};
pub use loan::{LoanInput, LoanResult};
pub use percentage::{PercentageInput, PercentageResult};
pub use savings_goal::{SavingsGoalInput, SavingsGoalResult};
pub use whr::{WhrInput, WhrResult};

fn default_precision() -> usize {
    2
}

/// Unit conversion by name within one quantity.
///
/// ## JSON Example
///
/// ```json
/// { "label": "Room", "quantity": "area", "value": 1.0, "from": "m²", "to": "ft²" }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversionInput {
    #[serde(default)]
    pub label: String,
    pub quantity: Quantity,
    pub value: f64,
    pub from: String,
    pub to: String,
    #[serde(default = "default_precision")]
    pub precision: usize,
}

impl ConversionInput {
    pub fn validate(&self) -> CalcResult<()> {
        if !self.value.is_finite() {
            return Err(CalcError::invalid_input("value", self.value.to_string(), "Must be a finite number"));
        }
        Ok(())
    }

    pub fn calculate(&self) -> CalcResult<NamedConversion> {
        self.validate()?;
        convert_named(self.quantity, self.value, &self.from, &self.to, self.precision)
    }
}

/// Temperature conversion between scales.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemperatureInput {
    #[serde(default)]
    pub label: String,
    pub value: f64,
    pub from: TemperatureScale,
    pub to: TemperatureScale,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemperatureResult {
    pub value: f64,
    pub from: TemperatureScale,
    pub to: TemperatureScale,
    pub converted: f64,
}

impl TemperatureInput {
    pub fn calculate(&self) -> CalcResult<TemperatureResult> {
        Ok(TemperatureResult {
            value: self.value,
            from: self.from,
            to: self.to,
            converted: convert_temperature(self.value, self.from, self.to)?,
        })
    }
}

/// Enum wrapper for all calculation types.
///
/// This allows storing heterogeneous requests in a single collection
/// (or receiving them as one JSON document) while keeping type safety.
///
/// ```json
/// { "type": "Loan", "principal": 20000.0, "annual_rate_percent": 6.0, "term_years": 5 }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CalculationItem {
    Conversion(ConversionInput),
    Temperature(TemperatureInput),
    SimpleInterest(SimpleInterestInput),
    CompoundInterest(CompoundInterestInput),
    Loan(LoanInput),
    Irr(IrrInput),
    SavingsGoal(SavingsGoalInput),
    Bmi(BmiInput),
    Whr(WhrInput),
    EnergyCost(EnergyCostInput),
    Percentage(PercentageInput),
    Elapsed(ElapsedInput),
}

/// Result of [`calculate_item`], tagged the same way as the request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CalculationOutput {
    Conversion(NamedConversion),
    Temperature(TemperatureResult),
    SimpleInterest(SimpleInterestResult),
    CompoundInterest(CompoundInterestResult),
    Loan(LoanResult),
    Irr(IrrResult),
    SavingsGoal(SavingsGoalResult),
    Bmi(BmiResult),
    Whr(WhrResult),
    EnergyCost(EnergyCostResult),
    Percentage(PercentageResult),
    Elapsed(ElapsedResult),
}

impl CalculationItem {
    /// Get the user-provided label for this calculation
    pub fn label(&self) -> &str {
        match self {
            CalculationItem::Conversion(c) => &c.label,
            CalculationItem::Temperature(t) => &t.label,
            CalculationItem::SimpleInterest(s) => &s.label,
            CalculationItem::CompoundInterest(c) => &c.label,
            CalculationItem::Loan(l) => &l.label,
            CalculationItem::Irr(i) => &i.label,
            CalculationItem::SavingsGoal(s) => &s.label,
            CalculationItem::Bmi(b) => &b.label,
            CalculationItem::Whr(w) => &w.label,
            CalculationItem::EnergyCost(e) => &e.label,
            CalculationItem::Percentage(p) => &p.label,
            CalculationItem::Elapsed(e) => &e.label,
        }
    }

    /// Get the calculation type as a string
    pub fn calc_type(&self) -> &'static str {
        match self {
            CalculationItem::Conversion(_) => "Conversion",
            CalculationItem::Temperature(_) => "Temperature",
            CalculationItem::SimpleInterest(_) => "SimpleInterest",
            CalculationItem::CompoundInterest(_) => "CompoundInterest",
            CalculationItem::Loan(_) => "Loan",
            CalculationItem::Irr(_) => "Irr",
            CalculationItem::SavingsGoal(_) => "SavingsGoal",
            CalculationItem::Bmi(_) => "Bmi",
            CalculationItem::Whr(_) => "Whr",
            CalculationItem::EnergyCost(_) => "EnergyCost",
            CalculationItem::Percentage(_) => "Percentage",
            CalculationItem::Elapsed(_) => "Elapsed",
        }
    }
}

/// Run any calculator from its tagged request.
pub fn calculate_item(item: &CalculationItem) -> CalcResult<CalculationOutput> {
    tracing::debug!(calc_type = item.calc_type(), label = item.label(), "calculating");
    let output = match item {
        CalculationItem::Conversion(c) => CalculationOutput::Conversion(c.calculate()?),
        CalculationItem::Temperature(t) => CalculationOutput::Temperature(t.calculate()?),
        CalculationItem::SimpleInterest(s) => CalculationOutput::SimpleInterest(interest::calculate_simple(s)?),
        CalculationItem::CompoundInterest(c) => {
            CalculationOutput::CompoundInterest(interest::calculate_compound(c)?)
        }
        CalculationItem::Loan(l) => CalculationOutput::Loan(loan::calculate(l)?),
        CalculationItem::Irr(i) => CalculationOutput::Irr(irr::calculate(i)?),
        CalculationItem::SavingsGoal(s) => CalculationOutput::SavingsGoal(savings_goal::calculate(s)?),
        CalculationItem::Bmi(b) => CalculationOutput::Bmi(bmi::calculate(b)?),
        CalculationItem::Whr(w) => CalculationOutput::Whr(whr::calculate(w)?),
        CalculationItem::EnergyCost(e) => CalculationOutput::EnergyCost(energy_cost::calculate(e)?),
        CalculationItem::Percentage(p) => CalculationOutput::Percentage(percentage::calculate(p)?),
        CalculationItem::Elapsed(e) => CalculationOutput::Elapsed(elapsed::calculate(e)?),
    };
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_from_json() {
        let json = r#"{"type":"Loan","label":"Car","principal":20000.0,"annual_rate_percent":6.0,"term_years":5}"#;
        let item: CalculationItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.calc_type(), "Loan");
        assert_eq!(item.label(), "Car");

        match calculate_item(&item).unwrap() {
            CalculationOutput::Loan(result) => assert!((result.payment - 386.66).abs() < 0.01),
            other => panic!("unexpected output {other:?}"),
        }
    }

    #[test]
    fn test_conversion_item() {
        let json = r#"{"type":"Conversion","quantity":"length","value":1.0,"from":"mile","to":"km","precision":3}"#;
        let item: CalculationItem = serde_json::from_str(json).unwrap();
        match calculate_item(&item).unwrap() {
            CalculationOutput::Conversion(c) => {
                assert!((c.converted - 1.609344).abs() < 1e-9);
                assert_eq!(c.display, "1.609 km");
            }
            other => panic!("unexpected output {other:?}"),
        }
    }

    #[test]
    fn test_unknown_unit_surfaces() {
        let item = CalculationItem::Conversion(ConversionInput {
            label: String::new(),
            quantity: Quantity::Mass,
            value: 1.0,
            from: "furlong".to_string(),
            to: "kg".to_string(),
            precision: 2,
        });
        assert_eq!(calculate_item(&item).unwrap_err().error_code(), "UNKNOWN_UNIT");
    }

    #[test]
    fn test_temperature_item() {
        let item = CalculationItem::Temperature(TemperatureInput {
            label: String::new(),
            value: 100.0,
            from: TemperatureScale::Celsius,
            to: TemperatureScale::Fahrenheit,
        });
        match calculate_item(&item).unwrap() {
            CalculationOutput::Temperature(t) => assert!((t.converted - 212.0).abs() < 1e-9),
            other => panic!("unexpected output {other:?}"),
        }
    }

    #[test]
    fn test_output_serializes_with_tag() {
        let item = CalculationItem::Percentage(PercentageInput {
            label: String::new(),
            operation: percentage::PercentageOp::PercentOf,
            a: 10.0,
            b: 50.0,
        });
        let output = calculate_item(&item).unwrap();
        let json = serde_json::to_value(&output).unwrap();
        assert_eq!(json["type"], "Percentage");
        assert_eq!(json["value"], 5.0);
    }
}
