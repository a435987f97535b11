//! # Interest Calculations
//!
//! Simple interest, compound interest with a yearly breakdown, and APY.
//!
//! Rates are entered as percentages (`5.0` means 5 %) to match what users type.
//! Derived yields (APY) are returned as fractions.
//!
//! ## Formulas
//!
//! - Simple: `I = P × r × t`
//! - Periodic compounding: `A = P × (1 + r/n)^(n·t)`
//! - Continuous compounding: `A = P × e^(r·t)`
//! - APY: `(1 + r/n)^n − 1`, or `e^r − 1` when continuous
//!
//! ## Example
//!
//! ```rust
//! use calc_core::calculations::interest::{calculate_compound, CompoundInterestInput, Compounding};
//!
//! let input = CompoundInterestInput {
//!     label: "Savings".to_string(),
//!     principal: 1000.0,
//!     annual_rate_percent: 5.0,
//!     years: 10,
//!     compounding: Compounding::Monthly,
//!     annual_contribution: 0.0,
//! };
//! let result = calculate_compound(&input).unwrap();
//! assert!((result.final_balance - 1647.01).abs() < 0.01);
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// Longest term accepted, in years
pub const MAX_YEARS: u32 = 200;

/// How often interest is credited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Compounding {
    Annually,
    SemiAnnually,
    Quarterly,
    #[default]
    Monthly,
    Daily,
    Continuous,
}

impl Compounding {
    pub const ALL: [Compounding; 6] = [
        Compounding::Annually,
        Compounding::SemiAnnually,
        Compounding::Quarterly,
        Compounding::Monthly,
        Compounding::Daily,
        Compounding::Continuous,
    ];

    /// Compounding periods per year, `None` for continuous
    pub fn periods_per_year(self) -> Option<f64> {
        match self {
            Compounding::Annually => Some(1.0),
            Compounding::SemiAnnually => Some(2.0),
            Compounding::Quarterly => Some(4.0),
            Compounding::Monthly => Some(12.0),
            Compounding::Daily => Some(365.0),
            Compounding::Continuous => None,
        }
    }

    /// Growth multiplier over one year for an annual rate given as a fraction
    pub fn yearly_growth(self, rate: f64) -> f64 {
        match self.periods_per_year() {
            Some(n) => (1.0 + rate / n).powf(n),
            None => rate.exp(),
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Compounding::Annually => "Annually",
            Compounding::SemiAnnually => "Semi-annually",
            Compounding::Quarterly => "Quarterly",
            Compounding::Monthly => "Monthly",
            Compounding::Daily => "Daily",
            Compounding::Continuous => "Continuously",
        }
    }

    pub fn from_str_flexible(s: &str) -> CalcResult<Self> {
        match s.trim().to_lowercase().replace(['-', '_', ' '], "").as_str() {
            "annually" | "annual" | "yearly" | "1" => Ok(Compounding::Annually),
            "semiannually" | "semiannual" | "2" => Ok(Compounding::SemiAnnually),
            "quarterly" | "4" => Ok(Compounding::Quarterly),
            "monthly" | "12" => Ok(Compounding::Monthly),
            "daily" | "365" => Ok(Compounding::Daily),
            "continuous" | "continuously" => Ok(Compounding::Continuous),
            _ => Err(CalcError::invalid_input(
                "compounding",
                s,
                "Expected annually, semi-annually, quarterly, monthly, daily or continuous",
            )),
        }
    }
}

impl fmt::Display for Compounding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Annual percentage yield for a nominal annual rate (both as fractions).
pub fn apy(annual_rate: f64, compounding: Compounding) -> f64 {
    compounding.yearly_growth(annual_rate) - 1.0
}

fn validate_rate(field: &str, rate_percent: f64) -> CalcResult<()> {
    if !rate_percent.is_finite() || rate_percent <= -100.0 {
        return Err(CalcError::invalid_input(
            field,
            rate_percent.to_string(),
            "Rate must be greater than -100%",
        ));
    }
    Ok(())
}

fn validate_non_negative(field: &str, value: f64) -> CalcResult<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(CalcError::invalid_input(field, value.to_string(), "Must be zero or positive"));
    }
    Ok(())
}

// ============================================================================
// Simple interest
// ============================================================================

/// Input for a simple-interest calculation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimpleInterestInput {
    #[serde(default)]
    pub label: String,
    pub principal: f64,
    pub annual_rate_percent: f64,
    /// Term in years (fractions allowed)
    pub years: f64,
}

impl SimpleInterestInput {
    pub fn validate(&self) -> CalcResult<()> {
        validate_non_negative("principal", self.principal)?;
        validate_rate("annual_rate_percent", self.annual_rate_percent)?;
        validate_non_negative("years", self.years)?;
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimpleInterestResult {
    pub interest: f64,
    pub total: f64,
}

pub fn calculate_simple(input: &SimpleInterestInput) -> CalcResult<SimpleInterestResult> {
    input.validate()?;
    let interest = input.principal * (input.annual_rate_percent / 100.0) * input.years;
    Ok(SimpleInterestResult {
        interest,
        total: input.principal + interest,
    })
}

// ============================================================================
// Compound interest
// ============================================================================

/// Input for a compound-interest calculation.
///
/// ## JSON Example
///
/// ```json
/// {
///   "label": "College fund",
///   "principal": 5000.0,
///   "annual_rate_percent": 6.0,
///   "years": 18,
///   "compounding": "monthly",
///   "annual_contribution": 1200.0
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompoundInterestInput {
    #[serde(default)]
    pub label: String,
    pub principal: f64,
    pub annual_rate_percent: f64,
    pub years: u32,
    #[serde(default)]
    pub compounding: Compounding,
    /// Deposit added at the end of each year
    #[serde(default)]
    pub annual_contribution: f64,
}

impl CompoundInterestInput {
    pub fn validate(&self) -> CalcResult<()> {
        validate_non_negative("principal", self.principal)?;
        validate_rate("annual_rate_percent", self.annual_rate_percent)?;
        validate_non_negative("annual_contribution", self.annual_contribution)?;
        if self.years > MAX_YEARS {
            return Err(CalcError::invalid_input(
                "years",
                self.years.to_string(),
                format!("Term cannot exceed {MAX_YEARS} years"),
            ));
        }
        Ok(())
    }
}

/// Balance at the end of one year
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterestRow {
    pub year: u32,
    /// Principal plus all contributions so far
    pub total_deposits: f64,
    pub interest_this_year: f64,
    pub total_interest: f64,
    pub balance: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompoundInterestResult {
    pub final_balance: f64,
    pub total_deposits: f64,
    pub total_interest: f64,
    /// Effective annual yield as a fraction
    pub apy: f64,
    pub breakdown: Vec<InterestRow>,
}

pub fn calculate_compound(input: &CompoundInterestInput) -> CalcResult<CompoundInterestResult> {
    input.validate()?;

    let rate = input.annual_rate_percent / 100.0;
    let growth = input.compounding.yearly_growth(rate);

    let mut balance = input.principal;
    let mut deposits = input.principal;
    let mut total_interest = 0.0;
    let mut breakdown = Vec::with_capacity(input.years as usize);

    for year in 1..=input.years {
        let interest = balance * (growth - 1.0);
        balance += interest + input.annual_contribution;
        deposits += input.annual_contribution;
        total_interest += interest;
        breakdown.push(InterestRow {
            year,
            total_deposits: deposits,
            interest_this_year: interest,
            total_interest,
            balance,
        });
    }

    Ok(CompoundInterestResult {
        final_balance: balance,
        total_deposits: deposits,
        total_interest,
        apy: apy(rate, input.compounding),
        breakdown,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn savings() -> CompoundInterestInput {
        CompoundInterestInput {
            label: "Test".to_string(),
            principal: 1000.0,
            annual_rate_percent: 5.0,
            years: 10,
            compounding: Compounding::Monthly,
            annual_contribution: 0.0,
        }
    }

    #[test]
    fn test_simple_interest() {
        let input = SimpleInterestInput {
            label: String::new(),
            principal: 2000.0,
            annual_rate_percent: 4.5,
            years: 3.0,
        };
        let result = calculate_simple(&input).unwrap();
        assert!((result.interest - 270.0).abs() < 1e-9);
        assert!((result.total - 2270.0).abs() < 1e-9);
    }

    #[test]
    fn test_monthly_compounding() {
        // 1000 × (1 + 0.05/12)^120 = 1647.01
        let result = calculate_compound(&savings()).unwrap();
        assert!((result.final_balance - 1647.009_497).abs() < 1e-4);
        assert_eq!(result.breakdown.len(), 10);
        assert!((result.total_interest - 647.009_497).abs() < 1e-4);
    }

    #[test]
    fn test_continuous_compounding() {
        let mut input = savings();
        input.compounding = Compounding::Continuous;
        let result = calculate_compound(&input).unwrap();
        assert!((result.final_balance - 1000.0 * 0.5_f64.exp()).abs() < 1e-6);
    }

    #[test]
    fn test_contributions_accumulate() {
        let mut input = savings();
        input.annual_rate_percent = 0.0;
        input.annual_contribution = 100.0;
        let result = calculate_compound(&input).unwrap();
        assert!((result.final_balance - 2000.0).abs() < 1e-9);
        assert!((result.total_deposits - 2000.0).abs() < 1e-9);
        assert_eq!(result.total_interest, 0.0);
    }

    #[test]
    fn test_breakdown_balances_increase() {
        let result = calculate_compound(&savings()).unwrap();
        assert!(result.breakdown.windows(2).all(|w| w[1].balance > w[0].balance));
        let last = result.breakdown.last().unwrap();
        assert_eq!(last.balance, result.final_balance);
    }

    #[test]
    fn test_apy() {
        assert!((apy(0.05, Compounding::Annually) - 0.05).abs() < 1e-12);
        assert!((apy(0.05, Compounding::Monthly) - 0.051_161_897_881_733).abs() < 1e-9);
        assert!((apy(0.05, Compounding::Continuous) - 0.051_271_096_376_024).abs() < 1e-9);
    }

    #[test]
    fn test_invalid_inputs() {
        let mut input = savings();
        input.principal = -1.0;
        assert!(calculate_compound(&input).is_err());

        let mut input = savings();
        input.annual_rate_percent = -100.0;
        assert!(calculate_compound(&input).is_err());

        let mut input = savings();
        input.years = MAX_YEARS + 1;
        assert!(calculate_compound(&input).is_err());
    }

    #[test]
    fn test_compounding_parse() {
        assert_eq!(Compounding::from_str_flexible("Semi-Annually").unwrap(), Compounding::SemiAnnually);
        assert_eq!(Compounding::from_str_flexible("12").unwrap(), Compounding::Monthly);
        assert!(Compounding::from_str_flexible("hourly").is_err());
    }

    #[test]
    fn test_serialization() {
        let input = savings();
        let json = serde_json::to_string(&input).unwrap();
        assert!(json.contains("\"compounding\":\"monthly\""));
        let roundtrip: CompoundInterestInput = serde_json::from_str(&json).unwrap();
        assert_eq!(roundtrip.years, 10);
    }
}
