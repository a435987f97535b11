//! # Savings Goal
//!
//! Months needed to grow a balance to a target with a fixed monthly deposit.
//! Each month interest is credited on the opening balance (`rate / 12`), then
//! the deposit is added. The simulation stops at [`MAX_MONTHS`], so a target
//! that can never be reached still returns a result, with `reached = false`.

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// Simulation horizon (50 years)
pub const MAX_MONTHS: u32 = 600;

/// Input for the savings goal calculator.
///
/// ## JSON Example
///
/// ```json
/// {
///   "label": "House deposit",
///   "target": 50000.0,
///   "initial_balance": 5000.0,
///   "monthly_contribution": 750.0,
///   "annual_rate_percent": 4.0
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavingsGoalInput {
    #[serde(default)]
    pub label: String,
    pub target: f64,
    #[serde(default)]
    pub initial_balance: f64,
    #[serde(default)]
    pub monthly_contribution: f64,
    #[serde(default)]
    pub annual_rate_percent: f64,
}

impl SavingsGoalInput {
    pub fn validate(&self) -> CalcResult<()> {
        let fields = [
            ("target", self.target),
            ("initial_balance", self.initial_balance),
            ("monthly_contribution", self.monthly_contribution),
            ("annual_rate_percent", self.annual_rate_percent),
        ];
        for (field, value) in fields {
            if !value.is_finite() || value < 0.0 {
                return Err(CalcError::invalid_input(field, value.to_string(), "Must be zero or positive"));
            }
        }
        if self.target == 0.0 {
            return Err(CalcError::invalid_input("target", "0", "Target must be positive"));
        }
        Ok(())
    }
}

/// Balance at the end of a simulated year (or the final partial year)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavingsPoint {
    pub month: u32,
    pub balance: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavingsGoalResult {
    /// Whether the target was reached within the horizon
    pub reached: bool,
    /// Months simulated (months to target when `reached`)
    pub months: u32,
    pub final_balance: f64,
    pub total_contributions: f64,
    pub total_interest: f64,
    /// Yearly balance trajectory, ending with the final month
    pub trajectory: Vec<SavingsPoint>,
}

impl SavingsGoalResult {
    /// `(years, months)` split of [`SavingsGoalResult::months`]
    pub fn years_and_months(&self) -> (u32, u32) {
        (self.months / 12, self.months % 12)
    }
}

pub fn calculate(input: &SavingsGoalInput) -> CalcResult<SavingsGoalResult> {
    input.validate()?;

    let monthly_rate = input.annual_rate_percent / 100.0 / 12.0;
    let mut balance = input.initial_balance;
    let mut contributions = 0.0;
    let mut interest_total = 0.0;
    let mut month = 0;
    let mut trajectory = vec![SavingsPoint { month: 0, balance }];

    while balance < input.target && month < MAX_MONTHS {
        let interest = balance * monthly_rate;
        balance += interest + input.monthly_contribution;
        interest_total += interest;
        contributions += input.monthly_contribution;
        month += 1;
        if month % 12 == 0 {
            trajectory.push(SavingsPoint { month, balance });
        }
    }

    if trajectory.last().is_some_and(|p| p.month != month) {
        trajectory.push(SavingsPoint { month, balance });
    }

    let reached = balance >= input.target;
    if !reached {
        tracing::debug!(goal = input.target, balance, "savings goal not reached within {MAX_MONTHS} months");
    }

    Ok(SavingsGoalResult {
        reached,
        months: month,
        final_balance: balance,
        total_contributions: contributions,
        total_interest: interest_total,
        trajectory,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn goal() -> SavingsGoalInput {
        SavingsGoalInput {
            label: "Test".to_string(),
            target: 12_000.0,
            initial_balance: 0.0,
            monthly_contribution: 1_000.0,
            annual_rate_percent: 0.0,
        }
    }

    #[test]
    fn test_no_interest_exact_months() {
        let result = calculate(&goal()).unwrap();
        assert!(result.reached);
        assert_eq!(result.months, 12);
        assert_eq!(result.years_and_months(), (1, 0));
        assert_eq!(result.total_interest, 0.0);
        assert_eq!(result.trajectory.len(), 2);
    }

    #[test]
    fn test_interest_shortens_time() {
        let mut input = goal();
        input.target = 100_000.0;
        let without = calculate(&input).unwrap();
        input.annual_rate_percent = 6.0;
        let with = calculate(&input).unwrap();
        assert!(with.months < without.months);
        assert!(with.total_interest > 0.0);
    }

    #[test]
    fn test_already_at_target() {
        let mut input = goal();
        input.initial_balance = 20_000.0;
        let result = calculate(&input).unwrap();
        assert!(result.reached);
        assert_eq!(result.months, 0);
        assert_eq!(result.trajectory.len(), 1);
    }

    #[test]
    fn test_unreachable_terminates_at_cap() {
        let input = SavingsGoalInput {
            label: String::new(),
            target: 1_000.0,
            initial_balance: 100.0,
            monthly_contribution: 0.0,
            annual_rate_percent: 0.0,
        };
        let result = calculate(&input).unwrap();
        assert!(!result.reached);
        assert_eq!(result.months, MAX_MONTHS);
        assert_eq!(result.final_balance, 100.0);
        assert_eq!(result.trajectory.len(), 51);
    }

    #[test]
    fn test_negative_inputs_rejected() {
        let mut input = goal();
        input.monthly_contribution = -5.0;
        assert!(calculate(&input).is_err());
    }
}
