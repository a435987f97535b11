//! # Loan Amortization
//!
//! Level-payment loan: payment, totals, and a year-by-year amortization schedule.
//!
//! Payment per period: `P × i / (1 − (1 + i)^−n)` with `i` the periodic rate
//! and `n` the number of payments; at 0 % it is simply `P / n`.

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

fn default_payments_per_year() -> u32 {
    12
}

/// Input parameters for a loan.
///
/// ## JSON Example
///
/// ```json
/// {
///   "label": "Car loan",
///   "principal": 20000.0,
///   "annual_rate_percent": 6.0,
///   "term_years": 5,
///   "payments_per_year": 12
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanInput {
    #[serde(default)]
    pub label: String,
    pub principal: f64,
    pub annual_rate_percent: f64,
    pub term_years: u32,
    #[serde(default = "default_payments_per_year")]
    pub payments_per_year: u32,
}

impl LoanInput {
    pub fn validate(&self) -> CalcResult<()> {
        if !self.principal.is_finite() || self.principal <= 0.0 {
            return Err(CalcError::invalid_input(
                "principal",
                self.principal.to_string(),
                "Loan amount must be positive",
            ));
        }
        if !self.annual_rate_percent.is_finite() || self.annual_rate_percent < 0.0 {
            return Err(CalcError::invalid_input(
                "annual_rate_percent",
                self.annual_rate_percent.to_string(),
                "Rate cannot be negative",
            ));
        }
        if self.term_years == 0 || self.term_years > 50 {
            return Err(CalcError::invalid_input(
                "term_years",
                self.term_years.to_string(),
                "Term must be between 1 and 50 years",
            ));
        }
        if !(1..=52).contains(&self.payments_per_year) {
            return Err(CalcError::invalid_input(
                "payments_per_year",
                self.payments_per_year.to_string(),
                "Payments per year must be between 1 and 52",
            ));
        }
        Ok(())
    }

    /// Total number of payments
    pub fn payment_count(&self) -> u32 {
        self.term_years * self.payments_per_year
    }

    /// Interest rate per payment period, as a fraction
    pub fn periodic_rate(&self) -> f64 {
        self.annual_rate_percent / 100.0 / f64::from(self.payments_per_year)
    }
}

/// Totals for one year of the schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmortizationRow {
    pub year: u32,
    pub principal_paid: f64,
    pub interest_paid: f64,
    pub ending_balance: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanResult {
    pub payment: f64,
    pub payment_count: u32,
    pub total_paid: f64,
    pub total_interest: f64,
    pub schedule: Vec<AmortizationRow>,
}

/// Level payment per period.
pub fn level_payment(principal: f64, periodic_rate: f64, payments: u32) -> f64 {
    let n = f64::from(payments);
    if periodic_rate == 0.0 {
        principal / n
    } else {
        principal * periodic_rate / (1.0 - (1.0 + periodic_rate).powf(-n))
    }
}

pub fn calculate(input: &LoanInput) -> CalcResult<LoanResult> {
    input.validate()?;

    let rate = input.periodic_rate();
    let count = input.payment_count();
    let payment = level_payment(input.principal, rate, count);

    let mut balance = input.principal;
    let mut schedule = Vec::with_capacity(input.term_years as usize);
    let mut total_interest = 0.0;

    for year in 1..=input.term_years {
        let mut principal_paid = 0.0;
        let mut interest_paid = 0.0;
        for _ in 0..input.payments_per_year {
            let interest = balance * rate;
            let principal = (payment - interest).min(balance);
            balance -= principal;
            principal_paid += principal;
            interest_paid += interest;
        }
        total_interest += interest_paid;
        schedule.push(AmortizationRow {
            year,
            principal_paid,
            interest_paid,
            // Clear float dust on the final payment
            ending_balance: if balance.abs() < 1e-6 { 0.0 } else { balance },
        });
    }

    Ok(LoanResult {
        payment,
        payment_count: count,
        total_paid: input.principal + total_interest,
        total_interest,
        schedule,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn car_loan() -> LoanInput {
        LoanInput {
            label: "Car".to_string(),
            principal: 20_000.0,
            annual_rate_percent: 6.0,
            term_years: 5,
            payments_per_year: 12,
        }
    }

    #[test]
    fn test_monthly_payment() {
        // Standard table value: $386.66 per month
        let result = calculate(&car_loan()).unwrap();
        assert!((result.payment - 386.66).abs() < 0.01);
        assert_eq!(result.payment_count, 60);
        assert!((result.total_interest - 3199.36).abs() < 0.1);
    }

    #[test]
    fn test_schedule_pays_off() {
        let result = calculate(&car_loan()).unwrap();
        assert_eq!(result.schedule.len(), 5);
        assert_eq!(result.schedule.last().unwrap().ending_balance, 0.0);
        let principal: f64 = result.schedule.iter().map(|r| r.principal_paid).sum();
        assert!((principal - 20_000.0).abs() < 1e-6);
        // Interest share falls every year
        assert!(result.schedule.windows(2).all(|w| w[1].interest_paid < w[0].interest_paid));
    }

    #[test]
    fn test_zero_rate() {
        let mut input = car_loan();
        input.annual_rate_percent = 0.0;
        let result = calculate(&input).unwrap();
        assert!((result.payment - 20_000.0 / 60.0).abs() < 1e-9);
        assert_eq!(result.total_interest, 0.0);
    }

    #[test]
    fn test_invalid_term() {
        let mut input = car_loan();
        input.term_years = 0;
        assert!(calculate(&input).is_err());
    }

    #[test]
    fn test_default_payments_per_year() {
        let json = r#"{"principal": 1000.0, "annual_rate_percent": 5.0, "term_years": 1}"#;
        let input: LoanInput = serde_json::from_str(json).unwrap();
        assert_eq!(input.payments_per_year, 12);
        assert!(input.label.is_empty());
    }
}
