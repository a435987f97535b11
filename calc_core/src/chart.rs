//! # Chart Series
//!
//! Read-only projections of calculator results into labelled point lists.
//! A front-end can hand these to any plotting library; no styling or
//! library-specific configuration lives here.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::calculations::energy_cost::EnergyCostResult;
use crate::calculations::interest::CompoundInterestResult;
use crate::calculations::loan::LoanResult;
use crate::calculations::savings_goal::SavingsGoalResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    Bar,
    Line,
    Doughnut,
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ChartKind::Bar => "bar",
            ChartKind::Line => "line",
            ChartKind::Doughnut => "doughnut",
        };
        write!(f, "{name}")
    }
}

/// One labelled value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub label: String,
    pub value: f64,
}

impl ChartPoint {
    pub fn new(label: impl Into<String>, value: f64) -> Self {
        Self {
            label: label.into(),
            value,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSeries {
    pub label: String,
    pub kind: ChartKind,
    pub points: Vec<ChartPoint>,
}

impl ChartSeries {
    pub fn new(label: impl Into<String>, kind: ChartKind) -> Self {
        Self {
            label: label.into(),
            kind,
            points: Vec::new(),
        }
    }

    pub fn push(&mut self, label: impl Into<String>, value: f64) {
        self.points.push(ChartPoint::new(label, value));
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Largest point value, `None` for an empty series
    pub fn max_value(&self) -> Option<f64> {
        self.points.iter().map(|p| p.value).reduce(f64::max)
    }
}

/// Balance by year, one line per breakdown row.
pub fn compound_growth(result: &CompoundInterestResult) -> Vec<ChartSeries> {
    let mut balance = ChartSeries::new("Balance", ChartKind::Line);
    let mut deposits = ChartSeries::new("Total deposits", ChartKind::Line);
    for row in &result.breakdown {
        let year = format!("Year {}", row.year);
        balance.push(year.clone(), row.balance);
        deposits.push(year, row.total_deposits);
    }
    vec![balance, deposits]
}

/// Principal versus interest share of a loan.
pub fn loan_totals(result: &LoanResult) -> ChartSeries {
    let mut series = ChartSeries::new("Loan cost", ChartKind::Doughnut);
    series.push("Principal", result.total_paid - result.total_interest);
    series.push("Interest", result.total_interest);
    series
}

/// Running cost by period.
pub fn energy_cost(result: &EnergyCostResult) -> ChartSeries {
    let mut series = ChartSeries::new("Cost", ChartKind::Bar);
    series.push("Day", result.cost_per_day);
    series.push("Month", result.cost_per_month);
    series.push("Year", result.cost_per_year);
    series
}

/// Balance trajectory toward a savings goal.
pub fn savings_trajectory(result: &SavingsGoalResult) -> ChartSeries {
    let mut series = ChartSeries::new("Balance", ChartKind::Line);
    for point in &result.trajectory {
        series.push(format!("Month {}", point.month), point.balance);
    }
    series
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::{energy_cost, interest, loan, savings_goal};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_compound_growth_series() {
        let result = interest::calculate_compound(&interest::CompoundInterestInput {
            label: String::new(),
            principal: 1000.0,
            annual_rate_percent: 5.0,
            years: 3,
            compounding: interest::Compounding::Annually,
            annual_contribution: 100.0,
        })
        .unwrap();
        let series = compound_growth(&result);
        assert_eq!(series.len(), 2);
        assert_eq!(series[0].points.len(), 3);
        assert_eq!(series[0].points[0].label, "Year 1");
        assert!((series[0].points[0].value - 1150.0).abs() < 1e-9);
        assert_eq!(series[1].points[2].value, 1300.0);
    }

    #[test]
    fn test_loan_doughnut_sums_to_total() {
        let result = loan::calculate(&loan::LoanInput {
            label: String::new(),
            principal: 20_000.0,
            annual_rate_percent: 6.0,
            term_years: 5,
            payments_per_year: 12,
        })
        .unwrap();
        let series = loan_totals(&result);
        assert_eq!(series.kind, ChartKind::Doughnut);
        let sum: f64 = series.points.iter().map(|p| p.value).sum();
        assert!((sum - result.total_paid).abs() < 1e-9);
        assert!((series.points[0].value - 20_000.0).abs() < 1e-6);
    }

    #[test]
    fn test_energy_bars() {
        let result = energy_cost::calculate(&energy_cost::EnergyCostInput {
            label: String::new(),
            appliance: energy_cost::Appliance::Television,
            watts_override: None,
            hours_per_day: 5.0,
            price_per_kwh: 0.2,
            quantity: 1,
        })
        .unwrap();
        let series = energy_cost(&result);
        let labels: Vec<_> = series.points.iter().map(|p| p.label.as_str()).collect();
        assert_eq!(labels, vec!["Day", "Month", "Year"]);
        assert_eq!(series.max_value(), Some(result.cost_per_year));
    }

    #[test]
    fn test_savings_line_follows_trajectory() {
        let result = savings_goal::calculate(&savings_goal::SavingsGoalInput {
            label: String::new(),
            target: 3_000.0,
            initial_balance: 0.0,
            monthly_contribution: 100.0,
            annual_rate_percent: 0.0,
        })
        .unwrap();
        let series = savings_trajectory(&result);
        assert_eq!(series.points.len(), result.trajectory.len());
        assert_eq!(series.points.last().map(|p| p.label.as_str()), Some("Month 30"));
        assert!(!series.is_empty());
    }

    #[test]
    fn test_kind_serialization() {
        assert_eq!(serde_json::to_string(&ChartKind::Doughnut).unwrap(), "\"doughnut\"");
    }
}
