//! # Internal Rate of Return
//!
//! IRR is the discount rate at which the net present value of a cash-flow
//! series is zero. It is found with Newton–Raphson on
//!
//! ```text
//! NPV(r)  = Σ CFₜ / (1 + r)^t
//! NPV'(r) = Σ −t · CFₜ / (1 + r)^(t+1)
//! ```
//!
//! starting from 10 %. A solution is only reported when the residual is below
//! [`NPV_TOLERANCE`] and the rate lies in [−100 %, 1000 %]; everything else is a
//! [`CalcError::DidNotConverge`] the caller shows inline.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::calculations::irr::irr;
//!
//! let solution = irr(&[-10_000.0, 3_000.0, 4_000.0, 5_000.0, 6_000.0]).unwrap();
//! assert!((solution.rate - 0.2489).abs() < 1e-3);
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// Starting guess for Newton–Raphson
pub const INITIAL_GUESS: f64 = 0.10;

/// Absolute NPV residual accepted as a root
pub const NPV_TOLERANCE: f64 = 1e-7;

/// Iteration cap
pub const MAX_ITERATIONS: u32 = 1000;

/// Lowest admissible rate (−100 %); `(1 + r)` must stay positive
pub const MIN_RATE: f64 = -1.0;

/// Highest admissible rate (1000 %)
pub const MAX_RATE: f64 = 10.0;

const SOLVER: &str = "IRR";

/// Net present value of `cash_flows` (period 0 first) at `rate`.
pub fn npv(rate: f64, cash_flows: &[f64]) -> f64 {
    let base = 1.0 + rate;
    cash_flows
        .iter()
        .enumerate()
        .map(|(t, cf)| cf / base.powi(t as i32))
        .sum()
}

fn npv_derivative(rate: f64, cash_flows: &[f64]) -> f64 {
    let base = 1.0 + rate;
    cash_flows
        .iter()
        .enumerate()
        .skip(1)
        .map(|(t, cf)| -(t as f64) * cf / base.powi(t as i32 + 1))
        .sum()
}

/// A converged IRR
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IrrSolution {
    /// Rate as a fraction (0.25 = 25 %)
    pub rate: f64,
    pub iterations: u32,
    /// NPV at `rate`, below the tolerance in magnitude
    pub residual: f64,
}

fn check_cash_flows(cash_flows: &[f64]) -> CalcResult<()> {
    if cash_flows.len() < 2 {
        return Err(CalcError::invalid_input(
            "cash_flows",
            format!("{cash_flows:?}"),
            "At least two cash flows are required",
        ));
    }
    if let Some(bad) = cash_flows.iter().find(|cf| !cf.is_finite()) {
        return Err(CalcError::invalid_input("cash_flows", bad.to_string(), "Cash flows must be finite"));
    }
    let has_inflow = cash_flows.iter().any(|&cf| cf > 0.0);
    let has_outflow = cash_flows.iter().any(|&cf| cf < 0.0);
    if !(has_inflow && has_outflow) {
        return Err(CalcError::did_not_converge(
            SOLVER,
            0,
            "cash flows must contain both a negative and a positive value",
        ));
    }
    Ok(())
}

/// Solve for the internal rate of return.
pub fn irr(cash_flows: &[f64]) -> CalcResult<IrrSolution> {
    check_cash_flows(cash_flows)?;

    let mut rate = INITIAL_GUESS;
    for iteration in 1..=MAX_ITERATIONS {
        let value = npv(rate, cash_flows);
        if value.abs() < NPV_TOLERANCE {
            return accept(rate, iteration, value);
        }

        let slope = npv_derivative(rate, cash_flows);
        if !slope.is_finite() || slope == 0.0 {
            return Err(CalcError::did_not_converge(
                SOLVER,
                iteration,
                "NPV derivative vanished or is not finite",
            ));
        }

        let mut next = rate - value / slope;
        if !next.is_finite() {
            return Err(CalcError::did_not_converge(SOLVER, iteration, "rate diverged"));
        }
        if next <= MIN_RATE {
            // Step overshot -100 %; move halfway toward it instead
            next = (rate + MIN_RATE) / 2.0;
        }
        tracing::trace!(iteration, rate, next, npv = value, "irr step");
        rate = next;
    }

    tracing::debug!(rate, "irr hit iteration cap");
    Err(CalcError::did_not_converge(
        SOLVER,
        MAX_ITERATIONS,
        "iteration limit reached",
    ))
}

fn accept(rate: f64, iterations: u32, residual: f64) -> CalcResult<IrrSolution> {
    if !(MIN_RATE..=MAX_RATE).contains(&rate) {
        return Err(CalcError::did_not_converge(
            SOLVER,
            iterations,
            format!("rate {:.2}% is outside the -100%..1000% range", rate * 100.0),
        ));
    }
    Ok(IrrSolution {
        rate,
        iterations,
        residual,
    })
}

/// Input for the IRR calculator.
///
/// ## JSON Example
///
/// ```json
/// { "label": "Project A", "cash_flows": [-10000, 3000, 4000, 5000, 6000] }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IrrInput {
    #[serde(default)]
    pub label: String,
    /// Cash flow per year, year 0 first
    pub cash_flows: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IrrResult {
    pub irr: f64,
    pub iterations: u32,
    pub total_inflow: f64,
    pub total_outflow: f64,
    /// Undiscounted sum of all flows
    pub net_cash_flow: f64,
    /// NPV of each flow at the IRR, for charting
    pub discounted_flows: Vec<f64>,
}

pub fn calculate(input: &IrrInput) -> CalcResult<IrrResult> {
    let solution = irr(&input.cash_flows)?;
    let base = 1.0 + solution.rate;

    Ok(IrrResult {
        irr: solution.rate,
        iterations: solution.iterations,
        total_inflow: input.cash_flows.iter().filter(|&&cf| cf > 0.0).sum(),
        total_outflow: input.cash_flows.iter().filter(|&&cf| cf < 0.0).sum(),
        net_cash_flow: input.cash_flows.iter().sum(),
        discounted_flows: input
            .cash_flows
            .iter()
            .enumerate()
            .map(|(t, cf)| cf / base.powi(t as i32))
            .collect(),
    })
}
