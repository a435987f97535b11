//! # Error Types
//!
//! Structured error types for calc_core. Malformed keystrokes never reach this
//! layer (the [`input`](crate::input) normalizer swallows them), so these errors
//! describe inputs that are well-formed text but meaningless to a formula:
//! a zero height, a cash-flow series with no sign change, an unknown unit name.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::errors::{CalcError, CalcResult};
//!
//! fn validate_years(years: f64) -> CalcResult<()> {
//!     if years < 0.0 {
//!         return Err(CalcError::InvalidInput {
//!             field: "years".to_string(),
//!             value: years.to_string(),
//!             reason: "Term cannot be negative".to_string(),
//!         });
//!     }
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for calc_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Structured error type for calculation operations.
///
/// Each variant provides specific context about what went wrong,
/// so a front-end can show the message inline next to the result.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// An input value is invalid (out of range, wrong sign, etc.)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// Unit name not recognised for the given quantity
    #[error("Unknown {quantity} unit: {unit}")]
    UnknownUnit { quantity: String, unit: String },

    /// Result has no finite value (zero denominator and similar)
    #[error("Undefined result for {quantity}: {reason}")]
    Undefined { quantity: String, reason: String },

    /// An iterative solver failed to reach a usable answer
    #[error("{solver} did not converge after {iterations} iterations: {reason}")]
    DidNotConverge {
        solver: String,
        iterations: u32,
        reason: String,
    },

    /// File I/O error (settings files)
    #[error("File error: {operation} on '{path}' - {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },
}

impl CalcError {
    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create an UnknownUnit error
    pub fn unknown_unit(quantity: impl Into<String>, unit: impl Into<String>) -> Self {
        CalcError::UnknownUnit {
            quantity: quantity.into(),
            unit: unit.into(),
        }
    }

    /// Create an Undefined error
    pub fn undefined(quantity: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::Undefined {
            quantity: quantity.into(),
            reason: reason.into(),
        }
    }

    /// Create a DidNotConverge error
    pub fn did_not_converge(solver: impl Into<String>, iterations: u32, reason: impl Into<String>) -> Self {
        CalcError::DidNotConverge {
            solver: solver.into(),
            iterations,
            reason: reason.into(),
        }
    }

    /// Create a FileError
    pub fn file_error(operation: impl Into<String>, path: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::InvalidInput { .. } => "INVALID_INPUT",
            CalcError::UnknownUnit { .. } => "UNKNOWN_UNIT",
            CalcError::Undefined { .. } => "UNDEFINED",
            CalcError::DidNotConverge { .. } => "DID_NOT_CONVERGE",
            CalcError::FileError { .. } => "FILE_ERROR",
            CalcError::SerializationError { .. } => "SERIALIZATION_ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let error = CalcError::invalid_input("principal", "-5", "Principal cannot be negative");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"type\":\"InvalidInput\""));
        let roundtrip: CalcError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, roundtrip);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(
            CalcError::invalid_input("rate", "-1", "Rate cannot be negative").error_code(),
            "INVALID_INPUT"
        );
        assert_eq!(CalcError::undefined("ratio", "both terms are zero").error_code(), "UNDEFINED");
        assert_eq!(CalcError::file_error("read", "tally.json", "missing").error_code(), "FILE_ERROR");
        assert_eq!(CalcError::unknown_unit("length", "cubit").error_code(), "UNKNOWN_UNIT");
        assert_eq!(
            CalcError::did_not_converge("IRR", 12, "derivative vanished").error_code(),
            "DID_NOT_CONVERGE"
        );
    }

    #[test]
    fn test_only_raised_variants_deserialize() {
        let raised = [
            CalcError::invalid_input("principal", "-5", "negative"),
            CalcError::unknown_unit("length", "cubit"),
            CalcError::undefined("BMI", "height is zero"),
            CalcError::did_not_converge("IRR", 3, "diverged"),
            CalcError::file_error("write", "tally.json", "read-only"),
            CalcError::SerializationError { reason: "eof".to_string() },
        ];
        for err in raised {
            let json = serde_json::to_value(&err).unwrap();
            assert!(json["type"].is_string());
        }
        for retired in ["MissingField", "CalculationFailed", "Internal"] {
            let json = format!(r#"{{"type":"{retired}","details":{{}}}}"#);
            assert!(serde_json::from_str::<CalcError>(&json).is_err(), "{retired}");
        }
    }

    #[test]
    fn test_error_messages() {
        let err = CalcError::undefined("BMI", "height is zero");
        assert_eq!(err.to_string(), "Undefined result for BMI: height is zero");

        let err = CalcError::did_not_converge("IRR", 1000, "iteration limit reached");
        assert_eq!(
            err.to_string(),
            "IRR did not converge after 1000 iterations: iteration limit reached"
        );
    }
}
