//! # calc_core - Everyday Calculator Engine
//!
//! `calc_core` is the computational heart of Tally: unit conversions, money
//! and health calculators, and the input and formatting rules they share.
//! All inputs and outputs are JSON-serializable, so any front-end (the
//! `tally` CLI, a web page, a script) drives the same code.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions that take input and return results
//! - **JSON-First**: All types implement Serialize/Deserialize
//! - **Rich Errors**: Structured error types, not NaN or empty strings
//! - **Precision until display**: Only [`format`] rounds
//!
//! ## Quick Start
//!
//! ```rust
//! use calc_core::calculations::{calculate_item, CalculationItem, CalculationOutput};
//!
//! let json = r#"{"type":"Conversion","quantity":"length","value":5.0,"from":"km","to":"mi"}"#;
//! let item: CalculationItem = serde_json::from_str(json).unwrap();
//!
//! if let CalculationOutput::Conversion(result) = calculate_item(&item).unwrap() {
//!     assert_eq!(result.display, "3.11 mi");
//! }
//! ```
//!
//! ## Modules
//!
//! - [`input`] - Numeric text normalization
//! - [`units`] - Base-unit conversion engine
//! - [`temperature`] - Temperature scales and oven marks
//! - [`density`] - Ingredient volume/mass conversion
//! - [`lookup`] - Half-open range tables
//! - [`calculations`] - Formula calculators
//! - [`format`] - Result formatting
//! - [`chart`] - Chart series projections
//! - [`catalog`] - Calculator index
//! - [`ticker`] - One-second recomputation timer
//! - [`settings`] - User preferences
//! - [`errors`] - Structured error types

pub mod calculations;
pub mod catalog;
pub mod chart;
pub mod density;
pub mod errors;
pub mod format;
pub mod input;
pub mod lookup;
pub mod settings;
pub mod temperature;
pub mod ticker;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use calculations::{calculate_item, CalculationItem, CalculationOutput};
pub use errors::{CalcError, CalcResult};
pub use settings::Settings;
