//! # Temperature Scales
//!
//! Temperature scales differ by an offset as well as a scale, so they cannot
//! share the ratio engine in [`units`](crate::units). Each scale maps to and
//! from Celsius with `celsius = (value - offset) * scale`.
//!
//! Oven helpers convert between conventional ovens, fan ovens and UK gas marks.
//! The gas mark table follows the common cookery chart: marks 1 to 9 sit
//! 25 °F apart starting at 275 °F, with ¼ and ½ below that.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// Drop applied to a conventional oven setting for a fan (convection) oven
pub const FAN_OVEN_OFFSET_C: f64 = 20.0;

/// Coldest oven setting covered by the gas mark chart
pub const OVEN_MIN_C: f64 = 100.0;

/// Hottest oven setting covered by the gas mark chart
pub const OVEN_MAX_C: f64 = 260.0;

/// Temperature scale
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TemperatureScale {
    Celsius,
    Fahrenheit,
    Kelvin,
    Rankine,
}

impl TemperatureScale {
    pub const ALL: [TemperatureScale; 4] = [
        TemperatureScale::Celsius,
        TemperatureScale::Fahrenheit,
        TemperatureScale::Kelvin,
        TemperatureScale::Rankine,
    ];

    /// `(offset, scale)` such that `celsius = (value - offset) * scale`
    fn affine(self) -> (f64, f64) {
        match self {
            TemperatureScale::Celsius => (0.0, 1.0),
            TemperatureScale::Fahrenheit => (32.0, 5.0 / 9.0),
            TemperatureScale::Kelvin => (273.15, 1.0),
            TemperatureScale::Rankine => (491.67, 5.0 / 9.0),
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            TemperatureScale::Celsius => "°C",
            TemperatureScale::Fahrenheit => "°F",
            TemperatureScale::Kelvin => "K",
            TemperatureScale::Rankine => "°R",
        }
    }

    /// Parse from common spellings ("c", "celsius", "°F", "kelvin", ...)
    pub fn from_str_flexible(s: &str) -> CalcResult<Self> {
        match s.trim().trim_start_matches('°').to_lowercase().as_str() {
            "c" | "celsius" | "centigrade" => Ok(TemperatureScale::Celsius),
            "f" | "fahrenheit" => Ok(TemperatureScale::Fahrenheit),
            "k" | "kelvin" => Ok(TemperatureScale::Kelvin),
            "r" | "rankine" => Ok(TemperatureScale::Rankine),
            _ => Err(CalcError::unknown_unit("temperature", s)),
        }
    }

    /// Absolute zero expressed in this scale
    pub fn absolute_zero(self) -> f64 {
        from_celsius(-273.15, self)
    }
}

impl fmt::Display for TemperatureScale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

pub fn to_celsius(value: f64, from: TemperatureScale) -> f64 {
    let (offset, scale) = from.affine();
    (value - offset) * scale
}

pub fn from_celsius(celsius: f64, to: TemperatureScale) -> f64 {
    let (offset, scale) = to.affine();
    celsius / scale + offset
}

/// Convert between temperature scales.
///
/// Values below absolute zero are rejected.
pub fn convert_temperature(value: f64, from: TemperatureScale, to: TemperatureScale) -> CalcResult<f64> {
    let celsius = to_celsius(value, from);
    if celsius < -273.15 - 1e-9 {
        return Err(CalcError::invalid_input(
            "temperature",
            format!("{value}{}", from.symbol()),
            "Below absolute zero",
        ));
    }
    Ok(from_celsius(celsius, to))
}

// ============================================================================
// Oven temperatures
// ============================================================================

/// UK gas mark
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GasMark {
    #[serde(rename = "1/4")]
    Quarter,
    #[serde(rename = "1/2")]
    Half,
    #[serde(rename = "1")]
    One,
    #[serde(rename = "2")]
    Two,
    #[serde(rename = "3")]
    Three,
    #[serde(rename = "4")]
    Four,
    #[serde(rename = "5")]
    Five,
    #[serde(rename = "6")]
    Six,
    #[serde(rename = "7")]
    Seven,
    #[serde(rename = "8")]
    Eight,
    #[serde(rename = "9")]
    Nine,
}

impl GasMark {
    pub const ALL: [GasMark; 11] = [
        GasMark::Quarter,
        GasMark::Half,
        GasMark::One,
        GasMark::Two,
        GasMark::Three,
        GasMark::Four,
        GasMark::Five,
        GasMark::Six,
        GasMark::Seven,
        GasMark::Eight,
        GasMark::Nine,
    ];

    /// Numeric mark (0.25, 0.5, 1.0 ... 9.0)
    pub fn number(self) -> f64 {
        match self {
            GasMark::Quarter => 0.25,
            GasMark::Half => 0.5,
            GasMark::One => 1.0,
            GasMark::Two => 2.0,
            GasMark::Three => 3.0,
            GasMark::Four => 4.0,
            GasMark::Five => 5.0,
            GasMark::Six => 6.0,
            GasMark::Seven => 7.0,
            GasMark::Eight => 8.0,
            GasMark::Nine => 9.0,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            GasMark::Quarter => "1/4",
            GasMark::Half => "1/2",
            GasMark::One => "1",
            GasMark::Two => "2",
            GasMark::Three => "3",
            GasMark::Four => "4",
            GasMark::Five => "5",
            GasMark::Six => "6",
            GasMark::Seven => "7",
            GasMark::Eight => "8",
            GasMark::Nine => "9",
        }
    }

    pub fn from_str_flexible(s: &str) -> CalcResult<Self> {
        let cleaned = s.trim().to_lowercase().replace("gas", "").replace("mark", "");
        match cleaned.trim() {
            "1/4" | "0.25" | "¼" => Ok(GasMark::Quarter),
            "1/2" | "0.5" | "½" => Ok(GasMark::Half),
            other => GasMark::ALL
                .iter()
                .copied()
                .find(|m| m.label() == other)
                .ok_or_else(|| CalcError::unknown_unit("gas mark", s)),
        }
    }

    /// Oven setting in °F.
    ///
    /// Marks 1-9 follow `250 + 25 × mark`; ¼ and ½ are chart values.
    pub fn fahrenheit(self) -> f64 {
        match self {
            GasMark::Quarter => 225.0,
            GasMark::Half => 250.0,
            mark => 250.0 + 25.0 * mark.number(),
        }
    }

    /// Oven setting in °C (exact conversion of the °F chart value).
    pub fn celsius(self) -> f64 {
        to_celsius(self.fahrenheit(), TemperatureScale::Fahrenheit)
    }
}

impl fmt::Display for GasMark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Gas Mark {}", self.label())
    }
}

pub fn gas_mark_to_celsius(mark: GasMark) -> f64 {
    mark.celsius()
}

pub fn gas_mark_to_fahrenheit(mark: GasMark) -> f64 {
    mark.fahrenheit()
}

/// Nearest gas mark to a conventional oven temperature.
///
/// Returns `None` outside the oven range covered by the chart.
pub fn celsius_to_gas_mark(celsius: f64) -> Option<GasMark> {
    if !(OVEN_MIN_C..=OVEN_MAX_C).contains(&celsius) {
        return None;
    }
    GasMark::ALL.iter().copied().min_by(|a, b| {
        let da = (a.celsius() - celsius).abs();
        let db = (b.celsius() - celsius).abs();
        da.total_cmp(&db)
    })
}

/// Fan oven equivalent of a conventional oven setting in °C.
pub fn fan_oven_celsius(conventional_celsius: f64) -> f64 {
    conventional_celsius - FAN_OVEN_OFFSET_C
}

/// Conventional oven setting for a fan oven temperature in °C.
pub fn conventional_oven_celsius(fan_celsius: f64) -> f64 {
    fan_celsius + FAN_OVEN_OFFSET_C
}

/// One row of an oven conversion chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OvenChartRow {
    pub gas_mark: GasMark,
    pub fahrenheit: f64,
    pub celsius: f64,
    pub fan_celsius: f64,
}

/// Full oven chart for every gas mark.
pub fn oven_chart() -> Vec<OvenChartRow> {
    GasMark::ALL
        .iter()
        .map(|&mark| OvenChartRow {
            gas_mark: mark,
            fahrenheit: mark.fahrenheit(),
            celsius: mark.celsius(),
            fan_celsius: fan_oven_celsius(mark.celsius()),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: f64, b: f64) {
        assert!((a - b).abs() < 1e-9, "{a} != {b}");
    }

    #[test]
    fn test_fixed_points() {
        use TemperatureScale::*;
        assert_close(convert_temperature(100.0, Celsius, Fahrenheit).unwrap(), 212.0);
        assert_close(convert_temperature(32.0, Fahrenheit, Celsius).unwrap(), 0.0);
        assert_close(convert_temperature(-40.0, Celsius, Fahrenheit).unwrap(), -40.0);
        assert_close(convert_temperature(0.0, Celsius, Kelvin).unwrap(), 273.15);
        assert_close(convert_temperature(0.0, Kelvin, Rankine).unwrap(), 0.0);
    }

    #[test]
    fn test_round_trip_all_scales() {
        for &from in &TemperatureScale::ALL {
            for &to in &TemperatureScale::ALL {
                let there = convert_temperature(37.5 + 273.15, from, to).unwrap();
                let back = convert_temperature(there, to, from).unwrap();
                assert!((back - (37.5 + 273.15)).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn test_below_absolute_zero_rejected() {
        let err = convert_temperature(-300.0, TemperatureScale::Celsius, TemperatureScale::Kelvin);
        assert!(err.is_err());
        assert_close(TemperatureScale::Fahrenheit.absolute_zero(), -459.67);
    }

    #[test]
    fn test_gas_marks() {
        assert_eq!(GasMark::Four.fahrenheit(), 350.0);
        assert!((GasMark::Four.celsius() - 176.67).abs() < 0.01);
        assert_eq!(GasMark::Quarter.fahrenheit(), 225.0);
        assert_eq!(GasMark::Nine.fahrenheit(), 475.0);
    }

    #[test]
    fn test_celsius_to_gas_mark() {
        assert_eq!(celsius_to_gas_mark(180.0), Some(GasMark::Four));
        assert_eq!(celsius_to_gas_mark(200.0), Some(GasMark::Six));
        assert_eq!(celsius_to_gas_mark(110.0), Some(GasMark::Quarter));
        assert_eq!(celsius_to_gas_mark(50.0), None);
        assert_eq!(celsius_to_gas_mark(300.0), None);
    }

    #[test]
    fn test_fan_oven_offset() {
        assert_eq!(fan_oven_celsius(200.0), 180.0);
        assert_eq!(conventional_oven_celsius(fan_oven_celsius(170.0)), 170.0);
    }

    #[test]
    fn test_parse() {
        assert_eq!(TemperatureScale::from_str_flexible("°F").unwrap(), TemperatureScale::Fahrenheit);
        assert_eq!(GasMark::from_str_flexible("gas mark 5").unwrap(), GasMark::Five);
        assert_eq!(GasMark::from_str_flexible("1/2").unwrap(), GasMark::Half);
        assert!(GasMark::from_str_flexible("11").is_err());
    }

    #[test]
    fn test_oven_chart_is_monotonic() {
        let chart = oven_chart();
        assert_eq!(chart.len(), 11);
        assert!(chart.windows(2).all(|w| w[0].celsius < w[1].celsius));
    }
}
