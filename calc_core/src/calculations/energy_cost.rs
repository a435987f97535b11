//! # Appliance Energy Cost
//!
//! Running cost of an appliance from its power draw, daily use and the
//! electricity tariff. Typical wattages come from a lookup table; a measured
//! value can override it.
//!
//! `kWh/day = watts × hours × quantity / 1000`, `cost = kWh × price`.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::units::{convert, EnergyUnit};

/// Average days per month used for monthly figures
pub const DAYS_PER_MONTH: f64 = 365.0 / 12.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Appliance {
    Refrigerator,
    Television,
    Laptop,
    DesktopComputer,
    GamingConsole,
    WashingMachine,
    ClothesDryer,
    Dishwasher,
    Microwave,
    ElectricKettle,
    ElectricOven,
    SpaceHeater,
    AirConditioner,
    CeilingFan,
    HairDryer,
    LedBulb,
    IncandescentBulb,
}

impl Appliance {
    pub const ALL: [Appliance; 17] = [
        Appliance::Refrigerator,
        Appliance::Television,
        Appliance::Laptop,
        Appliance::DesktopComputer,
        Appliance::GamingConsole,
        Appliance::WashingMachine,
        Appliance::ClothesDryer,
        Appliance::Dishwasher,
        Appliance::Microwave,
        Appliance::ElectricKettle,
        Appliance::ElectricOven,
        Appliance::SpaceHeater,
        Appliance::AirConditioner,
        Appliance::CeilingFan,
        Appliance::HairDryer,
        Appliance::LedBulb,
        Appliance::IncandescentBulb,
    ];

    /// Typical power draw in watts while running
    pub fn typical_watts(self) -> f64 {
        match self {
            Appliance::Refrigerator => 150.0,
            Appliance::Television => 100.0,
            Appliance::Laptop => 50.0,
            Appliance::DesktopComputer => 200.0,
            Appliance::GamingConsole => 150.0,
            Appliance::WashingMachine => 500.0,
            Appliance::ClothesDryer => 3000.0,
            Appliance::Dishwasher => 1800.0,
            Appliance::Microwave => 1100.0,
            Appliance::ElectricKettle => 2200.0,
            Appliance::ElectricOven => 2400.0,
            Appliance::SpaceHeater => 1500.0,
            Appliance::AirConditioner => 1000.0,
            Appliance::CeilingFan => 75.0,
            Appliance::HairDryer => 1500.0,
            Appliance::LedBulb => 10.0,
            Appliance::IncandescentBulb => 60.0,
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Appliance::Refrigerator => "Refrigerator",
            Appliance::Television => "Television",
            Appliance::Laptop => "Laptop",
            Appliance::DesktopComputer => "Desktop computer",
            Appliance::GamingConsole => "Gaming console",
            Appliance::WashingMachine => "Washing machine",
            Appliance::ClothesDryer => "Clothes dryer",
            Appliance::Dishwasher => "Dishwasher",
            Appliance::Microwave => "Microwave",
            Appliance::ElectricKettle => "Electric kettle",
            Appliance::ElectricOven => "Electric oven",
            Appliance::SpaceHeater => "Space heater",
            Appliance::AirConditioner => "Air conditioner",
            Appliance::CeilingFan => "Ceiling fan",
            Appliance::HairDryer => "Hair dryer",
            Appliance::LedBulb => "LED bulb",
            Appliance::IncandescentBulb => "Incandescent bulb",
        }
    }

    pub fn from_str_flexible(s: &str) -> CalcResult<Self> {
        let wanted = s.trim().to_lowercase().replace(['-', '_'], " ");
        Appliance::ALL
            .iter()
            .copied()
            .find(|a| a.display_name().to_lowercase() == wanted)
            .ok_or_else(|| CalcError::invalid_input("appliance", s, "Unknown appliance"))
    }
}

impl fmt::Display for Appliance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

fn default_quantity() -> u32 {
    1
}

/// Input for the energy cost calculator.
///
/// ## JSON Example
///
/// ```json
/// {
///   "label": "Office",
///   "appliance": "space_heater",
///   "watts_override": null,
///   "hours_per_day": 6.0,
///   "price_per_kwh": 0.28,
///   "quantity": 2
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnergyCostInput {
    #[serde(default)]
    pub label: String,
    pub appliance: Appliance,
    /// Measured draw replacing the table value
    #[serde(default)]
    pub watts_override: Option<f64>,
    pub hours_per_day: f64,
    pub price_per_kwh: f64,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

impl EnergyCostInput {
    pub fn watts(&self) -> f64 {
        self.watts_override.unwrap_or_else(|| self.appliance.typical_watts())
    }

    pub fn validate(&self) -> CalcResult<()> {
        let watts = self.watts();
        if !watts.is_finite() || watts < 0.0 {
            return Err(CalcError::invalid_input("watts_override", watts.to_string(), "Power cannot be negative"));
        }
        if !(0.0..=24.0).contains(&self.hours_per_day) {
            return Err(CalcError::invalid_input(
                "hours_per_day",
                self.hours_per_day.to_string(),
                "Hours per day must be between 0 and 24",
            ));
        }
        if !self.price_per_kwh.is_finite() || self.price_per_kwh < 0.0 {
            return Err(CalcError::invalid_input(
                "price_per_kwh",
                self.price_per_kwh.to_string(),
                "Price cannot be negative",
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnergyCostResult {
    pub watts: f64,
    pub kwh_per_day: f64,
    pub kwh_per_year: f64,
    pub cost_per_day: f64,
    pub cost_per_month: f64,
    pub cost_per_year: f64,
}

pub fn calculate(input: &EnergyCostInput) -> CalcResult<EnergyCostResult> {
    input.validate()?;

    let watts = input.watts();
    let watt_hours = watts * input.hours_per_day * f64::from(input.quantity);
    let kwh_per_day = convert(watt_hours, EnergyUnit::WattHour, EnergyUnit::KilowattHour);
    let cost_per_day = kwh_per_day * input.price_per_kwh;

    Ok(EnergyCostResult {
        watts,
        kwh_per_day,
        kwh_per_year: kwh_per_day * 365.0,
        cost_per_day,
        cost_per_month: cost_per_day * DAYS_PER_MONTH,
        cost_per_year: cost_per_day * 365.0,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_space_heater_cost() {
        let input = EnergyCostInput {
            label: String::new(),
            appliance: Appliance::SpaceHeater,
            watts_override: None,
            hours_per_day: 4.0,
            price_per_kwh: 0.15,
            quantity: 1,
        };
        let result = calculate(&input).unwrap();
        assert!((result.kwh_per_day - 6.0).abs() < 1e-9);
        assert!((result.cost_per_day - 0.9).abs() < 1e-9);
        assert!((result.cost_per_year - 328.5).abs() < 1e-6);
    }

    #[test]
    fn test_override_and_quantity() {
        let input = EnergyCostInput {
            label: String::new(),
            appliance: Appliance::LedBulb,
            watts_override: Some(9.0),
            hours_per_day: 10.0,
            price_per_kwh: 0.20,
            quantity: 10,
        };
        let result = calculate(&input).unwrap();
        assert_eq!(result.watts, 9.0);
        assert!((result.kwh_per_day - 0.9).abs() < 1e-9);
    }

    #[test]
    fn test_hours_out_of_range() {
        let input = EnergyCostInput {
            label: String::new(),
            appliance: Appliance::Laptop,
            watts_override: None,
            hours_per_day: 25.0,
            price_per_kwh: 0.20,
            quantity: 1,
        };
        assert!(calculate(&input).is_err());
    }

    #[test]
    fn test_parse_appliance() {
        assert_eq!(Appliance::from_str_flexible("led bulb").unwrap(), Appliance::LedBulb);
        assert_eq!(Appliance::from_str_flexible("space_heater").unwrap(), Appliance::SpaceHeater);
    }
}
