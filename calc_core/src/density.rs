//! Density-mediated weight ↔ volume conversion.
//!
//! A volume is first reduced to litres, multiplied by the ingredient density
//! (kg/L, numerically equal to g/mL) to get kilograms, then expressed in the
//! requested mass unit. The reverse path divides by the density.
//!
//! Densities are typical kitchen values for loosely spooned dry goods and
//! room-temperature liquids.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::units::{from_base, to_base, MassUnit, VolumeUnit};

/// Ingredient or material with a known bulk density
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ingredient {
    Water,
    Milk,
    Butter,
    AllPurposeFlour,
    GranulatedSugar,
    BrownSugar,
    PowderedSugar,
    Honey,
    OliveOil,
    VegetableOil,
    Salt,
    Rice,
    Oats,
    CocoaPowder,
}

impl Ingredient {
    pub const ALL: [Ingredient; 14] = [
        Ingredient::Water,
        Ingredient::Milk,
        Ingredient::Butter,
        Ingredient::AllPurposeFlour,
        Ingredient::GranulatedSugar,
        Ingredient::BrownSugar,
        Ingredient::PowderedSugar,
        Ingredient::Honey,
        Ingredient::OliveOil,
        Ingredient::VegetableOil,
        Ingredient::Salt,
        Ingredient::Rice,
        Ingredient::Oats,
        Ingredient::CocoaPowder,
    ];

    /// Density in kg/L
    pub fn density_kg_per_l(self) -> f64 {
        match self {
            Ingredient::Water => 1.0,
            Ingredient::Milk => 1.03,
            Ingredient::Butter => 0.911,
            Ingredient::AllPurposeFlour => 0.529,
            Ingredient::GranulatedSugar => 0.845,
            Ingredient::BrownSugar => 0.93,
            Ingredient::PowderedSugar => 0.56,
            Ingredient::Honey => 1.42,
            Ingredient::OliveOil => 0.911,
            Ingredient::VegetableOil => 0.92,
            Ingredient::Salt => 1.217,
            Ingredient::Rice => 0.85,
            Ingredient::Oats => 0.41,
            Ingredient::CocoaPowder => 0.42,
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Ingredient::Water => "Water",
            Ingredient::Milk => "Milk",
            Ingredient::Butter => "Butter",
            Ingredient::AllPurposeFlour => "All-purpose flour",
            Ingredient::GranulatedSugar => "Granulated sugar",
            Ingredient::BrownSugar => "Brown sugar (packed)",
            Ingredient::PowderedSugar => "Powdered sugar",
            Ingredient::Honey => "Honey",
            Ingredient::OliveOil => "Olive oil",
            Ingredient::VegetableOil => "Vegetable oil",
            Ingredient::Salt => "Table salt",
            Ingredient::Rice => "Uncooked rice",
            Ingredient::Oats => "Rolled oats",
            Ingredient::CocoaPowder => "Cocoa powder",
        }
    }

    /// Parse an exact display name, or a prefix that names only one ingredient.
    pub fn from_str_flexible(s: &str) -> CalcResult<Self> {
        let wanted = s.trim().to_lowercase().replace(['-', '_'], " ");
        let name = |i: &Ingredient| i.display_name().to_lowercase().replace('-', " ");

        if let Some(exact) = Ingredient::ALL.iter().copied().find(|i| name(i) == wanted) {
            return Ok(exact);
        }
        if wanted.is_empty() {
            return Err(CalcError::unknown_unit("ingredient", s));
        }
        let mut matches = Ingredient::ALL.iter().copied().filter(|i| name(i).starts_with(&wanted));
        match (matches.next(), matches.next()) {
            (Some(only), None) => Ok(only),
            (Some(_), Some(_)) => Err(CalcError::invalid_input("ingredient", s, "Ambiguous ingredient name")),
            (None, _) => Err(CalcError::unknown_unit("ingredient", s)),
        }
    }
}

impl fmt::Display for Ingredient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Weight of a volume of `ingredient`.
pub fn volume_to_mass(value: f64, from: VolumeUnit, to: MassUnit, ingredient: Ingredient) -> f64 {
    let liters = to_base(value, from);
    let kilograms = liters * ingredient.density_kg_per_l();
    from_base(kilograms, to)
}

/// Volume occupied by a weight of `ingredient`.
pub fn mass_to_volume(value: f64, from: MassUnit, to: VolumeUnit, ingredient: Ingredient) -> f64 {
    let kilograms = to_base(value, from);
    let liters = kilograms / ingredient.density_kg_per_l();
    from_base(liters, to)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_water_litre_is_one_kilogram() {
        let kg = volume_to_mass(1.0, VolumeUnit::Liter, MassUnit::Kilogram, Ingredient::Water);
        assert!((kg - 1.0).abs() < 1e-12);
        let ml = mass_to_volume(250.0, MassUnit::Gram, VolumeUnit::Milliliter, Ingredient::Water);
        assert!((ml - 250.0).abs() < 1e-9);
    }

    #[test]
    fn test_cup_of_sugar() {
        // 236.6 mL × 0.845 g/mL ≈ 199.9 g
        let grams = volume_to_mass(1.0, VolumeUnit::Cup, MassUnit::Gram, Ingredient::GranulatedSugar);
        assert!((grams - 199.92).abs() < 0.01);
    }

    #[test]
    fn test_density_round_trip() {
        for &ingredient in &Ingredient::ALL {
            let grams = volume_to_mass(3.0, VolumeUnit::Tablespoon, MassUnit::Gram, ingredient);
            let tbsp = mass_to_volume(grams, MassUnit::Gram, VolumeUnit::Tablespoon, ingredient);
            assert!((tbsp - 3.0).abs() < 1e-9, "{ingredient}");
        }
    }

    #[test]
    fn test_parse_ingredient() {
        assert_eq!(Ingredient::from_str_flexible("honey").unwrap(), Ingredient::Honey);
        assert_eq!(
            Ingredient::from_str_flexible("all-purpose flour").unwrap(),
            Ingredient::AllPurposeFlour
        );
        assert_eq!(Ingredient::from_str_flexible("brown").unwrap(), Ingredient::BrownSugar);
        assert!(Ingredient::from_str_flexible("unobtainium").is_err());
    }

    #[test]
    fn test_ambiguous_prefix_rejected() {
        // "b" starts both Butter and Brown sugar
        let err = Ingredient::from_str_flexible("b").unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
        assert_eq!(Ingredient::from_str_flexible("bu").unwrap(), Ingredient::Butter);
        assert_eq!(Ingredient::from_str_flexible("Butter").unwrap(), Ingredient::Butter);
        assert_eq!(Ingredient::from_str_flexible("o").unwrap(), Ingredient::OliveOil);
        assert_eq!(
            Ingredient::from_str_flexible("").unwrap_err().error_code(),
            "UNKNOWN_UNIT"
        );
    }
}
