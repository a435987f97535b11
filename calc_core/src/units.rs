//! # Unit Conversion Engine
//!
//! Every unit family is a plain enum whose variants carry a multiplicative
//! factor relative to one implicit base unit (factor = 1). Converting between
//! any two units of a family always goes through that base:
//!
//! ```text
//! value * factor(from) / factor(to)
//! ```
//!
//! Adding a unit therefore only needs its factor to the base, never a new
//! pairwise table entry.
//!
//! ## Families
//!
//! | Enum            | Base      |
//! |-----------------|-----------|
//! | [`LengthUnit`]  | metre     |
//! | [`AreaUnit`]    | m²        |
//! | [`VolumeUnit`]  | litre     |
//! | [`MassUnit`]    | kilogram  |
//! | [`SpeedUnit`]   | m/s       |
//! | [`TimeUnit`]    | second    |
//! | [`DataUnit`]    | byte      |
//! | [`EnergyUnit`]  | joule     |
//! | [`PowerUnit`]   | watt      |
//! | [`PressureUnit`]| pascal    |
//! | [`ButterUnit`]  | gram      |
//!
//! Temperature is affine rather than a pure ratio and lives in
//! [`temperature`](crate::temperature).
//!
//! ## Example
//!
//! ```rust
//! use calc_core::units::{convert, AreaUnit};
//!
//! let sq_m = convert(100.0, AreaUnit::SquareFoot, AreaUnit::SquareMeter);
//! assert!((sq_m - 9.290304).abs() < 1e-9);
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::format::format_with_unit;

/// A family of units sharing one base unit.
pub trait UnitFamily: Copy + PartialEq + fmt::Debug + 'static {
    /// Family name used in error messages (e.g., "length")
    const FAMILY: &'static str;
    /// The implicit base unit (factor = 1)
    const BASE: Self;
    /// Every unit of the family, in selector order
    const ALL: &'static [Self];

    /// Multiplicative factor relative to the base unit
    fn factor(self) -> f64;
    /// Short label (e.g., "ft²")
    fn symbol(self) -> &'static str;
    /// Full singular name (e.g., "square foot")
    fn full_name(self) -> &'static str;
    /// Stable identifier (the variant name)
    fn id(self) -> &'static str;
    /// Extra spellings accepted by [`UnitFamily::from_str_flexible`]
    fn aliases(self) -> &'static [&'static str];

    /// Table row describing this unit.
    fn definition(self) -> UnitDefinition {
        UnitDefinition {
            id: self.id().to_string(),
            display_label: self.symbol().to_string(),
            full_name: self.full_name().to_string(),
            factor: self.factor(),
        }
    }

    /// Parse from a symbol, full name, plural, or alias (case-insensitive).
    fn from_str_flexible(s: &str) -> CalcResult<Self> {
        let wanted = s.trim().to_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|unit| {
                let full = unit.full_name().to_lowercase();
                unit.symbol().to_lowercase() == wanted
                    || unit.id().to_lowercase() == wanted
                    || full == wanted
                    || format!("{full}s") == wanted
                    || unit.aliases().iter().any(|a| a.to_lowercase() == wanted)
            })
            .ok_or_else(|| CalcError::unknown_unit(Self::FAMILY, s))
    }
}

/// Serializable description of one unit, for selectors and listings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitDefinition {
    pub id: String,
    pub display_label: String,
    pub full_name: String,
    /// Factor relative to the family's base unit
    pub factor: f64,
}

/// Express `value` in the family's base unit.
pub fn to_base<U: UnitFamily>(value: f64, from: U) -> f64 {
    value * from.factor()
}

/// Express a base-unit `value` in `to`.
pub fn from_base<U: UnitFamily>(value: f64, to: U) -> f64 {
    value / to.factor()
}

/// Convert at full floating-point precision.
///
/// Converting a unit to itself returns `value` unchanged.
pub fn convert<U: UnitFamily>(value: f64, from: U, to: U) -> f64 {
    if from == to {
        return value;
    }
    from_base(to_base(value, from), to)
}

/// Convert and format for display, e.g. `"9.29 m²"`.
///
/// Only the returned string is rounded.
pub fn convert_display<U: UnitFamily>(value: f64, from: U, to: U, precision: usize) -> String {
    format_with_unit(convert(value, from, to), precision, to.symbol())
}

/// All unit definitions for a family.
pub fn definitions<U: UnitFamily>() -> Vec<UnitDefinition> {
    U::ALL.iter().map(|u| u.definition()).collect()
}

macro_rules! unit_family {
    (
        $(#[$meta:meta])*
        $name:ident, family = $family:literal, base = $base:ident,
        {
            $(
                $(#[$vmeta:meta])*
                $variant:ident => ($symbol:literal, $full:literal, $factor:expr $(, [$($alias:literal),* $(,)?])?)
            ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(rename_all = "snake_case")]
        pub enum $name {
            $( $(#[$vmeta])* $variant ),+
        }

        impl UnitFamily for $name {
            const FAMILY: &'static str = $family;
            const BASE: Self = $name::$base;
            const ALL: &'static [Self] = &[ $( $name::$variant ),+ ];

            fn factor(self) -> f64 {
                match self { $( $name::$variant => $factor ),+ }
            }

            fn symbol(self) -> &'static str {
                match self { $( $name::$variant => $symbol ),+ }
            }

            fn full_name(self) -> &'static str {
                match self { $( $name::$variant => $full ),+ }
            }

            fn id(self) -> &'static str {
                match self { $( $name::$variant => stringify!($variant) ),+ }
            }

            fn aliases(self) -> &'static [&'static str] {
                match self { $( $name::$variant => &[ $($($alias),*)? ] ),+ }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.symbol())
            }
        }
    };
}

// ============================================================================
// Families
// ============================================================================

unit_family! {
    /// Length units, base metre
    LengthUnit, family = "length", base = Meter,
    {
        Millimeter => ("mm", "millimeter", 0.001, ["millimetre"]),
        Centimeter => ("cm", "centimeter", 0.01, ["centimetre"]),
        Meter => ("m", "meter", 1.0, ["metre", "metres"]),
        Kilometer => ("km", "kilometer", 1000.0, ["kilometre", "kilometres"]),
        Inch => ("in", "inch", 0.0254, ["inches", "\""]),
        Foot => ("ft", "foot", 0.3048, ["feet", "'"]),
        Yard => ("yd", "yard", 0.9144),
        Mile => ("mi", "mile", 1609.344),
        NauticalMile => ("nmi", "nautical mile", 1852.0),
    }
}

unit_family! {
    /// Area units, base square metre
    AreaUnit, family = "area", base = SquareMeter,
    {
        SquareMillimeter => ("mm²", "square millimeter", 1e-6, ["mm2", "sq mm"]),
        SquareCentimeter => ("cm²", "square centimeter", 1e-4, ["cm2", "sq cm"]),
        SquareMeter => ("m²", "square meter", 1.0, ["m2", "sq m", "square metre", "square meters"]),
        Hectare => ("ha", "hectare", 10_000.0),
        SquareKilometer => ("km²", "square kilometer", 1e6, ["km2", "sq km"]),
        SquareInch => ("in²", "square inch", 0.000_645_16, ["in2", "sq in", "square inches"]),
        SquareFoot => ("ft²", "square foot", 0.092_903_04, ["ft2", "sq ft", "square feet"]),
        SquareYard => ("yd²", "square yard", 0.836_127_36, ["yd2", "sq yd"]),
        Acre => ("ac", "acre", 4_046.856_422_4),
        SquareMile => ("mi²", "square mile", 2_589_988.110_336, ["mi2", "sq mi"]),
    }
}

unit_family! {
    /// Volume units, base litre (US customary kitchen measures)
    VolumeUnit, family = "volume", base = Liter,
    {
        Milliliter => ("ml", "milliliter", 0.001, ["millilitre", "cc"]),
        Liter => ("l", "liter", 1.0, ["litre", "litres"]),
        CubicMeter => ("m³", "cubic meter", 1000.0, ["m3"]),
        Teaspoon => ("tsp", "teaspoon", 0.004_928_921_593_75),
        Tablespoon => ("tbsp", "tablespoon", 0.014_786_764_781_25),
        FluidOunce => ("fl oz", "fluid ounce", 0.029_573_529_562_5, ["floz"]),
        Cup => ("cup", "cup", 0.236_588_236_5),
        Pint => ("pt", "pint", 0.473_176_473),
        Quart => ("qt", "quart", 0.946_352_946),
        Gallon => ("gal", "gallon", 3.785_411_784),
        ImperialGallon => ("imp gal", "imperial gallon", 4.546_09),
    }
}

unit_family! {
    /// Mass units, base kilogram
    MassUnit, family = "mass", base = Kilogram,
    {
        Milligram => ("mg", "milligram", 1e-6),
        Gram => ("g", "gram", 0.001),
        Kilogram => ("kg", "kilogram", 1.0, ["kilo", "kilos"]),
        Tonne => ("t", "tonne", 1000.0, ["metric ton"]),
        Ounce => ("oz", "ounce", 0.028_349_523_125),
        Pound => ("lb", "pound", 0.453_592_37, ["lbs"]),
        Stone => ("st", "stone", 6.350_293_18),
        ShortTon => ("ton", "short ton", 907.184_74, ["us ton"]),
    }
}

unit_family! {
    /// Speed units, base metre per second
    SpeedUnit, family = "speed", base = MeterPerSecond,
    {
        MeterPerSecond => ("m/s", "meter per second", 1.0, ["mps"]),
        KilometerPerHour => ("km/h", "kilometer per hour", 1.0 / 3.6, ["kph", "kmh"]),
        MilePerHour => ("mph", "mile per hour", 0.447_04),
        Knot => ("kn", "knot", 1852.0 / 3600.0, ["kt"]),
        FootPerSecond => ("ft/s", "foot per second", 0.3048, ["fps"]),
    }
}

unit_family! {
    /// Time units, base second (Julian year of 365.25 days)
    TimeUnit, family = "time", base = Second,
    {
        Millisecond => ("ms", "millisecond", 0.001),
        Second => ("s", "second", 1.0, ["sec", "secs"]),
        Minute => ("min", "minute", 60.0, ["mins"]),
        Hour => ("h", "hour", 3600.0, ["hr", "hrs"]),
        Day => ("d", "day", 86_400.0),
        Week => ("wk", "week", 604_800.0),
        Month => ("mo", "month", 2_629_800.0),
        Year => ("yr", "year", 31_557_600.0),
    }
}

unit_family! {
    /// Digital storage units, base byte
    DataUnit, family = "data storage", base = Byte,
    {
        Bit => ("bit", "bit", 0.125),
        Byte => ("B", "byte", 1.0),
        Kilobyte => ("KB", "kilobyte", 1e3),
        Megabyte => ("MB", "megabyte", 1e6),
        Gigabyte => ("GB", "gigabyte", 1e9),
        Terabyte => ("TB", "terabyte", 1e12),
        Kibibyte => ("KiB", "kibibyte", 1024.0),
        Mebibyte => ("MiB", "mebibyte", 1_048_576.0),
        Gibibyte => ("GiB", "gibibyte", 1_073_741_824.0),
    }
}

unit_family! {
    /// Energy units, base joule
    EnergyUnit, family = "energy", base = Joule,
    {
        Joule => ("J", "joule", 1.0),
        Kilojoule => ("kJ", "kilojoule", 1000.0),
        Calorie => ("cal", "calorie", 4.184),
        Kilocalorie => ("kcal", "kilocalorie", 4184.0, ["food calorie"]),
        WattHour => ("Wh", "watt hour", 3600.0),
        KilowattHour => ("kWh", "kilowatt hour", 3.6e6),
        Btu => ("BTU", "british thermal unit", 1_055.055_852_62),
    }
}

unit_family! {
    /// Power units, base watt
    PowerUnit, family = "power", base = Watt,
    {
        Watt => ("W", "watt", 1.0),
        Kilowatt => ("kW", "kilowatt", 1000.0),
        Megawatt => ("MW", "megawatt", 1e6),
        Horsepower => ("hp", "horsepower", 745.699_871_582_270_2),
        BtuPerHour => ("BTU/h", "BTU per hour", 0.293_071_070_172_222_2),
    }
}

unit_family! {
    /// Pressure units, base pascal
    PressureUnit, family = "pressure", base = Pascal,
    {
        Pascal => ("Pa", "pascal", 1.0),
        Kilopascal => ("kPa", "kilopascal", 1000.0),
        Bar => ("bar", "bar", 100_000.0),
        Psi => ("psi", "pound per square inch", 6_894.757_293_168),
        Atmosphere => ("atm", "atmosphere", 101_325.0),
        MillimeterOfMercury => ("mmHg", "millimeter of mercury", 133.322_387_415),
    }
}

unit_family! {
    /// Butter measures, base gram (one US stick is a quarter pound)
    ButterUnit, family = "butter", base = Gram,
    {
        Gram => ("g", "gram", 1.0),
        Ounce => ("oz", "ounce", 28.349_523_125),
        Pound => ("lb", "pound", 453.592_37),
        Stick => ("stick", "stick", 113.398_092_5),
        Tablespoon => ("tbsp", "tablespoon", 14.174_761_562_5),
        Teaspoon => ("tsp", "teaspoon", 4.724_920_520_833_333),
        Cup => ("cup", "cup", 226.796_185),
    }
}

// ============================================================================
// Runtime family selection
// ============================================================================

/// Names a unit family at runtime (CLI arguments, JSON requests).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Quantity {
    Length,
    Area,
    Volume,
    Mass,
    Speed,
    Time,
    Data,
    Energy,
    Power,
    Pressure,
    Butter,
}

impl Quantity {
    pub const ALL: [Quantity; 11] = [
        Quantity::Length,
        Quantity::Area,
        Quantity::Volume,
        Quantity::Mass,
        Quantity::Speed,
        Quantity::Time,
        Quantity::Data,
        Quantity::Energy,
        Quantity::Power,
        Quantity::Pressure,
        Quantity::Butter,
    ];

    /// Unit table for this family
    pub fn definitions(self) -> Vec<UnitDefinition> {
        match self {
            Quantity::Length => definitions::<LengthUnit>(),
            Quantity::Area => definitions::<AreaUnit>(),
            Quantity::Volume => definitions::<VolumeUnit>(),
            Quantity::Mass => definitions::<MassUnit>(),
            Quantity::Speed => definitions::<SpeedUnit>(),
            Quantity::Time => definitions::<TimeUnit>(),
            Quantity::Data => definitions::<DataUnit>(),
            Quantity::Energy => definitions::<EnergyUnit>(),
            Quantity::Power => definitions::<PowerUnit>(),
            Quantity::Pressure => definitions::<PressureUnit>(),
            Quantity::Butter => definitions::<ButterUnit>(),
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Quantity::Length => "Length",
            Quantity::Area => "Area",
            Quantity::Volume => "Volume",
            Quantity::Mass => "Mass",
            Quantity::Speed => "Speed",
            Quantity::Time => "Time",
            Quantity::Data => "Data Storage",
            Quantity::Energy => "Energy",
            Quantity::Power => "Power",
            Quantity::Pressure => "Pressure",
            Quantity::Butter => "Butter",
        }
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Result of a conversion requested by unit name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedConversion {
    pub quantity: Quantity,
    pub value: f64,
    pub from: UnitDefinition,
    pub to: UnitDefinition,
    /// Full-precision converted value
    pub converted: f64,
    /// Rounded, unit-suffixed display string
    pub display: String,
}

fn convert_parsed<U: UnitFamily>(
    quantity: Quantity,
    value: f64,
    from: &str,
    to: &str,
    precision: usize,
) -> CalcResult<NamedConversion> {
    let from = U::from_str_flexible(from)?;
    let to = U::from_str_flexible(to)?;
    Ok(NamedConversion {
        quantity,
        value,
        from: from.definition(),
        to: to.definition(),
        converted: convert(value, from, to),
        display: convert_display(value, from, to, precision),
    })
}

/// Convert between units given by name.
///
/// Unknown unit names are reported as [`CalcError::UnknownUnit`].
pub fn convert_named(
    quantity: Quantity,
    value: f64,
    from: &str,
    to: &str,
    precision: usize,
) -> CalcResult<NamedConversion> {
    match quantity {
        Quantity::Length => convert_parsed::<LengthUnit>(quantity, value, from, to, precision),
        Quantity::Area => convert_parsed::<AreaUnit>(quantity, value, from, to, precision),
        Quantity::Volume => convert_parsed::<VolumeUnit>(quantity, value, from, to, precision),
        Quantity::Mass => convert_parsed::<MassUnit>(quantity, value, from, to, precision),
        Quantity::Speed => convert_parsed::<SpeedUnit>(quantity, value, from, to, precision),
        Quantity::Time => convert_parsed::<TimeUnit>(quantity, value, from, to, precision),
        Quantity::Data => convert_parsed::<DataUnit>(quantity, value, from, to, precision),
        Quantity::Energy => convert_parsed::<EnergyUnit>(quantity, value, from, to, precision),
        Quantity::Power => convert_parsed::<PowerUnit>(quantity, value, from, to, precision),
        Quantity::Pressure => convert_parsed::<PressureUnit>(quantity, value, from, to, precision),
        Quantity::Butter => convert_parsed::<ButterUnit>(quantity, value, from, to, precision),
    }
}
