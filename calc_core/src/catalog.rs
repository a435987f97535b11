//! # Calculator Catalog
//!
//! Static index of the calculators this crate provides, one row per
//! calculator with the columns `(id, name, description, category, url, keywords)`.
//! The CLI `list` and `search` commands read it.

use std::fmt;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Conversion,
    Finance,
    Health,
    Home,
    Math,
    Time,
}

impl Category {
    pub fn display_name(self) -> &'static str {
        match self {
            Category::Conversion => "Conversion",
            Category::Finance => "Finance",
            Category::Health => "Health",
            Category::Home => "Home",
            Category::Math => "Math",
            Category::Time => "Time",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub id: String,
    pub name: String,
    pub description: String,
    pub category: Category,
    pub url: String,
    /// Comma-separated search terms
    pub keywords: String,
}

impl CatalogEntry {
    fn new(id: &str, name: &str, description: &str, category: Category, keywords: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            category,
            url: format!("/calculators/{id}"),
            keywords: keywords.to_string(),
        }
    }

    pub fn keywords(&self) -> impl Iterator<Item = &str> {
        self.keywords.split(',').map(str::trim).filter(|k| !k.is_empty())
    }

    fn matches(&self, needle: &str) -> bool {
        self.id.contains(needle)
            || self.name.to_lowercase().contains(needle)
            || self.description.to_lowercase().contains(needle)
            || self.keywords().any(|k| k.to_lowercase().contains(needle))
    }
}

static CATALOG: Lazy<Vec<CatalogEntry>> = Lazy::new(|| {
    use Category::*;
    vec![
        CatalogEntry::new("length", "Length Converter", "Convert between metric and imperial lengths", Conversion, "distance, meter, foot, inch, mile"),
        CatalogEntry::new("area", "Area Converter", "Convert square meters, square feet, acres and hectares", Conversion, "square, acre, hectare, floor"),
        CatalogEntry::new("volume", "Volume Converter", "Convert liters, gallons, cups and spoons", Conversion, "liter, gallon, cup, cooking"),
        CatalogEntry::new("mass", "Weight Converter", "Convert kilograms, pounds, ounces and stones", Conversion, "weight, kilogram, pound, ounce"),
        CatalogEntry::new("speed", "Speed Converter", "Convert km/h, mph, knots and m/s", Conversion, "velocity, mph, knot"),
        CatalogEntry::new("time", "Time Converter", "Convert seconds, minutes, hours, days and years", Conversion, "duration, hour, day"),
        CatalogEntry::new("data", "Data Storage Converter", "Convert bytes, kilobytes, megabytes and gigabytes", Conversion, "byte, megabyte, gigabyte, storage"),
        CatalogEntry::new("energy", "Energy Converter", "Convert joules, calories and kilowatt-hours", Conversion, "joule, calorie, kwh"),
        CatalogEntry::new("power", "Power Converter", "Convert watts, kilowatts and horsepower", Conversion, "watt, horsepower"),
        CatalogEntry::new("pressure", "Pressure Converter", "Convert pascals, bar, psi and atmospheres", Conversion, "psi, bar, atmosphere, tire"),
        CatalogEntry::new("temperature", "Temperature Converter", "Convert Celsius, Fahrenheit, Kelvin and Rankine", Conversion, "celsius, fahrenheit, kelvin"),
        CatalogEntry::new("oven", "Oven Temperature Converter", "Gas marks, fan oven and conventional temperatures", Home, "gas mark, baking, fan oven"),
        CatalogEntry::new("butter", "Butter Converter", "Convert sticks, tablespoons, cups and grams of butter", Home, "stick, baking, tablespoon"),
        CatalogEntry::new("ingredients", "Cooking Ingredient Converter", "Convert ingredient volumes to weights", Home, "flour, sugar, cup to grams, baking"),
        CatalogEntry::new("energy-cost", "Appliance Energy Cost", "Running cost of household appliances", Home, "electricity, kwh, bill, appliance"),
        CatalogEntry::new("simple-interest", "Simple Interest Calculator", "Interest on a principal without compounding", Finance, "interest, principal"),
        CatalogEntry::new("compound-interest", "Compound Interest Calculator", "Growth with compounding and yearly contributions", Finance, "interest, savings, investment, apy"),
        CatalogEntry::new("apy", "APY Calculator", "Effective annual yield of a nominal rate", Finance, "apy, apr, yield"),
        CatalogEntry::new("loan", "Loan Calculator", "Monthly payment and amortization schedule", Finance, "mortgage, payment, amortization"),
        CatalogEntry::new("irr", "IRR Calculator", "Internal rate of return of a cash-flow series", Finance, "npv, return, investment, cash flow"),
        CatalogEntry::new("savings-goal", "Savings Goal Calculator", "Months needed to reach a savings target", Finance, "savings, goal, deposit"),
        CatalogEntry::new("bmi", "BMI Calculator", "Body mass index with WHO categories", Health, "weight, height, obesity"),
        CatalogEntry::new("whr", "Waist-to-Hip Ratio Calculator", "Waist-to-hip ratio and health risk", Health, "waist, hip, body shape"),
        CatalogEntry::new("percentage", "Percentage Calculator", "Percent of, percentage change and ratios", Math, "percent, ratio, change"),
        CatalogEntry::new("elapsed", "Time Since Calculator", "Live time elapsed since a date", Time, "date, countdown, since, age"),
    ]
});

/// Every catalog entry, in display order.
pub fn entries() -> &'static [CatalogEntry] {
    &CATALOG
}

pub fn find(id: &str) -> Option<&'static CatalogEntry> {
    let wanted = id.trim().to_lowercase();
    CATALOG.iter().find(|e| e.id == wanted)
}

/// Case-insensitive substring search over id, name, description and keywords.
pub fn search(query: &str) -> Vec<&'static CatalogEntry> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return CATALOG.iter().collect();
    }
    CATALOG.iter().filter(|e| e.matches(&needle)).collect()
}

pub fn by_category(category: Category) -> Vec<&'static CatalogEntry> {
    CATALOG.iter().filter(|e| e.category == category).collect()
}
