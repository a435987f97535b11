//! # Settings
//!
//! User preferences shared by every calculator front-end, stored as JSON.
//! Missing fields fall back to their defaults, so an empty object `{}` is a
//! valid settings file.
//!
//! ```json
//! {
//!   "currency_symbol": "€",
//!   "decimal_places": 2,
//!   "allow_negative": false,
//!   "unit_system": "metric"
//! }
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::input::NumericField;

/// Most decimal places a display may ask for
pub const MAX_DECIMAL_PLACES: usize = 10;

/// Measurement system offered first in selectors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitSystem {
    #[default]
    Metric,
    Imperial,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub currency_symbol: String,
    /// Decimal places for formatted results
    pub decimal_places: usize,
    /// Whether numeric fields accept a leading minus sign
    pub allow_negative: bool,
    pub unit_system: UnitSystem,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            currency_symbol: "$".to_string(),
            decimal_places: 2,
            allow_negative: false,
            unit_system: UnitSystem::Metric,
        }
    }
}

impl Settings {
    /// Load settings from a JSON file.
    pub fn load(path: &Path) -> CalcResult<Self> {
        let contents = fs::read_to_string(path)
            .map_err(|e| CalcError::file_error("read", path.display().to_string(), e.to_string()))?;

        let settings: Settings = serde_json::from_str(&contents).map_err(|e| CalcError::SerializationError {
            reason: format!("Invalid JSON in {}: {}", path.display(), e),
        })?;
        settings.validate()?;

        tracing::debug!(path = %path.display(), "loaded settings");
        Ok(settings)
    }

    /// Write settings as pretty-printed JSON.
    pub fn save(&self, path: &Path) -> CalcResult<()> {
        let json = serde_json::to_string_pretty(self).map_err(|e| CalcError::SerializationError {
            reason: e.to_string(),
        })?;
        fs::write(path, json).map_err(|e| CalcError::file_error("write", path.display().to_string(), e.to_string()))
    }

    pub fn validate(&self) -> CalcResult<()> {
        if self.decimal_places > MAX_DECIMAL_PLACES {
            return Err(CalcError::invalid_input(
                "decimal_places",
                self.decimal_places.to_string(),
                format!("At most {MAX_DECIMAL_PLACES} decimal places are supported"),
            ));
        }
        Ok(())
    }

    /// An empty input field following the sign preference.
    pub fn numeric_field(&self, default: &str) -> NumericField {
        if self.allow_negative {
            NumericField::signed(default)
        } else {
            NumericField::new(default)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("tally_settings_{}_{name}.json", std::process::id()))
    }

    #[test]
    fn test_empty_object_gives_defaults() {
        let settings: Settings = serde_json::from_str("{}").unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_partial_override() {
        let settings: Settings = serde_json::from_str(r#"{"currency_symbol":"€","unit_system":"imperial"}"#).unwrap();
        assert_eq!(settings.currency_symbol, "€");
        assert_eq!(settings.unit_system, UnitSystem::Imperial);
        assert_eq!(settings.decimal_places, 2);
    }

    #[test]
    fn test_save_and_load() {
        let path = temp_path("roundtrip");
        let settings = Settings {
            currency_symbol: "£".to_string(),
            decimal_places: 3,
            allow_negative: true,
            unit_system: UnitSystem::Imperial,
        };
        settings.save(&path).unwrap();
        let loaded = Settings::load(&path).unwrap();
        let _ = std::fs::remove_file(&path);
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_load_errors() {
        let missing = Settings::load(Path::new("/definitely/not/here.json")).unwrap_err();
        assert_eq!(missing.error_code(), "FILE_ERROR");

        let path = temp_path("bad");
        std::fs::write(&path, "{ not json").unwrap();
        let bad = Settings::load(&path).unwrap_err();
        let _ = std::fs::remove_file(&path);
        assert_eq!(bad.error_code(), "SERIALIZATION_ERROR");
    }

    #[test]
    fn test_numeric_field_follows_sign_preference() {
        let mut settings = Settings::default();
        assert!(!settings.numeric_field("").allows_negative());
        settings.allow_negative = true;
        assert!(settings.numeric_field("").allows_negative());
    }

    #[test]
    fn test_too_many_decimals_rejected() {
        let settings = Settings {
            decimal_places: 42,
            ..Settings::default()
        };
        assert!(settings.validate().is_err());
    }
}
