//! User settings for finance-core
//!
//! Display locale, fraction digit bounds, report thresholds and the default
//! log level, persisted as `config.json`.

use serde::{Deserialize, Serialize};

use super::paths::FinancePaths;
use crate::display::{CurrencyFormat, DEFAULT_LOCALE};
use crate::error::{FinanceError, FinanceResult};
use crate::reports::SpikeRule;

/// User settings for finance-core
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// BCP 47 locale used to render amounts
    #[serde(default = "default_locale")]
    pub locale: String,

    /// ISO 4217 currency code
    #[serde(default = "default_currency")]
    pub currency: String,

    #[serde(default)]
    pub min_fraction_digits: u32,

    #[serde(default = "default_max_fraction_digits")]
    pub max_fraction_digits: u32,

    /// Decimal places for report percentages
    #[serde(default = "default_percent_decimals")]
    pub percent_decimals: u32,

    /// An expense this many times the average counts as a spike
    #[serde(default = "default_spike_multiplier")]
    pub spike_multiplier: i64,

    /// Minimum expense records before spike detection runs
    #[serde(default = "default_spike_min_samples")]
    pub spike_min_samples: usize,

    /// Default tracing filter, overridden by `FINANCE_LOG`
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_schema_version() -> u32 {
    1
}

fn default_locale() -> String {
    DEFAULT_LOCALE.to_string()
}

fn default_currency() -> String {
    "MXN".to_string()
}

fn default_max_fraction_digits() -> u32 {
    2
}

fn default_percent_decimals() -> u32 {
    2
}

fn default_spike_multiplier() -> i64 {
    3
}

fn default_spike_min_samples() -> usize {
    3
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            locale: default_locale(),
            currency: default_currency(),
            min_fraction_digits: 0,
            max_fraction_digits: default_max_fraction_digits(),
            percent_decimals: default_percent_decimals(),
            spike_multiplier: default_spike_multiplier(),
            spike_min_samples: default_spike_min_samples(),
            log_level: default_log_level(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or fall back to defaults if the file doesn't exist
    pub fn load_or_create(paths: &FinancePaths) -> FinanceResult<Self> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path)
                .map_err(|e| FinanceError::Io(format!("Failed to read settings file: {}", e)))?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                FinanceError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            settings.validate()?;
            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &FinancePaths) -> FinanceResult<()> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| FinanceError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| FinanceError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }

    pub fn validate(&self) -> FinanceResult<()> {
        if self.min_fraction_digits > self.max_fraction_digits {
            return Err(FinanceError::Config(format!(
                "min_fraction_digits ({}) exceeds max_fraction_digits ({})",
                self.min_fraction_digits, self.max_fraction_digits
            )));
        }
        if self.spike_multiplier < 1 {
            return Err(FinanceError::Config(
                "spike_multiplier must be at least 1".to_string(),
            ));
        }
        self.currency_format().map(|_| ())
    }

    /// The currency format these settings describe
    pub fn currency_format(&self) -> FinanceResult<CurrencyFormat> {
        Ok(CurrencyFormat::new(&self.currency, &self.locale)?
            .with_fraction_digits(self.min_fraction_digits, self.max_fraction_digits))
    }

    pub fn spike_rule(&self) -> SpikeRule {
        SpikeRule {
            multiplier: self.spike_multiplier,
            min_samples: self.spike_min_samples,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.locale, "es-MX");
        assert_eq!(settings.currency, "MXN");
        assert_eq!(settings.min_fraction_digits, 0);
        assert_eq!(settings.max_fraction_digits, 2);
        assert_eq!(settings.spike_rule(), SpikeRule::default());
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = FinancePaths::with_base_dir(temp_dir.path().to_path_buf());

        let mut settings = Settings::default();
        settings.locale = "en-US".to_string();
        settings.currency = "USD".to_string();
        settings.min_fraction_digits = 2;

        settings.save(&paths).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded, settings);
        assert_eq!(
            loaded.currency_format().unwrap().format(Money::from_cents(100)).unwrap(),
            "$1.00"
        );
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"locale": "de-DE"}"#).unwrap();
        assert_eq!(settings.locale, "de-DE");
        assert_eq!(settings.max_fraction_digits, 2);
        assert_eq!(settings.log_level, "info");
    }

    #[test]
    fn test_load_rejects_invalid_settings() {
        let temp_dir = TempDir::new().unwrap();
        let paths = FinancePaths::with_base_dir(temp_dir.path().to_path_buf());
        std::fs::write(paths.settings_file(), r#"{"locale": "xx-YY"}"#).unwrap();

        assert!(matches!(
            Settings::load_or_create(&paths),
            Err(FinanceError::Config(_))
        ));

        std::fs::write(paths.settings_file(), "not json").unwrap();
        assert!(matches!(
            Settings::load_or_create(&paths),
            Err(FinanceError::Config(_))
        ));
    }
}
