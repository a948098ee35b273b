//! CLI configuration module.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Command-line flags (applied in `main`)
//! 2. Environment variables (`TALLY_*`, e.g. `TALLY_PRECISION=3`)
//! 3. Config file (`tally.toml`, optional)
//! 4. Defaults (this file)

use std::path::Path;

use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use tally_core::amount::DEFAULT_PRECISION;

/// Highest precision accepted for display rounding.
const MAX_PRECISION: u32 = 10;

/// How results are printed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable table
    #[default]
    Table,
    /// Machine-readable JSON
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            _ => Err(ConfigError::InvalidValue("format".to_string())),
        }
    }
}

/// Tally CLI configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TallyConfig {
    /// Decimal places used for display and when totals are locked
    pub precision: u32,

    /// Currency code (ISO 4217), shown in table headers
    pub currency_code: String,

    /// Currency symbol prefixed to amounts
    pub currency_symbol: String,

    /// Default output format
    pub format: OutputFormat,
}

impl Default for TallyConfig {
    fn default() -> Self {
        TallyConfig {
            precision: DEFAULT_PRECISION,
            currency_code: "USD".to_string(),
            currency_symbol: "$".to_string(),
            format: OutputFormat::Table,
        }
    }
}

impl TallyConfig {
    /// Loads defaults, then the optional TOML file, then `TALLY_*` variables.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let defaults = TallyConfig::default();

        let settings = Config::builder()
            .set_default("precision", defaults.precision as i64)?
            .set_default("currency_code", defaults.currency_code)?
            .set_default("currency_symbol", defaults.currency_symbol)?
            .set_default("format", "table")?
            .add_source(File::from(path).format(FileFormat::Toml).required(false))
            .add_source(Environment::with_prefix("TALLY"))
            .build()?;

        let config: TallyConfig = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Checks ranges the type system can't.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.precision > MAX_PRECISION {
            return Err(ConfigError::InvalidValue("precision".to_string()));
        }

        if self.currency_code.trim().is_empty() {
            return Err(ConfigError::MissingRequired("currency_code".to_string()));
        }

        Ok(())
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),

    #[error("Missing required configuration: {0}")]
    MissingRequired(String),

    #[error("Failed to read configuration: {0}")]
    Source(#[from] config::ConfigError),
}
