//! Storefront configuration.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::logging::{LogFormat, LogLevel};

/// Errors raised when a loaded configuration is not usable.
#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    /// The decimal mark and the group separator are the same character.
    #[error("Currency decimal mark and separator must differ (both '{0}')")]
    AmbiguousSeparator(char),

    /// Precision beyond what a minor-unit integer can hold.
    #[error("Currency precision {0} exceeds maximum ({1})")]
    PrecisionTooLarge(u32, u32),

    /// Checkout storage key is empty.
    #[error("Checkout storage key must not be empty")]
    EmptyStorageKey,
}

/// Largest supported currency precision.
pub const MAX_CURRENCY_PRECISION: u32 = 10;

/// Storefront configuration file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Carousel configuration.
    #[serde(default)]
    pub carousel: CarouselConfig,

    /// Checkout configuration.
    #[serde(default)]
    pub checkout: CheckoutConfig,

    /// Price display configuration.
    #[serde(default)]
    pub currency: CurrencyConfig,
}

impl StoreConfig {
    /// Load config from a file.
    ///
    /// Files ending in `.json` are parsed as JSON, everything else as TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config = if path.extension().is_some_and(|ext| ext == "json") {
            Self::from_json(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path.display()))?
        } else {
            Self::from_toml(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path.display()))?
        };

        config
            .validate()
            .with_context(|| format!("Invalid config: {}", path.display()))?;
        Ok(config)
    }

    /// Parse config from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Parse config from a JSON string.
    pub fn from_json(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Save config to a file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let content = if path.extension().is_some_and(|ext| ext == "json") {
            serde_json::to_string_pretty(self)?
        } else {
            toml::to_string_pretty(self)?
        };

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))
    }

    /// Check cross-field constraints serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.currency.decimal == self.currency.separator {
            return Err(ConfigError::AmbiguousSeparator(self.currency.decimal));
        }
        if self.currency.precision > MAX_CURRENCY_PRECISION {
            return Err(ConfigError::PrecisionTooLarge(
                self.currency.precision,
                MAX_CURRENCY_PRECISION,
            ));
        }
        if self.checkout.storage_key.trim().is_empty() {
            return Err(ConfigError::EmptyStorageKey);
        }
        Ok(())
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Minimum level that is written.
    #[serde(default = "default_level")]
    pub level: LogLevel,

    /// Output format.
    #[serde(default)]
    pub format: LogFormat,
}

fn default_level() -> LogLevel {
    LogLevel::Info
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            format: LogFormat::default(),
        }
    }
}

/// How the carousel treats input it cannot compute a position from:
/// an empty item sequence or a zero-width gesture sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DegenerateInputPolicy {
    /// Leave the state unchanged.
    #[default]
    Ignore,
    /// Run the arithmetic anyway and let NaN/infinity reach the caller.
    Propagate,
}

/// Carousel configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CarouselConfig {
    #[serde(default)]
    pub degenerate_input: DegenerateInputPolicy,
}

/// Checkout configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckoutConfig {
    /// Key under which the active checkout id is persisted.
    #[serde(default = "default_storage_key")]
    pub storage_key: String,
}

fn default_storage_key() -> String {
    "shopify_checkout_id".to_string()
}

impl Default for CheckoutConfig {
    fn default() -> Self {
        Self {
            storage_key: default_storage_key(),
        }
    }
}

/// Price display configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrencyConfig {
    /// Decimal mark.
    #[serde(default = "default_decimal")]
    pub decimal: char,

    /// Thousands group separator.
    #[serde(default = "default_separator")]
    pub separator: char,

    /// Digits after the decimal mark.
    #[serde(default = "default_precision")]
    pub precision: u32,

    /// Symbol prefixed to the amount (e.g. "€"). Empty for none.
    #[serde(default)]
    pub symbol: String,
}

fn default_decimal() -> char {
    '.'
}

fn default_separator() -> char {
    ','
}

fn default_precision() -> u32 {
    2
}

impl CurrencyConfig {
    /// Euro display with a comma decimal mark, e.g. "€1.299,00".
    pub fn euro() -> Self {
        Self {
            decimal: ',',
            separator: '.',
            precision: 2,
            symbol: "\u{20ac}".to_string(),
        }
    }

    /// Set the symbol.
    pub fn with_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.symbol = symbol.into();
        self
    }

    /// Set the precision.
    pub fn with_precision(mut self, precision: u32) -> Self {
        self.precision = precision;
        self
    }
}

impl Default for CurrencyConfig {
    fn default() -> Self {
        Self {
            decimal: default_decimal(),
            separator: default_separator(),
            precision: default_precision(),
            symbol: String::new(),
        }
    }
}
