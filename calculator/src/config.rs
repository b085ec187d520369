//! Configuration management for the fertilizer calculator
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (config/development.toml, config/production.toml)
//! 3. Environment variable overrides with FERTCALC_ prefix

use config::{ConfigError, Environment, File};
use serde::Deserialize;

use crate::error::{AppError, AppResult};

/// Largest number of decimal places a report will show
pub const MAX_DECIMAL_PLACES: u32 = 10;

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Calculation settings
    pub calculator: CalculatorConfig,

    /// Log output settings
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CalculatorConfig {
    /// Memoize recommendation lookups by exact input
    pub cache_enabled: bool,

    /// Decimal places used when formatting doses and amounts
    pub decimal_places: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    /// Default `EnvFilter` directive when RUST_LOG is not set
    pub filter: String,

    /// Emit JSON lines instead of human-readable output
    pub json: bool,
}

impl Config {
    /// Load configuration from `config/` and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration using files from the given directory
    pub fn load_from(config_dir: &str) -> Result<Self, ConfigError> {
        let environment =
            std::env::var("FERTCALC_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("calculator.cache_enabled", true)?
            .set_default("calculator.decimal_places", 2)?
            .set_default("logging.filter", "fertilizer_calculator=info,shared=info")?
            .set_default("logging.json", false)?
            // Load environment-specific config file
            .add_source(
                File::with_name(&format!("{}/{}", config_dir, environment)).required(false),
            )
            // Override with environment variables (FERTCALC_ prefix)
            .add_source(
                Environment::with_prefix("FERTCALC")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }

    /// Reject settings the report formatter cannot honour
    pub fn validate(&self) -> AppResult<()> {
        if self.calculator.decimal_places > MAX_DECIMAL_PLACES {
            return Err(AppError::Configuration(format!(
                "calculator.decimal_places must be at most {}, got {}",
                MAX_DECIMAL_PLACES, self.calculator.decimal_places
            )));
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            calculator: CalculatorConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        Self {
            cache_enabled: true,
            decimal_places: 2,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "fertilizer_calculator=info,shared=info".to_string(),
            json: false,
        }
    }
}
