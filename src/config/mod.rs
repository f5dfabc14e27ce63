//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `SUPPORT_ROUTER` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use support_router::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Using model {}", config.provider.model);
//! ```

mod error;
mod logging;
mod provider;
mod routing;

pub use error::{ConfigError, ValidationError};
pub use logging::{LogFormat, LoggingConfig};
pub use provider::ProviderConfig;
pub use routing::RoutingConfig;

use serde::Deserialize;
use std::path::PathBuf;

/// Root application configuration
///
/// Load using [`AppConfig::load()`] which reads from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Routing pipeline thresholds and bounds
    #[serde(default)]
    pub routing: RoutingConfig,

    /// Completion provider (OpenRouter)
    #[serde(default)]
    pub provider: ProviderConfig,

    /// Log filter and format
    #[serde(default)]
    pub logging: LoggingConfig,

    /// YAML FAQ catalog seed file
    pub catalog_path: Option<PathBuf>,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `SUPPORT_ROUTER` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `SUPPORT_ROUTER__PROVIDER__API_KEY=...` -> `provider.api_key = ...`
    /// - `SUPPORT_ROUTER__ROUTING__CONFIDENCE_THRESHOLD=0.7` -> `routing.confidence_threshold = 0.7`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("SUPPORT_ROUTER")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.routing.validate()?;
        self.provider.validate()?;
        Ok(())
    }
}
