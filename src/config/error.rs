//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("{0} must be between 0 and 100")]
    InvalidFaqThreshold(&'static str),

    #[error("Keyword threshold must not be below the question threshold")]
    KeywordThresholdBelowQuestion,

    #[error("Confidence threshold must be between 0.0 and 1.0")]
    InvalidConfidenceThreshold,

    #[error("{0} must be greater than zero")]
    MustBePositive(&'static str),

    #[error("Temperature must be between 0.0 and 2.0")]
    InvalidTemperature,

    #[error("Provider base URL must start with http:// or https://")]
    InvalidBaseUrl,
}
