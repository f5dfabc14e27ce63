//! Completion provider configuration

use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use crate::domain::routing::RetryPolicy;

/// Completion provider configuration (OpenRouter)
#[derive(Debug, Clone, Deserialize)]
pub struct ProviderConfig {
    /// OpenRouter API key
    pub api_key: Option<Secret<String>>,

    /// Model identifier
    #[serde(default = "default_model")]
    pub model: String,

    /// Chat-completions endpoint
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-attempt timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Total attempts per call
    #[serde(default = "default_retries")]
    pub max_retries: u32,

    /// Backoff base in milliseconds
    #[serde(default = "default_retry_delay")]
    pub retry_delay_ms: u64,

    #[serde(default = "default_temperature")]
    pub temperature: f32,

    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
}

impl ProviderConfig {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay_ms)
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(self.max_retries, self.retry_delay())
    }

    /// Check if an API key is configured
    pub fn has_api_key(&self) -> bool {
        self.api_key
            .as_ref()
            .is_some_and(|k| !k.expose_secret().trim().is_empty())
    }

    /// Validate provider configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.has_api_key() {
            return Err(ValidationError::MissingRequired("OPENROUTER_API_KEY"));
        }
        if self.max_retries == 0 {
            return Err(ValidationError::MustBePositive("max_retries"));
        }
        if self.timeout_secs == 0 {
            return Err(ValidationError::MustBePositive("timeout_secs"));
        }
        if self.max_tokens == 0 {
            return Err(ValidationError::MustBePositive("max_tokens"));
        }
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(ValidationError::InvalidTemperature);
        }
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(ValidationError::InvalidBaseUrl);
        }
        Ok(())
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_model(),
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
            max_retries: default_retries(),
            retry_delay_ms: default_retry_delay(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
        }
    }
}

fn default_model() -> String {
    "nvidia/nemotron-nano-9b-v2:free".to_string()
}

fn default_base_url() -> String {
    "https://openrouter.ai/api/v1/chat/completions".to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_retries() -> u32 {
    3
}

fn default_retry_delay() -> u64 {
    1000
}

fn default_temperature() -> f32 {
    0.15
}

fn default_max_tokens() -> u32 {
    512
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_key() -> ProviderConfig {
        ProviderConfig {
            api_key: Some(Secret::new("sk-or-xxx".to_string())),
            ..Default::default()
        }
    }

    #[test]
    fn test_provider_defaults() {
        let config = ProviderConfig::default();
        assert_eq!(config.model, "nvidia/nemotron-nano-9b-v2:free");
        assert_eq!(config.timeout(), Duration::from_secs(30));
        assert_eq!(config.max_retries, 3);
        assert_eq!(config.retry_delay(), Duration::from_secs(1));
        assert_eq!(config.max_tokens, 512);
    }

    #[test]
    fn test_retry_policy_from_config() {
        let policy = with_key().retry_policy();
        assert_eq!(policy.max_attempts(), 3);
        assert_eq!(policy.base_delay(), Duration::from_secs(1));
    }

    #[test]
    fn test_validation_missing_key() {
        assert_eq!(
            ProviderConfig::default().validate(),
            Err(ValidationError::MissingRequired("OPENROUTER_API_KEY"))
        );
    }

    #[test]
    fn test_validation_blank_key() {
        let config = ProviderConfig {
            api_key: Some(Secret::new("   ".to_string())),
            ..Default::default()
        };
        assert!(!config.has_api_key());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_passes_with_key() {
        assert!(with_key().validate().is_ok());
    }

    #[test]
    fn test_validation_zero_retries() {
        let config = ProviderConfig {
            max_retries: 0,
            ..with_key()
        };
        assert_eq!(
            config.validate(),
            Err(ValidationError::MustBePositive("max_retries"))
        );
    }

    #[test]
    fn test_validation_bad_url() {
        let config = ProviderConfig {
            base_url: "openrouter.ai".to_string(),
            ..with_key()
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidBaseUrl));
    }

    #[test]
    fn test_debug_hides_key() {
        assert!(!format!("{:?}", with_key()).contains("sk-or-xxx"));
    }
}
