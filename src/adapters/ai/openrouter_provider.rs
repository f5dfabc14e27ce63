//! OpenRouter Provider - Implementation of CompletionProvider for OpenRouter's
//! OpenAI-compatible chat-completions API.
//!
//! # Configuration
//!
//! ```ignore
//! let config = OpenRouterConfig::new(api_key)
//!     .with_model("nvidia/nemotron-nano-9b-v2:free")
//!     .with_timeout(Duration::from_secs(30));
//!
//! let provider = OpenRouterProvider::new(config)?;
//! ```
//!
//! One call is one HTTP request; retries belong to the model client.

use async_trait::async_trait;
use reqwest::{Client, Response};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::domain::routing::TokenUsage;
use crate::ports::{CompletionProvider, CompletionRequest, CompletionResponse, ProviderError};

/// Default chat-completions endpoint.
pub const OPENROUTER_URL: &str = "https://openrouter.ai/api/v1/chat/completions";

/// Default model.
pub const DEFAULT_MODEL: &str = "nvidia/nemotron-nano-9b-v2:free";

/// Default `HTTP-Referer` header identifying the calling app.
pub const DEFAULT_REFERER: &str = "https://ai-support-bot.local";

/// Default `X-Title` header.
pub const DEFAULT_TITLE: &str = "AI Support Bot";

/// Configuration for the OpenRouter provider.
#[derive(Debug, Clone)]
pub struct OpenRouterConfig {
    /// API key for authentication.
    api_key: Secret<String>,
    /// Model identifier.
    pub model: String,
    /// Full chat-completions endpoint URL.
    pub base_url: String,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Value of the `HTTP-Referer` header.
    pub referer: String,
    /// Value of the `X-Title` header.
    pub title: String,
}

impl OpenRouterConfig {
    /// Creates a new configuration with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::from_secret(Secret::new(api_key.into()))
    }

    /// Creates a configuration from an already-wrapped key.
    pub fn from_secret(api_key: Secret<String>) -> Self {
        Self {
            api_key,
            model: DEFAULT_MODEL.to_string(),
            base_url: OPENROUTER_URL.to_string(),
            timeout: Duration::from_secs(30),
            referer: DEFAULT_REFERER.to_string(),
            title: DEFAULT_TITLE.to_string(),
        }
    }

    /// Sets the model to use.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Sets the endpoint URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_app_identity(mut self, referer: impl Into<String>, title: impl Into<String>) -> Self {
        self.referer = referer.into();
        self.title = title.into();
        self
    }

    /// Exposes the API key (for making requests).
    fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }
}

/// OpenRouter API provider implementation.
pub struct OpenRouterProvider {
    config: OpenRouterConfig,
    client: Client,
}

impl OpenRouterProvider {
    /// Creates a new provider with the given configuration.
    pub fn new(config: OpenRouterConfig) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ProviderError::Configuration(format!("HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    fn timeout_secs(&self) -> u64 {
        self.config.timeout.as_secs()
    }

    /// Converts our request to the wire format.
    fn to_wire_request(&self, request: &CompletionRequest) -> WireRequest {
        WireRequest {
            model: self.config.model.clone(),
            messages: request
                .messages
                .iter()
                .map(|turn| WireMessage {
                    role: turn.role().as_str().to_string(),
                    content: turn.content().to_string(),
                })
                .collect(),
            temperature: request.temperature,
            max_tokens: request.max_tokens,
        }
    }

    fn map_transport_error(&self, e: reqwest::Error) -> ProviderError {
        if e.is_timeout() {
            ProviderError::Timeout {
                timeout_secs: self.timeout_secs(),
            }
        } else if e.is_connect() {
            ProviderError::network(format!("Connection failed: {}", e))
        } else {
            ProviderError::network(e.to_string())
        }
    }

    /// Sends a request and returns the raw response.
    async fn send_request(&self, request: &CompletionRequest) -> Result<Response, ProviderError> {
        let body = self.to_wire_request(request);

        self.client
            .post(&self.config.base_url)
            .header("Authorization", format!("Bearer {}", self.config.api_key()))
            .header("Content-Type", "application/json")
            .header("HTTP-Referer", &self.config.referer)
            .header("X-Title", &self.config.title)
            .json(&body)
            .send()
            .await
            .map_err(|e| self.map_transport_error(e))
    }
}

#[async_trait]
impl CompletionProvider for OpenRouterProvider {
    async fn complete(
        &self,
        request: &CompletionRequest,
    ) -> Result<CompletionResponse, ProviderError> {
        tracing::info!(
            model = %self.config.model,
            max_tokens = request.max_tokens,
            temperature = request.temperature,
            "Making OpenRouter request"
        );

        let response = self.send_request(request).await?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| self.map_transport_error(e))?;

        if !status.is_success() {
            tracing::error!(
                status_code = status.as_u16(),
                error_text = %body,
                "OpenRouter API error"
            );
            return Err(ProviderError::from_status(
                status.as_u16(),
                body,
                self.timeout_secs(),
            ));
        }

        parse_envelope(&body)
    }

    fn model(&self) -> &str {
        &self.config.model
    }
}

/// Extracts the assistant text and usage from a chat-completions reply body.
fn parse_envelope(body: &str) -> Result<CompletionResponse, ProviderError> {
    let envelope: WireResponse = serde_json::from_str(body)
        .map_err(|e| ProviderError::malformed(format!("Failed to parse response: {}", e)))?;

    let content = envelope
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| ProviderError::malformed("No choices in response"))?
        .message
        .and_then(|m| m.content)
        .ok_or_else(|| ProviderError::malformed("No message content in response"))?;

    Ok(CompletionResponse {
        content,
        usage: envelope
            .usage
            .map(|u| TokenUsage::new(u.prompt_tokens, u.completion_tokens, u.total_tokens)),
        model: envelope.model,
    })
}

// ----- OpenRouter API Types -----

#[derive(Debug, Serialize)]
struct WireRequest {
    model: String,
    messages: Vec<WireMessage>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct WireMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct WireResponse {
    #[serde(default)]
    model: Option<String>,
    #[serde(default)]
    choices: Vec<WireChoice>,
    #[serde(default)]
    usage: Option<WireUsage>,
}

#[derive(Debug, Deserialize)]
struct WireChoice {
    #[serde(default)]
    message: Option<WireResponseMessage>,
}

#[derive(Debug, Deserialize)]
struct WireResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WireUsage {
    #[serde(default)]
    prompt_tokens: u32,
    #[serde(default)]
    completion_tokens: u32,
    #[serde(default)]
    total_tokens: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::conversation::ConversationTurn;

    #[test]
    fn config_builder_works() {
        let config = OpenRouterConfig::new("test-key")
            .with_model("some/model")
            .with_base_url("http://localhost:9999/v1/chat/completions")
            .with_timeout(Duration::from_secs(5))
            .with_app_identity("https://example.test", "Tester");

        assert_eq!(config.model, "some/model");
        assert_eq!(config.base_url, "http://localhost:9999/v1/chat/completions");
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.referer, "https://example.test");
        assert_eq!(config.title, "Tester");
        assert_eq!(config.api_key(), "test-key");
    }

    #[test]
    fn config_defaults_target_openrouter() {
        let config = OpenRouterConfig::new("k");

        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.base_url, OPENROUTER_URL);
        assert_eq!(config.timeout, Duration::from_secs(30));
    }

    #[test]
    fn debug_output_hides_api_key() {
        let config = OpenRouterConfig::new("super-secret-key");
        assert!(!format!("{:?}", config).contains("super-secret-key"));
    }

    #[test]
    fn wire_request_carries_roles_and_settings() {
        let provider = OpenRouterProvider::new(OpenRouterConfig::new("k")).unwrap();
        let request = CompletionRequest::new(vec![
            ConversationTurn::system("rules"),
            ConversationTurn::user("hi"),
        ]);

        let wire = serde_json::to_value(provider.to_wire_request(&request)).unwrap();

        assert_eq!(wire["model"], DEFAULT_MODEL);
        assert_eq!(wire["messages"][0]["role"], "system");
        assert_eq!(wire["messages"][1]["content"], "hi");
        assert_eq!(wire["max_tokens"], 512);
        assert!((wire["temperature"].as_f64().unwrap() - 0.15).abs() < 1e-6);
    }

    #[test]
    fn parses_content_model_and_usage() {
        let body = r#"{"model":"m","choices":[{"message":{"role":"assistant","content":"hello"}}],
                       "usage":{"prompt_tokens":10,"completion_tokens":5,"total_tokens":15}}"#;
        let response = parse_envelope(body).unwrap();

        assert_eq!(response.content, "hello");
        assert_eq!(response.model.as_deref(), Some("m"));
        assert_eq!(response.usage, Some(TokenUsage::new(10, 5, 15)));
    }

    #[test]
    fn missing_usage_stays_absent() {
        let body = r#"{"choices":[{"message":{"content":"hello"}}]}"#;
        assert_eq!(parse_envelope(body).unwrap().usage, None);
    }

    #[test]
    fn partial_usage_counters_default_to_zero() {
        let body = r#"{"choices":[{"message":{"content":"x"}}],"usage":{"total_tokens":7}}"#;
        assert_eq!(
            parse_envelope(body).unwrap().usage,
            Some(TokenUsage::new(0, 0, 7))
        );
    }

    #[test]
    fn empty_choices_is_malformed() {
        let err = parse_envelope(r#"{"choices":[]}"#).unwrap_err();
        assert!(matches!(err, ProviderError::MalformedResponse(_)));
    }

    #[test]
    fn null_content_is_malformed() {
        let err = parse_envelope(r#"{"choices":[{"message":{"content":null}}]}"#).unwrap_err();
        assert!(matches!(err, ProviderError::MalformedResponse(_)));
    }

    #[test]
    fn non_json_body_is_malformed() {
        let err = parse_envelope("<html>gateway</html>").unwrap_err();
        assert!(matches!(err, ProviderError::MalformedResponse(_)));
        assert!(!err.is_retryable());
    }
}
