//! CompletionProvider port - one chat-completion call against an LLM service.
//!
//! The port carries no retry or parsing policy. It returns the raw assistant text
//! plus whatever token usage the service reported, and classifies failures so the
//! model client can decide what to retry.

use async_trait::async_trait;

use crate::domain::conversation::ConversationTurn;
use crate::domain::routing::TokenUsage;

/// Default sampling temperature for support answers.
pub const DEFAULT_TEMPERATURE: f32 = 0.15;

/// Default completion budget.
pub const DEFAULT_MAX_TOKENS: u32 = 512;

/// Port for chat-completion providers.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Performs exactly one completion call. Never retries.
    async fn complete(
        &self,
        request: &CompletionRequest,
    ) -> Result<CompletionResponse, ProviderError>;

    /// Model identifier sent with every request.
    fn model(&self) -> &str;
}

/// A chat-completion request.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    /// Ordered turns, system prompt first.
    pub messages: Vec<ConversationTurn>,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl CompletionRequest {
    /// Creates a request with default sampling settings.
    pub fn new(messages: Vec<ConversationTurn>) -> Self {
        Self {
            messages,
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }
}

/// Raw provider reply.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionResponse {
    /// Assistant message text, unparsed.
    pub content: String,
    /// Present only when the provider reported usage.
    pub usage: Option<TokenUsage>,
    /// Model that answered, if the provider said.
    pub model: Option<String>,
}

impl CompletionResponse {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            usage: None,
            model: None,
        }
    }

    pub fn with_usage(mut self, usage: TokenUsage) -> Self {
        self.usage = Some(usage);
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }
}

/// Completion provider errors.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ProviderError {
    /// HTTP 5xx from the provider.
    #[error("server error {status}: {message}")]
    ServerError { status: u16, message: String },

    /// The request did not finish in time (includes HTTP 408).
    #[error("request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    /// HTTP 4xx other than 408.
    #[error("client error {status}: {message}")]
    ClientError { status: u16, message: String },

    /// Connection or transport failure.
    #[error("network error: {0}")]
    Network(String),

    /// The reply envelope did not contain an assistant message.
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// The provider could not be constructed or the request could not be built.
    #[error("configuration error: {0}")]
    Configuration(String),
}

impl ProviderError {
    pub fn server(status: u16, message: impl Into<String>) -> Self {
        Self::ServerError {
            status,
            message: message.into(),
        }
    }

    pub fn client(status: u16, message: impl Into<String>) -> Self {
        Self::ClientError {
            status,
            message: message.into(),
        }
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedResponse(message.into())
    }

    /// Classifies a non-success HTTP status.
    pub fn from_status(status: u16, body: impl Into<String>, timeout_secs: u64) -> Self {
        match status {
            408 => Self::Timeout { timeout_secs },
            500..=599 => Self::server(status, body),
            _ => Self::client(status, body),
        }
    }

    /// Returns true if this error is retryable.
    ///
    /// Only server errors and timeouts are retried.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            ProviderError::ServerError { .. } | ProviderError::Timeout { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_defaults_match_support_settings() {
        let request = CompletionRequest::new(vec![ConversationTurn::user("hi")]);

        assert_eq!(request.temperature, 0.15);
        assert_eq!(request.max_tokens, 512);
        assert_eq!(request.messages.len(), 1);
    }

    #[test]
    fn request_builder_overrides_settings() {
        let request = CompletionRequest::new(Vec::new())
            .with_temperature(0.7)
            .with_max_tokens(50);

        assert_eq!(request.temperature, 0.7);
        assert_eq!(request.max_tokens, 50);
    }

    #[test]
    fn status_classification() {
        assert!(matches!(
            ProviderError::from_status(503, "down", 30),
            ProviderError::ServerError { status: 503, .. }
        ));
        assert_eq!(
            ProviderError::from_status(408, "slow", 30),
            ProviderError::Timeout { timeout_secs: 30 }
        );
        assert!(matches!(
            ProviderError::from_status(401, "bad key", 30),
            ProviderError::ClientError { status: 401, .. }
        ));
    }

    #[test]
    fn retryable_classification() {
        assert!(ProviderError::server(500, "boom").is_retryable());
        assert!(ProviderError::Timeout { timeout_secs: 30 }.is_retryable());

        assert!(!ProviderError::client(429, "slow down").is_retryable());
        assert!(!ProviderError::network("refused").is_retryable());
        assert!(!ProviderError::malformed("no choices").is_retryable());
        assert!(!ProviderError::Configuration("bad url".into()).is_retryable());
    }

    #[test]
    fn response_builder_keeps_absent_usage_absent() {
        let response = CompletionResponse::new("text");
        assert!(response.usage.is_none());

        let response = response.with_usage(TokenUsage::new(1, 2, 3)).with_model("m");
        assert_eq!(response.usage, Some(TokenUsage::new(1, 2, 3)));
        assert_eq!(response.model.as_deref(), Some("m"));
    }
}
