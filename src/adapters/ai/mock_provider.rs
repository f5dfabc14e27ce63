//! Mock completion provider for testing.
//!
//! Provides a configurable mock implementation of the CompletionProvider port,
//! allowing tests to run without calling a real LLM service.
//!
//! # Features
//!
//! - Pre-configured responses, consumed in order
//! - Simulated delays
//! - Error injection for retry testing
//! - Call tracking for verification
//!
//! # Example
//!
//! ```ignore
//! let provider = MockCompletionProvider::new()
//!     .with_answer("Track it under Your Orders.", 0.9, false)
//!     .with_error(ProviderError::server(503, "down"));
//!
//! let response = provider.complete(&request).await?;
//! ```

use async_trait::async_trait;
use serde_json::json;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tokio::time::sleep;

use crate::domain::routing::TokenUsage;
use crate::ports::{CompletionProvider, CompletionRequest, CompletionResponse, ProviderError};

/// Model name reported by the mock.
pub const MOCK_MODEL: &str = "mock-model-1";

/// Content returned once the queue is empty.
pub const DEFAULT_MOCK_CONTENT: &str = "Mock response";

/// Mock completion provider for testing.
#[derive(Debug, Clone)]
pub struct MockCompletionProvider {
    /// Pre-configured responses (consumed in order).
    responses: Arc<Mutex<VecDeque<MockResponse>>>,
    model: String,
    /// Simulated latency per request.
    delay: Duration,
    /// Call history for verification.
    calls: Arc<Mutex<Vec<CompletionRequest>>>,
}

/// A configured mock response.
#[derive(Debug, Clone)]
pub enum MockResponse {
    /// Return a successful completion.
    Success {
        content: String,
        usage: Option<TokenUsage>,
    },
    /// Return an error.
    Error(ProviderError),
}

impl Default for MockCompletionProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl MockCompletionProvider {
    /// Creates a new mock provider with default settings.
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(VecDeque::new())),
            model: MOCK_MODEL.to_string(),
            delay: Duration::ZERO,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    fn push(self, response: MockResponse) -> Self {
        self.responses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(response);
        self
    }

    /// Adds a successful raw-text response without usage.
    pub fn with_response(self, content: impl Into<String>) -> Self {
        self.push(MockResponse::Success {
            content: content.into(),
            usage: None,
        })
    }

    /// Adds a successful raw-text response with usage.
    pub fn with_response_and_usage(self, content: impl Into<String>, usage: TokenUsage) -> Self {
        self.push(MockResponse::Success {
            content: content.into(),
            usage: Some(usage),
        })
    }

    /// Adds a response that follows the JSON answer contract.
    pub fn with_answer(self, answer: &str, confidence: f64, escalate: bool) -> Self {
        let content = json!({
            "answer": answer,
            "confidence": confidence,
            "escalate": escalate,
            "suggested_actions": [],
        })
        .to_string();
        self.with_response(content)
    }

    /// Adds an error response to the queue.
    pub fn with_error(self, error: ProviderError) -> Self {
        self.push(MockResponse::Error(error))
    }

    /// Sets simulated latency per request.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Returns the number of calls made to this provider.
    pub fn call_count(&self) -> usize {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Returns all recorded calls.
    pub fn get_calls(&self) -> Vec<CompletionRequest> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Clears the call history.
    pub fn clear_calls(&self) {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    /// Gets the next response or a default.
    fn next_response(&self) -> MockResponse {
        self.responses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front()
            .unwrap_or_else(|| MockResponse::Success {
                content: DEFAULT_MOCK_CONTENT.to_string(),
                usage: None,
            })
    }
}

#[async_trait]
impl CompletionProvider for MockCompletionProvider {
    async fn complete(
        &self,
        request: &CompletionRequest,
    ) -> Result<CompletionResponse, ProviderError> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(request.clone());

        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }

        match self.next_response() {
            MockResponse::Success { content, usage } => Ok(CompletionResponse {
                content,
                usage,
                model: Some(self.model.clone()),
            }),
            MockResponse::Error(err) => Err(err),
        }
    }

    fn model(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::conversation::ConversationTurn;

    fn test_request() -> CompletionRequest {
        CompletionRequest::new(vec![ConversationTurn::user("Hello")])
    }

    #[tokio::test]
    async fn returns_responses_in_order() {
        let provider = MockCompletionProvider::new()
            .with_response("First")
            .with_response("Second");

        let r1 = provider.complete(&test_request()).await.unwrap();
        let r2 = provider.complete(&test_request()).await.unwrap();

        assert_eq!(r1.content, "First");
        assert_eq!(r2.content, "Second");
        assert_eq!(r1.model.as_deref(), Some(MOCK_MODEL));
    }

    #[tokio::test]
    async fn returns_default_after_exhausted() {
        let provider = MockCompletionProvider::new().with_response("Only one");

        provider.complete(&test_request()).await.unwrap();
        let r2 = provider.complete(&test_request()).await.unwrap();

        assert_eq!(r2.content, DEFAULT_MOCK_CONTENT);
        assert!(r2.usage.is_none());
    }

    #[tokio::test]
    async fn returns_configured_error() {
        let provider = MockCompletionProvider::new().with_error(ProviderError::server(503, "down"));

        let err = provider.complete(&test_request()).await.unwrap_err();

        assert!(err.is_retryable());
        assert!(matches!(err, ProviderError::ServerError { status: 503, .. }));
    }

    #[tokio::test]
    async fn answer_helper_follows_json_contract() {
        let provider = MockCompletionProvider::new().with_answer("Hi", 0.9, false);
        let response = provider.complete(&test_request()).await.unwrap();

        let value: serde_json::Value = serde_json::from_str(&response.content).unwrap();
        assert_eq!(value["answer"], "Hi");
        assert_eq!(value["confidence"], 0.9);
        assert_eq!(value["escalate"], false);
    }

    #[tokio::test]
    async fn tracks_calls() {
        let provider = MockCompletionProvider::new();

        assert_eq!(provider.call_count(), 0);
        provider.complete(&test_request()).await.unwrap();
        assert_eq!(provider.call_count(), 1);
        assert_eq!(provider.get_calls()[0].messages[0].content(), "Hello");

        provider.clear_calls();
        assert_eq!(provider.call_count(), 0);
    }

    #[tokio::test]
    async fn usage_is_passed_through() {
        let provider = MockCompletionProvider::new()
            .with_response_and_usage("x", TokenUsage::new(3, 4, 7));

        let response = provider.complete(&test_request()).await.unwrap();
        assert_eq!(response.usage, Some(TokenUsage::new(3, 4, 7)));
    }
}
