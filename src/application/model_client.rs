//! Model client - retrying completion calls and structured-answer recovery.
//!
//! Wraps a [`CompletionProvider`] with the retry policy and turns every outcome into a
//! [`RoutingResult`]. Callers never see a provider error from [`ModelClient::complete`].

use serde::Serialize;
use std::sync::Arc;

use crate::domain::conversation::ConversationTurn;
use crate::domain::routing::{recover, RetryPolicy, RoutingResult};
use crate::ports::{
    CompletionProvider, CompletionRequest, CompletionResponse, ProviderError, Sleeper,
    DEFAULT_MAX_TOKENS, DEFAULT_TEMPERATURE,
};

const HEALTH_SYSTEM_PROMPT: &str = "You are a helpful assistant.";
const HEALTH_USER_PROMPT: &str = r#"Say 'OK' in JSON format: {"status": "OK"}"#;
const HEALTH_MAX_TOKENS: u32 = 50;

/// Outcome of a health probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    /// Provider answered with usable output.
    Healthy,
    /// Provider answered but the output carried zero confidence.
    Degraded,
    /// Provider call failed.
    Unhealthy,
}

/// Health probe report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HealthReport {
    pub status: HealthStatus,
    pub model: String,
    pub confidence: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Calls the completion provider with retries and recovers a routing result.
pub struct ModelClient<P: ?Sized + CompletionProvider> {
    provider: Arc<P>,
    sleeper: Arc<dyn Sleeper>,
    policy: RetryPolicy,
    temperature: f32,
    max_tokens: u32,
}

impl<P: ?Sized + CompletionProvider> ModelClient<P> {
    /// Creates a client with the default retry policy and sampling settings.
    pub fn new(provider: Arc<P>, sleeper: Arc<dyn Sleeper>) -> Self {
        Self {
            provider,
            sleeper,
            policy: RetryPolicy::default(),
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }

    pub fn with_retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn model(&self) -> &str {
        self.provider.model()
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        self.policy
    }

    /// Sends the turns and recovers a routing result. Never fails.
    pub async fn complete(&self, turns: Vec<ConversationTurn>) -> RoutingResult {
        let request = CompletionRequest::new(turns)
            .with_temperature(self.temperature)
            .with_max_tokens(self.max_tokens);

        match self.call_with_retry(&request).await {
            Ok(response) => recover(&response.content, response.usage),
            Err(err) => {
                tracing::error!(
                    model = self.model(),
                    error = %err,
                    "Completion failed, using technical fallback"
                );
                RoutingResult::technical_failure(&err)
            }
        }
    }

    /// One logical call: retries server errors and timeouts with exponential backoff.
    pub async fn call_with_retry(
        &self,
        request: &CompletionRequest,
    ) -> Result<CompletionResponse, ProviderError> {
        let mut state = self.policy.start();

        loop {
            if !state.delay.is_zero() {
                self.sleeper.sleep(state.delay).await;
            }

            tracing::debug!(
                model = self.model(),
                attempt = state.attempt,
                max_attempts = self.policy.max_attempts(),
                "Requesting completion"
            );

            let err = match self.provider.complete(request).await {
                Ok(response) => return Ok(response),
                Err(err) => err,
            };

            tracing::warn!(attempt = state.attempt, error = %err, "Completion attempt failed");

            if !err.is_retryable() {
                return Err(err);
            }

            match self.policy.next(state) {
                Some(next) => {
                    tracing::info!(
                        attempt = state.attempt,
                        delay_ms = next.delay.as_millis() as u64,
                        "Retrying completion"
                    );
                    state = next;
                }
                None => return Err(err),
            }
        }
    }

    /// Sends a tiny probe prompt and reports provider health.
    pub async fn health_check(&self) -> HealthReport {
        let request = CompletionRequest::new(vec![
            ConversationTurn::system(HEALTH_SYSTEM_PROMPT),
            ConversationTurn::user(HEALTH_USER_PROMPT),
        ])
        .with_temperature(self.temperature)
        .with_max_tokens(HEALTH_MAX_TOKENS);

        let model = self.model().to_string();
        match self.call_with_retry(&request).await {
            Ok(response) => {
                let confidence = recover(&response.content, response.usage).confidence();
                let status = if confidence > 0.0 {
                    HealthStatus::Healthy
                } else {
                    HealthStatus::Degraded
                };
                HealthReport {
                    status,
                    model,
                    confidence,
                    error: None,
                }
            }
            Err(err) => {
                tracing::error!(error = %err, "Health check failed");
                HealthReport {
                    status: HealthStatus::Unhealthy,
                    model,
                    confidence: 0.0,
                    error: Some(err.to_string()),
                }
            }
        }
    }
}
