//! UsageRecorder port - token accounting for model calls.
//!
//! Every model answer that reports usage is recorded against its session and model,
//! so operators can see how many tokens the support bot spends.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{SessionId, Timestamp};
use crate::domain::routing::TokenUsage;

/// Record of token usage for a single model answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UsageRecord {
    /// Session the answer belonged to.
    pub session_id: SessionId,
    /// Model used.
    pub model: String,
    /// Tokens in the prompt.
    pub prompt_tokens: u32,
    /// Tokens in the completion.
    pub completion_tokens: u32,
    /// Total as reported by the provider.
    pub total_tokens: u32,
    /// When the usage occurred.
    pub occurred_at: Timestamp,
}

impl UsageRecord {
    /// Creates a new usage record stamped with the current time.
    pub fn new(session_id: SessionId, model: impl Into<String>, usage: TokenUsage) -> Self {
        Self {
            session_id,
            model: model.into(),
            prompt_tokens: usage.prompt_tokens,
            completion_tokens: usage.completion_tokens,
            total_tokens: usage.total_tokens,
            occurred_at: Timestamp::now(),
        }
    }
}

/// Aggregate usage across recorded answers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UsageSummary {
    /// Number of model answers recorded.
    pub request_count: u32,
    pub prompt_tokens: u64,
    pub completion_tokens: u64,
    pub total_tokens: u64,
    /// Breakdown by model.
    pub by_model: Vec<ModelUsage>,
}

/// Usage breakdown by model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelUsage {
    pub model: String,
    pub total_tokens: u64,
    pub requests: u32,
}

/// Port for recording token usage.
#[async_trait]
pub trait UsageRecorder: Send + Sync {
    /// Records a usage event.
    async fn record(&self, record: UsageRecord) -> Result<(), UsageError>;

    /// Totals over every recorded event.
    async fn summary(&self) -> Result<UsageSummary, UsageError>;

    /// Totals for one session.
    async fn session_summary(&self, session_id: &SessionId) -> Result<UsageSummary, UsageError>;
}

/// Errors from the usage recorder.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum UsageError {
    /// Backing store error.
    #[error("storage error: {0}")]
    Storage(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn usage_record_copies_provider_counts() {
        let record = UsageRecord::new(SessionId::new(), "model-a", TokenUsage::new(100, 50, 160));

        assert_eq!(record.prompt_tokens, 100);
        assert_eq!(record.completion_tokens, 50);
        assert_eq!(record.total_tokens, 160);
    }

    #[test]
    fn usage_summary_default_is_empty() {
        let summary = UsageSummary::default();
        assert_eq!(summary.request_count, 0);
        assert_eq!(summary.total_tokens, 0);
        assert!(summary.by_model.is_empty());
    }
}
