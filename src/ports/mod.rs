//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `CompletionProvider` - one chat-completion call against an LLM service
//! - `FaqCatalog` - curated answers and their usage counters
//! - `ConversationHistory` - per-session chat turns
//! - `UsageRecorder` - token accounting
//! - `EscalationQueue` - hand-off to human agents
//! - `Sleeper` - async delay between retries

mod completion_provider;
mod conversation_history;
mod escalation_queue;
mod faq_catalog;
mod sleeper;
mod usage_recorder;

pub use completion_provider::{
    CompletionProvider, CompletionRequest, CompletionResponse, ProviderError,
    DEFAULT_MAX_TOKENS, DEFAULT_TEMPERATURE,
};
pub use conversation_history::{ConversationHistory, HistoryError};
pub use escalation_queue::{EscalationError, EscalationQueue, EscalationTicket};
pub use faq_catalog::{CatalogError, FaqCatalog};
pub use sleeper::Sleeper;
pub use usage_recorder::{ModelUsage, UsageError, UsageRecord, UsageRecorder, UsageSummary};
