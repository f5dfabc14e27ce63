//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `ai` - Completion providers (OpenRouter, mock) and usage recording
//! - `storage` - FAQ catalog and conversation history stores, YAML seed loader
//! - `escalation` - Escalation ticket queue
//! - `time` - Sleepers for retry backoff

pub mod ai;
pub mod escalation;
pub mod storage;
pub mod time;

pub use ai::{InMemoryUsageRecorder, MockCompletionProvider, OpenRouterConfig, OpenRouterProvider};
pub use escalation::InMemoryEscalationQueue;
pub use storage::{load_catalog, InMemoryConversationHistory, InMemoryFaqCatalog};
pub use time::{RecordingSleeper, TokioSleeper};
