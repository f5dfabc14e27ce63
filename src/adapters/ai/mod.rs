//! AI Provider Adapters.
//!
//! Implementations of the CompletionProvider and UsageRecorder ports.
//!
//! ## Available Adapters
//!
//! - `MockCompletionProvider` - Configurable mock for testing
//! - `OpenRouterProvider` - OpenRouter chat-completions API
//! - `InMemoryUsageRecorder` - Token accounting kept in memory

mod in_memory_usage_recorder;
mod mock_provider;
mod openrouter_provider;

pub use in_memory_usage_recorder::InMemoryUsageRecorder;
pub use mock_provider::{MockCompletionProvider, MockResponse, DEFAULT_MOCK_CONTENT, MOCK_MODEL};
pub use openrouter_provider::{
    OpenRouterConfig, OpenRouterProvider, DEFAULT_MODEL, DEFAULT_REFERER, DEFAULT_TITLE,
    OPENROUTER_URL,
};
