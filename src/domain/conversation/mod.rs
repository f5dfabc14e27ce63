//! Conversation module - turns and the model context window.

mod context;
mod turn;

pub use context::{ContextBuilder, DEFAULT_MAX_CONTEXT_MESSAGES, SUPPORT_SYSTEM_PROMPT};
pub use turn::{ConversationTurn, Role};
