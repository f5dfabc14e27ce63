//! Context window assembly for model calls.
//!
//! The window is always: one system turn with the operating instructions, then the
//! most recent history turns oldest-first, then the current user message.

use super::turn::ConversationTurn;
use crate::domain::foundation::SessionId;

/// Default number of history turns carried into the window.
pub const DEFAULT_MAX_CONTEXT_MESSAGES: usize = 6;

/// Operating instructions sent as the first turn of every model call.
pub const SUPPORT_SYSTEM_PROMPT: &str = r#"You are an expert customer support AI for an e-commerce platform.

You specialize in:
- Order management (tracking, cancellation, modification)
- Shipping and delivery questions
- Account management (password, profile, addresses)
- Returns and refunds
- Payment and billing issues
- Product-related questions

CRITICAL INSTRUCTION: You MUST respond with ONLY a JSON object. Do not include any text before or after the JSON.

The JSON object must have exactly these fields:
{
  "answer": "<your helpful response as a string>",
  "confidence": <float between 0.0 and 1.0>,
  "escalate": <true or false>,
  "suggested_actions": ["action1", "action2"]
}

When to ESCALATE (set escalate: true):
- Questions about legal issues, lawsuits, or threats
- Complex billing disputes involving large amounts
- Account security breaches or fraud
- Requests to speak with a manager/supervisor
- Issues requiring manual intervention (account locks, etc.)
- Anything outside your expertise areas above

When NOT to escalate (handle yourself):
- Standard order questions (tracking, status, delivery times)
- How-to questions about using the website/account
- Standard return/refund procedures
- General product information
- Shipping options and policies
- Standard account management
- Common troubleshooting

Guidelines:
- Be helpful, professional, and empathetic
- Provide step-by-step instructions when helpful
- Use specific details about policies (30-day returns, free shipping over $35, etc.)
- Don't escalate unnecessarily - you're capable of handling most customer service questions
- Set confidence high (0.8-0.95) for topics in your expertise areas
- Set confidence low (0.3-0.6) only when genuinely uncertain

Remember: ONLY return the JSON object, nothing else."#;

/// Builds the bounded turn sequence sent to the model.
#[derive(Debug, Clone)]
pub struct ContextBuilder {
    max_context_messages: usize,
}

impl ContextBuilder {
    pub fn new(max_context_messages: usize) -> Self {
        Self {
            max_context_messages,
        }
    }

    pub fn max_context_messages(&self) -> usize {
        self.max_context_messages
    }

    /// Composes `[system, ..last N history turns.., user(current)]`.
    ///
    /// `history` must be chronological. It is only read.
    pub fn build(
        &self,
        session_id: &SessionId,
        current_message: &str,
        history: &[ConversationTurn],
    ) -> Vec<ConversationTurn> {
        let skip = history.len().saturating_sub(self.max_context_messages);
        let window = &history[skip..];

        let mut turns = Vec::with_capacity(window.len() + 2);
        turns.push(ConversationTurn::system(SUPPORT_SYSTEM_PROMPT));
        turns.extend(window.iter().cloned());
        turns.push(ConversationTurn::user(current_message));

        tracing::debug!(
            session_id = %session_id,
            history_turns = window.len(),
            dropped_turns = skip,
            "Built model context"
        );

        turns
    }
}

impl Default for ContextBuilder {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_CONTEXT_MESSAGES)
    }
}
