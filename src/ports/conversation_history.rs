//! ConversationHistory port - per-session chat turns.

use async_trait::async_trait;

use crate::domain::conversation::ConversationTurn;
use crate::domain::foundation::SessionId;

/// Port for conversation history storage.
#[async_trait]
pub trait ConversationHistory: Send + Sync {
    /// Returns at most `limit` most recent turns, oldest first.
    ///
    /// Unknown sessions yield an empty list.
    async fn recent_turns(
        &self,
        session_id: &SessionId,
        limit: usize,
    ) -> Result<Vec<ConversationTurn>, HistoryError>;

    /// Appends one turn to the end of a session's history.
    async fn append_turn(
        &self,
        session_id: &SessionId,
        turn: ConversationTurn,
    ) -> Result<(), HistoryError>;
}

/// Errors from conversation history storage.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum HistoryError {
    #[error("history unavailable: {0}")]
    Unavailable(String),
}
