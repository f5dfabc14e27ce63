//! In-Memory Conversation History Adapter
//!
//! Keeps each session's turns in memory. Useful for the interactive CLI and tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::conversation::ConversationTurn;
use crate::domain::foundation::SessionId;
use crate::ports::{ConversationHistory, HistoryError};

/// In-memory conversation history
#[derive(Debug, Clone, Default)]
pub struct InMemoryConversationHistory {
    sessions: Arc<RwLock<HashMap<SessionId, Vec<ConversationTurn>>>>,
}

impl InMemoryConversationHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every stored turn of a session, oldest first
    pub async fn turns(&self, session_id: &SessionId) -> Vec<ConversationTurn> {
        self.sessions
            .read()
            .await
            .get(session_id)
            .cloned()
            .unwrap_or_default()
    }

    /// Number of sessions with at least one turn
    pub async fn session_count(&self) -> usize {
        self.sessions.read().await.len()
    }
}

#[async_trait]
impl ConversationHistory for InMemoryConversationHistory {
    async fn recent_turns(
        &self,
        session_id: &SessionId,
        limit: usize,
    ) -> Result<Vec<ConversationTurn>, HistoryError> {
        let sessions = self.sessions.read().await;
        let turns = sessions.get(session_id).map(Vec::as_slice).unwrap_or(&[]);
        let start = turns.len().saturating_sub(limit);
        Ok(turns[start..].to_vec())
    }

    async fn append_turn(
        &self,
        session_id: &SessionId,
        turn: ConversationTurn,
    ) -> Result<(), HistoryError> {
        self.sessions
            .write()
            .await
            .entry(*session_id)
            .or_default()
            .push(turn);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn unknown_session_has_no_turns() {
        let history = InMemoryConversationHistory::new();
        let turns = history.recent_turns(&SessionId::new(), 6).await.unwrap();
        assert!(turns.is_empty());
    }

    #[tokio::test]
    async fn recent_turns_returns_tail_in_order() {
        let history = InMemoryConversationHistory::new();
        let session = SessionId::new();
        for i in 0..5 {
            history
                .append_turn(&session, ConversationTurn::user(format!("m{}", i)))
                .await
                .unwrap();
        }

        let turns = history.recent_turns(&session, 3).await.unwrap();
        let contents: Vec<_> = turns.iter().map(|t| t.content()).collect();

        assert_eq!(contents, vec!["m2", "m3", "m4"]);
    }

    #[tokio::test]
    async fn zero_limit_returns_nothing() {
        let history = InMemoryConversationHistory::new();
        let session = SessionId::new();
        history
            .append_turn(&session, ConversationTurn::user("hi"))
            .await
            .unwrap();

        assert!(history.recent_turns(&session, 0).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn sessions_are_isolated() {
        let history = InMemoryConversationHistory::new();
        let a = SessionId::new();
        let b = SessionId::new();

        history.append_turn(&a, ConversationTurn::user("a")).await.unwrap();

        assert!(history.turns(&b).await.is_empty());
        assert_eq!(history.session_count().await, 1);
    }
}
