//! EscalationQueue port - hand-off of conversations to human agents.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{EscalationId, SessionId, Timestamp};

/// A request for a human agent to take over a conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EscalationTicket {
    pub id: EscalationId,
    pub session_id: SessionId,
    /// Customer identifier, when the caller supplied one.
    pub user_id: Option<String>,
    pub reason: String,
    /// The sanitized customer message that triggered the hand-off.
    pub message: String,
    pub confidence: f64,
    pub created_at: Timestamp,
}

impl EscalationTicket {
    /// Creates a ticket with the standard reason text for `confidence`.
    pub fn new(
        session_id: SessionId,
        user_id: Option<String>,
        message: impl Into<String>,
        confidence: f64,
    ) -> Self {
        Self {
            id: EscalationId::new(),
            session_id,
            user_id,
            reason: Self::reason_for(confidence),
            message: message.into(),
            confidence,
            created_at: Timestamp::now(),
        }
    }

    /// Standard reason text recorded on every ticket.
    pub fn reason_for(confidence: f64) -> String {
        format!("Low confidence ({}) or escalation requested", confidence)
    }
}

/// Port for opening escalation tickets.
#[async_trait]
pub trait EscalationQueue: Send + Sync {
    async fn open(&self, ticket: EscalationTicket) -> Result<(), EscalationError>;
}

/// Errors from the escalation queue.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EscalationError {
    #[error("escalation queue unavailable: {0}")]
    Unavailable(String),
}
