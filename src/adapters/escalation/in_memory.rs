//! In-memory escalation queue.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::SessionId;
use crate::ports::{EscalationError, EscalationQueue, EscalationTicket};

/// Collects escalation tickets in arrival order.
#[derive(Debug, Clone, Default)]
pub struct InMemoryEscalationQueue {
    tickets: Arc<RwLock<Vec<EscalationTicket>>>,
}

impl InMemoryEscalationQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn tickets(&self) -> Vec<EscalationTicket> {
        self.tickets.read().await.clone()
    }

    pub async fn tickets_for(&self, session_id: &SessionId) -> Vec<EscalationTicket> {
        self.tickets
            .read()
            .await
            .iter()
            .filter(|t| &t.session_id == session_id)
            .cloned()
            .collect()
    }

    pub async fn len(&self) -> usize {
        self.tickets.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.tickets.read().await.is_empty()
    }
}

#[async_trait]
impl EscalationQueue for InMemoryEscalationQueue {
    async fn open(&self, ticket: EscalationTicket) -> Result<(), EscalationError> {
        tracing::info!(
            escalation_id = %ticket.id,
            session_id = %ticket.session_id,
            confidence = ticket.confidence,
            "Escalation ticket opened"
        );
        self.tickets.write().await.push(ticket);
        Ok(())
    }
}
