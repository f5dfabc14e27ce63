//! RouteMessage command handler.
//!
//! Routes one customer message: FAQ fast path first, then the model with business
//! rules. Side effects (usage counters, history, usage records, escalation tickets)
//! are best effort and only logged on failure. The handler always produces an answer.

use serde::Serialize;
use std::sync::Arc;

use crate::application::model_client::ModelClient;
use crate::domain::conversation::{ContextBuilder, ConversationTurn};
use crate::domain::faq::{FaqMatch, FaqMatcher, MatchKind};
use crate::domain::foundation::{FaqId, SessionId};
use crate::domain::routing::{RoutingResult, RuleEngine, Sanitizer};
use crate::ports::{
    CompletionProvider, ConversationHistory, EscalationQueue, EscalationTicket, FaqCatalog,
    UsageRecord, UsageRecorder,
};

/// Command to route a customer message.
#[derive(Debug, Clone)]
pub struct RouteMessageCommand {
    pub session_id: SessionId,
    /// Raw message as typed by the customer.
    pub message: String,
    pub user_id: Option<String>,
}

impl RouteMessageCommand {
    pub fn new(session_id: SessionId, message: impl Into<String>) -> Self {
        Self {
            session_id,
            message: message.into(),
            user_id: None,
        }
    }

    pub fn with_user_id(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }
}

/// Where an answer came from.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum ResolutionSource {
    /// Answered from the catalog.
    Faq {
        faq_id: FaqId,
        question: String,
        matched_by: MatchKind,
    },
    /// Answered by the model, after business rules.
    Model,
}

/// Result of routing a message.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoutedMessage {
    pub session_id: SessionId,
    pub result: RoutingResult,
    pub resolution: ResolutionSource,
}

impl RoutedMessage {
    pub fn is_faq_hit(&self) -> bool {
        matches!(self.resolution, ResolutionSource::Faq { .. })
    }
}

/// Handler for routing customer messages.
pub struct RouteMessageHandler<P: ?Sized + CompletionProvider> {
    catalog: Arc<dyn FaqCatalog>,
    history: Arc<dyn ConversationHistory>,
    model_client: ModelClient<P>,
    usage_recorder: Option<Arc<dyn UsageRecorder>>,
    escalation_queue: Option<Arc<dyn EscalationQueue>>,
    sanitizer: Sanitizer,
    matcher: FaqMatcher,
    context_builder: ContextBuilder,
    rule_engine: RuleEngine,
}

impl<P: ?Sized + CompletionProvider> RouteMessageHandler<P> {
    /// Creates a handler with default pipeline settings and no usage or escalation sinks.
    pub fn new(
        catalog: Arc<dyn FaqCatalog>,
        history: Arc<dyn ConversationHistory>,
        model_client: ModelClient<P>,
    ) -> Self {
        Self {
            catalog,
            history,
            model_client,
            usage_recorder: None,
            escalation_queue: None,
            sanitizer: Sanitizer::default(),
            matcher: FaqMatcher::default(),
            context_builder: ContextBuilder::default(),
            rule_engine: RuleEngine::default(),
        }
    }

    pub fn with_usage_recorder(mut self, recorder: Arc<dyn UsageRecorder>) -> Self {
        self.usage_recorder = Some(recorder);
        self
    }

    pub fn with_escalation_queue(mut self, queue: Arc<dyn EscalationQueue>) -> Self {
        self.escalation_queue = Some(queue);
        self
    }

    pub fn with_sanitizer(mut self, sanitizer: Sanitizer) -> Self {
        self.sanitizer = sanitizer;
        self
    }

    pub fn with_matcher(mut self, matcher: FaqMatcher) -> Self {
        self.matcher = matcher;
        self
    }

    pub fn with_context_builder(mut self, context_builder: ContextBuilder) -> Self {
        self.context_builder = context_builder;
        self
    }

    pub fn with_rule_engine(mut self, rule_engine: RuleEngine) -> Self {
        self.rule_engine = rule_engine;
        self
    }

    pub fn model_client(&self) -> &ModelClient<P> {
        &self.model_client
    }

    /// Handles a route message command.
    pub async fn handle(&self, cmd: RouteMessageCommand) -> RoutedMessage {
        let message = self.sanitizer.sanitize(&cmd.message);

        let (result, resolution) = match self.find_faq(&message).await {
            Some(hit) => {
                self.mark_used(hit.entry.id()).await;
                let resolution = ResolutionSource::Faq {
                    faq_id: hit.entry.id(),
                    question: hit.entry.question().to_string(),
                    matched_by: hit.kind,
                };
                (RoutingResult::from_faq(&hit.entry), resolution)
            }
            None => (
                self.ask_model(&cmd.session_id, &message).await,
                ResolutionSource::Model,
            ),
        };

        self.record_usage(&cmd.session_id, &result).await;
        self.remember_exchange(&cmd.session_id, &message, &result).await;
        if result.escalate() {
            self.open_escalation(&cmd, &message, &result).await;
        }

        tracing::info!(
            session_id = %cmd.session_id,
            confidence = result.confidence(),
            escalate = result.escalate(),
            faq_hit = matches!(resolution, ResolutionSource::Faq { .. }),
            "Message routed"
        );

        RoutedMessage {
            session_id: cmd.session_id,
            result,
            resolution,
        }
    }

    async fn find_faq(&self, message: &str) -> Option<FaqMatch> {
        let entries = match self.catalog.list_active_entries().await {
            Ok(entries) => entries,
            Err(err) => {
                tracing::warn!(error = %err, "FAQ catalog unavailable, skipping FAQ lookup");
                return None;
            }
        };

        let hit = self.matcher.find_match(message, &entries)?;
        match &hit.kind {
            MatchKind::Exact { keyword } => {
                tracing::info!(faq_id = %hit.entry.id(), keyword = %keyword, "FAQ exact keyword match");
            }
            MatchKind::Fuzzy { score, field } => {
                tracing::info!(faq_id = %hit.entry.id(), score, field = ?field, "FAQ fuzzy match found");
            }
        }
        Some(hit)
    }

    async fn mark_used(&self, id: FaqId) {
        if let Err(err) = self.catalog.increment_usage(id).await {
            tracing::warn!(faq_id = %id, error = %err, "Failed to record FAQ usage");
        }
    }

    async fn ask_model(&self, session_id: &SessionId, message: &str) -> RoutingResult {
        let limit = self.context_builder.max_context_messages();
        let history = match self.history.recent_turns(session_id, limit).await {
            Ok(turns) => turns,
            Err(err) => {
                tracing::warn!(session_id = %session_id, error = %err, "History unavailable, using empty context");
                Vec::new()
            }
        };

        let turns = self.context_builder.build(session_id, message, &history);
        let result = self.model_client.complete(turns).await;
        self.rule_engine.apply(result, message)
    }

    async fn record_usage(&self, session_id: &SessionId, result: &RoutingResult) {
        let (Some(recorder), Some(usage)) = (&self.usage_recorder, result.usage()) else {
            return;
        };
        let record = UsageRecord::new(*session_id, self.model_client.model(), usage);
        if let Err(err) = recorder.record(record).await {
            tracing::warn!(session_id = %session_id, error = %err, "Failed to record token usage");
        }
    }

    async fn remember_exchange(&self, session_id: &SessionId, message: &str, result: &RoutingResult) {
        let turns = [
            ConversationTurn::user(message),
            ConversationTurn::assistant(result.answer()),
        ];
        for turn in turns {
            if let Err(err) = self.history.append_turn(session_id, turn).await {
                tracing::warn!(session_id = %session_id, error = %err, "Failed to save conversation turn");
                return;
            }
        }
    }

    async fn open_escalation(&self, cmd: &RouteMessageCommand, message: &str, result: &RoutingResult) {
        let Some(queue) = &self.escalation_queue else {
            return;
        };
        let ticket = EscalationTicket::new(
            cmd.session_id,
            cmd.user_id.clone(),
            message,
            result.confidence(),
        );
        if let Err(err) = queue.open(ticket).await {
            tracing::error!(session_id = %cmd.session_id, error = %err, "Failed to open escalation");
        }
    }
}
