//! Business rules applied to model answers.
//!
//! The engine is an ordered list of pure reducers. Each takes the previous result and
//! the customer's message and returns a new result. Order matters: the standard-topic
//! override runs last so it sees everything the earlier rules decided.
//!
//! | # | Rule | Effect |
//! |---|------|--------|
//! | 1 | low confidence (< 0.4) | escalate, add `human_review` |
//! | 2 | escalation keyword in message | escalate, add `human_review`, acknowledge hand-off |
//! | 3 | answer shorter than 15 chars | cap confidence at 0.3, escalate, add `human_review` |
//! | 4 | standard topic, confident, no keyword | clear escalation, drop `human_review` |
//!
//! Keywords match as case-insensitive substrings of the message, so `sue` fires inside
//! `issue` and `order` inside `preorder`.

use super::result::{actions, RoutingResult};

/// Below this the model is considered unsure and a human is pulled in.
pub const LOW_CONFIDENCE_ESCALATION: f64 = 0.4;

/// Answers shorter than this (trimmed, in chars) are treated as a failure to help.
pub const SHORT_ANSWER_CHARS: usize = 15;

/// Confidence ceiling for short answers.
pub const SHORT_ANSWER_CONFIDENCE_CAP: f64 = 0.3;

/// Default confidence a standard-topic answer needs to suppress escalation.
pub const DEFAULT_STANDARD_TOPIC_MIN_CONFIDENCE: f64 = 0.6;

/// Sentence appended to answers rewritten for a hand-off.
pub const HANDOFF_SENTENCE: &str =
    "I'm connecting you with a human representative who can better assist with this request.";

const STANDARD_TOPICS: &[&str] = &[
    "track",
    "order",
    "shipping",
    "delivery",
    "return",
    "refund",
    "password",
    "account",
    "address",
    "payment method",
    "cancel order",
    "when will",
    "how long",
    "how to",
    "where is",
    "status",
];

/// Why a customer message demands a human.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EscalationCategory {
    Legal,
    ManagerRequest,
    Security,
    BillingDispute,
}

impl EscalationCategory {
    /// Categories in the order their keywords are checked.
    pub const ALL: [EscalationCategory; 4] = [
        EscalationCategory::Legal,
        EscalationCategory::ManagerRequest,
        EscalationCategory::Security,
        EscalationCategory::BillingDispute,
    ];

    pub fn keywords(&self) -> &'static [&'static str] {
        match self {
            EscalationCategory::Legal => {
                &["legal", "lawyer", "sue", "court", "attorney", "lawsuit"]
            }
            EscalationCategory::ManagerRequest => &[
                "manager",
                "supervisor",
                "escalate",
                "human",
                "person",
                "representative",
            ],
            EscalationCategory::Security => &[
                "fraud",
                "hack",
                "steal",
                "unauthorized",
                "security breach",
                "identity theft",
            ],
            EscalationCategory::BillingDispute => {
                &["dispute", "chargeback", "bank", "credit card dispute"]
            }
        }
    }

    /// Opening sentence for a rewritten answer.
    pub fn acknowledgment(&self) -> &'static str {
        match self {
            EscalationCategory::Legal => "I understand this involves a legal matter.",
            EscalationCategory::ManagerRequest => {
                "I understand you'd like to speak with a person."
            }
            EscalationCategory::Security => {
                "I understand this involves account security or possible fraud."
            }
            EscalationCategory::BillingDispute => "I understand this involves a billing dispute.",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            EscalationCategory::Legal => "legal",
            EscalationCategory::ManagerRequest => "manager_request",
            EscalationCategory::Security => "security",
            EscalationCategory::BillingDispute => "billing_dispute",
        }
    }
}

/// First escalation keyword found in a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EscalationTrigger {
    pub category: EscalationCategory,
    pub keyword: &'static str,
}

/// Finds the first escalation keyword in `message`, scanning categories in order.
pub fn find_escalation_keyword(message: &str) -> Option<EscalationTrigger> {
    let message = message.to_lowercase();
    EscalationCategory::ALL.iter().find_map(|category| {
        category
            .keywords()
            .iter()
            .copied()
            .find(|k| message.contains(k))
            .map(|keyword| EscalationTrigger {
                category: *category,
                keyword,
            })
    })
}

/// True if `message` is about a routine support topic.
pub fn mentions_standard_topic(message: &str) -> bool {
    let message = message.to_lowercase();
    STANDARD_TOPICS
        .iter()
        .any(|topic| message.contains(topic))
}

struct RuleInput {
    trigger: Option<EscalationTrigger>,
    standard_topic: bool,
}

impl RuleInput {
    fn new(message: &str) -> Self {
        Self {
            trigger: find_escalation_keyword(message),
            standard_topic: mentions_standard_topic(message),
        }
    }
}

type Rule = fn(&RuleEngine, RoutingResult, &RuleInput) -> RoutingResult;

/// Deterministic post-processor for model answers.
#[derive(Debug, Clone, Copy)]
pub struct RuleEngine {
    standard_topic_min_confidence: f64,
}

impl RuleEngine {
    const RULES: [Rule; 4] = [
        Self::low_confidence,
        Self::escalation_keyword,
        Self::short_answer,
        Self::standard_topic_override,
    ];

    pub fn new(standard_topic_min_confidence: f64) -> Self {
        Self {
            standard_topic_min_confidence,
        }
    }

    /// Runs every rule in order and returns the final result.
    pub fn apply(&self, result: RoutingResult, user_message: &str) -> RoutingResult {
        let input = RuleInput::new(user_message);
        Self::RULES
            .iter()
            .fold(result, |acc, rule| rule(self, acc, &input))
    }

    fn low_confidence(&self, result: RoutingResult, _input: &RuleInput) -> RoutingResult {
        if result.confidence() >= LOW_CONFIDENCE_ESCALATION {
            return result;
        }
        tracing::info!(
            confidence = result.confidence(),
            "Applying low confidence escalation rule"
        );
        result
            .with_escalate(true)
            .with_action(actions::HUMAN_REVIEW)
    }

    fn escalation_keyword(&self, result: RoutingResult, input: &RuleInput) -> RoutingResult {
        let Some(trigger) = input.trigger else {
            return result;
        };
        tracing::info!(
            keyword = trigger.keyword,
            category = trigger.category.label(),
            "Customer message requires escalation"
        );

        let acknowledgment = trigger.category.acknowledgment();
        let result = result
            .with_escalate(true)
            .with_action(actions::HUMAN_REVIEW);

        if result.answer().starts_with(acknowledgment) {
            return result;
        }

        let answer = [acknowledgment, result.answer().trim(), HANDOFF_SENTENCE]
            .iter()
            .filter(|part| !part.is_empty())
            .copied()
            .collect::<Vec<_>>()
            .join(" ");
        result.with_answer(answer)
    }

    fn short_answer(&self, result: RoutingResult, _input: &RuleInput) -> RoutingResult {
        let length = result.answer().trim().chars().count();
        if length >= SHORT_ANSWER_CHARS {
            return result;
        }
        tracing::info!(answer_length = length, "Applying short answer rule");
        let capped = result.confidence().min(SHORT_ANSWER_CONFIDENCE_CAP);
        // The cap puts confidence under rule 1's cutoff, so carry its action too.
        result
            .with_confidence(capped)
            .with_escalate(true)
            .with_action(actions::HUMAN_REVIEW)
    }

    fn standard_topic_override(&self, result: RoutingResult, input: &RuleInput) -> RoutingResult {
        let suppress = input.standard_topic
            && input.trigger.is_none()
            && result.confidence() > self.standard_topic_min_confidence
            && result.escalate();
        if !suppress {
            return result;
        }
        tracing::info!(
            confidence = result.confidence(),
            "Overriding escalation for standard customer service topic"
        );
        result
            .with_escalate(false)
            .without_action(actions::HUMAN_REVIEW)
    }
}

impl Default for RuleEngine {
    fn default() -> Self {
        Self::new(DEFAULT_STANDARD_TOPIC_MIN_CONFIDENCE)
    }
}
