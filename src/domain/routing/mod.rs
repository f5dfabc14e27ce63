//! Routing pipeline pieces: input sanitizing, answer recovery, retry policy and the
//! business rules that decide escalation.

mod recovery;
mod result;
mod retry;
mod rules;
mod sanitizer;

pub use recovery::{
    extract_json_object, parse_structured, recover, StructuredAnswer, DEFAULT_MODEL_CONFIDENCE,
};
pub use result::{
    actions, RoutingResult, SuggestedActions, TokenUsage, FAQ_CONFIDENCE,
    TECHNICAL_FAILURE_ANSWER, UNSTRUCTURED_CONFIDENCE,
};
pub use retry::{RetryPolicy, RetryState};
pub use rules::{
    find_escalation_keyword, mentions_standard_topic, EscalationCategory, EscalationTrigger,
    RuleEngine, DEFAULT_STANDARD_TOPIC_MIN_CONFIDENCE, HANDOFF_SENTENCE,
    LOW_CONFIDENCE_ESCALATION, SHORT_ANSWER_CHARS, SHORT_ANSWER_CONFIDENCE_CAP,
};
pub use sanitizer::{detect_injection, Sanitizer, DEFAULT_MAX_MESSAGE_LENGTH, TRUNCATION_MARKER};
