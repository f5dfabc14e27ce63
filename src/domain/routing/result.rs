//! The routing decision value and its parts.

use serde::{Deserialize, Serialize};

use crate::domain::faq::FaqEntry;

/// Well-known suggested-action tags.
pub mod actions {
    pub const HUMAN_REVIEW: &str = "human_review";
    pub const RETRY: &str = "retry";
    pub const CONTACT_SUPPORT: &str = "contact_support";
    pub const TECHNICAL_SUPPORT: &str = "technical_support";
    pub const CHECK_FAQ: &str = "check_faq";
}

/// Confidence assigned to a catalog answer.
pub const FAQ_CONFIDENCE: f64 = 0.95;

/// Confidence assigned when the model replied without the JSON contract.
pub const UNSTRUCTURED_CONFIDENCE: f64 = 0.3;

/// Reply used when no model answer could be obtained at all.
pub const TECHNICAL_FAILURE_ANSWER: &str = "I'm sorry, I'm experiencing technical difficulties. \
Please try again in a moment or contact our support team for immediate assistance.";

/// Token counters reported by the completion provider.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

impl TokenUsage {
    /// Creates usage with the provider's own total (not recomputed).
    pub fn new(prompt_tokens: u32, completion_tokens: u32, total_tokens: u32) -> Self {
        Self {
            prompt_tokens,
            completion_tokens,
            total_tokens,
        }
    }
}

/// Ordered set of action tags. Insertion order is kept and duplicates are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct SuggestedActions(Vec<String>);

impl SuggestedActions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy with `action` appended unless already present.
    pub fn with(mut self, action: impl Into<String>) -> Self {
        let action = action.into();
        if !self.contains(&action) {
            self.0.push(action);
        }
        self
    }

    /// Returns a copy without `action`.
    pub fn without(mut self, action: &str) -> Self {
        self.0.retain(|a| a != action);
        self
    }

    pub fn contains(&self, action: &str) -> bool {
        self.0.iter().any(|a| a == action)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for SuggestedActions {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        iter.into_iter().fold(Self::new(), |acc, a| acc.with(a))
    }
}

impl From<Vec<String>> for SuggestedActions {
    fn from(actions: Vec<String>) -> Self {
        actions.into_iter().collect()
    }
}

impl From<SuggestedActions> for Vec<String> {
    fn from(actions: SuggestedActions) -> Self {
        actions.0
    }
}

/// Final answer for one customer message.
///
/// Immutable: every `with_*` method consumes the value and returns a new one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutingResult {
    answer: String,
    confidence: f64,
    escalate: bool,
    suggested_actions: SuggestedActions,
    usage: Option<TokenUsage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    raw_response: Option<String>,
}

impl RoutingResult {
    /// Creates a result. Confidence is clamped into `[0, 1]`; NaN becomes 0.
    pub fn new(
        answer: impl Into<String>,
        confidence: f64,
        escalate: bool,
        suggested_actions: SuggestedActions,
    ) -> Self {
        Self {
            answer: answer.into(),
            confidence: clamp_confidence(confidence),
            escalate,
            suggested_actions,
            usage: None,
            raw_response: None,
        }
    }

    /// Result for a catalog hit.
    pub fn from_faq(entry: &FaqEntry) -> Self {
        Self::new(
            entry.answer(),
            FAQ_CONFIDENCE,
            false,
            [actions::CHECK_FAQ, actions::CONTACT_SUPPORT]
                .into_iter()
                .collect(),
        )
        .with_raw_response(format!("FAQ match: {}", entry.question()))
    }

    /// Result for model text that did not follow the JSON contract.
    ///
    /// The text is kept as the answer but flagged for human review.
    pub fn unstructured(content: &str) -> Self {
        Self::new(
            content.trim(),
            UNSTRUCTURED_CONFIDENCE,
            true,
            SuggestedActions::new().with(actions::HUMAN_REVIEW),
        )
        .with_raw_response(content)
    }

    /// Terminal fallback when no usable model reply exists.
    pub fn technical_failure(reason: impl std::fmt::Display) -> Self {
        Self::new(
            TECHNICAL_FAILURE_ANSWER,
            0.0,
            true,
            [
                actions::RETRY,
                actions::CONTACT_SUPPORT,
                actions::TECHNICAL_SUPPORT,
            ]
            .into_iter()
            .collect(),
        )
        .with_raw_response(format!("Error: {}", reason))
    }

    pub fn answer(&self) -> &str {
        &self.answer
    }

    pub fn confidence(&self) -> f64 {
        self.confidence
    }

    pub fn escalate(&self) -> bool {
        self.escalate
    }

    pub fn suggested_actions(&self) -> &SuggestedActions {
        &self.suggested_actions
    }

    pub fn usage(&self) -> Option<TokenUsage> {
        self.usage
    }

    pub fn raw_response(&self) -> Option<&str> {
        self.raw_response.as_deref()
    }

    pub fn with_answer(mut self, answer: impl Into<String>) -> Self {
        self.answer = answer.into();
        self
    }

    pub fn with_confidence(mut self, confidence: f64) -> Self {
        self.confidence = clamp_confidence(confidence);
        self
    }

    pub fn with_escalate(mut self, escalate: bool) -> Self {
        self.escalate = escalate;
        self
    }

    pub fn with_action(mut self, action: impl Into<String>) -> Self {
        self.suggested_actions = self.suggested_actions.with(action);
        self
    }

    pub fn without_action(mut self, action: &str) -> Self {
        self.suggested_actions = self.suggested_actions.without(action);
        self
    }

    pub fn with_usage(mut self, usage: Option<TokenUsage>) -> Self {
        self.usage = usage;
        self
    }

    pub fn with_raw_response(mut self, raw: impl Into<String>) -> Self {
        self.raw_response = Some(raw.into());
        self
    }
}

fn clamp_confidence(confidence: f64) -> f64 {
    if confidence.is_nan() {
        0.0
    } else {
        confidence.clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suggested_actions_ignore_duplicates_and_keep_order() {
        let actions: SuggestedActions = ["b", "a", "b", "c"].into_iter().collect();
        assert_eq!(actions.as_slice(), &["b", "a", "c"]);
    }

    #[test]
    fn suggested_actions_without_removes_all_copies() {
        let actions = SuggestedActions::new().with("x").with("y").without("x");
        assert_eq!(actions.as_slice(), &["y"]);
    }

    #[test]
    fn suggested_actions_serialize_as_plain_list() {
        let actions = SuggestedActions::new().with("retry");
        assert_eq!(serde_json::to_string(&actions).unwrap(), "[\"retry\"]");

        let back: SuggestedActions = serde_json::from_str("[\"a\",\"a\"]").unwrap();
        assert_eq!(back.len(), 1);
    }

    #[test]
    fn confidence_is_clamped() {
        let high = RoutingResult::new("x", 1.7, false, SuggestedActions::new());
        let low = RoutingResult::new("x", -0.2, false, SuggestedActions::new());
        let nan = RoutingResult::new("x", f64::NAN, false, SuggestedActions::new());

        assert_eq!(high.confidence(), 1.0);
        assert_eq!(low.confidence(), 0.0);
        assert_eq!(nan.confidence(), 0.0);
    }

    #[test]
    fn faq_result_is_confident_and_not_escalated() {
        let entry = FaqEntry::new("How do I track my order?", "Go to Your Orders.").unwrap();
        let result = RoutingResult::from_faq(&entry);

        assert_eq!(result.answer(), "Go to Your Orders.");
        assert_eq!(result.confidence(), FAQ_CONFIDENCE);
        assert!(!result.escalate());
        assert_eq!(
            result.suggested_actions().as_slice(),
            &[actions::CHECK_FAQ, actions::CONTACT_SUPPORT]
        );
        assert!(result.usage().is_none());
    }

    #[test]
    fn unstructured_result_keeps_text_and_flags_review() {
        let result = RoutingResult::unstructured("  plain words  ");

        assert_eq!(result.answer(), "plain words");
        assert_eq!(result.confidence(), UNSTRUCTURED_CONFIDENCE);
        assert!(result.escalate());
        assert_eq!(result.suggested_actions().as_slice(), &[actions::HUMAN_REVIEW]);
        assert_eq!(result.raw_response(), Some("  plain words  "));
    }

    #[test]
    fn technical_failure_offers_retry() {
        let result = RoutingResult::technical_failure("boom");

        assert_eq!(result.confidence(), 0.0);
        assert!(result.escalate());
        assert!(result.suggested_actions().contains(actions::RETRY));
        assert_eq!(result.raw_response(), Some("Error: boom"));
    }

    #[test]
    fn with_methods_leave_original_untouched() {
        let base = RoutingResult::new("a", 0.5, false, SuggestedActions::new());
        let changed = base.clone().with_escalate(true).with_action("x");

        assert!(!base.escalate());
        assert!(base.suggested_actions().is_empty());
        assert!(changed.escalate());
        assert!(changed.suggested_actions().contains("x"));
    }

    #[test]
    fn absent_usage_serializes_as_null() {
        let result = RoutingResult::new("a", 0.5, false, SuggestedActions::new());
        let json = serde_json::to_value(&result).unwrap();
        assert!(json["usage"].is_null());
        assert!(json.get("raw_response").is_none());
    }
}
