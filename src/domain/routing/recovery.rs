//! Structured-answer recovery from free-form model output.
//!
//! Stage one cuts the text from the first `{` to the last `}` and decodes it into
//! [`StructuredAnswer`]. If there is no such span, or it does not decode, stage two
//! keeps the whole text as a low-confidence answer flagged for human review.

use serde::Deserialize;

use super::result::{RoutingResult, TokenUsage};

/// Confidence assumed when the model omits it.
pub const DEFAULT_MODEL_CONFIDENCE: f64 = 0.5;

/// The JSON shape the system prompt asks the model for.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StructuredAnswer {
    #[serde(default)]
    pub answer: String,
    #[serde(default = "default_confidence")]
    pub confidence: f64,
    #[serde(default)]
    pub escalate: bool,
    #[serde(default)]
    pub suggested_actions: Vec<String>,
}

fn default_confidence() -> f64 {
    DEFAULT_MODEL_CONFIDENCE
}

impl From<StructuredAnswer> for RoutingResult {
    fn from(parsed: StructuredAnswer) -> Self {
        RoutingResult::new(
            parsed.answer.trim(),
            parsed.confidence,
            parsed.escalate,
            parsed.suggested_actions.into(),
        )
    }
}

/// Returns the span from the first `{` to the last `}`, if it is well ordered.
pub fn extract_json_object(content: &str) -> Option<&str> {
    let start = content.find('{')?;
    let end = content.rfind('}')?;
    (end > start).then(|| &content[start..=end])
}

/// Decodes the JSON span of `content` into the fixed answer shape.
pub fn parse_structured(content: &str) -> Result<StructuredAnswer, serde_json::Error> {
    match extract_json_object(content) {
        Some(json) => serde_json::from_str(json),
        None => Err(serde::de::Error::custom("no JSON object in model output")),
    }
}

/// Builds a routing result from raw model text. Never fails.
///
/// Provider usage is attached unchanged in both stages.
pub fn recover(content: &str, usage: Option<TokenUsage>) -> RoutingResult {
    let result = match parse_structured(content) {
        Ok(parsed) => RoutingResult::from(parsed).with_raw_response(content),
        Err(err) => {
            let preview: String = content.chars().take(200).collect();
            tracing::warn!(
                error = %err,
                content = %preview,
                "Model output not structured, using text fallback"
            );
            RoutingResult::unstructured(content)
        }
    };

    result.with_usage(usage)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::routing::result::actions;

    #[test]
    fn recovers_exact_fields() {
        let raw = r#"{"answer":"Hi","confidence":0.9,"escalate":false,"suggested_actions":[]}"#;
        let result = recover(raw, None);

        assert_eq!(result.answer(), "Hi");
        assert_eq!(result.confidence(), 0.9);
        assert!(!result.escalate());
        assert!(result.suggested_actions().is_empty());
    }

    #[test]
    fn recovers_json_wrapped_in_prose() {
        let raw = "Sure! Here you go:\n```json\n{\"answer\": \"  Track it in Your Orders. \", \
                   \"confidence\": 0.85, \"escalate\": false, \
                   \"suggested_actions\": [\"track_order\"]}\n```\nAnything else?";
        let result = recover(raw, None);

        assert_eq!(result.answer(), "Track it in Your Orders.");
        assert_eq!(result.confidence(), 0.85);
        assert_eq!(result.suggested_actions().as_slice(), &["track_order"]);
        assert_eq!(result.raw_response(), Some(raw));
    }

    #[test]
    fn missing_fields_take_defaults() {
        let result = recover(r#"{"answer":"ok then"}"#, None);

        assert_eq!(result.confidence(), DEFAULT_MODEL_CONFIDENCE);
        assert!(!result.escalate());
        assert!(result.suggested_actions().is_empty());
    }

    #[test]
    fn no_braces_falls_back_to_text() {
        let result = recover("no json here", None);

        assert_eq!(result.answer(), "no json here");
        assert_eq!(result.confidence(), 0.3);
        assert!(result.escalate());
        assert_eq!(result.suggested_actions().as_slice(), &[actions::HUMAN_REVIEW]);
    }

    #[test]
    fn broken_json_falls_back_to_text() {
        let result = recover("{answer: nope", None);
        assert_eq!(result.confidence(), 0.3);
        assert_eq!(result.answer(), "{answer: nope");
    }

    #[test]
    fn reversed_braces_fall_back_to_text() {
        assert!(extract_json_object("} oops {").is_none());
        assert_eq!(recover("} oops {", None).confidence(), 0.3);
    }

    #[test]
    fn wrong_field_type_falls_back_to_text() {
        let result = recover(r#"{"answer":"x","escalate":"maybe"}"#, None);
        assert_eq!(result.confidence(), 0.3);
        assert!(result.escalate());
    }

    #[test]
    fn usage_is_carried_in_both_stages() {
        let usage = Some(TokenUsage::new(12, 8, 20));

        assert_eq!(recover(r#"{"answer":"a"}"#, usage).usage(), usage);
        assert_eq!(recover("plain", usage).usage(), usage);
        assert_eq!(recover("plain", None).usage(), None);
    }

    #[test]
    fn duplicate_actions_collapse() {
        let result = recover(
            r#"{"answer":"a","suggested_actions":["x","x","y"]}"#,
            None,
        );
        assert_eq!(result.suggested_actions().as_slice(), &["x", "y"]);
    }
}
