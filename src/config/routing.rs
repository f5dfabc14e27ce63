//! Routing pipeline configuration

use serde::Deserialize;

use super::error::ValidationError;
use crate::domain::conversation::{ContextBuilder, DEFAULT_MAX_CONTEXT_MESSAGES};
use crate::domain::faq::{FaqMatcher, MatcherConfig};
use crate::domain::routing::{
    RuleEngine, Sanitizer, DEFAULT_MAX_MESSAGE_LENGTH, DEFAULT_STANDARD_TOPIC_MIN_CONFIDENCE,
};

/// Routing pipeline configuration
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct RoutingConfig {
    /// Minimum confidence for a standard-topic answer to cancel escalation
    #[serde(default = "default_confidence_threshold")]
    pub confidence_threshold: f64,

    /// History turns sent to the model
    #[serde(default = "default_max_context_messages")]
    pub max_context_messages: usize,

    /// Sanitizer bound, in characters
    #[serde(default = "default_max_message_length")]
    pub max_message_length: usize,

    /// Fuzzy score needed against a catalog question
    #[serde(default = "default_faq_question_threshold")]
    pub faq_question_threshold: u8,

    /// Fuzzy score needed against a catalog keyword
    #[serde(default = "default_faq_keyword_threshold")]
    pub faq_keyword_threshold: u8,
}

impl RoutingConfig {
    pub fn sanitizer(&self) -> Sanitizer {
        Sanitizer::new(self.max_message_length)
    }

    pub fn matcher(&self) -> FaqMatcher {
        FaqMatcher::new(MatcherConfig {
            question_threshold: self.faq_question_threshold,
            keyword_threshold: self.faq_keyword_threshold,
            ..MatcherConfig::default()
        })
    }

    pub fn context_builder(&self) -> ContextBuilder {
        ContextBuilder::new(self.max_context_messages)
    }

    pub fn rule_engine(&self) -> RuleEngine {
        RuleEngine::new(self.confidence_threshold)
    }

    /// Validate routing configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !(0.0..=1.0).contains(&self.confidence_threshold) {
            return Err(ValidationError::InvalidConfidenceThreshold);
        }
        if self.max_context_messages == 0 {
            return Err(ValidationError::MustBePositive("max_context_messages"));
        }
        if self.max_message_length == 0 {
            return Err(ValidationError::MustBePositive("max_message_length"));
        }
        if self.faq_question_threshold > 100 {
            return Err(ValidationError::InvalidFaqThreshold("faq_question_threshold"));
        }
        if self.faq_keyword_threshold > 100 {
            return Err(ValidationError::InvalidFaqThreshold("faq_keyword_threshold"));
        }
        if self.faq_keyword_threshold < self.faq_question_threshold {
            return Err(ValidationError::KeywordThresholdBelowQuestion);
        }
        Ok(())
    }
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            confidence_threshold: default_confidence_threshold(),
            max_context_messages: default_max_context_messages(),
            max_message_length: default_max_message_length(),
            faq_question_threshold: default_faq_question_threshold(),
            faq_keyword_threshold: default_faq_keyword_threshold(),
        }
    }
}

fn default_confidence_threshold() -> f64 {
    DEFAULT_STANDARD_TOPIC_MIN_CONFIDENCE
}

fn default_max_context_messages() -> usize {
    DEFAULT_MAX_CONTEXT_MESSAGES
}

fn default_max_message_length() -> usize {
    DEFAULT_MAX_MESSAGE_LENGTH
}

fn default_faq_question_threshold() -> u8 {
    85
}

fn default_faq_keyword_threshold() -> u8 {
    90
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_routing_defaults() {
        let config = RoutingConfig::default();
        assert_eq!(config.confidence_threshold, 0.6);
        assert_eq!(config.max_context_messages, 6);
        assert_eq!(config.max_message_length, 2000);
        assert_eq!(config.faq_question_threshold, 85);
        assert_eq!(config.faq_keyword_threshold, 90);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builds_pipeline_parts() {
        let config = RoutingConfig {
            max_message_length: 50,
            max_context_messages: 2,
            faq_question_threshold: 70,
            ..Default::default()
        };

        assert_eq!(config.sanitizer().max_length(), 50);
        assert_eq!(config.context_builder().max_context_messages(), 2);
        assert_eq!(config.matcher().config().question_threshold, 70);
        assert_eq!(config.matcher().config().min_query_chars, 3);
    }

    #[test]
    fn test_validation_confidence_range() {
        let config = RoutingConfig {
            confidence_threshold: 1.5,
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ValidationError::InvalidConfidenceThreshold)
        );
    }

    #[test]
    fn test_validation_threshold_order() {
        let config = RoutingConfig {
            faq_question_threshold: 95,
            faq_keyword_threshold: 90,
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ValidationError::KeywordThresholdBelowQuestion)
        );
    }

    #[test]
    fn test_validation_threshold_ceiling() {
        let config = RoutingConfig {
            faq_keyword_threshold: 101,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_zero_context() {
        let config = RoutingConfig {
            max_context_messages: 0,
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ValidationError::MustBePositive("max_context_messages"))
        );
    }
}
