//! FAQ catalog entry.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{FaqId, Timestamp, ValidationError};

/// A question/answer record in the FAQ catalog.
///
/// Content fields are fixed once built. The usage counters are owned by the
/// catalog store, which bumps them through [`FaqEntry::record_usage`] on a hit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FaqEntry {
    id: FaqId,
    question: String,
    answer: String,
    category: Option<String>,
    keywords: Vec<String>,
    priority: i32,
    usage_count: u64,
    last_used_at: Option<Timestamp>,
    active: bool,
}

impl FaqEntry {
    /// Creates an active entry with a fresh id, no keywords and zero usage.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::EmptyField` if the question or answer is blank.
    pub fn new(
        question: impl Into<String>,
        answer: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let question = question.into();
        let answer = answer.into();

        if question.trim().is_empty() {
            return Err(ValidationError::empty_field("question"));
        }
        if answer.trim().is_empty() {
            return Err(ValidationError::empty_field("answer"));
        }

        Ok(Self {
            id: FaqId::new(),
            question,
            answer,
            category: None,
            keywords: Vec::new(),
            priority: 0,
            usage_count: 0,
            last_used_at: None,
            active: true,
        })
    }

    /// Sets an explicit id.
    pub fn with_id(mut self, id: FaqId) -> Self {
        self.id = id;
        self
    }

    /// Sets the category.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Sets the ordered keyword list. Blank keywords are dropped.
    pub fn with_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keywords = keywords
            .into_iter()
            .map(Into::into)
            .filter(|k: &String| !k.trim().is_empty())
            .collect();
        self
    }

    /// Sets the priority (higher is preferred).
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    /// Sets the starting usage count.
    pub fn with_usage_count(mut self, usage_count: u64) -> Self {
        self.usage_count = usage_count;
        self
    }

    /// Marks the entry active or inactive.
    pub fn with_active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    pub fn id(&self) -> FaqId {
        self.id
    }

    pub fn question(&self) -> &str {
        &self.question
    }

    pub fn answer(&self) -> &str {
        &self.answer
    }

    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    pub fn priority(&self) -> i32 {
        self.priority
    }

    pub fn usage_count(&self) -> u64 {
        self.usage_count
    }

    pub fn last_used_at(&self) -> Option<Timestamp> {
        self.last_used_at
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Records one hit: bumps the usage counter and stamps the last-used time.
    pub fn record_usage(&mut self, at: Timestamp) {
        self.usage_count = self.usage_count.saturating_add(1);
        self.last_used_at = Some(at);
    }
}
