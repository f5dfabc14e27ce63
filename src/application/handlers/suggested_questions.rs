//! SuggestedQuestions query handler.
//!
//! Lists popular catalog questions for a chat UI to offer as prompts.

use std::sync::Arc;

use crate::domain::faq::FaqSuggestion;
use crate::ports::{CatalogError, FaqCatalog};

/// Default number of suggestions.
pub const DEFAULT_SUGGESTION_LIMIT: usize = 5;

/// Query for suggested questions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SuggestedQuestionsQuery {
    pub limit: usize,
}

impl Default for SuggestedQuestionsQuery {
    fn default() -> Self {
        Self {
            limit: DEFAULT_SUGGESTION_LIMIT,
        }
    }
}

/// Handler for suggested-question queries.
pub struct SuggestedQuestionsHandler {
    catalog: Arc<dyn FaqCatalog>,
}

impl SuggestedQuestionsHandler {
    pub fn new(catalog: Arc<dyn FaqCatalog>) -> Self {
        Self { catalog }
    }

    /// Returns the top active entries, best ranked first.
    pub async fn handle(
        &self,
        query: SuggestedQuestionsQuery,
    ) -> Result<Vec<FaqSuggestion>, CatalogError> {
        let entries = self.catalog.list_active_entries().await?;
        Ok(entries
            .iter()
            .take(query.limit)
            .map(FaqSuggestion::from)
            .collect())
    }
}
