//! SearchFaq query handler.
//!
//! Browses the active catalog by category and free text. Unlike the routing fast path
//! this is a plain filter: no similarity scoring and no usage counting.

use std::sync::Arc;

use crate::domain::faq::{rank_candidates, FaqEntry};
use crate::ports::{CatalogError, FaqCatalog};

/// Default number of search results.
pub const DEFAULT_SEARCH_LIMIT: usize = 10;

/// Query for catalog search. Blank filters are ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchFaqQuery {
    /// Case-insensitive text looked for in the question or the answer.
    pub query: Option<String>,
    /// Exact category name.
    pub category: Option<String>,
    pub limit: usize,
}

impl Default for SearchFaqQuery {
    fn default() -> Self {
        Self {
            query: None,
            category: None,
            limit: DEFAULT_SEARCH_LIMIT,
        }
    }
}

impl SearchFaqQuery {
    pub fn with_text(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    fn matches(&self, entry: &FaqEntry, needle: Option<&str>) -> bool {
        let category_ok = match non_blank(self.category.as_deref()) {
            Some(category) => entry.category() == Some(category),
            None => true,
        };
        let text_ok = match needle {
            Some(needle) => {
                entry.question().to_lowercase().contains(needle)
                    || entry.answer().to_lowercase().contains(needle)
            }
            None => true,
        };
        category_ok && text_ok
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Handler for catalog search queries.
pub struct SearchFaqHandler {
    catalog: Arc<dyn FaqCatalog>,
}

impl SearchFaqHandler {
    pub fn new(catalog: Arc<dyn FaqCatalog>) -> Self {
        Self { catalog }
    }

    /// Returns matching active entries, priority desc then usage desc, at most `limit`.
    pub async fn handle(&self, query: SearchFaqQuery) -> Result<Vec<FaqEntry>, CatalogError> {
        let entries = self.catalog.list_active_entries().await?;
        let needle = non_blank(query.query.as_deref()).map(str::to_lowercase);

        let filtered: Vec<FaqEntry> = entries
            .into_iter()
            .filter(|entry| query.matches(entry, needle.as_deref()))
            .collect();

        let results: Vec<FaqEntry> = rank_candidates(&filtered)
            .into_iter()
            .take(query.limit)
            .cloned()
            .collect();

        tracing::debug!(
            query = ?query.query,
            category = ?query.category,
            results = results.len(),
            "FAQ search"
        );

        Ok(results)
    }
}
