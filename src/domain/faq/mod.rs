//! FAQ catalog domain: entries, similarity scoring and the fast-path matcher.

mod entry;
mod matcher;
pub mod similarity;

pub use entry::FaqEntry;
pub use matcher::{
    normalize_query, rank_candidates, FaqMatch, FaqMatcher, MatchField, MatchKind, MatcherConfig,
};

use serde::{Deserialize, Serialize};

use crate::domain::foundation::FaqId;

/// A catalog question offered to users as a prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaqSuggestion {
    pub id: FaqId,
    pub question: String,
    pub category: Option<String>,
}

impl From<&FaqEntry> for FaqSuggestion {
    fn from(entry: &FaqEntry) -> Self {
        Self {
            id: entry.id(),
            question: entry.question().to_string(),
            category: entry.category().map(str::to_string),
        }
    }
}
