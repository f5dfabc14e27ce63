//! FAQ fast-path matcher.
//!
//! Two passes over the catalog in preference order (priority desc, usage desc):
//!
//! 1. **Exact keyword** - the first entry owning a keyword that appears in the query
//!    wins outright. A keyword of 4+ chars may appear anywhere; a 3-char keyword only
//!    counts as a query prefix. Either way the keyword must share at least one whole
//!    word with the query, so "cat" inside "category" is not a hit.
//! 2. **Fuzzy** - indel similarity of the query against each question, and against each
//!    keyword with a stricter threshold. The single best score wins; ties keep the
//!    entry seen first.
//!
//! The matcher is pure. Recording usage on a hit is the caller's job.

use serde::Serialize;
use std::cmp::Reverse;
use std::collections::HashSet;

use super::similarity::ratio;
use super::FaqEntry;

/// Tunables for the matcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatcherConfig {
    /// Normalized queries shorter than this never match.
    pub min_query_chars: usize,
    /// Minimum similarity against the question text.
    pub question_threshold: u8,
    /// Minimum similarity against a single keyword.
    pub keyword_threshold: u8,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            min_query_chars: 3,
            question_threshold: 85,
            keyword_threshold: 90,
        }
    }
}

/// Which text a fuzzy score was computed against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchField {
    Question,
    Keyword,
}

/// How an entry was matched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MatchKind {
    /// A catalog keyword appeared in the query.
    Exact { keyword: String },
    /// Similarity at or above the threshold for `field`.
    Fuzzy { score: u8, field: MatchField },
}

/// A matched entry together with the reason it matched.
#[derive(Debug, Clone, PartialEq)]
pub struct FaqMatch {
    pub entry: FaqEntry,
    pub kind: MatchKind,
}

/// Ranks FAQ entries against a user query.
#[derive(Debug, Clone, Default)]
pub struct FaqMatcher {
    config: MatcherConfig,
}

impl FaqMatcher {
    pub fn new(config: MatcherConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &MatcherConfig {
        &self.config
    }

    /// Finds at most one entry answering `query`.
    pub fn find_match(&self, query: &str, catalog: &[FaqEntry]) -> Option<FaqMatch> {
        let query = normalize_query(query);
        if query.chars().count() < self.config.min_query_chars {
            return None;
        }

        let candidates = rank_candidates(catalog);

        if let Some(found) = exact_keyword_pass(&query, &candidates) {
            return Some(found);
        }

        self.fuzzy_pass(&query, &candidates)
    }

    fn fuzzy_pass(&self, query: &str, candidates: &[&FaqEntry]) -> Option<FaqMatch> {
        let mut best: Option<(&FaqEntry, u8, MatchField)> = None;
        let mut best_score = 0u8;

        for entry in candidates {
            let score = ratio(query, &entry.question().to_lowercase());
            if score > best_score && score >= self.config.question_threshold {
                best_score = score;
                best = Some((entry, score, MatchField::Question));
            }

            for keyword in entry.keywords() {
                let score = ratio(query, &keyword.to_lowercase());
                if score > best_score && score >= self.config.keyword_threshold {
                    best_score = score;
                    best = Some((entry, score, MatchField::Keyword));
                }
            }
        }

        best.map(|(entry, score, field)| FaqMatch {
            entry: entry.clone(),
            kind: MatchKind::Fuzzy { score, field },
        })
    }
}

/// Trims and lower-cases a query for matching.
pub fn normalize_query(query: &str) -> String {
    query.trim().to_lowercase()
}

/// Active entries in preference order: priority desc, then usage desc.
///
/// The sort is stable, so fully tied entries keep catalog order.
pub fn rank_candidates(catalog: &[FaqEntry]) -> Vec<&FaqEntry> {
    let mut candidates: Vec<&FaqEntry> = catalog.iter().filter(|e| e.is_active()).collect();
    candidates.sort_by_key(|e| (Reverse(e.priority()), Reverse(e.usage_count())));
    candidates
}

fn exact_keyword_pass(query: &str, candidates: &[&FaqEntry]) -> Option<FaqMatch> {
    let query_words: HashSet<&str> = query.split_whitespace().collect();

    for entry in candidates {
        for keyword in entry.keywords() {
            let keyword_lower = keyword.to_lowercase();
            if keyword_qualifies(query, &query_words, &keyword_lower) {
                return Some(FaqMatch {
                    entry: (*entry).clone(),
                    kind: MatchKind::Exact {
                        keyword: keyword.clone(),
                    },
                });
            }
        }
    }

    None
}

fn keyword_qualifies(query: &str, query_words: &HashSet<&str>, keyword: &str) -> bool {
    let len = keyword.chars().count();
    let positioned =
        (len >= 4 && query.contains(keyword)) || (len >= 3 && query.starts_with(keyword));

    positioned && keyword.split_whitespace().any(|w| query_words.contains(w))
}
