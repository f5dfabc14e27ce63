//! Integration tests for the shipped FAQ seed catalog.
//!
//! Loads `data/faq_catalog.yaml` through the YAML loader and checks that the matcher
//! and the suggestion and search queries behave sensibly on it.

use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use support_router::adapters::storage::{load_catalog, CatalogLoadError, InMemoryFaqCatalog};
use support_router::application::{
    SearchFaqHandler, SearchFaqQuery, SuggestedQuestionsHandler, SuggestedQuestionsQuery,
};
use support_router::domain::faq::{FaqEntry, FaqMatcher, MatchField, MatchKind};

fn seed_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data/faq_catalog.yaml")
}

async fn seed() -> Vec<FaqEntry> {
    load_catalog(seed_path()).await.unwrap()
}

#[tokio::test]
async fn seed_catalog_loads_every_entry() {
    let entries = seed().await;

    assert_eq!(entries.len(), 14);
    assert!(entries.iter().all(|e| e.is_active()));
    assert!(entries.iter().all(|e| e.usage_count() == 0));
    assert!(entries.iter().all(|e| !e.keywords().is_empty()));

    let categories: Vec<&str> = entries.iter().filter_map(|e| e.category()).collect();
    for category in ["account", "orders", "shipping", "returns", "billing", "support"] {
        assert!(categories.contains(&category), "missing category {}", category);
    }
}

#[tokio::test]
async fn seed_entries_get_fresh_ids_per_load() {
    let first = seed().await;
    let second = seed().await;

    assert_ne!(first[0].id(), second[0].id());
    assert_eq!(first[0].question(), second[0].question());
}

#[tokio::test]
async fn misspelled_question_matches_fuzzily() {
    let entries = seed().await;

    let found = FaqMatcher::default()
        .find_match("how do i cancle my ordr?", &entries)
        .unwrap();

    assert_eq!(found.entry.question(), "How do I cancel my order?");
    assert!(matches!(
        found.kind,
        MatchKind::Fuzzy {
            field: MatchField::Question,
            ..
        }
    ));
}

#[tokio::test]
async fn keyword_in_sentence_matches_exactly() {
    let entries = seed().await;

    let found = FaqMatcher::default()
        .find_match("I think I was charged twice last week", &entries)
        .unwrap();

    assert_eq!(found.entry.question(), "I was charged incorrectly or twice");
    assert!(matches!(found.kind, MatchKind::Exact { .. }));
}

#[tokio::test]
async fn suggestions_follow_priority() {
    let catalog = Arc::new(InMemoryFaqCatalog::new(seed().await));
    let handler = SuggestedQuestionsHandler::new(catalog);

    let suggestions = handler
        .handle(SuggestedQuestionsQuery { limit: 3 })
        .await
        .unwrap();

    let questions: Vec<&str> = suggestions.iter().map(|s| s.question.as_str()).collect();
    assert_eq!(
        questions,
        vec![
            "How do I reset my password?",
            "How do I track my order?",
            "How do I return an item?",
        ]
    );
}

#[tokio::test]
async fn search_narrows_seed_catalog_by_category_and_text() {
    let handler = SearchFaqHandler::new(Arc::new(InMemoryFaqCatalog::new(seed().await)));

    let billing = handler
        .handle(SearchFaqQuery::default().with_category("billing"))
        .await
        .unwrap();
    let questions: Vec<&str> = billing.iter().map(|e| e.question()).collect();
    assert_eq!(
        questions,
        vec![
            "I was charged incorrectly or twice",
            "What payment methods do you accept?",
        ]
    );

    let paypal = handler
        .handle(SearchFaqQuery::default().with_text("PayPal").with_limit(1))
        .await
        .unwrap();
    assert_eq!(paypal.len(), 1);
    assert_eq!(paypal[0].question(), "When will I get my refund?");
}

#[tokio::test]
async fn broken_seed_file_reports_parse_error() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(b"- question: [unclosed\n").unwrap();

    let err = load_catalog(file.path()).await.unwrap_err();
    assert!(matches!(err, CatalogLoadError::Parse(_)));
}
