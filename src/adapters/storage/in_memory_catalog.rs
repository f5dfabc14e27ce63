//! In-Memory FAQ Catalog Adapter
//!
//! Holds the catalog in memory. Seeded from the YAML catalog file by the binary and
//! built directly in tests.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::faq::{rank_candidates, FaqEntry};
use crate::domain::foundation::{FaqId, Timestamp};
use crate::ports::{CatalogError, FaqCatalog};

/// In-memory FAQ catalog
#[derive(Debug, Clone, Default)]
pub struct InMemoryFaqCatalog {
    entries: Arc<RwLock<Vec<FaqEntry>>>,
}

impl InMemoryFaqCatalog {
    /// Create a catalog holding `entries`
    pub fn new(entries: Vec<FaqEntry>) -> Self {
        Self {
            entries: Arc::new(RwLock::new(entries)),
        }
    }

    /// Add an entry
    pub async fn insert(&self, entry: FaqEntry) {
        self.entries.write().await.push(entry);
    }

    /// Look up one entry, active or not
    pub async fn get(&self, id: FaqId) -> Option<FaqEntry> {
        self.entries
            .read()
            .await
            .iter()
            .find(|e| e.id() == id)
            .cloned()
    }

    /// Number of stored entries, including inactive ones
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl FaqCatalog for InMemoryFaqCatalog {
    async fn list_active_entries(&self) -> Result<Vec<FaqEntry>, CatalogError> {
        let entries = self.entries.read().await;
        Ok(rank_candidates(&entries).into_iter().cloned().collect())
    }

    async fn increment_usage(&self, id: FaqId) -> Result<(), CatalogError> {
        let mut entries = self.entries.write().await;
        let entry = entries
            .iter_mut()
            .find(|e| e.id() == id)
            .ok_or(CatalogError::NotFound(id))?;
        entry.record_usage(Timestamp::now());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(question: &str, priority: i32) -> FaqEntry {
        FaqEntry::new(question, "answer").unwrap().with_priority(priority)
    }

    #[tokio::test]
    async fn lists_only_active_entries_in_rank_order() {
        let catalog = InMemoryFaqCatalog::new(vec![
            entry("low", 1),
            entry("hidden", 9).with_active(false),
            entry("high", 5),
            entry("busy low", 1).with_usage_count(10),
        ]);

        let listed = catalog.list_active_entries().await.unwrap();
        let questions: Vec<_> = listed.iter().map(|e| e.question()).collect();

        assert_eq!(questions, vec!["high", "busy low", "low"]);
    }

    #[tokio::test]
    async fn increment_usage_bumps_counter_and_timestamp() {
        let faq = entry("q", 0);
        let id = faq.id();
        let catalog = InMemoryFaqCatalog::new(vec![faq]);

        catalog.increment_usage(id).await.unwrap();
        catalog.increment_usage(id).await.unwrap();

        let stored = catalog.get(id).await.unwrap();
        assert_eq!(stored.usage_count(), 2);
        assert!(stored.last_used_at().is_some());
    }

    #[tokio::test]
    async fn increment_unknown_id_is_not_found() {
        let catalog = InMemoryFaqCatalog::default();
        let id = FaqId::new();

        assert_eq!(
            catalog.increment_usage(id).await,
            Err(CatalogError::NotFound(id))
        );
    }

    #[tokio::test]
    async fn insert_adds_entries() {
        let catalog = InMemoryFaqCatalog::default();
        assert!(catalog.is_empty().await);

        catalog.insert(entry("q", 0)).await;
        assert_eq!(catalog.len().await, 1);
    }
}
