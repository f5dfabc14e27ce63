//! FaqCatalog port - read access to curated FAQ entries plus the usage counter.

use async_trait::async_trait;

use crate::domain::faq::FaqEntry;
use crate::domain::foundation::FaqId;

/// Port for FAQ catalog storage.
#[async_trait]
pub trait FaqCatalog: Send + Sync {
    /// Returns active entries ordered by priority desc, then usage count desc.
    async fn list_active_entries(&self) -> Result<Vec<FaqEntry>, CatalogError>;

    /// Bumps the usage counter and last-used time of one entry.
    ///
    /// Concurrent increments may lose updates.
    async fn increment_usage(&self, id: FaqId) -> Result<(), CatalogError>;
}

/// Errors from the FAQ catalog.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CatalogError {
    /// Backing store could not be read or written.
    #[error("catalog unavailable: {0}")]
    Unavailable(String),

    /// No entry with this id.
    #[error("faq entry not found: {0}")]
    NotFound(FaqId),
}
