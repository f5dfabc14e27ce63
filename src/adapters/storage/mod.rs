//! Storage Adapters
//!
//! In-memory implementations of the catalog and history ports, plus the YAML catalog
//! seed loader.
//!
//! ## Usage
//!
//! ```ignore
//! use adapters::storage::{load_catalog, InMemoryFaqCatalog};
//!
//! let entries = load_catalog("data/faq_catalog.yaml").await?;
//! let catalog = InMemoryFaqCatalog::new(entries);
//! ```

mod in_memory_catalog;
mod in_memory_history;
mod yaml_catalog;

pub use in_memory_catalog::InMemoryFaqCatalog;
pub use in_memory_history::InMemoryConversationHistory;
pub use yaml_catalog::{load_catalog, parse_catalog, CatalogLoadError};
