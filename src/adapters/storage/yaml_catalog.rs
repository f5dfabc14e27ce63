//! YAML FAQ Catalog Loader
//!
//! Reads a catalog seed file: a YAML list of entries with `question`, `answer`,
//! optional `category`, `keywords`, `priority` and `active`. Every loaded entry gets a
//! fresh id and zero usage.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::domain::faq::FaqEntry;
use crate::domain::foundation::ValidationError;

/// Errors while loading a catalog seed file.
#[derive(Debug, thiserror::Error)]
pub enum CatalogLoadError {
    #[error("failed to read catalog {path}: {message}")]
    Io { path: PathBuf, message: String },

    #[error("invalid catalog YAML: {0}")]
    Parse(String),

    #[error("catalog entry {index} is invalid: {source}")]
    InvalidEntry {
        index: usize,
        #[source]
        source: ValidationError,
    },
}

#[derive(Debug, Deserialize)]
struct SeedEntry {
    question: String,
    answer: String,
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    keywords: Vec<String>,
    #[serde(default)]
    priority: i32,
    #[serde(default = "default_active")]
    active: bool,
}

fn default_active() -> bool {
    true
}

impl SeedEntry {
    fn into_entry(self) -> Result<FaqEntry, ValidationError> {
        let mut entry = FaqEntry::new(self.question, self.answer)?
            .with_keywords(self.keywords)
            .with_priority(self.priority)
            .with_active(self.active);
        if let Some(category) = self.category {
            entry = entry.with_category(category);
        }
        Ok(entry)
    }
}

/// Parses catalog entries from YAML text.
pub fn parse_catalog(yaml: &str) -> Result<Vec<FaqEntry>, CatalogLoadError> {
    let seeds: Vec<SeedEntry> =
        serde_yaml::from_str(yaml).map_err(|e| CatalogLoadError::Parse(e.to_string()))?;

    seeds
        .into_iter()
        .enumerate()
        .map(|(index, seed)| {
            seed.into_entry()
                .map_err(|source| CatalogLoadError::InvalidEntry { index, source })
        })
        .collect()
}

/// Reads and parses a catalog seed file.
pub async fn load_catalog<P: AsRef<Path>>(path: P) -> Result<Vec<FaqEntry>, CatalogLoadError> {
    let path = path.as_ref();
    let yaml = fs::read_to_string(path)
        .await
        .map_err(|e| CatalogLoadError::Io {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    let entries = parse_catalog(&yaml)?;
    tracing::info!(path = %path.display(), entries = entries.len(), "Loaded FAQ catalog");
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SAMPLE: &str = r#"
- question: How do I reset my password?
  answer: Click 'Forgot Password' on the login page.
  category: account
  keywords: [password, reset, forgot]
  priority: 10
- question: Old question
  answer: Old answer
  active: false
"#;

    #[test]
    fn parses_all_fields_with_defaults() {
        let entries = parse_catalog(SAMPLE).unwrap();

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].category(), Some("account"));
        assert_eq!(entries[0].keywords(), &["password", "reset", "forgot"]);
        assert_eq!(entries[0].priority(), 10);
        assert!(entries[0].is_active());
        assert_eq!(entries[0].usage_count(), 0);

        assert_eq!(entries[1].priority(), 0);
        assert!(entries[1].keywords().is_empty());
        assert!(!entries[1].is_active());
    }

    #[test]
    fn blank_answer_is_rejected_with_index() {
        let yaml = "- question: q\n  answer: a\n- question: q2\n  answer: '  '\n";
        let err = parse_catalog(yaml).unwrap_err();
        assert!(matches!(err, CatalogLoadError::InvalidEntry { index: 1, .. }));
    }

    #[test]
    fn malformed_yaml_is_parse_error() {
        let err = parse_catalog("question: [unclosed").unwrap_err();
        assert!(matches!(err, CatalogLoadError::Parse(_)));
    }

    #[tokio::test]
    async fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let entries = load_catalog(file.path()).await.unwrap();
        assert_eq!(entries.len(), 2);
    }

    #[tokio::test]
    async fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_catalog(dir.path().join("nope.yaml")).await.unwrap_err();
        assert!(matches!(err, CatalogLoadError::Io { .. }));
    }
}
