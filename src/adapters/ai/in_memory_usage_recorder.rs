//! In-memory usage recorder.
//!
//! Keeps every record in a `Mutex<Vec<_>>`. Suitable for the CLI and tests; data is
//! lost on restart.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::{Mutex, PoisonError};

use crate::domain::foundation::SessionId;
use crate::ports::{ModelUsage, UsageError, UsageRecord, UsageRecorder, UsageSummary};

/// In-memory implementation of the UsageRecorder port.
#[derive(Default)]
pub struct InMemoryUsageRecorder {
    records: Mutex<Vec<UsageRecord>>,
}

impl InMemoryUsageRecorder {
    /// Creates a new empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns all recorded usage records.
    pub fn records(&self) -> Vec<UsageRecord> {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn len(&self) -> usize {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn summarize<'a>(records: impl Iterator<Item = &'a UsageRecord>) -> UsageSummary {
        let mut summary = UsageSummary::default();
        let mut by_model: BTreeMap<String, (u64, u32)> = BTreeMap::new();

        for record in records {
            summary.request_count += 1;
            summary.prompt_tokens += u64::from(record.prompt_tokens);
            summary.completion_tokens += u64::from(record.completion_tokens);
            summary.total_tokens += u64::from(record.total_tokens);

            let entry = by_model.entry(record.model.clone()).or_insert((0, 0));
            entry.0 += u64::from(record.total_tokens);
            entry.1 += 1;
        }

        summary.by_model = by_model
            .into_iter()
            .map(|(model, (total_tokens, requests))| ModelUsage {
                model,
                total_tokens,
                requests,
            })
            .collect();
        summary
    }
}

fn poisoned<T>(_: PoisonError<T>) -> UsageError {
    UsageError::Storage("usage records lock poisoned".to_string())
}

#[async_trait]
impl UsageRecorder for InMemoryUsageRecorder {
    async fn record(&self, record: UsageRecord) -> Result<(), UsageError> {
        self.records.lock().map_err(poisoned)?.push(record);
        Ok(())
    }

    async fn summary(&self) -> Result<UsageSummary, UsageError> {
        let records = self.records.lock().map_err(poisoned)?;
        Ok(Self::summarize(records.iter()))
    }

    async fn session_summary(&self, session_id: &SessionId) -> Result<UsageSummary, UsageError> {
        let records = self.records.lock().map_err(poisoned)?;
        Ok(Self::summarize(
            records.iter().filter(|r| &r.session_id == session_id),
        ))
    }
}
