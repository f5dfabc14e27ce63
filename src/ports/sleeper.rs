//! Sleeper port - async delay used between provider retries.

use std::time::Duration;

use async_trait::async_trait;

/// Suspends the current task. Swapped for a recording fake in tests.
#[async_trait]
pub trait Sleeper: Send + Sync {
    async fn sleep(&self, duration: Duration);
}
