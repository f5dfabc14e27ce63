//! Exponential backoff policy for provider calls.

use std::time::Duration;

/// How many attempts a call gets and how long to wait between them.
///
/// `max_attempts` counts the first try; the delay before attempt `n + 1` is
/// `base_delay * 2^(n - 1)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_attempts: u32,
    base_delay: Duration,
}

impl RetryPolicy {
    /// Creates a policy. At least one attempt is always made.
    pub fn new(max_attempts: u32, base_delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            base_delay,
        }
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    pub fn base_delay(&self) -> Duration {
        self.base_delay
    }

    /// Backoff after the given (1-based) failed attempt.
    pub fn delay_after(&self, attempt: u32) -> Duration {
        let exponent = attempt.saturating_sub(1).min(31);
        self.base_delay.saturating_mul(1u32 << exponent)
    }

    /// State for the first attempt of a new call.
    pub fn start(&self) -> RetryState {
        RetryState {
            attempt: 1,
            delay: Duration::ZERO,
        }
    }

    /// Advances to the next attempt, or `None` when attempts are exhausted.
    pub fn next(&self, state: RetryState) -> Option<RetryState> {
        if state.attempt >= self.max_attempts {
            return None;
        }
        Some(RetryState {
            attempt: state.attempt + 1,
            delay: self.delay_after(state.attempt),
        })
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(3, Duration::from_secs(1))
    }
}

/// Position within one call's retry sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryState {
    /// 1-based attempt about to run.
    pub attempt: u32,
    /// Wait to apply before running `attempt`.
    pub delay: Duration,
}
