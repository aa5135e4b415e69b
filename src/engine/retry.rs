//! Retry policy for transient feed failures.
//!
//! A producer overwriting the mailbox leaves it unreadable for a moment. The
//! first few failures in a row are retried immediately (the write is usually
//! finished by then); past that, every retry waits `backoff`.

use std::time::Duration;

/// Bounded immediate-retry policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Consecutive failures retried with no delay.
    pub immediate_retries: u32,
    /// Delay between retries once the immediate budget is spent.
    pub backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            immediate_retries: 3,
            backoff: Duration::from_millis(10),
        }
    }
}

impl RetryPolicy {
    /// Delay before retrying after the `streak`-th consecutive failure
    /// (1-based). `None` means retry immediately.
    pub fn delay_for(&self, streak: u32) -> Option<Duration> {
        if streak <= self.immediate_retries || self.backoff.is_zero() {
            None
        } else {
            Some(self.backoff)
        }
    }

    /// Whether `streak` is the first failure past the immediate budget.
    pub fn is_exhausted_at(&self, streak: u32) -> bool {
        streak == self.immediate_retries.saturating_add(1)
    }
}
