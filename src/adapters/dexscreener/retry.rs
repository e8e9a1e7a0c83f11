//! Retry Policy
//!
//! Bounded retries with exponential backoff for transient request failures.
//! Only connection-level timeouts are retried; application-level failures
//! (4xx, 429, malformed bodies) propagate to the caller on the first attempt.

use std::future::Future;
use std::time::Duration;

use crate::ports::market_data::MarketDataError;

/// First backoff delay
pub const BASE_BACKOFF_MS: u64 = 1000;

/// Backoff ceiling
pub const MAX_BACKOFF_MS: u64 = 10_000;

/// Default number of attempts
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Wraps fallible operations with bounded retries
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    max_retries: u32,
}

impl RetryPolicy {
    pub fn new(max_retries: u32) -> Self {
        Self { max_retries }
    }

    /// Backoff before retry number `attempt` (0-based): doubles from
    /// [`BASE_BACKOFF_MS`], capped at [`MAX_BACKOFF_MS`].
    pub fn backoff_delay(&self, attempt: u32) -> Duration {
        let millis = BASE_BACKOFF_MS
            .saturating_mul(2u64.saturating_pow(attempt))
            .min(MAX_BACKOFF_MS);
        Duration::from_millis(millis)
    }

    /// Invoke `operation` up to `max_retries` times. Transient failures back
    /// off and retry; anything else returns immediately. Exhausting the
    /// budget yields `MaxRetriesExceeded`, distinct from the underlying
    /// failure.
    pub async fn run<T, F, Fut>(&self, mut operation: F) -> Result<T, MarketDataError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, MarketDataError>>,
    {
        for attempt in 0..self.max_retries {
            match operation().await {
                Ok(value) => return Ok(value),
                Err(err) if err.is_transient() => {
                    let delay = self.backoff_delay(attempt);
                    tracing::warn!(
                        "transient request failure (attempt {}/{}), backing off {:?}: {}",
                        attempt + 1,
                        self.max_retries,
                        delay,
                        err
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(err) => return Err(err),
            }
        }

        Err(MarketDataError::MaxRetriesExceeded {
            attempts: self.max_retries,
        })
    }

    pub fn max_retries(&self) -> u32 {
        self.max_retries
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_RETRIES)
    }
}
