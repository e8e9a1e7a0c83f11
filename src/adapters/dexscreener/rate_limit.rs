//! Rate Limiter
//!
//! Minimum-interval pacing for outbound Dexscreener requests. Every request
//! the client issues, listing or pair lookup, goes through one shared
//! instance, so the overall cadence to the upstream API never exceeds one
//! request per interval.

use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::Instant;

/// Default minimum spacing between requests
pub const DEFAULT_MIN_INTERVAL_MS: u64 = 1000;

/// Enforces a minimum interval between calls. Concurrent callers queue on
/// the internal mutex in FIFO order; the timestamp is only touched while the
/// lock is held, so it cannot be corrupted by racing tasks.
#[derive(Debug)]
pub struct RateLimiter {
    min_interval: Duration,
    last_request: Mutex<Option<Instant>>,
}

impl RateLimiter {
    pub fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            last_request: Mutex::new(None),
        }
    }

    /// Suspend until at least `min_interval` has passed since the previous
    /// call completed, then claim the slot. The first call never waits.
    pub async fn wait(&self) {
        let mut last = self.last_request.lock().await;
        if let Some(previous) = *last {
            let elapsed = previous.elapsed();
            if elapsed < self.min_interval {
                tokio::time::sleep(self.min_interval - elapsed).await;
            }
        }
        *last = Some(Instant::now());
    }

    pub fn min_interval(&self) -> Duration {
        self.min_interval
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new(Duration::from_millis(DEFAULT_MIN_INTERVAL_MS))
    }
}
