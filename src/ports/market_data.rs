//! Market Data Port
//!
//! Trait boundary for the upstream listings API, plus the error taxonomy the
//! retry layer classifies against. Connection-level timeouts are the only
//! transient class; HTTP 429 is surfaced as its own recoverable condition and
//! is never silently retried.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{PairMetrics, TokenCandidate};

/// Market data error type
#[derive(Debug, Error)]
pub enum MarketDataError {
    /// Connection-level timeout (connect or read), eligible for retry
    #[error("request timed out: {0}")]
    Timeout(String),

    /// Other connection-level failure (DNS, reset), not retried
    #[error("network error: {0}")]
    Network(String),

    /// Upstream returned HTTP 429
    #[error("rate limit exceeded")]
    RateLimited,

    /// Non-success HTTP status other than 429
    #[error("API error {status}: {message}")]
    Http { status: u16, message: String },

    /// Response body did not match the expected schema
    #[error("failed to parse response: {0}")]
    Parse(String),

    /// Retry budget exhausted on transient failures
    #[error("max retries exceeded after {attempts} attempts")]
    MaxRetriesExceeded { attempts: u32 },
}

impl MarketDataError {
    /// Only connection-level timeouts qualify for retry. 4xx/5xx responses,
    /// parse failures and 429s propagate to the caller unchanged.
    pub fn is_transient(&self) -> bool {
        matches!(self, MarketDataError::Timeout(_))
    }
}

/// Upstream market data feed: token listings and per-token pair lookups
#[async_trait]
pub trait MarketDataPort: Send + Sync {
    /// Fetch the latest token profile listing, order as received upstream
    /// (typically newest first). A failure here aborts the discovery run.
    async fn fetch_latest_candidates(&self) -> Result<Vec<TokenCandidate>, MarketDataError>;

    /// Fetch trading pairs for one token. An empty list is a legitimate
    /// result, not an error.
    async fn fetch_pair_data(
        &self,
        chain_id: &str,
        token_address: &str,
    ) -> Result<Vec<PairMetrics>, MarketDataError>;
}
