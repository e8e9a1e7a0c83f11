//! Dexscreener API Client
//!
//! HTTP client for the two consumed Dexscreener endpoints: the latest
//! token-profiles listing and per-token pair lookups. All requests share one
//! rate limiter and one retry policy; requests inside a discovery run are
//! issued sequentially, which keeps the limiter's single slot honest without
//! extra locking.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;

use crate::domain::{PairMetrics, TokenCandidate};
use crate::ports::market_data::{MarketDataError, MarketDataPort};

use super::rate_limit::RateLimiter;
use super::retry::RetryPolicy;
use super::types::{RawPair, RawTokenProfile};

/// Public Dexscreener API root
pub const DEXSCREENER_API_BASE: &str = "https://api.dexscreener.com";

/// Default per-request timeout
pub const DEFAULT_TIMEOUT_MS: u64 = 5000;

/// Dexscreener client configuration
#[derive(Debug, Clone)]
pub struct DexscreenerConfig {
    /// API base URL, overridable for tests
    pub base_url: String,
    /// Minimum spacing between any two requests
    pub request_interval: Duration,
    /// Per-request timeout
    pub timeout: Duration,
    /// Retry budget for transient failures
    pub max_retries: u32,
}

impl Default for DexscreenerConfig {
    fn default() -> Self {
        Self {
            base_url: DEXSCREENER_API_BASE.to_string(),
            request_interval: Duration::from_millis(1000),
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
            max_retries: 3,
        }
    }
}

/// Dexscreener market data client
#[derive(Debug, Clone)]
pub struct DexscreenerClient {
    config: DexscreenerConfig,
    http: Client,
    rate_limiter: Arc<RateLimiter>,
    retry: RetryPolicy,
}

impl DexscreenerClient {
    /// Create a client with default configuration
    pub fn new() -> Result<Self, MarketDataError> {
        Self::with_config(DexscreenerConfig::default())
    }

    /// Create a client with custom configuration
    pub fn with_config(config: DexscreenerConfig) -> Result<Self, MarketDataError> {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| MarketDataError::Network(format!("failed to create HTTP client: {e}")))?;

        let rate_limiter = Arc::new(RateLimiter::new(config.request_interval));
        let retry = RetryPolicy::new(config.max_retries);

        Ok(Self {
            config,
            http,
            rate_limiter,
            retry,
        })
    }

    /// Rate-limited, retried GET returning a decoded JSON body
    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, MarketDataError> {
        self.retry
            .run(|| {
                let http = self.http.clone();
                let rate_limiter = Arc::clone(&self.rate_limiter);
                let url = url.to_string();
                async move {
                    rate_limiter.wait().await;
                    let response = http.get(&url).send().await.map_err(map_request_error)?;
                    decode_response(response).await
                }
            })
            .await
    }

    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }
}

#[async_trait]
impl MarketDataPort for DexscreenerClient {
    async fn fetch_latest_candidates(&self) -> Result<Vec<TokenCandidate>, MarketDataError> {
        let url = format!("{}/token-profiles/latest/v1", self.config.base_url);
        let profiles: Vec<RawTokenProfile> = self.get_json(&url).await?;

        tracing::debug!("fetched {} token profiles", profiles.len());
        // Order as received: upstream lists newest first
        Ok(profiles.into_iter().map(TokenCandidate::from).collect())
    }

    async fn fetch_pair_data(
        &self,
        chain_id: &str,
        token_address: &str,
    ) -> Result<Vec<PairMetrics>, MarketDataError> {
        let url = format!(
            "{}/token-pairs/v1/{}/{}",
            self.config.base_url, chain_id, token_address
        );

        // One failed candidate must not abort the whole batch: log and
        // resolve to no pairs instead of propagating
        match self.get_json::<Vec<RawPair>>(&url).await {
            Ok(pairs) => Ok(pairs.into_iter().map(RawPair::into_metrics).collect()),
            Err(err) => {
                tracing::warn!(
                    token = token_address,
                    "pair lookup failed, treating as no pairs: {err}"
                );
                Ok(Vec::new())
            }
        }
    }
}

fn map_request_error(err: reqwest::Error) -> MarketDataError {
    if err.is_timeout() || err.is_connect() {
        MarketDataError::Timeout(err.to_string())
    } else {
        MarketDataError::Network(err.to_string())
    }
}

async fn decode_response<T: DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, MarketDataError> {
    let status = response.status();

    if status == StatusCode::TOO_MANY_REQUESTS {
        return Err(MarketDataError::RateLimited);
    }

    if !status.is_success() {
        let message = response.text().await.unwrap_or_default();
        return Err(MarketDataError::Http {
            status: status.as_u16(),
            message,
        });
    }

    response
        .json()
        .await
        .map_err(|e| MarketDataError::Parse(e.to_string()))
}
