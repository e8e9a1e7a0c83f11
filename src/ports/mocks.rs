//! Mock port implementations for tests
//!
//! Call-recording mocks with scripted responses, used by unit and
//! integration tests. No real network traffic.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use crate::domain::{PairMetrics, RankedToken, SentimentReport, TokenCandidate};
use crate::ports::market_data::{MarketDataError, MarketDataPort};
use crate::ports::sentiment::{SentimentError, SentimentPort};
use crate::ports::social::{Post, SocialError, SocialPort};

/// Mock market data port with scripted listings and pair lookups
#[derive(Default)]
pub struct MockMarketData {
    candidates: Mutex<Vec<TokenCandidate>>,
    pairs: Mutex<HashMap<String, Vec<PairMetrics>>>,
    failing_pairs: Mutex<Vec<String>>,
    listing_fails: Mutex<bool>,
    response_delay: Mutex<Option<Duration>>,
    calls: Arc<Mutex<Vec<String>>>,
}

impl MockMarketData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Script the candidate listing returned by `fetch_latest_candidates`
    pub fn with_candidates(self, candidates: Vec<TokenCandidate>) -> Self {
        *self.candidates.lock().unwrap() = candidates;
        self
    }

    /// Script the pair lookup result for one token address
    pub fn with_pairs(self, token_address: &str, pairs: Vec<PairMetrics>) -> Self {
        self.pairs
            .lock()
            .unwrap()
            .insert(token_address.to_string(), pairs);
        self
    }

    /// Make the pair lookup for one token address fail with a timeout
    pub fn with_pair_failure(self, token_address: &str) -> Self {
        self.failing_pairs
            .lock()
            .unwrap()
            .push(token_address.to_string());
        self
    }

    /// Make the candidate listing fail with a timeout
    pub fn with_listing_failure(self) -> Self {
        *self.listing_fails.lock().unwrap() = true;
        self
    }

    /// Delay every response, to simulate a slow upstream
    pub fn with_response_delay(self, delay: Duration) -> Self {
        *self.response_delay.lock().unwrap() = Some(delay);
        self
    }

    /// Get all recorded calls
    pub fn get_calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    async fn apply_delay(&self) {
        let delay = *self.response_delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
    }
}

#[async_trait]
impl MarketDataPort for MockMarketData {
    async fn fetch_latest_candidates(&self) -> Result<Vec<TokenCandidate>, MarketDataError> {
        self.calls.lock().unwrap().push("latest_candidates".to_string());
        self.apply_delay().await;

        if *self.listing_fails.lock().unwrap() {
            return Err(MarketDataError::Timeout("scripted listing failure".into()));
        }
        Ok(self.candidates.lock().unwrap().clone())
    }

    async fn fetch_pair_data(
        &self,
        _chain_id: &str,
        token_address: &str,
    ) -> Result<Vec<PairMetrics>, MarketDataError> {
        self.calls
            .lock()
            .unwrap()
            .push(format!("pair_data:{}", token_address));
        self.apply_delay().await;

        if self
            .failing_pairs
            .lock()
            .unwrap()
            .iter()
            .any(|a| a == token_address)
        {
            return Err(MarketDataError::Timeout("scripted pair failure".into()));
        }
        Ok(self
            .pairs
            .lock()
            .unwrap()
            .get(token_address)
            .cloned()
            .unwrap_or_default())
    }
}

/// Mock sentiment analyzer returning a fixed verdict
pub struct MockSentiment {
    report: SentimentReport,
    calls: Arc<Mutex<usize>>,
}

impl MockSentiment {
    pub fn new(report: SentimentReport) -> Self {
        Self {
            report,
            calls: Arc::new(Mutex::new(0)),
        }
    }

    pub fn call_count(&self) -> usize {
        *self.calls.lock().unwrap()
    }
}

#[async_trait]
impl SentimentPort for MockSentiment {
    async fn analyze(&self, posts: &[Post]) -> Result<SentimentReport, SentimentError> {
        *self.calls.lock().unwrap() += 1;
        if posts.is_empty() {
            return Err(SentimentError::NoPosts);
        }
        Ok(self.report.clone())
    }
}

/// Mock social client with scripted search results and post recording
#[derive(Default)]
pub struct MockSocial {
    posts_for_search: Mutex<Vec<Post>>,
    published: Arc<Mutex<Vec<String>>>,
    post_fails: Mutex<bool>,
}

impl MockSocial {
    pub fn new() -> Self {
        Self::default()
    }

    /// Script the posts returned for any token search
    pub fn with_search_results(self, posts: Vec<Post>) -> Self {
        *self.posts_for_search.lock().unwrap() = posts;
        self
    }

    /// Make `post` fail with a 429
    pub fn with_post_failure(self) -> Self {
        *self.post_fails.lock().unwrap() = true;
        self
    }

    /// Get all published post texts
    pub fn published(&self) -> Vec<String> {
        self.published.lock().unwrap().clone()
    }
}

#[async_trait]
impl SocialPort for MockSocial {
    async fn fetch_posts(
        &self,
        _token: &RankedToken,
        limit: usize,
    ) -> Result<Vec<Post>, SocialError> {
        let posts = self.posts_for_search.lock().unwrap();
        Ok(posts.iter().take(limit).cloned().collect())
    }

    async fn post(&self, text: &str) -> Result<(), SocialError> {
        if *self.post_fails.lock().unwrap() {
            return Err(SocialError::RateLimited {
                retry_after_minutes: 15,
            });
        }
        self.published.lock().unwrap().push(text.to_string());
        Ok(())
    }
}
