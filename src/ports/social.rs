//! Social Port
//!
//! Boundary for the social-media client (tweet search and posting). The real
//! client enforces its own API quotas; this trait only fixes the shapes the
//! pipeline needs. Delivery is best effort - a post that fails after the
//! request is sent may or may not have been published.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::RankedToken;

/// Engagement counters attached to a post
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Engagement {
    pub likes: u64,
    pub reposts: u64,
    pub replies: u64,
}

/// A social post about a token
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: String,
    pub text: String,
    pub engagement: Engagement,
}

/// Errors from the social client boundary
#[derive(Debug, Error)]
pub enum SocialError {
    /// Upstream returned 429; the caller renders a user-facing message
    #[error("rate limit exceeded, retry in {retry_after_minutes} minutes")]
    RateLimited { retry_after_minutes: u64 },

    /// Local daily posting quota is spent
    #[error("daily post limit of {limit} reached, {hours_remaining} hours until reset")]
    DailyLimitReached { limit: u32, hours_remaining: u64 },

    #[error("social API error: {0}")]
    Api(String),
}

/// Social-media client: search posts mentioning a token, publish reports
#[async_trait]
pub trait SocialPort: Send + Sync {
    /// Fetch recent posts mentioning the token (searched by contract
    /// address). An empty result is legitimate for a freshly listed token.
    async fn fetch_posts(&self, token: &RankedToken, limit: usize)
        -> Result<Vec<Post>, SocialError>;

    /// Publish a post.
    async fn post(&self, text: &str) -> Result<(), SocialError>;
}
