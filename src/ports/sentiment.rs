//! Sentiment Port
//!
//! Boundary for the sentiment analyzer (an LLM agent in production). The
//! analyzer is constructed explicitly and passed in as a dependency; there is
//! no process-wide singleton to initialize.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::SentimentReport;
use crate::ports::social::Post;

/// Errors from the sentiment analyzer boundary
#[derive(Debug, Error)]
pub enum SentimentError {
    #[error("analyzer error: {0}")]
    Analyzer(String),

    #[error("no posts to analyze")]
    NoPosts,
}

/// Sentiment analysis over a batch of social posts
#[async_trait]
pub trait SentimentPort: Send + Sync {
    /// Derive an overall sentiment verdict from the given posts.
    async fn analyze(&self, posts: &[Post]) -> Result<SentimentReport, SentimentError>;
}
