//! Sentiment Reporter
//!
//! Downstream half of a discovery run: search social posts for the winning
//! token, derive a sentiment verdict, compose the report and publish it.
//! Publishing is throttled by a rolling 24h quota independent of the
//! scheduler's run quota - the social API has its own ceiling.

use std::sync::Arc;

use chrono::Utc;
use thiserror::Error;
use tokio::sync::Mutex;
use tokio::time::Instant;

use crate::domain::{RankedToken, TokenReport};
use crate::ports::sentiment::{SentimentError, SentimentPort};
use crate::ports::social::{SocialError, SocialPort};

/// Default rolling-24h posting quota
pub const DEFAULT_MAX_DAILY_POSTS: u32 = 17;

/// Default number of posts fetched for analysis
pub const DEFAULT_POST_FETCH_LIMIT: usize = 10;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error(transparent)]
    Social(#[from] SocialError),

    #[error(transparent)]
    Sentiment(#[from] SentimentError),
}

/// Rolling 24h posting quota. Unlike the scheduler's calendar-day counter,
/// this window starts at the first post and slides forward a full day at a
/// time, matching the social API's own accounting.
#[derive(Debug)]
pub struct PostQuota {
    max_daily_posts: u32,
    count: u32,
    window_start: Option<Instant>,
}

impl PostQuota {
    const WINDOW: std::time::Duration = std::time::Duration::from_secs(24 * 60 * 60);

    pub fn new(max_daily_posts: u32) -> Self {
        Self {
            max_daily_posts,
            count: 0,
            window_start: None,
        }
    }

    /// Roll the window if a day has passed, then check the budget
    pub fn check(&mut self) -> Result<(), SocialError> {
        let now = Instant::now();
        match self.window_start {
            None => self.window_start = Some(now),
            Some(start) if now.duration_since(start) >= Self::WINDOW => {
                self.count = 0;
                self.window_start = Some(now);
            }
            Some(_) => {}
        }

        if self.count >= self.max_daily_posts {
            let elapsed = now.duration_since(self.window_start.unwrap());
            let remaining = Self::WINDOW.saturating_sub(elapsed);
            return Err(SocialError::DailyLimitReached {
                limit: self.max_daily_posts,
                hours_remaining: remaining.as_secs().div_ceil(3600),
            });
        }
        Ok(())
    }

    pub fn record_post(&mut self) {
        self.count += 1;
    }

    pub fn posts_in_window(&self) -> u32 {
        self.count
    }
}

/// Produces and publishes the report for a discovered token
pub struct SentimentReporter {
    sentiment: Arc<dyn SentimentPort>,
    social: Arc<dyn SocialPort>,
    quota: Mutex<PostQuota>,
    post_fetch_limit: usize,
}

impl SentimentReporter {
    pub fn new(
        sentiment: Arc<dyn SentimentPort>,
        social: Arc<dyn SocialPort>,
        max_daily_posts: u32,
        post_fetch_limit: usize,
    ) -> Self {
        Self {
            sentiment,
            social,
            quota: Mutex::new(PostQuota::new(max_daily_posts)),
            post_fetch_limit,
        }
    }

    /// Analyze and publish. The quota is checked before the post request
    /// goes out; a spent quota surfaces as `DailyLimitReached` and nothing
    /// is published.
    pub async fn report(&self, token: &RankedToken) -> Result<TokenReport, ReportError> {
        let posts = self.social.fetch_posts(token, self.post_fetch_limit).await?;
        tracing::info!(
            token = %token.token_address,
            "analyzing {} social posts",
            posts.len()
        );

        let sentiment = self.sentiment.analyze(&posts).await?;
        let report = TokenReport::new(token.clone(), sentiment, posts.len(), Utc::now());

        let text = report.compose_post();
        self.quota.lock().await.check()?;
        self.social.post(&text).await?;
        self.quota.lock().await.record_post();
        tracing::info!("report published ({} chars)", text.chars().count());

        Ok(report)
    }
}
