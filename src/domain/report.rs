//! Token Report
//!
//! The report handed to downstream consumers after a discovery run: the
//! winning token, the sentiment verdict over its social posts, and the
//! post text composed for publishing.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::sentiment::SentimentReport;
use super::token::RankedToken;

/// Hard cap on composed post length (platform limit)
pub const MAX_POST_LEN: usize = 280;

/// Full report for one discovery run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenReport {
    pub token: RankedToken,
    pub timestamp: DateTime<Utc>,
    pub sentiment: SentimentReport,
    /// Number of social posts the verdict was derived from
    pub analyzed_posts: usize,
}

impl TokenReport {
    pub fn new(
        token: RankedToken,
        sentiment: SentimentReport,
        analyzed_posts: usize,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            token,
            timestamp,
            sentiment,
            analyzed_posts,
        }
    }

    /// Compose the post text. Keeps the address, headline metrics, verdict
    /// and the strongest argument, truncated to [`MAX_POST_LEN`].
    pub fn compose_post(&self) -> String {
        let token = &self.token;
        let mut text = format!(
            "Token watch: {} on {}\n\
             Price ${:.6} | MC ${} | Liq ${}\n\
             24h: ${} vol, {} txns, {:+.1}%\n\
             Sentiment: {} ({:.0}% confidence, {} posts)",
            short_address(&token.token_address),
            token.chain_id,
            token.price_usd,
            format_usd(token.market_cap),
            format_usd(token.liquidity_usd),
            format_usd(token.volume_24h),
            token.tx_count_24h,
            token.price_change_24h,
            self.sentiment.sentiment.as_str(),
            self.sentiment.confidence * 100.0,
            self.analyzed_posts,
        );

        if let Some(argument) = self.sentiment.arguments.first() {
            text.push_str("\n> ");
            text.push_str(argument);
        }

        truncate_post(text)
    }
}

/// Shorten a contract address for display: first 6 and last 4 characters
fn short_address(address: &str) -> String {
    if address.len() <= 12 {
        return address.to_string();
    }
    format!("{}..{}", &address[..6], &address[address.len() - 4..])
}

/// Compact USD formatting: 1.2K, 3.4M
fn format_usd(value: f64) -> String {
    if value >= 1_000_000.0 {
        format!("{:.1}M", value / 1_000_000.0)
    } else if value >= 1_000.0 {
        format!("{:.1}K", value / 1_000.0)
    } else {
        format!("{:.0}", value)
    }
}

fn truncate_post(text: String) -> String {
    if text.chars().count() <= MAX_POST_LEN {
        return text;
    }
    let mut truncated: String = text.chars().take(MAX_POST_LEN - 3).collect();
    truncated.push_str("...");
    truncated
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::sentiment::Sentiment;

    fn sample_token() -> RankedToken {
        RankedToken {
            chain_id: "solana".to_string(),
            token_address: "E14jecSeL6iiQk5obt8vPzpMYMhKXZpDYSBtEx8Bpump".to_string(),
            url: None,
            icon: None,
            description: None,
            links: vec![],
            price_usd: 0.0042,
            volume_24h: 320_000.0,
            liquidity_usd: 95_000.0,
            price_change_24h: 18.5,
            tx_count_24h: 860,
            market_cap: 4_200_000.0,
        }
    }

    fn sample_sentiment() -> SentimentReport {
        SentimentReport {
            sentiment: Sentiment::Bullish,
            confidence: 0.85,
            arguments: vec!["Whale accumulation observed".to_string()],
        }
    }

    #[test]
    fn test_compose_post_contents() {
        let report = TokenReport::new(sample_token(), sample_sentiment(), 9, Utc::now());
        let post = report.compose_post();

        assert!(post.contains("E14jec..pump"));
        assert!(post.contains("solana"));
        assert!(post.contains("4.2M"));
        assert!(post.contains("bullish"));
        assert!(post.contains("85% confidence"));
        assert!(post.contains("Whale accumulation observed"));
    }

    #[test]
    fn test_compose_post_respects_length_cap() {
        let mut sentiment = sample_sentiment();
        sentiment.arguments = vec!["x".repeat(400)];
        let report = TokenReport::new(sample_token(), sentiment, 9, Utc::now());

        let post = report.compose_post();
        assert!(post.chars().count() <= MAX_POST_LEN);
        assert!(post.ends_with("..."));
    }

    #[test]
    fn test_short_address_small_input() {
        assert_eq!(short_address("abc"), "abc");
    }

    #[test]
    fn test_format_usd() {
        assert_eq!(format_usd(950.0), "950");
        assert_eq!(format_usd(12_500.0), "12.5K");
        assert_eq!(format_usd(4_200_000.0), "4.2M");
    }

    #[test]
    fn test_positive_change_has_sign() {
        let report = TokenReport::new(sample_token(), sample_sentiment(), 9, Utc::now());
        assert!(report.compose_post().contains("+18.5%"));
    }
}
