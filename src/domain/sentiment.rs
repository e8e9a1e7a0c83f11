//! Sentiment Types
//!
//! Types for the social-sentiment verdict attached to a discovered token,
//! plus the parser for the analyzer's plain-text response format:
//!
//! ```text
//! Overall Sentiment: bullish
//! Confidence: 0.8
//! Key Arguments:
//! - argument one
//! - argument two
//! ```
//!
//! The analyzer itself (LLM invocation) lives behind [`crate::ports::sentiment`];
//! only the response contract is owned here.

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Overall market sentiment verdict
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Bullish,
    Bearish,
}

impl Sentiment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sentiment::Bullish => "bullish",
            Sentiment::Bearish => "bearish",
        }
    }
}

/// Parsed sentiment verdict for a batch of social posts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentReport {
    pub sentiment: Sentiment,
    /// Analyzer confidence in [0, 1]
    pub confidence: f64,
    /// Key supporting arguments, never empty
    pub arguments: Vec<String>,
}

/// Parse the analyzer's free-text response. Missing or malformed sections
/// fall back to the conservative defaults the analyzer contract documents:
/// bearish, confidence 0.5, a single placeholder argument.
pub fn parse_analyzer_response(content: &str) -> SentimentReport {
    let sentiment_re = Regex::new(r"(?i)Overall Sentiment:\s*(bullish|bearish)").unwrap();
    let sentiment = sentiment_re
        .captures(content)
        .map(|caps| {
            if caps[1].eq_ignore_ascii_case("bullish") {
                Sentiment::Bullish
            } else {
                Sentiment::Bearish
            }
        })
        .unwrap_or(Sentiment::Bearish);

    let confidence_re = Regex::new(r"(?i)Confidence:\s*(0\.\d+|1\.0|1|0)").unwrap();
    let confidence = confidence_re
        .captures(content)
        .and_then(|caps| caps[1].parse::<f64>().ok())
        .unwrap_or(0.5);

    // Arguments are the bullet lines between "Key Arguments:" and the
    // per-post analysis section (if any)
    let arguments_section = content
        .split("Key Arguments:")
        .nth(1)
        .map(|rest| {
            rest.split("Individual Tweet Analysis:")
                .next()
                .unwrap_or("")
                .to_string()
        })
        .unwrap_or_default();

    let mut arguments: Vec<String> = arguments_section
        .lines()
        .filter_map(|line| {
            let trimmed = line.trim();
            trimmed.strip_prefix('-').map(|arg| arg.trim().to_string())
        })
        .filter(|arg| !arg.is_empty())
        .collect();

    if arguments.is_empty() {
        arguments.push("No specific arguments provided".to_string());
    }

    SentimentReport {
        sentiment,
        confidence,
        arguments,
    }
}
