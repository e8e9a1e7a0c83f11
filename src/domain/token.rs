//! Token Types
//!
//! Core data types for the discovery pipeline: raw candidates from the
//! Dexscreener listing, per-pair metrics, and the ranked result handed to
//! downstream consumers.

use serde::{Deserialize, Serialize};

/// External link attached to a token profile (website, twitter, telegram...)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenLink {
    /// Link kind as reported upstream ("twitter", "telegram", ...)
    pub link_type: Option<String>,
    pub label: Option<String>,
    pub url: String,
}

/// A token surfaced by the "latest token profiles" listing, prior to
/// validation. The metadata fields are pass-through for reporting and never
/// participate in scoring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenCandidate {
    /// Chain identifier ("solana", "ethereum", ...)
    pub chain_id: String,
    /// Token contract address
    pub token_address: String,
    /// Dexscreener profile URL
    pub url: Option<String>,
    pub icon: Option<String>,
    pub header: Option<String>,
    pub open_graph: Option<String>,
    pub description: Option<String>,
    pub links: Vec<TokenLink>,
}

/// Metrics for a single trading pair, already defaulted at the parse
/// boundary. `market_cap` stays optional: an absent market cap makes the
/// candidate invalid rather than defaulting to zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PairMetrics {
    /// Price in USD, 0.0 when the upstream omits it
    pub price_usd: f64,
    /// 24h volume in USD
    pub volume_24h: f64,
    /// Pooled liquidity in USD
    pub liquidity_usd: f64,
    /// 24h price change in percent, signed
    pub price_change_24h: f64,
    /// 24h buys + sells
    pub tx_count_24h: u64,
    /// Market capitalization in USD, absent upstream for some pairs
    pub market_cap: Option<f64>,
}

/// A validated candidate with its main-pair metrics attached, as returned by
/// the discovery pipeline. The composite score used for ordering is not
/// carried here - it is batch-relative and meaningless across runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedToken {
    pub chain_id: String,
    pub token_address: String,
    pub url: Option<String>,
    pub icon: Option<String>,
    pub description: Option<String>,
    pub links: Vec<TokenLink>,
    pub price_usd: f64,
    pub volume_24h: f64,
    pub liquidity_usd: f64,
    pub price_change_24h: f64,
    pub tx_count_24h: u64,
    /// Guaranteed present: validation rejects pairs without a market cap
    pub market_cap: f64,
}

impl RankedToken {
    /// Combine a candidate with its main-pair metrics. Returns `None` when
    /// the pair has no market cap, which validation should have rejected.
    pub fn from_parts(candidate: TokenCandidate, pair: &PairMetrics) -> Option<Self> {
        let market_cap = pair.market_cap?;
        Some(Self {
            chain_id: candidate.chain_id,
            token_address: candidate.token_address,
            url: candidate.url,
            icon: candidate.icon,
            description: candidate.description,
            links: candidate.links,
            price_usd: pair.price_usd,
            volume_24h: pair.volume_24h,
            liquidity_usd: pair.liquidity_usd,
            price_change_24h: pair.price_change_24h,
            tx_count_24h: pair.tx_count_24h,
            market_cap,
        })
    }
}
