//! Dexscreener API Types
//!
//! Raw payload shapes for the two consumed endpoints. The upstream schema is
//! loosely populated - almost everything can be missing - so every optional
//! field is an `Option` here, and defaulting happens exactly once, in the
//! conversions to domain types. Scoring and validation never see a raw
//! payload.

use serde::Deserialize;

use crate::domain::{PairMetrics, TokenCandidate, TokenLink};

/// Entry of the `token-profiles/latest/v1` listing
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTokenProfile {
    pub chain_id: String,
    pub token_address: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub header: Option<String>,
    #[serde(default)]
    pub open_graph: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub links: Vec<RawProfileLink>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawProfileLink {
    #[serde(rename = "type", default)]
    pub link_type: Option<String>,
    #[serde(default)]
    pub label: Option<String>,
    pub url: String,
}

impl From<RawTokenProfile> for TokenCandidate {
    fn from(raw: RawTokenProfile) -> Self {
        TokenCandidate {
            chain_id: raw.chain_id,
            token_address: raw.token_address,
            url: raw.url,
            icon: raw.icon,
            header: raw.header,
            open_graph: raw.open_graph,
            description: raw.description,
            links: raw
                .links
                .into_iter()
                .map(|link| TokenLink {
                    link_type: link.link_type,
                    label: link.label,
                    url: link.url,
                })
                .collect(),
        }
    }
}

/// Entry of the `token-pairs/v1/{chain}/{address}` listing
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPair {
    #[serde(default)]
    pub pair_address: Option<String>,
    #[serde(default)]
    pub base_token: Option<RawPairToken>,
    /// Price as a decimal string, Dexscreener convention
    #[serde(default)]
    pub price_usd: Option<String>,
    #[serde(default)]
    pub volume: RawTimeWindows,
    #[serde(default)]
    pub price_change: RawTimeWindows,
    #[serde(default)]
    pub txns: RawTxnWindows,
    #[serde(default)]
    pub liquidity: Option<RawLiquidity>,
    #[serde(default)]
    pub fdv: Option<f64>,
    #[serde(default)]
    pub market_cap: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawPairToken {
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub symbol: Option<String>,
}

/// Per-window numeric values (volume, price change)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawTimeWindows {
    #[serde(default)]
    pub m5: Option<f64>,
    #[serde(default)]
    pub h1: Option<f64>,
    #[serde(default)]
    pub h6: Option<f64>,
    #[serde(default)]
    pub h24: Option<f64>,
}

/// Per-window transaction counts
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawTxnWindows {
    #[serde(default)]
    pub m5: Option<RawTxnCounts>,
    #[serde(default)]
    pub h1: Option<RawTxnCounts>,
    #[serde(default)]
    pub h6: Option<RawTxnCounts>,
    #[serde(default)]
    pub h24: Option<RawTxnCounts>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawTxnCounts {
    #[serde(default)]
    pub buys: Option<u64>,
    #[serde(default)]
    pub sells: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawLiquidity {
    #[serde(default)]
    pub usd: Option<f64>,
    #[serde(default)]
    pub base: Option<f64>,
    #[serde(default)]
    pub quote: Option<f64>,
}

impl RawPair {
    /// Collapse the raw pair into domain metrics. Missing numerics default
    /// to zero here and nowhere else; the market cap stays optional so the
    /// validator can reject pairs that lack one.
    pub fn into_metrics(self) -> PairMetrics {
        let tx_count_24h = self
            .txns
            .h24
            .map(|counts| counts.buys.unwrap_or(0) + counts.sells.unwrap_or(0))
            .unwrap_or(0);

        PairMetrics {
            price_usd: self
                .price_usd
                .and_then(|price| price.parse::<f64>().ok())
                .unwrap_or(0.0),
            volume_24h: self.volume.h24.unwrap_or(0.0),
            liquidity_usd: self.liquidity.and_then(|liq| liq.usd).unwrap_or(0.0),
            price_change_24h: self.price_change.h24.unwrap_or(0.0),
            tx_count_24h,
            market_cap: self.market_cap,
        }
    }
}
