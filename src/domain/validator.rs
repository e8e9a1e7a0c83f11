//! Token Validator
//!
//! Hard threshold filters applied to a candidate's main trading pair before
//! it is allowed into the scoring batch. A candidate either clears every
//! threshold or is discarded - there is no partial credit at this stage.

use serde::{Deserialize, Serialize};

use super::token::PairMetrics;

/// Default minimum pooled liquidity in USD
pub const DEFAULT_MIN_LIQUIDITY_USD: f64 = 50_000.0;

/// Default minimum 24h volume in USD
pub const DEFAULT_MIN_VOLUME_24H: f64 = 10_000.0;

/// Default minimum 24h transaction count (buys + sells)
pub const DEFAULT_MIN_TXNS_24H: u64 = 50;

/// Default market cap band in USD
pub const DEFAULT_MIN_MARKET_CAP: f64 = 1_000_000.0;
pub const DEFAULT_MAX_MARKET_CAP: f64 = 100_000_000.0;

/// Threshold set for candidate filtering
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterThresholds {
    /// Minimum pooled liquidity in USD
    pub min_liquidity_usd: f64,
    /// Minimum 24h volume in USD
    pub min_volume_24h: f64,
    /// Minimum 24h transaction count
    pub min_txns_24h: u64,
    /// Lower bound of the accepted market cap band
    pub min_market_cap: f64,
    /// Upper bound of the accepted market cap band
    pub max_market_cap: f64,
}

impl Default for FilterThresholds {
    fn default() -> Self {
        Self {
            min_liquidity_usd: DEFAULT_MIN_LIQUIDITY_USD,
            min_volume_24h: DEFAULT_MIN_VOLUME_24H,
            min_txns_24h: DEFAULT_MIN_TXNS_24H,
            min_market_cap: DEFAULT_MIN_MARKET_CAP,
            max_market_cap: DEFAULT_MAX_MARKET_CAP,
        }
    }
}

/// Applies threshold filters to a candidate's pair listing
#[derive(Debug, Clone, Default)]
pub struct TokenValidator {
    thresholds: FilterThresholds,
}

impl TokenValidator {
    pub fn new(thresholds: FilterThresholds) -> Self {
        Self { thresholds }
    }

    /// Check a candidate's pair listing. The first pair is the main pair
    /// (upstream orders by relevance); a candidate with no pairs at all is
    /// invalid. Passes only when every threshold holds on the main pair,
    /// including a present market cap inside the configured band.
    pub fn is_valid(&self, pairs: &[PairMetrics]) -> bool {
        let Some(main_pair) = pairs.first() else {
            return false;
        };

        let market_cap_ok = main_pair.market_cap.is_some_and(|cap| {
            cap >= self.thresholds.min_market_cap && cap <= self.thresholds.max_market_cap
        });

        main_pair.liquidity_usd >= self.thresholds.min_liquidity_usd
            && main_pair.volume_24h >= self.thresholds.min_volume_24h
            && main_pair.tx_count_24h >= self.thresholds.min_txns_24h
            && market_cap_ok
    }

    pub fn thresholds(&self) -> &FilterThresholds {
        &self.thresholds
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn passing_pair() -> PairMetrics {
        PairMetrics {
            price_usd: 0.01,
            volume_24h: 20_000.0,
            liquidity_usd: 75_000.0,
            price_change_24h: 5.0,
            tx_count_24h: 120,
            market_cap: Some(5_000_000.0),
        }
    }

    #[test]
    fn test_default_thresholds() {
        let t = FilterThresholds::default();
        assert_eq!(t.min_liquidity_usd, 50_000.0);
        assert_eq!(t.min_volume_24h, 10_000.0);
        assert_eq!(t.min_txns_24h, 50);
        assert_eq!(t.min_market_cap, 1_000_000.0);
        assert_eq!(t.max_market_cap, 100_000_000.0);
    }

    #[test]
    fn test_valid_main_pair_passes() {
        let validator = TokenValidator::default();
        assert!(validator.is_valid(&[passing_pair()]));
    }

    #[test]
    fn test_empty_pair_list_is_invalid() {
        let validator = TokenValidator::default();
        assert!(!validator.is_valid(&[]));
    }

    #[test]
    fn test_missing_market_cap_is_invalid() {
        let validator = TokenValidator::default();
        let mut pair = passing_pair();
        pair.market_cap = None;
        // All other thresholds pass, market cap alone disqualifies
        assert!(!validator.is_valid(&[pair]));
    }

    #[test]
    fn test_market_cap_band() {
        let validator = TokenValidator::default();

        let mut too_small = passing_pair();
        too_small.market_cap = Some(999_999.0);
        assert!(!validator.is_valid(&[too_small]));

        let mut too_large = passing_pair();
        too_large.market_cap = Some(100_000_001.0);
        assert!(!validator.is_valid(&[too_large]));

        let mut at_min = passing_pair();
        at_min.market_cap = Some(1_000_000.0);
        assert!(validator.is_valid(&[at_min]));

        let mut at_max = passing_pair();
        at_max.market_cap = Some(100_000_000.0);
        assert!(validator.is_valid(&[at_max]));
    }

    #[test]
    fn test_liquidity_threshold() {
        let validator = TokenValidator::default();
        let mut pair = passing_pair();
        pair.liquidity_usd = 49_999.0;
        assert!(!validator.is_valid(&[pair]));
    }

    #[test]
    fn test_volume_threshold() {
        let validator = TokenValidator::default();
        let mut pair = passing_pair();
        pair.volume_24h = 9_999.0;
        assert!(!validator.is_valid(&[pair]));
    }

    #[test]
    fn test_txns_threshold() {
        let validator = TokenValidator::default();
        let mut pair = passing_pair();
        pair.tx_count_24h = 49;
        assert!(!validator.is_valid(&[pair.clone()]));

        pair.tx_count_24h = 50;
        assert!(validator.is_valid(&[pair]));
    }

    #[test]
    fn test_only_main_pair_is_checked() {
        let validator = TokenValidator::default();
        let mut failing = passing_pair();
        failing.liquidity_usd = 0.0;

        // Main pair fails even though a later pair would pass
        assert!(!validator.is_valid(&[failing.clone(), passing_pair()]));
        // Main pair passes even though a later pair would fail
        assert!(validator.is_valid(&[passing_pair(), failing]));
    }
}
