//! Token Scorer
//!
//! Weighted multi-metric ranking of validated candidates. Every metric is
//! normalized against the current batch (min/max), so scores are only
//! comparable within a single discovery run.
//!
//! Metric treatment:
//! - liquidity, volume, transactions: linear min/max normalization
//! - market cap: inverted normalization, lower cap inside the valid band
//!   ranks higher
//! - price change: fixed piecewise curve favoring moderate positive moves,
//!   independent of the batch

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::token::RankedToken;

/// Tolerance for the weight-sum check
pub const WEIGHT_SUM_TOLERANCE: f64 = 0.001;

#[derive(Debug, Error)]
pub enum ScorerError {
    #[error("score weights must sum to 1.0, got {0}")]
    InvalidWeightSum(f64),
    #[error("score weight '{0}' must be >= 0, got {1}")]
    NegativeWeight(&'static str, f64),
}

/// Weight set for the composite score. Must be non-negative and sum to 1.0
/// within [`WEIGHT_SUM_TOLERANCE`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreWeights {
    pub liquidity: f64,
    pub volume: f64,
    pub transactions: f64,
    pub price_change: f64,
    pub market_cap: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            liquidity: 0.25,
            volume: 0.25,
            transactions: 0.20,
            price_change: 0.15,
            market_cap: 0.15,
        }
    }
}

impl ScoreWeights {
    /// Check non-negativity and the sum invariant. Called at construction
    /// time; an invalid weight set never reaches scoring.
    pub fn validate(&self) -> Result<(), ScorerError> {
        for (name, value) in [
            ("liquidity", self.liquidity),
            ("volume", self.volume),
            ("transactions", self.transactions),
            ("price_change", self.price_change),
            ("market_cap", self.market_cap),
        ] {
            if value < 0.0 {
                return Err(ScorerError::NegativeWeight(name, value));
            }
        }

        let sum = self.liquidity
            + self.volume
            + self.transactions
            + self.price_change
            + self.market_cap;
        if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(ScorerError::InvalidWeightSum(sum));
        }
        Ok(())
    }
}

/// Observed min/max of one metric across the batch
#[derive(Debug, Clone, Copy)]
struct MetricRange {
    min: f64,
    max: f64,
}

impl MetricRange {
    fn over<I>(values: I) -> Self
    where
        I: Iterator<Item = f64>,
    {
        let mut range = Self {
            min: f64::INFINITY,
            max: f64::NEG_INFINITY,
        };
        for v in values {
            range.min = range.min.min(v);
            range.max = range.max.max(v);
        }
        range
    }
}

/// Normalize a value into [0, 1] against a batch range. A degenerate range
/// (min == max, e.g. a singleton batch) scores the metric as maximal.
pub fn normalize(value: f64, min: f64, max: f64) -> f64 {
    if max == min {
        return 1.0;
    }
    (value - min) / (max - min)
}

/// Piecewise score for the 24h price change percentage. Moderate positive
/// moves score best; the curve decays above +30% (and may go negative for
/// extreme pumps), while small negative moves keep partial credit down
/// to -20%.
pub fn price_change_score(price_change: f64) -> f64 {
    if price_change > 0.0 && price_change <= 30.0 {
        price_change / 30.0
    } else if price_change > 30.0 {
        1.0 - ((price_change - 30.0) / 70.0)
    } else {
        ((price_change + 20.0) / 20.0).max(0.0)
    }
}

/// Ranks a batch of validated tokens by composite score
#[derive(Debug, Clone)]
pub struct TokenScorer {
    weights: ScoreWeights,
}

impl TokenScorer {
    /// Create a scorer. Fails when the weight set violates the sum or
    /// non-negativity invariants.
    pub fn new(weights: ScoreWeights) -> Result<Self, ScorerError> {
        weights.validate()?;
        Ok(Self { weights })
    }

    /// Order the batch by descending composite score. The sort is stable, so
    /// tokens with equal scores keep their input order. The score itself is
    /// dropped before returning.
    pub fn rank(&self, batch: Vec<RankedToken>) -> Vec<RankedToken> {
        if batch.is_empty() {
            return batch;
        }

        let liquidity = MetricRange::over(batch.iter().map(|t| t.liquidity_usd));
        let volume = MetricRange::over(batch.iter().map(|t| t.volume_24h));
        let transactions = MetricRange::over(batch.iter().map(|t| t.tx_count_24h as f64));
        let market_cap = MetricRange::over(batch.iter().map(|t| t.market_cap));

        let mut scored: Vec<(f64, RankedToken)> = batch
            .into_iter()
            .map(|token| {
                let score = self.composite_score(&token, liquidity, volume, transactions, market_cap);
                (score, token)
            })
            .collect();

        scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));
        scored.into_iter().map(|(_, token)| token).collect()
    }

    fn composite_score(
        &self,
        token: &RankedToken,
        liquidity: MetricRange,
        volume: MetricRange,
        transactions: MetricRange,
        market_cap: MetricRange,
    ) -> f64 {
        let liquidity_score =
            normalize(token.liquidity_usd, liquidity.min, liquidity.max) * self.weights.liquidity;
        let volume_score =
            normalize(token.volume_24h, volume.min, volume.max) * self.weights.volume;
        let tx_score = normalize(token.tx_count_24h as f64, transactions.min, transactions.max)
            * self.weights.transactions;
        let change_score = price_change_score(token.price_change_24h) * self.weights.price_change;
        // Lower market cap inside the valid band ranks higher
        let cap_score = (1.0 - normalize(token.market_cap, market_cap.min, market_cap.max))
            * self.weights.market_cap;

        liquidity_score + volume_score + tx_score + change_score + cap_score
    }

    pub fn weights(&self) -> &ScoreWeights {
        &self.weights
    }
}
