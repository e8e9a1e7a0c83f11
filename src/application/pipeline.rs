//! Discovery Pipeline
//!
//! One discovery cycle: fetch the latest candidate listing, look up pair
//! data per candidate, filter through the validator, rank the survivors and
//! return the single best token. All upstream calls are issued sequentially
//! so the shared rate limiter paces the whole run.

use std::sync::Arc;

use thiserror::Error;

use crate::domain::{RankedToken, TokenScorer, TokenValidator};
use crate::ports::market_data::{MarketDataError, MarketDataPort};

#[derive(Debug, Error)]
pub enum PipelineError {
    /// The candidate listing itself could not be fetched; nothing to rank
    #[error("failed to fetch token listing: {0}")]
    Listing(#[from] MarketDataError),
}

/// Orchestrates fetch -> validate -> rank for one run
pub struct DiscoveryPipeline {
    market: Arc<dyn MarketDataPort>,
    validator: TokenValidator,
    scorer: TokenScorer,
}

impl DiscoveryPipeline {
    pub fn new(
        market: Arc<dyn MarketDataPort>,
        validator: TokenValidator,
        scorer: TokenScorer,
    ) -> Self {
        Self {
            market,
            validator,
            scorer,
        }
    }

    /// Execute one discovery cycle. A listing failure is fatal to the run;
    /// a single candidate's pair lookup failure only excludes that
    /// candidate. `Ok(None)` means no candidate qualified - a legitimate
    /// outcome, not an error.
    pub async fn run(&self) -> Result<Option<RankedToken>, PipelineError> {
        let candidates = self.market.fetch_latest_candidates().await?;
        tracing::info!("fetched {} candidates from listing", candidates.len());

        let mut valid = Vec::new();
        for candidate in candidates {
            let pairs = match self
                .market
                .fetch_pair_data(&candidate.chain_id, &candidate.token_address)
                .await
            {
                Ok(pairs) => pairs,
                Err(err) => {
                    tracing::warn!(
                        token = %candidate.token_address,
                        "pair lookup failed, excluding candidate: {err}"
                    );
                    continue;
                }
            };

            if !self.validator.is_valid(&pairs) {
                continue;
            }
            if let Some(token) = RankedToken::from_parts(candidate, &pairs[0]) {
                valid.push(token);
            }
        }

        if valid.is_empty() {
            tracing::info!("no candidates passed validation");
            return Ok(None);
        }
        tracing::info!("{} candidates passed validation", valid.len());

        let ranked = self.scorer.rank(valid);
        Ok(ranked.into_iter().next())
    }
}
