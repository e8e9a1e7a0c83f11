//! Discovery Runner
//!
//! Application-level wrapper around the pipeline that guarantees at most one
//! discovery run at a time. Triggers arriving while a run is in progress -
//! scheduler ticks or manual invocations alike - are dropped with a log
//! line, never queued. The runner is also where run errors stop: they are
//! logged and converted into an outcome, so neither the scheduler nor the
//! process ever dies from a failed cycle.

use std::sync::atomic::{AtomicBool, Ordering};

use crate::domain::RankedToken;

use super::pipeline::DiscoveryPipeline;
use super::reporter::SentimentReporter;

/// Result of one trigger
#[derive(Debug, Clone, PartialEq)]
pub enum RunOutcome {
    /// A best token was selected (and reported, when a reporter is wired)
    Found(RankedToken),
    /// The run completed but no candidate qualified
    NothingFound,
    /// A run was already in progress; this trigger was dropped
    Skipped,
    /// The run failed; details are in the log
    Failed,
}

/// Serializes discovery runs and drives optional reporting
pub struct DiscoveryRunner {
    pipeline: DiscoveryPipeline,
    reporter: Option<SentimentReporter>,
    in_progress: AtomicBool,
}

impl DiscoveryRunner {
    pub fn new(pipeline: DiscoveryPipeline, reporter: Option<SentimentReporter>) -> Self {
        Self {
            pipeline,
            reporter,
            in_progress: AtomicBool::new(false),
        }
    }

    /// Run the pipeline unless one is already in flight. The in-progress
    /// flag is claimed atomically, so concurrent triggers cannot start a
    /// second run.
    pub async fn trigger(&self) -> RunOutcome {
        if self
            .in_progress
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            tracing::warn!("discovery run already in progress, dropping trigger");
            return RunOutcome::Skipped;
        }

        let outcome = self.execute().await;
        self.in_progress.store(false, Ordering::SeqCst);
        outcome
    }

    async fn execute(&self) -> RunOutcome {
        match self.pipeline.run().await {
            Ok(Some(token)) => {
                tracing::info!(
                    token = %token.token_address,
                    chain = %token.chain_id,
                    "discovery selected a token"
                );
                if let Some(reporter) = &self.reporter {
                    if let Err(err) = reporter.report(&token).await {
                        tracing::error!("reporting failed: {err}");
                    }
                }
                RunOutcome::Found(token)
            }
            Ok(None) => {
                tracing::info!("discovery finished with no qualifying token");
                RunOutcome::NothingFound
            }
            Err(err) => {
                tracing::error!("discovery run failed: {err}");
                RunOutcome::Failed
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;

    use crate::domain::{PairMetrics, ScoreWeights, TokenCandidate, TokenScorer, TokenValidator};
    use crate::ports::mocks::MockMarketData;

    fn candidate(address: &str) -> TokenCandidate {
        TokenCandidate {
            chain_id: "solana".to_string(),
            token_address: address.to_string(),
            url: None,
            icon: None,
            header: None,
            open_graph: None,
            description: None,
            links: vec![],
        }
    }

    fn valid_pair() -> PairMetrics {
        PairMetrics {
            price_usd: 0.01,
            volume_24h: 50_000.0,
            liquidity_usd: 80_000.0,
            price_change_24h: 10.0,
            tx_count_24h: 200,
            market_cap: Some(3_000_000.0),
        }
    }

    fn runner_with(market: MockMarketData) -> DiscoveryRunner {
        let pipeline = DiscoveryPipeline::new(
            Arc::new(market),
            TokenValidator::default(),
            TokenScorer::new(ScoreWeights::default()).unwrap(),
        );
        DiscoveryRunner::new(pipeline, None)
    }

    #[tokio::test]
    async fn test_trigger_returns_found() {
        let market = MockMarketData::new()
            .with_candidates(vec![candidate("addr1")])
            .with_pairs("addr1", vec![valid_pair()]);

        match runner_with(market).trigger().await {
            RunOutcome::Found(token) => assert_eq!(token.token_address, "addr1"),
            other => panic!("expected Found, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_trigger_converts_failure_to_outcome() {
        let market = MockMarketData::new().with_listing_failure();
        assert_eq!(runner_with(market).trigger().await, RunOutcome::Failed);
    }

    #[tokio::test]
    async fn test_empty_run_is_nothing_found() {
        let market = MockMarketData::new();
        assert_eq!(runner_with(market).trigger().await, RunOutcome::NothingFound);
    }

    #[tokio::test(start_paused = true)]
    async fn test_concurrent_trigger_is_dropped() {
        let market = MockMarketData::new()
            .with_candidates(vec![candidate("addr1")])
            .with_pairs("addr1", vec![valid_pair()])
            .with_response_delay(Duration::from_millis(500));
        let runner = Arc::new(runner_with(market));

        let first = {
            let runner = Arc::clone(&runner);
            tokio::spawn(async move { runner.trigger().await })
        };
        // Let the first trigger claim the in-progress flag
        tokio::time::sleep(Duration::from_millis(10)).await;

        let second = runner.trigger().await;
        assert_eq!(second, RunOutcome::Skipped);

        match first.await.unwrap() {
            RunOutcome::Found(token) => assert_eq!(token.token_address, "addr1"),
            other => panic!("expected Found, got {other:?}"),
        }

        // The flag is released afterwards: a later trigger runs again
        assert!(matches!(runner.trigger().await, RunOutcome::Found(_)));
    }
}
