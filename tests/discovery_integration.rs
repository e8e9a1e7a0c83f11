//! Discovery Integration Tests
//!
//! Integration tests that verify the discovery components work together:
//! 1. MockMarketData -> DiscoveryPipeline -> DiscoveryRunner flow
//! 2. DiscoveryRunner -> SentimentReporter publishing
//! 3. Scheduler quota and mutual-exclusion behavior under simulated ticks
//!
//! All tests are deterministic (no real network calls) and use mock ports.

use std::sync::Arc;
use std::time::Duration;

use chrono::TimeZone;

use tokenpulse::application::{
    DiscoveryPipeline, DiscoveryRunner, RunOutcome, Scheduler, SchedulerConfig, SentimentReporter,
    TickOutcome,
};
use tokenpulse::domain::{
    PairMetrics, ScoreWeights, Sentiment, SentimentReport, TokenCandidate, TokenScorer,
    TokenValidator,
};
use tokenpulse::ports::mocks::{MockMarketData, MockSentiment, MockSocial};
use tokenpulse::ports::social::{Engagement, Post, SocialPort};
use tokenpulse::ports::SentimentPort;

// ============================================================================
// Test Fixtures
// ============================================================================

fn candidate(address: &str) -> TokenCandidate {
    TokenCandidate {
        chain_id: "solana".to_string(),
        token_address: address.to_string(),
        url: Some(format!("https://dexscreener.com/solana/{address}")),
        icon: None,
        header: None,
        open_graph: None,
        description: Some("integration test token".to_string()),
        links: vec![],
    }
}

fn pair(liquidity: f64, volume: f64, txns: u64, change: f64, cap: f64) -> PairMetrics {
    PairMetrics {
        price_usd: 0.01,
        volume_24h: volume,
        liquidity_usd: liquidity,
        price_change_24h: change,
        tx_count_24h: txns,
        market_cap: Some(cap),
    }
}

fn posts(n: usize) -> Vec<Post> {
    (0..n)
        .map(|i| Post {
            id: i.to_string(),
            text: format!("post {i} about the token"),
            engagement: Engagement {
                likes: 10 * i as u64,
                reposts: i as u64,
                replies: 0,
            },
        })
        .collect()
}

fn bullish_report() -> SentimentReport {
    SentimentReport {
        sentiment: Sentiment::Bullish,
        confidence: 0.8,
        arguments: vec!["community is accumulating".to_string()],
    }
}

fn pipeline_with(market: Arc<MockMarketData>) -> DiscoveryPipeline {
    DiscoveryPipeline::new(
        market,
        TokenValidator::default(),
        TokenScorer::new(ScoreWeights::default()).unwrap(),
    )
}

// ============================================================================
// Pipeline -> Runner flow
// ============================================================================

#[tokio::test]
async fn full_run_selects_and_ranks_valid_candidates() {
    // Three listed tokens: one invalid (no market cap data), one weak, one
    // strong. The strong one must come out on top.
    let market = Arc::new(
        MockMarketData::new()
            .with_candidates(vec![
                candidate("no_cap"),
                candidate("weak"),
                candidate("strong"),
            ])
            .with_pairs("no_cap", {
                let mut p = pair(90_000.0, 40_000.0, 300, 8.0, 0.0);
                p.market_cap = None;
                vec![p]
            })
            .with_pairs("weak", vec![pair(55_000.0, 11_000.0, 60, 2.0, 80_000_000.0)])
            .with_pairs(
                "strong",
                vec![pair(150_000.0, 400_000.0, 800, 15.0, 3_000_000.0)],
            ),
    );

    let runner = DiscoveryRunner::new(pipeline_with(Arc::clone(&market)), None);

    match runner.trigger().await {
        RunOutcome::Found(token) => {
            assert_eq!(token.token_address, "strong");
            assert_eq!(token.market_cap, 3_000_000.0);
        }
        other => panic!("expected Found, got {other:?}"),
    }

    // One listing call, then one pair lookup per candidate, in listing order
    assert_eq!(
        market.get_calls(),
        vec![
            "latest_candidates",
            "pair_data:no_cap",
            "pair_data:weak",
            "pair_data:strong"
        ]
    );
}

#[tokio::test]
async fn pair_failure_degrades_listing_failure_aborts() {
    // A single candidate's pair lookup failing must not abort the run
    let market = Arc::new(
        MockMarketData::new()
            .with_candidates(vec![candidate("broken"), candidate("healthy")])
            .with_pair_failure("broken")
            .with_pairs(
                "healthy",
                vec![pair(80_000.0, 60_000.0, 250, 12.0, 5_000_000.0)],
            ),
    );
    let runner = DiscoveryRunner::new(pipeline_with(market), None);
    assert!(matches!(runner.trigger().await, RunOutcome::Found(_)));

    // A listing failure is fatal to the whole run
    let market = Arc::new(MockMarketData::new().with_listing_failure());
    let runner = DiscoveryRunner::new(pipeline_with(market), None);
    assert_eq!(runner.trigger().await, RunOutcome::Failed);
}

#[tokio::test]
async fn empty_listing_yields_nothing_found() {
    let market = Arc::new(MockMarketData::new());
    let runner = DiscoveryRunner::new(pipeline_with(market), None);
    assert_eq!(runner.trigger().await, RunOutcome::NothingFound);
}

// ============================================================================
// Runner -> Reporter publishing
// ============================================================================

#[tokio::test]
async fn winning_token_is_reported_and_published() {
    let market = Arc::new(
        MockMarketData::new()
            .with_candidates(vec![candidate("winner")])
            .with_pairs(
                "winner",
                vec![pair(120_000.0, 90_000.0, 500, 20.0, 2_500_000.0)],
            ),
    );
    let social = Arc::new(MockSocial::new().with_search_results(posts(6)));
    let reporter = SentimentReporter::new(
        Arc::new(MockSentiment::new(bullish_report())) as Arc<dyn SentimentPort>,
        Arc::clone(&social) as Arc<dyn SocialPort>,
        17,
        10,
    );

    let runner = DiscoveryRunner::new(pipeline_with(market), Some(reporter));
    assert!(matches!(runner.trigger().await, RunOutcome::Found(_)));

    let published = social.published();
    assert_eq!(published.len(), 1);
    assert!(published[0].contains("bullish"));
    assert!(published[0].contains("solana"));
    assert!(published[0].contains("6 posts"));
}

#[tokio::test]
async fn post_quota_stops_publishing_but_not_discovery() {
    let market = Arc::new(
        MockMarketData::new()
            .with_candidates(vec![candidate("winner")])
            .with_pairs(
                "winner",
                vec![pair(120_000.0, 90_000.0, 500, 20.0, 2_500_000.0)],
            ),
    );
    let social = Arc::new(MockSocial::new().with_search_results(posts(3)));
    let reporter = SentimentReporter::new(
        Arc::new(MockSentiment::new(bullish_report())) as Arc<dyn SentimentPort>,
        Arc::clone(&social) as Arc<dyn SocialPort>,
        1,
        10,
    );
    let runner = DiscoveryRunner::new(pipeline_with(market), Some(reporter));

    // First run publishes, second hits the post quota but discovery itself
    // still completes with a result
    assert!(matches!(runner.trigger().await, RunOutcome::Found(_)));
    assert!(matches!(runner.trigger().await, RunOutcome::Found(_)));
    assert_eq!(social.published().len(), 1);
}

// ============================================================================
// Concurrency and scheduling
// ============================================================================

#[tokio::test(start_paused = true)]
async fn concurrent_triggers_cannot_overlap() {
    let market = Arc::new(
        MockMarketData::new()
            .with_candidates(vec![candidate("slow")])
            .with_pairs(
                "slow",
                vec![pair(120_000.0, 90_000.0, 500, 20.0, 2_500_000.0)],
            )
            .with_response_delay(Duration::from_millis(300)),
    );
    let runner = Arc::new(DiscoveryRunner::new(pipeline_with(market), None));

    let first = {
        let runner = Arc::clone(&runner);
        tokio::spawn(async move { runner.trigger().await })
    };
    let second = {
        let runner = Arc::clone(&runner);
        tokio::spawn(async move {
            // Arrives while the first run is waiting on the slow upstream
            tokio::time::sleep(Duration::from_millis(50)).await;
            runner.trigger().await
        })
    };

    let first = first.await.unwrap();
    let second = second.await.unwrap();

    assert!(matches!(first, RunOutcome::Found(_)));
    assert_eq!(second, RunOutcome::Skipped);
}

#[tokio::test]
async fn scheduler_enforces_daily_quota_over_real_runs() {
    let market = Arc::new(
        MockMarketData::new()
            .with_candidates(vec![candidate("winner")])
            .with_pairs(
                "winner",
                vec![pair(120_000.0, 90_000.0, 500, 20.0, 2_500_000.0)],
            ),
    );
    let runner = Arc::new(DiscoveryRunner::new(pipeline_with(Arc::clone(&market)), None));

    let scheduler = Scheduler::new(SchedulerConfig {
        enabled: true,
        max_daily_runs: 2,
        ..SchedulerConfig::default()
    })
    .unwrap();

    let job = || {
        let runner = Arc::clone(&runner);
        async move {
            runner.trigger().await;
        }
    };

    let noon = chrono_tz::UTC.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap();
    assert_eq!(scheduler.tick(noon, &job).await, TickOutcome::Ran);
    assert_eq!(scheduler.tick(noon, &job).await, TickOutcome::Ran);
    assert_eq!(scheduler.tick(noon, &job).await, TickOutcome::SkippedQuota);

    // Two real pipeline runs happened: two listing calls plus two pair
    // lookups, nothing from the third tick
    assert_eq!(market.get_calls().len(), 4);

    // A tick on the next local day resets the counter and runs again
    let next_noon = chrono_tz::UTC.with_ymd_and_hms(2025, 3, 2, 12, 0, 0).unwrap();
    assert_eq!(scheduler.tick(next_noon, &job).await, TickOutcome::Ran);
    assert_eq!(scheduler.runs_today().await, 1);
}

#[tokio::test]
async fn failed_runs_still_count_and_do_not_stop_the_scheduler() {
    let market = Arc::new(MockMarketData::new().with_listing_failure());
    let runner = Arc::new(DiscoveryRunner::new(pipeline_with(market), None));

    let scheduler = Scheduler::new(SchedulerConfig {
        enabled: true,
        ..SchedulerConfig::default()
    })
    .unwrap();

    let job = || {
        let runner = Arc::clone(&runner);
        async move {
            runner.trigger().await;
        }
    };

    let noon = chrono_tz::UTC.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap();
    assert_eq!(scheduler.tick(noon, &job).await, TickOutcome::Ran);
    assert_eq!(scheduler.tick(noon, &job).await, TickOutcome::Ran);
    assert_eq!(scheduler.runs_today().await, 2);
}
