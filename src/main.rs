//! TokenPulse - Token Discovery & Ranking Bot
//!
//! Finds newly listed tokens on Dexscreener, ranks them by a weighted
//! multi-metric score and reports the best candidate.

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use tokenpulse::adapters::cli::{CliApp, Command, RunCmd, ScanCmd};
use tokenpulse::adapters::dexscreener::{DexscreenerClient, DexscreenerConfig};
use tokenpulse::application::{
    DiscoveryPipeline, DiscoveryRunner, RunOutcome, Scheduler, SchedulerConfig,
};
use tokenpulse::config::{load_config, Config};
use tokenpulse::domain::{TokenScorer, TokenValidator};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (credentials and overrides go here)
    dotenvy::dotenv().ok();

    let app = CliApp::parse();
    init_logging(app.verbose, app.debug)?;

    match app.command {
        Command::Run(cmd) => run_command(cmd).await,
        Command::Scan(cmd) => scan_command(cmd).await,
    }
}

fn init_logging(verbose: bool, debug: bool) -> Result<()> {
    let filter = if debug {
        EnvFilter::new("debug")
    } else if verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::new("warn")
    };

    fmt().with_env_filter(filter).init();
    Ok(())
}

/// Build the discovery runner from configuration
fn build_runner(config: &Config) -> Result<DiscoveryRunner> {
    let client = DexscreenerClient::with_config(DexscreenerConfig::from(&config.dexscreener))
        .context("Failed to create Dexscreener client")?;
    let validator = TokenValidator::new(config.filters.clone());
    let scorer = TokenScorer::new(config.weights).context("Invalid score weights")?;

    let pipeline = DiscoveryPipeline::new(Arc::new(client), validator, scorer);
    // The sentiment/social adapters are wired by the deployment; discovery
    // results are logged either way
    Ok(DiscoveryRunner::new(pipeline, None))
}

async fn run_command(cmd: RunCmd) -> Result<()> {
    tracing::info!("Starting TokenPulse...");

    let config = load_config(&cmd.config).context("Failed to load configuration")?;
    let runner = Arc::new(build_runner(&config)?);
    let scheduler = Arc::new(
        Scheduler::new(SchedulerConfig::from(&config.scheduler))
            .context("Failed to create scheduler")?,
    );

    // Setup Ctrl+C handler
    let sched = Arc::clone(&scheduler);
    tokio::spawn(async move {
        tokio::signal::ctrl_c().await.ok();
        tracing::info!("Shutdown signal received");
        sched.stop().await;
    });

    let job_runner = Arc::clone(&runner);
    scheduler
        .run(move || {
            let runner = Arc::clone(&job_runner);
            async move {
                runner.trigger().await;
            }
        })
        .await;

    tracing::info!("TokenPulse stopped");
    Ok(())
}

async fn scan_command(cmd: ScanCmd) -> Result<()> {
    let config = load_config(&cmd.config).context("Failed to load configuration")?;
    let runner = build_runner(&config)?;

    match runner.trigger().await {
        RunOutcome::Found(token) => {
            if cmd.json {
                println!("{}", serde_json::to_string_pretty(&token)?);
            } else {
                println!("Best candidate: {} on {}", token.token_address, token.chain_id);
                println!("  Price:        ${}", token.price_usd);
                println!("  Market cap:   ${:.0}", token.market_cap);
                println!("  Liquidity:    ${:.0}", token.liquidity_usd);
                println!("  24h volume:   ${:.0}", token.volume_24h);
                println!("  24h change:   {:+.2}%", token.price_change_24h);
                println!("  24h txns:     {}", token.tx_count_24h);
            }
        }
        RunOutcome::NothingFound => println!("No qualifying token found this run"),
        RunOutcome::Failed => anyhow::bail!("Discovery run failed, see logs"),
        RunOutcome::Skipped => unreachable!("single-shot scan cannot overlap"),
    }

    Ok(())
}
