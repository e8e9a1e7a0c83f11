//! CLI Command Definitions
//!
//! Argument parsing for the TokenPulse discovery bot.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// TokenPulse - Token Discovery & Ranking Bot for Dexscreener
#[derive(Parser, Debug)]
#[command(
    name = "tokenpulse",
    version = env!("CARGO_PKG_VERSION"),
    about = "Token discovery and ranking bot for Dexscreener",
    long_about = "TokenPulse periodically fetches newly listed tokens from Dexscreener, \
                  filters them against liquidity/volume/activity thresholds, ranks the \
                  survivors with a weighted multi-metric score and hands the best \
                  candidate to downstream reporting."
)]
pub struct CliApp {
    /// The command to execute
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the scheduled discovery loop
    Run(RunCmd),

    /// Run a single discovery cycle and print the best candidate
    Scan(ScanCmd),
}

/// Start the scheduler-driven discovery loop
#[derive(Parser, Debug)]
pub struct RunCmd {
    /// Path to configuration file
    #[arg(short, long, value_name = "FILE", default_value = "config.toml")]
    pub config: PathBuf,
}

/// Run one discovery cycle
#[derive(Parser, Debug)]
pub struct ScanCmd {
    /// Path to configuration file
    #[arg(short, long, value_name = "FILE", default_value = "config.toml")]
    pub config: PathBuf,

    /// Print the full ranked token as JSON
    #[arg(long)]
    pub json: bool,
}
