//! Adapters Layer - External System Implementations
//!
//! This module contains implementations of the port traits:
//! - Dexscreener: market data API client (listings, pair lookups)
//! - CLI: command-line interface definitions

pub mod cli;
pub mod dexscreener;

pub use cli::CliApp;
pub use dexscreener::{DexscreenerClient, DexscreenerConfig, RateLimiter, RetryPolicy};
