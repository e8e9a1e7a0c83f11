//! TokenPulse - Token Discovery & Ranking Bot Library
//!
//! Periodically discovers newly listed tokens on Dexscreener, filters them
//! against liquidity/volume/activity thresholds, ranks the survivors with a
//! weighted multi-metric score and hands the best candidate to downstream
//! sentiment analysis and reporting.
//!
//! # Modules
//!
//! - `domain`: Core business logic (validator, scorer, sentiment, report)
//! - `ports`: Trait abstractions (MarketDataPort, SentimentPort, SocialPort)
//! - `adapters`: External implementations (Dexscreener client, CLI)
//! - `config`: Configuration loading and validation
//! - `application`: Pipeline, runner, scheduler and reporter

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
