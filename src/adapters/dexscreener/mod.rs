//! Dexscreener Adapter
//!
//! Implementation of the market data port against the public Dexscreener
//! API: rate limiting, retry/backoff, typed payload decoding.

pub mod client;
pub mod rate_limit;
pub mod retry;
pub mod types;

pub use client::{DexscreenerClient, DexscreenerConfig, DEXSCREENER_API_BASE};
pub use rate_limit::RateLimiter;
pub use retry::RetryPolicy;
