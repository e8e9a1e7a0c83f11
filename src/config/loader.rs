//! Configuration Loader
//!
//! Loads and validates configuration from TOML files. Every section has
//! documented defaults, so a missing section (or a missing file entry) falls
//! back to the values the bot ships with. Validation runs at load time:
//! a weight set that does not sum to 1.0 or a nonsensical scheduler window
//! aborts startup instead of misbehaving at 3am.

use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

use crate::adapters::dexscreener::DexscreenerConfig;
use crate::application::SchedulerConfig;
use crate::domain::{FilterThresholds, ScoreWeights};

/// Main configuration structure matching config.toml
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub dexscreener: DexscreenerSection,
    pub filters: FilterThresholds,
    pub weights: ScoreWeights,
    pub scheduler: SchedulerSection,
    pub social: SocialSection,
    pub logging: LoggingSection,
}

/// Dexscreener API configuration section
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DexscreenerSection {
    /// API base URL
    pub base_url: String,
    /// Minimum milliseconds between any two requests
    pub request_interval_ms: u64,
    /// Retry budget for transient failures
    pub max_retries: u32,
    /// Per-request timeout in milliseconds
    pub timeout_ms: u64,
}

impl Default for DexscreenerSection {
    fn default() -> Self {
        Self {
            base_url: "https://api.dexscreener.com".to_string(),
            request_interval_ms: 1000,
            max_retries: 3,
            timeout_ms: 5000,
        }
    }
}

/// Scheduler configuration section
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SchedulerSection {
    /// Master switch, overridable via the SCHEDULE_ENABLED env var
    pub enabled: bool,
    /// Minutes between discovery runs
    pub interval_minutes: u32,
    /// IANA timezone for the active window and daily reset
    pub timezone: String,
    /// Maximum discovery runs per local calendar day
    pub max_daily_runs: u32,
    /// First active hour (inclusive)
    pub start_hour: u32,
    /// Last active hour (inclusive)
    pub end_hour: u32,
}

impl Default for SchedulerSection {
    fn default() -> Self {
        Self {
            enabled: false,
            interval_minutes: 60,
            timezone: "UTC".to_string(),
            max_daily_runs: 24,
            start_hour: 0,
            end_hour: 23,
        }
    }
}

impl SchedulerSection {
    /// Scheduler enable flag with environment variable override.
    /// Checks SCHEDULE_ENABLED first, falls back to the config value.
    pub fn is_enabled(&self) -> bool {
        match std::env::var("SCHEDULE_ENABLED") {
            Ok(value) => matches!(value.as_str(), "true" | "1"),
            Err(_) => self.enabled,
        }
    }
}

/// Social reporting configuration section
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SocialSection {
    /// Rolling-24h posting quota
    pub max_daily_posts: u32,
    /// Posts fetched per token for sentiment analysis
    pub post_fetch_limit: usize,
}

impl Default for SocialSection {
    fn default() -> Self {
        Self {
            max_daily_posts: 17,
            post_fetch_limit: 10,
        }
    }
}

/// Logging configuration section
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Log level: "trace", "debug", "info", "warn", "error"
    pub level: String,
    /// Log to file (in addition to stdout)
    pub log_to_file: bool,
    /// Log file path
    pub log_file: String,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            log_to_file: false,
            log_file: "tokenpulse.log".to_string(),
        }
    }
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Validation failed: {0}")]
    ValidationError(String),
}

/// Load configuration from a TOML file
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    config.validate()?;
    Ok(config)
}

impl Config {
    /// Validate all configuration parameters
    pub fn validate(&self) -> Result<(), ConfigError> {
        // Dexscreener section
        if self.dexscreener.base_url.is_empty() {
            return Err(ConfigError::ValidationError(
                "base_url cannot be empty".to_string(),
            ));
        }
        if self.dexscreener.max_retries == 0 {
            return Err(ConfigError::ValidationError(format!(
                "max_retries must be > 0, got {}",
                self.dexscreener.max_retries
            )));
        }
        if self.dexscreener.timeout_ms == 0 {
            return Err(ConfigError::ValidationError(
                "timeout_ms must be > 0".to_string(),
            ));
        }

        // Filter thresholds
        if self.filters.min_liquidity_usd < 0.0 {
            return Err(ConfigError::ValidationError(format!(
                "min_liquidity_usd must be >= 0, got {}",
                self.filters.min_liquidity_usd
            )));
        }
        if self.filters.min_volume_24h < 0.0 {
            return Err(ConfigError::ValidationError(format!(
                "min_volume_24h must be >= 0, got {}",
                self.filters.min_volume_24h
            )));
        }
        if self.filters.min_market_cap < 0.0 {
            return Err(ConfigError::ValidationError(format!(
                "min_market_cap must be >= 0, got {}",
                self.filters.min_market_cap
            )));
        }
        if self.filters.max_market_cap < self.filters.min_market_cap {
            return Err(ConfigError::ValidationError(format!(
                "max_market_cap {} is below min_market_cap {}",
                self.filters.max_market_cap, self.filters.min_market_cap
            )));
        }

        // Score weights: non-negative, sum to 1.0 within tolerance
        self.weights
            .validate()
            .map_err(|e| ConfigError::ValidationError(e.to_string()))?;

        // Scheduler section
        if self.scheduler.interval_minutes == 0 {
            return Err(ConfigError::ValidationError(
                "interval_minutes must be > 0".to_string(),
            ));
        }
        if self.scheduler.start_hour > 23 || self.scheduler.end_hour > 23 {
            return Err(ConfigError::ValidationError(format!(
                "hours must be 0-23, got start {} end {}",
                self.scheduler.start_hour, self.scheduler.end_hour
            )));
        }
        if self.scheduler.start_hour > self.scheduler.end_hour {
            return Err(ConfigError::ValidationError(format!(
                "start_hour {} is after end_hour {}",
                self.scheduler.start_hour, self.scheduler.end_hour
            )));
        }
        if self.scheduler.max_daily_runs == 0 {
            return Err(ConfigError::ValidationError(
                "max_daily_runs must be > 0".to_string(),
            ));
        }
        if self.scheduler.timezone.parse::<chrono_tz::Tz>().is_err() {
            return Err(ConfigError::ValidationError(format!(
                "unknown timezone '{}'",
                self.scheduler.timezone
            )));
        }

        // Social section
        if self.social.post_fetch_limit == 0 {
            return Err(ConfigError::ValidationError(
                "post_fetch_limit must be > 0".to_string(),
            ));
        }

        Ok(())
    }
}

impl From<&DexscreenerSection> for DexscreenerConfig {
    fn from(section: &DexscreenerSection) -> Self {
        DexscreenerConfig {
            base_url: section.base_url.clone(),
            request_interval: Duration::from_millis(section.request_interval_ms),
            timeout: Duration::from_millis(section.timeout_ms),
            max_retries: section.max_retries,
        }
    }
}

impl From<&SchedulerSection> for SchedulerConfig {
    fn from(section: &SchedulerSection) -> Self {
        SchedulerConfig {
            enabled: section.is_enabled(),
            interval_minutes: section.interval_minutes,
            timezone: section.timezone.clone(),
            max_daily_runs: section.max_daily_runs,
            start_hour: section.start_hour,
            end_hour: section.end_hour,
        }
    }
}
