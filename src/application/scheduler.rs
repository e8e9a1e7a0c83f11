//! Discovery Scheduler
//!
//! Drives the discovery job on a fixed cadence, restricted to an active-hours
//! window in a configured timezone, with a daily run quota that resets at
//! local-day rollover. The scheduler never fires unless explicitly enabled,
//! and it is the top-level error boundary: a failing run is a log line, not a
//! crash.
//!
//! Tick decisions are a function of the supplied local time, so tests drive
//! them with constructed timestamps instead of sleeping.

use std::future::Future;
use std::time::Duration;

use chrono::{DateTime, NaiveDate, Timelike, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::{Mutex, Notify, RwLock};

/// Default cadence in minutes
pub const DEFAULT_INTERVAL_MINUTES: u32 = 60;

/// Default daily run quota
pub const DEFAULT_MAX_DAILY_RUNS: u32 = 24;

#[derive(Debug, Error)]
pub enum SchedulerError {
    #[error("invalid scheduler configuration: {0}")]
    Config(String),
}

/// Scheduler configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchedulerConfig {
    /// Master switch; the scheduler never fires when false
    pub enabled: bool,
    /// Minutes between ticks
    pub interval_minutes: u32,
    /// IANA timezone name the active window and day rollover use
    pub timezone: String,
    /// Maximum discovery runs per local calendar day
    pub max_daily_runs: u32,
    /// First active hour (inclusive)
    pub start_hour: u32,
    /// Last active hour (inclusive)
    pub end_hour: u32,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            interval_minutes: DEFAULT_INTERVAL_MINUTES,
            timezone: "UTC".to_string(),
            max_daily_runs: DEFAULT_MAX_DAILY_RUNS,
            start_hour: 0,
            end_hour: 23,
        }
    }
}

impl SchedulerConfig {
    /// Validate the configuration and resolve the timezone
    pub fn validate(&self) -> Result<Tz, SchedulerError> {
        if self.interval_minutes == 0 {
            return Err(SchedulerError::Config(
                "interval_minutes must be > 0".to_string(),
            ));
        }
        if self.start_hour > 23 || self.end_hour > 23 {
            return Err(SchedulerError::Config(format!(
                "hours must be 0-23, got start {} end {}",
                self.start_hour, self.end_hour
            )));
        }
        if self.start_hour > self.end_hour {
            return Err(SchedulerError::Config(format!(
                "start_hour {} is after end_hour {}",
                self.start_hour, self.end_hour
            )));
        }
        if self.max_daily_runs == 0 {
            return Err(SchedulerError::Config(
                "max_daily_runs must be > 0".to_string(),
            ));
        }
        self.timezone
            .parse::<Tz>()
            .map_err(|_| SchedulerError::Config(format!("unknown timezone '{}'", self.timezone)))
    }
}

/// Daily run counter with local-day rollover
#[derive(Debug, Clone)]
pub struct DailyRunQuota {
    max_daily_runs: u32,
    run_count: u32,
    last_reset_day: NaiveDate,
}

impl DailyRunQuota {
    pub fn new(max_daily_runs: u32, today: NaiveDate) -> Self {
        Self {
            max_daily_runs,
            run_count: 0,
            last_reset_day: today,
        }
    }

    /// Reset the counter on the first observation of a new calendar day.
    /// Must be applied before the budget check.
    pub fn roll_day(&mut self, today: NaiveDate) {
        if today != self.last_reset_day {
            tracing::info!("new day {today}, resetting daily run counter");
            self.run_count = 0;
            self.last_reset_day = today;
        }
    }

    pub fn has_budget(&self) -> bool {
        self.run_count < self.max_daily_runs
    }

    /// Count a completed run, successful or not
    pub fn record_run(&mut self) {
        self.run_count += 1;
    }

    pub fn run_count(&self) -> u32 {
        self.run_count
    }
}

/// Outcome of one scheduler tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The job was invoked and the counter incremented
    Ran,
    /// Daily quota spent; nothing happened
    SkippedQuota,
    /// Tick fell outside the active-hours window
    SkippedWindow,
}

/// Cadence-driven scheduler for the discovery job
pub struct Scheduler {
    config: SchedulerConfig,
    tz: Tz,
    quota: Mutex<DailyRunQuota>,
    running: RwLock<bool>,
    stop_signal: Notify,
}

impl Scheduler {
    pub fn new(config: SchedulerConfig) -> Result<Self, SchedulerError> {
        let tz = config.validate()?;
        let today = Utc::now().with_timezone(&tz).date_naive();
        let quota = DailyRunQuota::new(config.max_daily_runs, today);

        Ok(Self {
            config,
            tz,
            quota: Mutex::new(quota),
            running: RwLock::new(false),
            stop_signal: Notify::new(),
        })
    }

    /// Drive the job until [`stop`](Self::stop) is called. Returns
    /// immediately when scheduling is disabled. An initial run fires at
    /// start when the current hour is inside the active window, subject to
    /// the same quota check as every other tick.
    ///
    /// The job itself is expected to swallow its own errors (the runner
    /// logs them); the scheduler only decides whether to invoke it.
    pub async fn run<F, Fut>(&self, job: F)
    where
        F: Fn() -> Fut,
        Fut: Future<Output = ()>,
    {
        if !self.config.enabled {
            tracing::info!("scheduler is disabled, not starting");
            return;
        }

        *self.running.write().await = true;
        tracing::info!(
            "scheduler started: every {} minutes between {}:00 and {}:00 {}, max {} runs/day",
            self.config.interval_minutes,
            self.config.start_hour,
            self.config.end_hour,
            self.config.timezone,
            self.config.max_daily_runs
        );

        let now = Utc::now().with_timezone(&self.tz);
        if self.in_active_window(now.hour()) {
            tracing::info!("running initial discovery at scheduler start");
            self.tick(now, &job).await;
        }

        let period = Duration::from_secs(u64::from(self.config.interval_minutes) * 60);
        loop {
            tokio::select! {
                _ = tokio::time::sleep(period) => {}
                _ = self.stop_signal.notified() => break,
            }
            if !*self.running.read().await {
                break;
            }
            let now = Utc::now().with_timezone(&self.tz);
            self.tick(now, &job).await;
        }

        *self.running.write().await = false;
        tracing::info!("scheduler stopped");
    }

    /// Halt future ticks. An in-flight run is not cancelled; it finishes
    /// naturally and the loop exits afterwards.
    pub async fn stop(&self) {
        *self.running.write().await = false;
        self.stop_signal.notify_one();
    }

    pub async fn is_running(&self) -> bool {
        *self.running.read().await
    }

    /// One tick decision at the given local time: window check, day
    /// rollover, quota check, then the job. The counter increments after
    /// the job completes, whatever its outcome.
    pub async fn tick<F, Fut>(&self, now: DateTime<Tz>, job: &F) -> TickOutcome
    where
        F: Fn() -> Fut,
        Fut: Future<Output = ()>,
    {
        let hour = now.hour();
        if !self.in_active_window(hour) {
            tracing::debug!("tick at hour {hour} outside active window, skipping");
            return TickOutcome::SkippedWindow;
        }

        let run_number = {
            let mut quota = self.quota.lock().await;
            quota.roll_day(now.date_naive());
            if !quota.has_budget() {
                tracing::info!(
                    "daily run limit ({}) reached, waiting for next day",
                    self.config.max_daily_runs
                );
                return TickOutcome::SkippedQuota;
            }
            quota.run_count() + 1
        };

        tracing::info!(
            "starting scheduled run {}/{}",
            run_number,
            self.config.max_daily_runs
        );
        job().await;
        self.quota.lock().await.record_run();
        TickOutcome::Ran
    }

    /// Current daily run count, for status reporting
    pub async fn runs_today(&self) -> u32 {
        self.quota.lock().await.run_count()
    }

    fn in_active_window(&self, hour: u32) -> bool {
        hour >= self.config.start_hour && hour <= self.config.end_hour
    }
}
