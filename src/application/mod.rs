//! Application Layer - Orchestration of the discovery pipeline
//!
//! - `pipeline`: one fetch -> validate -> rank cycle
//! - `runner`: at-most-one-concurrent-run guard plus reporting hook
//! - `scheduler`: cadence, active-hours window and daily run quota
//! - `reporter`: sentiment analysis and quota-limited social posting

pub mod pipeline;
pub mod reporter;
pub mod runner;
pub mod scheduler;

pub use pipeline::{DiscoveryPipeline, PipelineError};
pub use reporter::{PostQuota, ReportError, SentimentReporter};
pub use runner::{DiscoveryRunner, RunOutcome};
pub use scheduler::{DailyRunQuota, Scheduler, SchedulerConfig, SchedulerError, TickOutcome};
