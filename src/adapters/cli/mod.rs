//! CLI Adapter
//!
//! Command-line interface for the TokenPulse discovery bot.
//! Uses clap derive macros for argument parsing.

mod commands;

pub use commands::{CliApp, Command, RunCmd, ScanCmd};
