//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for the relay using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// Course Relay - daily course completion upload
#[derive(Parser, Debug)]
#[command(name = "course-relay")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "relay.toml", env = "RELAY_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "RELAY_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the daily scheduler until interrupted
    Run(commands::run::RunArgs),

    /// Execute a single relay cycle immediately
    RunOnce(commands::run_once::RunOnceArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}
