//! Run-once command implementation
//!
//! This module implements the `run-once` command: a single relay cycle
//! executed immediately, without waiting for the scheduled time. Useful for
//! re-running a day after an outage or testing against a known extract.

use crate::config::load_config;
use crate::core::scheduler::PipelineScheduler;
use crate::domain::outcome::CycleOutcome;
use chrono::{Local, NaiveDate};
use clap::Args;

/// Arguments for the run-once command
#[derive(Args, Debug)]
pub struct RunOnceArgs {
    /// Process the extract for this date instead of today (YYYY-MM-DD)
    #[arg(long, value_name = "YYYY-MM-DD")]
    pub date: Option<String>,

    /// Dry run mode - fetch and transform without calling the endpoint
    #[arg(long)]
    pub dry_run: bool,
}

impl RunOnceArgs {
    /// Execute the run-once command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!("Starting single cycle");

        let mut config = load_config(config_path)?;

        if self.dry_run {
            tracing::info!("Enabling dry-run mode from CLI");
            config.application.dry_run = true;
        }

        if let Err(e) = config.validate() {
            tracing::error!(error = %e, "Configuration validation failed");
            eprintln!("Configuration validation failed: {e}");
            return Ok(2);
        }

        let date = match &self.date {
            Some(raw) => match NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
                Ok(date) => date,
                Err(e) => {
                    eprintln!("Invalid --date '{raw}': {e}");
                    return Ok(2);
                }
            },
            None => Local::now().date_naive(),
        };

        let scheduler = match PipelineScheduler::from_config(&config) {
            Ok(s) => s,
            Err(e) => {
                tracing::error!(error = %e, "Failed to create scheduler");
                eprintln!("Failed to initialize cycle: {e}");
                return Ok(5);
            }
        };

        println!("Running relay cycle for {date}...");

        match scheduler.run_cycle(date).await {
            CycleOutcome::Completed { result } => {
                match result {
                    Some(result) => {
                        println!("Cycle completed.");
                        println!("  Status: {}", result.status);
                        println!("  Queue id: {}", result.queue_id);
                        if !result.error_message.is_empty() {
                            println!("  Error message: {}", result.error_message);
                        }
                    }
                    None => println!("Cycle completed (dry run, nothing submitted)."),
                }
                Ok(0)
            }
            CycleOutcome::Failed { stage, detail } => {
                println!("Cycle failed during {stage}: {detail}");
                Ok(1)
            }
        }
    }
}
