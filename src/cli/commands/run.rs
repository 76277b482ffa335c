//! Run command implementation
//!
//! This module implements the `run` command: the long-lived daily scheduler
//! loop that wakes at the configured time of day and executes one relay
//! cycle, until a shutdown signal arrives.

use crate::config::load_config;
use crate::core::scheduler::PipelineScheduler;
use clap::Args;
use tokio::sync::watch;

/// Arguments for the run command
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Override the scheduled time of day (HH:MM:SS)
    #[arg(long, value_name = "HH:MM:SS")]
    pub at: Option<String>,

    /// Dry run mode - fetch and transform without calling the endpoint
    #[arg(long)]
    pub dry_run: bool,
}

impl RunArgs {
    /// Execute the run command
    pub async fn execute(
        &self,
        config_path: &str,
        shutdown_signal: watch::Receiver<bool>,
    ) -> anyhow::Result<i32> {
        tracing::info!("Starting scheduler command");

        let mut config = load_config(config_path)?;

        // Apply CLI overrides
        if let Some(at) = &self.at {
            tracing::info!(time_of_day = %at, "Overriding scheduled time from CLI");
            config.schedule.time_of_day = at.clone();
        }

        if self.dry_run {
            tracing::info!("Enabling dry-run mode from CLI");
            config.application.dry_run = true;
        }

        if let Err(e) = config.validate() {
            tracing::error!(error = %e, "Configuration validation failed");
            eprintln!("Configuration validation failed: {e}");
            return Ok(2);
        }

        let scheduler = match PipelineScheduler::from_config(&config) {
            Ok(s) => s,
            Err(e) => {
                tracing::error!(error = %e, "Failed to create scheduler");
                eprintln!("Failed to initialize scheduler: {e}");
                return Ok(5);
            }
        };

        println!(
            "Scheduler running, next cycle at {} (Ctrl+C to stop)",
            config.schedule.time_of_day
        );

        scheduler.run(shutdown_signal).await?;

        println!("Scheduler stopped.");
        Ok(0)
    }
}
