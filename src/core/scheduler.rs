//! Daily pipeline scheduler
//!
//! Owns the wake/stop contract and sequences Fetch → Transform → Invoke with
//! short-circuit on the first failure. A stage failure is notified and the
//! loop re-arms for the next day; only an external shutdown request ends the
//! loop. The shutdown watch channel is the single suspension point — an
//! in-flight stage is never preempted.

use crate::adapters::endpoint::{EndpointClient, EndpointInvoker};
use crate::adapters::mail::{MailNotifier, Notifier};
use crate::adapters::sftp::{Fetcher, SftpFetcher};
use crate::config::RelayConfig;
use crate::core::schedule::{delay_until, ScheduleConfig};
use crate::core::transform::RecordTransformer;
use crate::domain::outcome::{CycleOutcome, EndpointResult, Stage};
use crate::domain::{RelayError, Result};
use chrono::{Local, NaiveDate};
use std::sync::Arc;
use tokio::sync::watch;

/// Derives the dated source filename for one cycle
pub fn dated_file_name(date: NaiveDate) -> String {
    format!("{}.csv", date.format("%Y-%m-%d"))
}

/// Sequences the daily Fetch → Transform → Invoke cycle
pub struct PipelineScheduler {
    schedule: ScheduleConfig,
    dry_run: bool,
    fetcher: Arc<dyn Fetcher>,
    transformer: RecordTransformer,
    invoker: Arc<dyn EndpointInvoker>,
    notifier: Arc<dyn Notifier>,
}

impl PipelineScheduler {
    /// Wires up the production adapters from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the schedule time or the endpoint client cannot
    /// be constructed from the configuration.
    pub fn from_config(config: &RelayConfig) -> Result<Self> {
        let time_of_day = config
            .schedule
            .parsed_time_of_day()
            .map_err(RelayError::Configuration)?;

        let fetcher = SftpFetcher::new(config.sftp.clone(), config.transfer.local_path.clone());
        let transformer = RecordTransformer::new(config.transfer.output_path.clone());
        let invoker = EndpointClient::new(config.endpoint.clone())?;
        let notifier = MailNotifier::new(config.mail.clone());

        Ok(Self::new(
            ScheduleConfig::new(time_of_day),
            config.application.dry_run,
            Arc::new(fetcher),
            transformer,
            Arc::new(invoker),
            Arc::new(notifier),
        ))
    }

    /// Assembles a scheduler from explicit parts
    pub fn new(
        schedule: ScheduleConfig,
        dry_run: bool,
        fetcher: Arc<dyn Fetcher>,
        transformer: RecordTransformer,
        invoker: Arc<dyn EndpointInvoker>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            schedule,
            dry_run,
            fetcher,
            transformer,
            invoker,
            notifier,
        }
    }

    /// Runs the daily loop until a shutdown signal arrives.
    ///
    /// The delay is recomputed from the wall clock on every iteration, so
    /// the wake always lands on the configured time of day regardless of how
    /// long the previous cycle ran. A shutdown request during the wait
    /// returns immediately; one arriving mid-cycle is honored right after
    /// the cycle finishes.
    pub async fn run(&self, mut shutdown: watch::Receiver<bool>) -> Result<()> {
        loop {
            let delay = delay_until(self.schedule.time_of_day, Local::now().time());
            tracing::info!(
                time_of_day = %self.schedule.time_of_day,
                delay_secs = delay.as_secs(),
                "Scheduler armed for next cycle"
            );

            tokio::select! {
                changed = shutdown.changed() => {
                    // A closed channel means the sender is gone; treat it as
                    // a shutdown request too
                    if changed.is_err() || *shutdown.borrow() {
                        tracing::info!("Shutdown requested, exiting scheduler loop");
                        return Ok(());
                    }
                }
                _ = tokio::time::sleep(delay) => {
                    let date = Local::now().date_naive();
                    let outcome = self.run_cycle(date).await;
                    match &outcome {
                        CycleOutcome::Completed { .. } => {
                            tracing::info!(date = %date, "Cycle completed");
                        }
                        CycleOutcome::Failed { stage, detail } => {
                            tracing::warn!(date = %date, stage = %stage, detail = %detail, "Cycle failed");
                        }
                    }

                    if *shutdown.borrow() {
                        tracing::info!("Shutdown requested during cycle, exiting scheduler loop");
                        return Ok(());
                    }
                }
            }
        }
    }

    /// Executes one full cycle for the given calendar date.
    ///
    /// Stages run strictly in sequence and short-circuit on the first
    /// failure; every failure produces exactly one operator notification.
    pub async fn run_cycle(&self, date: NaiveDate) -> CycleOutcome {
        let file_name = dated_file_name(date);
        tracing::info!(file = %file_name, "Starting cycle");

        // Fetch
        let local_path = match self.fetcher.fetch(&file_name).await {
            Ok(path) => path,
            Err(e) if e.is_unavailable() => {
                let detail = e.to_string();
                tracing::warn!(file = %file_name, "Extract not yet published");
                self.notify(&detail).await;
                return CycleOutcome::failed(Stage::Fetch, detail);
            }
            Err(e) => {
                let detail = e.to_string();
                tracing::error!(error = %e, "SFTP fetch failed");
                self.notify(&format!("Problem with sftp transfer:<br/><br/>{detail}"))
                    .await;
                return CycleOutcome::failed(Stage::Fetch, detail);
            }
        };

        // Transform (file work off the scheduling context)
        tracing::info!("Processing data");
        let transformer = self.transformer.clone();
        let transform_file = file_name.clone();
        let transformed = tokio::task::spawn_blocking(move || {
            transformer.transform(&local_path, &transform_file)
        })
        .await;

        let output = match transformed {
            Ok(Ok(output)) => output,
            Ok(Err(e)) => {
                let detail = e.to_string();
                tracing::error!(error = %e, "Transform failed");
                self.notify(&format!("Problem processing file:<br/><br/>{detail}"))
                    .await;
                return CycleOutcome::failed(Stage::Transform, detail);
            }
            Err(e) => {
                let detail = format!("transform task failed: {e}");
                tracing::error!(error = %detail, "Transform failed");
                self.notify(&format!("Problem processing file:<br/><br/>{detail}"))
                    .await;
                return CycleOutcome::failed(Stage::Transform, detail);
            }
        };

        if self.dry_run {
            tracing::info!(
                accepted = output.accepted,
                skipped = output.skipped,
                "Dry run: skipping endpoint submission"
            );
            return CycleOutcome::Completed { result: None };
        }

        // Invoke
        match self.invoker.submit(&output.rendered).await {
            Ok(result) => {
                tracing::info!(
                    status = result.status,
                    queue_id = %result.queue_id,
                    "Endpoint submission complete"
                );
                self.notify(&completion_report(&result)).await;
                CycleOutcome::Completed {
                    result: Some(result),
                }
            }
            Err(e) => {
                let detail = e.to_string();
                tracing::error!(error = %e, "Endpoint call failed");
                self.notify(&format!(
                    "Calling the integration endpoint failed:<br/><br/>{detail}"
                ))
                .await;
                CycleOutcome::failed(Stage::Invoke, detail)
            }
        }
    }

    /// Sends one operator report; delivery failure is logged, never fatal
    async fn notify(&self, message: &str) {
        if let Err(e) = self.notifier.notify(message).await {
            tracing::error!(error = %e, "Failed to send operator notification");
        }
    }
}

/// Composes the success report with the endpoint's fields verbatim
fn completion_report(result: &EndpointResult) -> String {
    format!(
        "Course relay upload is complete.<br/><br/>\
         status: {}<br/><br/>\
         error message: {}<br/><br/>\
         exception file: {}<br/><br/>\
         log file: {}<br/><br/>\
         success file: {}<br/><br/>\
         queue id: {}",
        result.status,
        result.error_message,
        result.exception_file,
        result.log_file,
        result.success_file,
        result.queue_id,
    )
}
