//! # Course Relay - daily course completion upload
//!
//! Course Relay is an unattended daily job that moves course completion data
//! from a learning platform's SFTP drop into an HR integration endpoint.
//!
//! ## Overview
//!
//! Once a day, at a configured time, the relay:
//! - **Fetches** the dated CSV extract (`yyyy-mm-dd.csv`) from an SFTP server
//! - **Transforms** the records into the upload layout, dropping rows without
//!   a valid person reference
//! - **Submits** the rendered file to the HR conversion service over HTTPS
//! - **Notifies** the operators by email on both failure and success
//!
//! A missing extract or a failed stage ends the cycle with a notification;
//! the scheduler re-arms for the next day regardless of the outcome.
//!
//! ## Architecture
//!
//! The crate follows a layered architecture:
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Business logic (schedule, scheduler, transform)
//! - [`adapters`] - External integrations (SFTP, endpoint, mail)
//! - [`domain`] - Core domain types and models
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging and observability
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use course_relay::config::load_config;
//! use course_relay::core::scheduler::PipelineScheduler;
//! use tokio::sync::watch;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = load_config("relay.toml")?;
//!     let scheduler = PipelineScheduler::from_config(&config)?;
//!
//!     let (_shutdown_tx, shutdown_rx) = watch::channel(false);
//!     scheduler.run(shutdown_rx).await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! All fallible operations return [`domain::Result`], with stage-specific
//! error types ([`domain::errors::FetchError`],
//! [`domain::errors::TransformError`], [`domain::errors::EndpointError`],
//! [`domain::errors::NotifyError`]) converging on
//! [`domain::RelayError`] at the top level:
//!
//! ```rust,no_run
//! use course_relay::domain::RelayError;
//!
//! fn example() -> Result<(), RelayError> {
//!     let config = course_relay::config::load_config("relay.toml")?;
//!     Ok(())
//! }
//! ```
//!
//! ## Logging
//!
//! The relay uses structured logging with the `tracing` crate:
//!
//! ```rust,no_run
//! use tracing::{info, warn, error};
//!
//! info!("Starting cycle");
//! warn!(file = "2024-05-01.csv", "Extract not yet published");
//! error!(error = "timeout", "Endpoint call failed");
//! ```

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
