//! Logging and observability
//!
//! Structured logging via `tracing`: console output always, optional
//! JSON-formatted local files with rotation.
//!
//! # Example
//!
//! ```no_run
//! use course_relay::logging::init_logging;
//! use course_relay::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!("Application started");
//! ```

pub mod structured;

// Re-export commonly used items
pub use structured::{init_logging, LoggingGuard};
