//! Domain error types
//!
//! This module defines the error hierarchy for the relay. All errors are
//! domain-specific and don't expose third-party types; stage boundaries catch
//! them, turn them into notifications, and hand a typed outcome back to the
//! scheduler.

use thiserror::Error;

/// Main relay error type
///
/// This is the primary error type used throughout the application.
/// It wraps stage-specific error types and provides context for error handling.
#[derive(Debug, Error)]
pub enum RelayError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Remote fetch errors (SFTP)
    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    /// Record transformation errors
    #[error("Transform error: {0}")]
    Transform(#[from] TransformError),

    /// Integration endpoint errors
    #[error("Endpoint error: {0}")]
    Endpoint(#[from] EndpointError),

    /// Operator notification errors
    #[error("Notification error: {0}")]
    Notify(#[from] NotifyError),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Generic errors with context
    #[error("{0}")]
    Other(String),
}

/// Errors from the remote file fetch stage
///
/// `Unavailable` is the expected "not published yet" condition and is reported
/// to operators with a distinct message; everything else carries full transport
/// detail. These errors don't expose ssh2 types.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The dated file is not present on the remote server
    #[error("Today's file is not available: {0}")]
    Unavailable(String),

    /// Failed to reach the remote server
    #[error("Failed to connect to SFTP server: {0}")]
    Connection(String),

    /// Authentication with the remote server failed
    #[error("SFTP authentication failed: {0}")]
    Authentication(String),

    /// The transfer itself failed
    #[error("SFTP transfer failed: {0}")]
    Transfer(String),

    /// Local file I/O failed while writing the download
    #[error("Local file error: {0}")]
    Io(String),
}

impl FetchError {
    /// Whether this is the expected "file not published yet" condition
    pub fn is_unavailable(&self) -> bool {
        matches!(self, FetchError::Unavailable(_))
    }
}

/// Errors from the record transformation stage
#[derive(Debug, Error)]
pub enum TransformError {
    /// The source file could not be parsed as header-tagged CSV
    #[error("Failed to parse source file: {0}")]
    Parse(String),

    /// Reading the source file or writing the output file failed
    #[error("File error: {0}")]
    Io(String),
}

/// Errors from the integration endpoint stage
///
/// These errors don't expose reqwest types.
#[derive(Debug, Error)]
pub enum EndpointError {
    /// The endpoint could not be reached
    #[error("Failed to call integration endpoint: {0}")]
    Connection(String),

    /// The endpoint answered with something we could not interpret
    #[error("Invalid response from integration endpoint: {0}")]
    InvalidResponse(String),

    /// The endpoint answered with a fault
    #[error("Integration endpoint fault: {status} - {message}")]
    Fault { status: u16, message: String },
}

/// Errors from the operator notification collaborator
///
/// These are swallowed at the scheduler (logged, never fatal): a failed report
/// must not take the relay down with it.
#[derive(Debug, Error)]
pub enum NotifyError {
    /// The message could not be built (bad addresses, body)
    #[error("Failed to compose notification: {0}")]
    Compose(String),

    /// The SMTP send failed
    #[error("Failed to send notification: {0}")]
    Send(String),
}

// Conversion from std::io::Error
impl From<std::io::Error> for RelayError {
    fn from(err: std::io::Error) -> Self {
        RelayError::Io(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for RelayError {
    fn from(err: toml::de::Error) -> Self {
        RelayError::Configuration(format!("TOML parse error: {err}"))
    }
}

impl From<csv::Error> for TransformError {
    fn from(err: csv::Error) -> Self {
        TransformError::Parse(err.to_string())
    }
}

impl From<std::io::Error> for TransformError {
    fn from(err: std::io::Error) -> Self {
        TransformError::Io(err.to_string())
    }
}

impl From<std::io::Error> for FetchError {
    fn from(err: std::io::Error) -> Self {
        FetchError::Io(err.to_string())
    }
}

impl From<reqwest::Error> for EndpointError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_connect() || err.is_timeout() {
            EndpointError::Connection(err.to_string())
        } else {
            EndpointError::InvalidResponse(err.to_string())
        }
    }
}
