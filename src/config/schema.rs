//! Configuration schema types
//!
//! This module defines the configuration structure for the relay. Every
//! section carries its own `validate()`; the loader runs them all after
//! parsing so a bad config fails at startup, not at 4am.

use crate::config::SecretString;
use chrono::NaiveTime;
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};

/// Main relay configuration
///
/// This is the root configuration structure that maps to the TOML file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelayConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Daily schedule settings
    #[serde(default)]
    pub schedule: ScheduleSection,

    /// SFTP source server configuration
    pub sftp: SftpConfig,

    /// Local transfer paths
    pub transfer: TransferConfig,

    /// Integration endpoint configuration
    pub endpoint: EndpointConfig,

    /// Operator notification configuration
    pub mail: MailConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl RelayConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.schedule.validate()?;
        self.sftp.validate()?;
        self.transfer.validate()?;
        self.endpoint.validate()?;
        self.mail.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Dry run mode: fetch and transform, but never call the endpoint
    #[serde(default)]
    pub dry_run: bool,
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            dry_run: false,
        }
    }
}

/// Daily schedule configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleSection {
    /// Wall-clock time of day the cycle runs at, `HH:MM:SS` local time
    #[serde(default = "default_time_of_day")]
    pub time_of_day: String,
}

impl ScheduleSection {
    fn validate(&self) -> Result<(), String> {
        self.parsed_time_of_day().map(|_| ())
    }

    /// Parses the configured time of day
    ///
    /// # Errors
    ///
    /// Returns an error if the value is not a valid `HH:MM:SS` time
    pub fn parsed_time_of_day(&self) -> Result<NaiveTime, String> {
        NaiveTime::parse_from_str(&self.time_of_day, "%H:%M:%S").map_err(|e| {
            format!(
                "Invalid schedule.time_of_day '{}': {} (expected HH:MM:SS)",
                self.time_of_day, e
            )
        })
    }
}

impl Default for ScheduleSection {
    fn default() -> Self {
        Self {
            time_of_day: default_time_of_day(),
        }
    }
}

/// SFTP source server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SftpConfig {
    /// Hostname of the SFTP server
    pub host: String,

    /// TCP port
    #[serde(default = "default_sftp_port")]
    pub port: u16,

    /// Username for authentication
    pub username: String,

    /// Password for authentication
    /// Stored securely in memory and automatically zeroized on drop
    pub password: SecretString,

    /// Remote directory the dated extract is published to
    pub remote_path: String,
}

impl SftpConfig {
    fn validate(&self) -> Result<(), String> {
        if self.host.is_empty() {
            return Err("sftp.host cannot be empty".to_string());
        }
        if self.username.is_empty() {
            return Err("sftp.username cannot be empty".to_string());
        }
        if self.password.expose_secret().is_empty() {
            return Err("sftp.password cannot be empty".to_string());
        }
        if self.remote_path.is_empty() {
            return Err("sftp.remote_path cannot be empty".to_string());
        }
        Ok(())
    }
}

/// Local transfer paths
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransferConfig {
    /// Directory the downloaded extract is written to
    pub local_path: String,

    /// Directory the rendered output file is written to
    pub output_path: String,
}

impl TransferConfig {
    fn validate(&self) -> Result<(), String> {
        if self.local_path.is_empty() {
            return Err("transfer.local_path cannot be empty".to_string());
        }
        if self.output_path.is_empty() {
            return Err("transfer.output_path cannot be empty".to_string());
        }
        Ok(())
    }
}

/// Integration endpoint configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EndpointConfig {
    /// URL of the conversion service
    pub url: String,

    /// Conversion type tag passed on every call
    #[serde(default = "default_conversion_type")]
    pub conversion_type: String,

    /// Key field name the endpoint matches people on
    #[serde(default = "default_key_field")]
    pub key_field: String,

    /// Field separator of the submitted payload
    #[serde(default = "default_field_separator")]
    pub field_separator: String,

    /// Organization name the submission runs under
    pub organization: String,

    /// Service account username
    pub username: String,

    /// Service account password
    /// Stored securely in memory and automatically zeroized on drop
    pub password: SecretString,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

impl EndpointConfig {
    fn validate(&self) -> Result<(), String> {
        if self.url.is_empty() {
            return Err("endpoint.url cannot be empty".to_string());
        }
        if !self.url.starts_with("http://") && !self.url.starts_with("https://") {
            return Err("endpoint.url must start with http:// or https://".to_string());
        }
        if self.organization.is_empty() {
            return Err("endpoint.organization cannot be empty".to_string());
        }
        if self.username.is_empty() {
            return Err("endpoint.username cannot be empty".to_string());
        }
        if self.password.expose_secret().is_empty() {
            return Err("endpoint.password cannot be empty".to_string());
        }
        if self.timeout_seconds == 0 {
            return Err("endpoint.timeout_seconds must be greater than 0".to_string());
        }
        Ok(())
    }
}

/// Operator notification configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MailConfig {
    /// SMTP relay host (plain connection, no implicit credentials)
    pub smtp_host: String,

    /// SMTP port
    #[serde(default = "default_smtp_port")]
    pub smtp_port: u16,

    /// Sender address
    pub from: String,

    /// Operator distribution list address
    pub to: String,

    /// BCC address
    #[serde(default)]
    pub bcc: Option<String>,

    /// Subject line used for every report
    pub subject: String,

    /// Optional signature block appended to every report
    #[serde(default)]
    pub signature: Option<String>,
}

impl MailConfig {
    fn validate(&self) -> Result<(), String> {
        if self.smtp_host.is_empty() {
            return Err("mail.smtp_host cannot be empty".to_string());
        }
        if self.from.is_empty() {
            return Err("mail.from cannot be empty".to_string());
        }
        if self.to.is_empty() {
            return Err("mail.to cannot be empty".to_string());
        }
        if self.subject.is_empty() {
            return Err("mail.subject cannot be empty".to_string());
        }
        Ok(())
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable local file logging
    #[serde(default)]
    pub local_enabled: bool,

    /// Directory for local log files
    #[serde(default = "default_log_path")]
    pub local_path: String,

    /// Rotation policy (daily or hourly)
    #[serde(default = "default_rotation")]
    pub local_rotation: String,
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "hourly"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }
        if self.local_enabled && self.local_path.is_empty() {
            return Err("logging.local_path cannot be empty when local_enabled".to_string());
        }
        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_log_path(),
            local_rotation: default_rotation(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_time_of_day() -> String {
    "04:00:00".to_string()
}

fn default_sftp_port() -> u16 {
    22
}

fn default_conversion_type() -> String {
    "LEARNEVENTS".to_string()
}

fn default_key_field() -> String {
    "PERREF".to_string()
}

fn default_field_separator() -> String {
    ",".to_string()
}

fn default_timeout_seconds() -> u64 {
    60
}

fn default_smtp_port() -> u16 {
    25
}

fn default_log_path() -> String {
    "logs".to_string()
}

fn default_rotation() -> String {
    "daily".to_string()
}
