//! Configuration management for the relay.
//!
//! TOML configuration files with support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - `RELAY_*` environment variable overrides
//! - Default values for optional settings
//! - Validation on load
//! - `secrecy`-protected credentials
//!
//! # Example Configuration
//!
//! ```toml
//! [schedule]
//! time_of_day = "04:00:00"
//!
//! [sftp]
//! host = "sftp.example.com"
//! username = "relay"
//! password = "${RELAY_SFTP_PASSWORD}"
//! remote_path = "/outbound/"
//!
//! [transfer]
//! local_path = "/var/relay/in"
//! output_path = "/var/relay/out"
//!
//! [endpoint]
//! url = "https://hr.example.com/conversion"
//! organization = "Example Org"
//! username = "svc_account"
//! password = "${RELAY_ENDPOINT_PASSWORD}"
//!
//! [mail]
//! smtp_host = "smtp.example.com"
//! from = "relay@example.com"
//! to = "ops@example.com"
//! subject = "Daily course relay"
//! ```

pub mod loader;
pub mod schema;
pub mod secret;

// Re-export commonly used types
pub use loader::load_config;
pub use schema::{
    ApplicationConfig, EndpointConfig, LoggingConfig, MailConfig, RelayConfig, ScheduleSection,
    SftpConfig, TransferConfig,
};
pub use secret::{secret_string, SecretString, SecretValue};
