//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::RelayConfig;
use crate::config::secret_string;
use crate::domain::errors::RelayError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into RelayConfig
/// 4. Applies environment variable overrides (RELAY_* prefix)
/// 5. Validates the configuration
///
/// # Arguments
///
/// * `path` - Path to the TOML configuration file
///
/// # Errors
///
/// Returns an error if:
/// - File cannot be read
/// - TOML parsing fails
/// - Environment variable substitution fails
/// - Configuration validation fails
///
/// # Examples
///
/// ```no_run
/// use course_relay::config::load_config;
///
/// let config = load_config("relay.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<RelayConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(RelayError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        RelayError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    // Perform environment variable substitution
    let contents = substitute_env_vars(&contents)?;

    // Parse TOML
    let mut config: RelayConfig = toml::from_str(&contents)
        .map_err(|e| RelayError::Configuration(format!("Failed to parse TOML: {}", e)))?;

    // Apply environment variable overrides
    apply_env_overrides(&mut config);

    // Validate configuration
    config.validate().map_err(|e| {
        RelayError::Configuration(format!("Configuration validation failed: {}", e))
    })?;

    Ok(config)
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// # Errors
///
/// Returns an error if a referenced environment variable is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}").unwrap();
    let mut result = String::new();
    let mut missing_vars = Vec::new();

    // Process line by line to skip comments
    for line in input.lines() {
        let trimmed = line.trim_start();

        // Skip comment lines - don't process env vars in comments
        if trimmed.starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    let placeholder = format!("${{{}}}", var_name);
                    processed_line = processed_line.replace(&placeholder, &value);
                }
                Err(_) => {
                    if !missing_vars.contains(&var_name.to_string()) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        result.push_str(&processed_line);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(RelayError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

/// Applies environment variable overrides using the RELAY_* prefix
///
/// Environment variables follow the pattern: RELAY_<SECTION>_<KEY>
/// For example: RELAY_SFTP_HOST, RELAY_SCHEDULE_TIME_OF_DAY
fn apply_env_overrides(config: &mut RelayConfig) {
    // Application overrides
    if let Ok(val) = std::env::var("RELAY_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }
    if let Ok(val) = std::env::var("RELAY_APPLICATION_DRY_RUN") {
        config.application.dry_run = val.parse().unwrap_or(false);
    }

    // Schedule overrides
    if let Ok(val) = std::env::var("RELAY_SCHEDULE_TIME_OF_DAY") {
        config.schedule.time_of_day = val;
    }

    // SFTP overrides
    if let Ok(val) = std::env::var("RELAY_SFTP_HOST") {
        config.sftp.host = val;
    }
    if let Ok(val) = std::env::var("RELAY_SFTP_PORT") {
        if let Ok(port) = val.parse() {
            config.sftp.port = port;
        }
    }
    if let Ok(val) = std::env::var("RELAY_SFTP_USERNAME") {
        config.sftp.username = val;
    }
    if let Ok(val) = std::env::var("RELAY_SFTP_PASSWORD") {
        config.sftp.password = secret_string(val);
    }
    if let Ok(val) = std::env::var("RELAY_SFTP_REMOTE_PATH") {
        config.sftp.remote_path = val;
    }

    // Transfer overrides
    if let Ok(val) = std::env::var("RELAY_TRANSFER_LOCAL_PATH") {
        config.transfer.local_path = val;
    }
    if let Ok(val) = std::env::var("RELAY_TRANSFER_OUTPUT_PATH") {
        config.transfer.output_path = val;
    }

    // Endpoint overrides
    if let Ok(val) = std::env::var("RELAY_ENDPOINT_URL") {
        config.endpoint.url = val;
    }
    if let Ok(val) = std::env::var("RELAY_ENDPOINT_ORGANIZATION") {
        config.endpoint.organization = val;
    }
    if let Ok(val) = std::env::var("RELAY_ENDPOINT_USERNAME") {
        config.endpoint.username = val;
    }
    if let Ok(val) = std::env::var("RELAY_ENDPOINT_PASSWORD") {
        config.endpoint.password = secret_string(val);
    }
    if let Ok(val) = std::env::var("RELAY_ENDPOINT_TIMEOUT_SECONDS") {
        if let Ok(timeout) = val.parse() {
            config.endpoint.timeout_seconds = timeout;
        }
    }

    // Mail overrides
    if let Ok(val) = std::env::var("RELAY_MAIL_SMTP_HOST") {
        config.mail.smtp_host = val;
    }
    if let Ok(val) = std::env::var("RELAY_MAIL_SMTP_PORT") {
        if let Ok(port) = val.parse() {
            config.mail.smtp_port = port;
        }
    }
    if let Ok(val) = std::env::var("RELAY_MAIL_FROM") {
        config.mail.from = val;
    }
    if let Ok(val) = std::env::var("RELAY_MAIL_TO") {
        config.mail.to = val;
    }
    if let Ok(val) = std::env::var("RELAY_MAIL_BCC") {
        config.mail.bcc = Some(val);
    }
    if let Ok(val) = std::env::var("RELAY_MAIL_SUBJECT") {
        config.mail.subject = val;
    }

    // Logging overrides
    if let Ok(val) = std::env::var("RELAY_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = val.parse().unwrap_or(false);
    }
    if let Ok(val) = std::env::var("RELAY_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }
}
