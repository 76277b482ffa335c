//! Integration tests for configuration loading and validation
//!
//! Note: Tests that modify environment variables should be run with --test-threads=1
//! to avoid interference between tests.

use course_relay::config::load_config;
use secrecy::ExposeSecret;
use std::io::Write;
use std::sync::Mutex;
use tempfile::NamedTempFile;

// Mutex to serialize tests that modify environment variables
static ENV_MUTEX: Mutex<()> = Mutex::new(());

/// Helper function to clean up environment variables
fn cleanup_env_vars() {
    std::env::remove_var("RELAY_APPLICATION_LOG_LEVEL");
    std::env::remove_var("RELAY_SCHEDULE_TIME_OF_DAY");
    std::env::remove_var("RELAY_SFTP_HOST");
    std::env::remove_var("RELAY_SFTP_PASSWORD");
    std::env::remove_var("RELAY_ENDPOINT_TIMEOUT_SECONDS");
    std::env::remove_var("TEST_RELAY_SFTP_PASSWORD");
    std::env::remove_var("TEST_RELAY_ENDPOINT_PASSWORD");
}

fn write_config(toml_content: &str) -> NamedTempFile {
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file.write_all(toml_content.as_bytes()).unwrap();
    temp_file.flush().unwrap();
    temp_file
}

const COMPLETE_CONFIG: &str = r#"
[application]
log_level = "debug"
dry_run = true

[schedule]
time_of_day = "05:15:00"

[sftp]
host = "sftp.example.com"
port = 2222
username = "relay"
password = "sftp-pass"
remote_path = "/outbound/courses"

[transfer]
local_path = "/var/relay/in"
output_path = "/var/relay/out"

[endpoint]
url = "https://hr.example.com/integration/conversion.asmx"
organization = "Example Organisation"
username = "svc"
password = "svc-pass"
conversion_type = "LEARNEVENTS"
key_field = "PERREF"
field_separator = ","
timeout_seconds = 90

[mail]
smtp_host = "smtp.example.com"
smtp_port = 2525
from = "relay@example.com"
to = "ops@example.com"
bcc = "audit@example.com"
subject = "Daily course relay"
signature = "Solutions Delivery Team"

[logging]
local_enabled = false
local_path = "/tmp/course-relay"
local_rotation = "daily"
"#;

#[test]
fn test_load_complete_config() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    let temp_file = write_config(COMPLETE_CONFIG);
    let config = load_config(temp_file.path()).expect("Failed to load config");

    // Verify application config
    assert_eq!(config.application.log_level, "debug");
    assert!(config.application.dry_run);

    // Verify schedule config
    assert_eq!(config.schedule.time_of_day, "05:15:00");

    // Verify SFTP config
    assert_eq!(config.sftp.host, "sftp.example.com");
    assert_eq!(config.sftp.port, 2222);
    assert_eq!(config.sftp.username, "relay");
    assert_eq!(config.sftp.password.expose_secret().as_ref(), "sftp-pass");
    assert_eq!(config.sftp.remote_path, "/outbound/courses");

    // Verify transfer config
    assert_eq!(config.transfer.local_path, "/var/relay/in");
    assert_eq!(config.transfer.output_path, "/var/relay/out");

    // Verify endpoint config
    assert_eq!(
        config.endpoint.url,
        "https://hr.example.com/integration/conversion.asmx"
    );
    assert_eq!(config.endpoint.organization, "Example Organisation");
    assert_eq!(config.endpoint.timeout_seconds, 90);

    // Verify mail config
    assert_eq!(config.mail.smtp_host, "smtp.example.com");
    assert_eq!(config.mail.smtp_port, 2525);
    assert_eq!(config.mail.bcc, Some("audit@example.com".to_string()));
    assert_eq!(
        config.mail.signature,
        Some("Solutions Delivery Team".to_string())
    );

    // Verify logging config
    assert!(!config.logging.local_enabled);
    assert_eq!(config.logging.local_path, "/tmp/course-relay");
}

#[test]
fn test_load_minimal_config_with_defaults() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    let toml_content = r#"
[sftp]
host = "sftp.example.com"
username = "relay"
password = "sftp-pass"
remote_path = "/outbound/courses"

[transfer]
local_path = "/var/relay/in"
output_path = "/var/relay/out"

[endpoint]
url = "https://hr.example.com/integration/conversion.asmx"
organization = "Example Organisation"
username = "svc"
password = "svc-pass"

[mail]
smtp_host = "smtp.example.com"
from = "relay@example.com"
to = "ops@example.com"
subject = "Daily course relay"
"#;

    let temp_file = write_config(toml_content);
    let config = load_config(temp_file.path()).expect("Failed to load config");

    // Verify defaults are applied
    assert_eq!(config.application.log_level, "info");
    assert!(!config.application.dry_run);
    assert_eq!(config.schedule.time_of_day, "04:00:00");
    assert_eq!(config.sftp.port, 22);
    assert_eq!(config.endpoint.conversion_type, "LEARNEVENTS");
    assert_eq!(config.endpoint.key_field, "PERREF");
    assert_eq!(config.endpoint.field_separator, ",");
    assert_eq!(config.endpoint.timeout_seconds, 60);
    assert_eq!(config.mail.smtp_port, 25);
    assert_eq!(config.mail.bcc, None);
    assert_eq!(config.logging.local_rotation, "daily");
}

#[test]
fn test_env_var_substitution() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();
    std::env::set_var("TEST_RELAY_SFTP_PASSWORD", "secret-sftp");
    std::env::set_var("TEST_RELAY_ENDPOINT_PASSWORD", "secret-endpoint");

    let toml_content = r#"
[sftp]
host = "sftp.example.com"
username = "relay"
password = "${TEST_RELAY_SFTP_PASSWORD}"
remote_path = "/outbound/courses"

[transfer]
local_path = "/var/relay/in"
output_path = "/var/relay/out"

[endpoint]
url = "https://hr.example.com/integration/conversion.asmx"
organization = "Example Organisation"
username = "svc"
password = "${TEST_RELAY_ENDPOINT_PASSWORD}"

[mail]
smtp_host = "smtp.example.com"
from = "relay@example.com"
to = "ops@example.com"
subject = "Daily course relay"
"#;

    let temp_file = write_config(toml_content);
    let config = load_config(temp_file.path()).expect("Failed to load config");

    assert_eq!(config.sftp.password.expose_secret().as_ref(), "secret-sftp");
    assert_eq!(
        config.endpoint.password.expose_secret().as_ref(),
        "secret-endpoint"
    );

    std::env::remove_var("TEST_RELAY_SFTP_PASSWORD");
    std::env::remove_var("TEST_RELAY_ENDPOINT_PASSWORD");
}

#[test]
fn test_missing_env_var_fails_load() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    let toml_content = r#"
[sftp]
host = "sftp.example.com"
username = "relay"
password = "${TEST_RELAY_SFTP_PASSWORD}"
remote_path = "/outbound/courses"

[transfer]
local_path = "/var/relay/in"
output_path = "/var/relay/out"

[endpoint]
url = "https://hr.example.com/integration/conversion.asmx"
organization = "Example Organisation"
username = "svc"
password = "svc-pass"

[mail]
smtp_host = "smtp.example.com"
from = "relay@example.com"
to = "ops@example.com"
subject = "Daily course relay"
"#;

    let temp_file = write_config(toml_content);
    let result = load_config(temp_file.path());
    assert!(result.is_err());
    let message = result.unwrap_err().to_string();
    assert!(message.contains("TEST_RELAY_SFTP_PASSWORD"));
}

#[test]
fn test_env_var_overrides() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();
    std::env::set_var("RELAY_APPLICATION_LOG_LEVEL", "trace");
    std::env::set_var("RELAY_SCHEDULE_TIME_OF_DAY", "22:45:00");
    std::env::set_var("RELAY_ENDPOINT_TIMEOUT_SECONDS", "120");

    let temp_file = write_config(COMPLETE_CONFIG);
    let config = load_config(temp_file.path()).expect("Failed to load config");

    // Verify env var overrides took effect
    assert_eq!(config.application.log_level, "trace");
    assert_eq!(config.schedule.time_of_day, "22:45:00");
    assert_eq!(config.endpoint.timeout_seconds, 120);

    cleanup_env_vars();
}

#[test]
fn test_invalid_config_validation() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    let toml_content = COMPLETE_CONFIG.replace("05:15:00", "25:99:00");
    let temp_file = write_config(&toml_content);
    let result = load_config(temp_file.path());
    assert!(result.is_err());
}
