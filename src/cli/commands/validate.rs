//! Validate config command implementation
//!
//! This module implements the `validate-config` command for validating
//! the relay configuration file.

use crate::config::load_config;
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("Validating configuration file: {config_path}");
        println!();

        let config = match load_config(config_path) {
            Ok(c) => {
                println!("Configuration file loaded successfully");
                c
            }
            Err(e) => {
                println!("Failed to load configuration file");
                println!("   Error: {e}");
                return Ok(2);
            }
        };

        match config.validate() {
            Ok(_) => {
                println!("Configuration is valid");
                println!();
                println!("Configuration Summary:");
                println!("  Log Level: {}", config.application.log_level);
                println!("  Scheduled Time: {}", config.schedule.time_of_day);
                println!(
                    "  SFTP Server: {}:{}{}",
                    config.sftp.host, config.sftp.port, config.sftp.remote_path
                );
                println!("  Local Path: {}", config.transfer.local_path);
                println!("  Output Path: {}", config.transfer.output_path);
                println!("  Endpoint: {}", config.endpoint.url);
                println!("  Conversion Type: {}", config.endpoint.conversion_type);
                println!("  Organization: {}", config.endpoint.organization);
                println!(
                    "  Mail: {}:{} ({} -> {})",
                    config.mail.smtp_host, config.mail.smtp_port, config.mail.from, config.mail.to
                );
                println!();
                Ok(0)
            }
            Err(e) => {
                println!("Configuration validation failed");
                println!("   Error: {e}");
                println!();
                Ok(2)
            }
        }
    }
}
