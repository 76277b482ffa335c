//! Init command implementation
//!
//! This module implements the `init` command for generating a sample
//! configuration file.

use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "relay.toml")]
    pub output: String,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        println!("Initializing relay configuration");
        println!();

        if Path::new(&self.output).exists() && !self.force {
            println!("Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(2);
        }

        match fs::write(&self.output, Self::generate_config()) {
            Ok(_) => {
                println!("Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Edit {} with your settings", self.output);
                println!("  2. Create a .env file with your credentials:");
                println!("     - Set RELAY_SFTP_PASSWORD");
                println!("     - Set RELAY_ENDPOINT_PASSWORD");
                println!("  3. Validate configuration: course-relay validate-config");
                println!("  4. Test a cycle: course-relay run-once --dry-run");
                println!("  5. Start the scheduler: course-relay run");
                println!();
                Ok(0)
            }
            Err(e) => {
                println!("Failed to write configuration file");
                println!("   Error: {}", e);
                Ok(5)
            }
        }
    }

    /// Generate sample configuration
    fn generate_config() -> String {
        r#"# Course Relay Configuration File
# Daily course completion upload: SFTP extract -> HR integration endpoint

[application]
# Log level (trace, debug, info, warn, error)
log_level = "info"

# Dry run mode (fetch and transform without calling the endpoint)
dry_run = false

[schedule]
# Time of day for the daily cycle (HH:MM:SS, local time)
time_of_day = "04:00:00"

[sftp]
# Server publishing the daily extract
host = "sftp.example.com"
port = 22
username = "relay"
password = "${RELAY_SFTP_PASSWORD}"

# Remote directory containing the dated extract files
remote_path = "/outbound/courses"

[transfer]
# Where fetched extracts are written
local_path = "/var/lib/course-relay/incoming"

# Where reshaped upload files are written
output_path = "/var/lib/course-relay/outgoing"

[endpoint]
# HR integration conversion service
url = "https://hr.example.com/integration/conversion.asmx"
organization = "Example Organisation"
username = "svc-relay"
password = "${RELAY_ENDPOINT_PASSWORD}"

# Conversion parameters (rarely need changing)
conversion_type = "LEARNEVENTS"
key_field = "PERREF"
field_separator = ","
timeout_seconds = 60

[mail]
# Operator notification relay (plain SMTP, no credentials)
smtp_host = "smtp.example.com"
smtp_port = 25
from = "course-relay@example.com"
to = "ops@example.com"
# bcc = "audit@example.com"
subject = "Daily course relay"
# signature = "Solutions Delivery Team"

[logging]
# Enable local file logging (console logging is always on)
local_enabled = true
local_path = "/var/log/course-relay"
local_rotation = "daily"
"#
        .to_string()
    }
}
