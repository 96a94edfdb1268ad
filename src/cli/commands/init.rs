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
    #[arg(short, long, default_value = "figsync.toml")]
    pub output: String,

    /// Include example values and comments
    #[arg(long)]
    pub with_examples: bool,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        println!("📝 Initializing figsync configuration");
        println!();

        // Check if file already exists
        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(2); // Configuration error exit code
        }

        // Generate configuration content
        let config_content = if self.with_examples {
            Self::generate_config_with_examples()
        } else {
            Self::generate_minimal_config()
        };

        // Write to file
        match fs::write(&self.output, config_content) {
            Ok(_) => {
                println!("✅ Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Edit {} with your file key and jobs", self.output);
                println!("  2. Set FIGSYNC_API_TOKEN to a Figma personal access token");
                println!("     (or put it in a .env file next to the config)");
                println!("  3. Validate configuration: figsync validate-config");
                println!("  4. Run sync: figsync sync");
                println!();
                Ok(0)
            }
            Err(e) => {
                println!("❌ Failed to write configuration file");
                println!("   Error: {e}");
                Ok(5) // Fatal error exit code
            }
        }
    }

    /// Generate minimal configuration
    fn generate_minimal_config() -> String {
        r#"# figsync Configuration File
# Syncs rendered Figma nodes into local PNG directories

[application]
log_level = "info"

[api]
file_key = "your-file-key"
token = "${FIGSYNC_API_TOKEN}"

[downloads]
max_concurrent = 5

[logging]
file_enabled = false

[[jobs]]
name = "icons"
node_id = "1:2"
export_directory = "assets/icons"
batch_size = 50
auto_crop = true
padding = 0

[jobs.import]
readable = false
"#
        .to_string()
    }

    /// Generate configuration with examples and comments
    fn generate_config_with_examples() -> String {
        r#"# figsync Configuration File
#
# Syncs rendered Figma nodes into local PNG directories. Each [[jobs]]
# entry exports the direct children of one Figma node into one directory,
# then deletes PNG files in that directory that the sync did not produce.
#
# The file key is the part of the Figma URL after /file/:
#   https://www.figma.com/file/<file_key>/<title>

# ============================================================================
# Application Settings
# ============================================================================
[application]
# Log level (trace, debug, info, warn, error)
log_level = "info"

# ============================================================================
# Figma API Configuration
# ============================================================================
[api]
# Base URL of the Figma REST API
base_url = "https://api.figma.com"

# File key of the document to sync from
file_key = "your-file-key"

# Personal access token (use an environment variable)
token = "${FIGSYNC_API_TOKEN}"

# Request timeout in seconds
timeout_seconds = 30

# Retry policy for transient API failures
[api.retry]
max_retries = 3
initial_delay_ms = 1000
max_delay_ms = 30000
backoff_multiplier = 2.0

# ============================================================================
# Download Settings
# ============================================================================
[downloads]
# Maximum concurrent image downloads across the whole run (1-64)
max_concurrent = 5

# ============================================================================
# Logging Configuration
# ============================================================================
[logging]
# Enable JSON file logging alongside console output
file_enabled = false

# Directory for log files
file_path = "logs"

# Log rotation (daily, hourly, never)
file_rotation = "daily"

# ANSI colors on console output
ansi = true

# ============================================================================
# Sync Jobs
# ============================================================================
# Each job exports the direct children of node_id into export_directory.
# Children of COMPONENT_SET nodes become "<set name>/<variant>.png".
[[jobs]]
# Job name, used for `figsync sync --job <name>` and logging
name = "icons"

# Root node to export from, as shown in the Figma URL (e.g. "1:2")
node_id = "1:2"

# Directory the PNG files are written into
export_directory = "assets/icons"

# Nodes per image-URL request (1-500)
batch_size = 50

# Crop each image to the bounding box of its non-transparent pixels
auto_crop = true

# Transparent padding in pixels added on every side after cropping
padding = 0

# Exact target dimensions (stretch, no aspect preservation)
# resize_to = { width = 128, height = 128 }

# Expand the canvas so both dimensions are powers of two
expand_to_power_of_two = false

# Settings handed to the asset-import collaborator after reconciliation
[jobs.import]
readable = false
# android_format = "ETC2_RGBA8"
# ios_format = "ASTC_6x6"
# standalone_format = "DXT5"
"#
        .to_string()
    }
}
