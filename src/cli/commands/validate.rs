//! Validate config command implementation
//!
//! This module implements the `validate-config` command for validating
//! the figsync configuration file.

use crate::config::load_config;
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("🔍 Validating configuration file: {config_path}");
        println!();

        // Load configuration
        let config = match load_config(config_path) {
            Ok(c) => {
                println!("✅ Configuration file loaded successfully");
                c
            }
            Err(e) => {
                println!("❌ Failed to load configuration file");
                println!("   Error: {e}");
                return Ok(2); // Configuration error exit code
            }
        };

        // Validate configuration
        match config.validate() {
            Ok(_) => {
                println!("✅ Configuration is valid");
                println!();
                println!("Configuration Summary:");
                println!("  Log Level: {}", config.application.log_level);
                println!("  Figma API: {}", config.api.base_url);
                println!("  File Key: {}", config.api.file_key);
                println!("  Request Timeout: {}s", config.api.timeout_seconds);
                println!("  Max Retries: {}", config.api.retry.max_retries);
                println!(
                    "  Concurrent Downloads: {}",
                    config.downloads.max_concurrent
                );
                println!(
                    "  File Logging: {}",
                    if config.logging.file_enabled {
                        &config.logging.file_path
                    } else {
                        "disabled"
                    }
                );
                println!();
                println!("Jobs ({}):", config.jobs.len());
                for job in &config.jobs {
                    println!("  {} -> {}", job.name, job.export_directory);
                    println!("    Node: {}", job.node_id);
                    println!("    Batch Size: {}", job.batch_size);

                    let mut transforms = Vec::new();
                    if job.auto_crop {
                        transforms.push("auto-crop".to_string());
                    }
                    if job.padding > 0 {
                        transforms.push(format!("padding {}px", job.padding));
                    }
                    if let Some(resize) = &job.resize_to {
                        transforms.push(format!("resize {}x{}", resize.width, resize.height));
                    }
                    if job.expand_to_power_of_two {
                        transforms.push("power-of-two".to_string());
                    }
                    if !transforms.is_empty() {
                        println!("    Transforms: {}", transforms.join(", "));
                    }
                }
                println!();
                Ok(0)
            }
            Err(e) => {
                println!("❌ Configuration validation failed");
                println!("   Error: {e}");
                println!();
                Ok(2) // Configuration error exit code
            }
        }
    }
}
