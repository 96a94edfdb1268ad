//! Status command implementation
//!
//! This module implements the `status` command for displaying what each
//! job has on disk. It never talks to the Figma API.

use crate::config::load_config;
use crate::core::sync::snapshot_png_files;
use crate::domain::ResultExt;
use chrono::{DateTime, Utc};
use clap::Args;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// Arguments for the status command
#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Filter by job name
    #[arg(long)]
    pub job: Option<String>,
}

impl StatusArgs {
    /// Execute the status command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!("Checking sync status");

        println!("📊 Sync Status");
        println!();

        // Load configuration
        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                println!("❌ Failed to load configuration file");
                println!("   Error: {e}");
                return Ok(2); // Configuration error exit code
            }
        };

        if config.jobs.is_empty() {
            println!("No jobs configured.");
            println!("Add [[jobs]] entries to {config_path} and run 'figsync sync'.");
            return Ok(0);
        }

        // Filter jobs if requested
        let filtered_jobs: Vec<_> = config
            .jobs
            .iter()
            .filter(|j| {
                if let Some(ref name) = self.job {
                    if j.name != *name {
                        return false;
                    }
                }
                true
            })
            .collect();

        if filtered_jobs.is_empty() {
            println!("No jobs match the specified filter.");
            return Ok(0);
        }

        // Display jobs in table format
        println!("Found {} job(s):", filtered_jobs.len());
        println!();
        println!(
            "{:<20} {:<36} {:<12} {:<8} {:<20}",
            "Job", "Directory", "Status", "Files", "Last Modified"
        );
        println!("{}", "-".repeat(96));

        for job in filtered_jobs {
            let directory = Path::new(&job.export_directory);
            let files = match snapshot_png_files(directory)
                .with_context(|| format!("Failed to scan directory for job '{}'", job.name))
            {
                Ok(f) => f,
                Err(e) => {
                    println!("❌ Failed to scan export directory");
                    println!("   Error: {e}");
                    return Ok(5); // Fatal error exit code
                }
            };

            let status = if files.is_empty() {
                "⏸️  Empty"
            } else {
                "✅ Synced"
            };

            let last_modified = if let Some(modified) = newest_modification(&files) {
                let timestamp: DateTime<Utc> = modified.into();
                timestamp.format("%Y-%m-%d %H:%M:%S").to_string()
            } else {
                "Never".to_string()
            };

            println!(
                "{:<20} {:<36} {:<12} {:<8} {:<20}",
                job.name,
                job.export_directory,
                status,
                files.len(),
                last_modified
            );
        }

        println!();
        Ok(0)
    }
}

/// Newest modification time across a set of files
///
/// Files that vanish between listing and stat are skipped.
fn newest_modification(files: &std::collections::HashSet<PathBuf>) -> Option<SystemTime> {
    files
        .iter()
        .filter_map(|path| fs::metadata(path).and_then(|m| m.modified()).ok())
        .max()
}
