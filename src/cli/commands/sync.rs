//! Sync command implementation
//!
//! This module implements the `sync` command for exporting rendered Figma
//! nodes into the configured local directories.

use crate::adapters::figma::{FigmaApi, FigmaClient};
use crate::adapters::import::TracingImporter;
use crate::config::{load_config, JobConfig};
use crate::core::sync::{JobRunner, LogProgress, ShutdownSignal};
use clap::Args;
use std::sync::Arc;
use tokio::sync::watch;

/// Arguments for the sync command
#[derive(Args, Debug)]
pub struct SyncArgs {
    /// Skip confirmation prompt
    #[arg(short, long)]
    pub yes: bool,

    /// Sync only the named job instead of every configured job
    #[arg(long)]
    pub job: Option<String>,

    /// Override the maximum number of concurrent downloads
    #[arg(long)]
    pub max_concurrent: Option<usize>,
}

impl SyncArgs {
    /// Execute the sync command
    pub async fn execute(
        &self,
        config_path: &str,
        shutdown_signal: watch::Receiver<bool>,
    ) -> anyhow::Result<i32> {
        tracing::info!("Starting sync command");

        // Load configuration
        let mut config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                tracing::error!(error = %e, "Failed to load configuration");
                eprintln!("Failed to load configuration: {e}");
                return Ok(2); // Configuration error exit code
            }
        };

        // Apply CLI overrides
        if let Some(max_concurrent) = self.max_concurrent {
            tracing::info!(
                max_concurrent = max_concurrent,
                "Overriding download concurrency from CLI"
            );
            config.downloads.max_concurrent = max_concurrent;
        }

        // Validate configuration
        if let Err(e) = config.validate() {
            tracing::error!(error = %e, "Configuration validation failed");
            eprintln!("Configuration validation failed: {e}");
            return Ok(2); // Configuration error exit code
        }

        // Job selection
        let jobs: Vec<JobConfig> = match &self.job {
            Some(name) => match config.job(name) {
                Some(job) => vec![job.clone()],
                None => {
                    let available: Vec<&str> =
                        config.jobs.iter().map(|j| j.name.as_str()).collect();
                    tracing::error!(job = %name, "Unknown job name");
                    eprintln!("Unknown job '{name}'. Available jobs: {available:?}");
                    return Ok(2); // Configuration error exit code
                }
            },
            None => config.jobs.clone(),
        };

        // Confirmation prompt (unless --yes)
        if !self.yes {
            println!("Sync Configuration:");
            println!("  File: {}", config.api.file_key);
            println!("  Jobs:");
            for job in &jobs {
                println!("    - {} -> {}", job.name, job.export_directory);
            }
            println!();
            println!("  PNG files in these directories that are not part of the sync");
            println!("  will be deleted.");
            println!();
            print!("Proceed with sync? [y/N]: ");
            use std::io::{self, Write};
            io::stdout().flush()?;

            let mut input = String::new();
            io::stdin().read_line(&mut input)?;

            if !input.trim().eq_ignore_ascii_case("y") {
                println!("Sync cancelled.");
                return Ok(0);
            }
        }

        // Verify API connectivity before starting any job
        tracing::info!("Checking Figma API connectivity");
        let client = FigmaClient::new(&config.api);
        if let Err(e) = client.health_check().await {
            tracing::error!(error = %e, "Figma API unreachable");
            eprintln!("Failed to reach the Figma API: {e}");
            return Ok(4); // Connection error exit code
        }

        let api: Arc<dyn FigmaApi> = Arc::new(client);
        let importer = Arc::new(TracingImporter::new());
        let progress = Arc::new(LogProgress::new());

        let runner = match JobRunner::from_config(&config, api, importer, progress) {
            Ok(r) => r,
            Err(e) => {
                tracing::error!(error = %e, "Failed to create job runner");
                eprintln!("Failed to initialize sync: {e}");
                return Ok(2); // Configuration error exit code
            }
        };

        // Execute sync
        tracing::info!(job_count = jobs.len(), "Executing sync");
        println!("🚀 Starting sync...");
        println!();

        let summary = match runner
            .sync_all(&jobs, ShutdownSignal::new(shutdown_signal))
            .await
        {
            Ok(s) => s,
            Err(e) => {
                tracing::error!(error = %e, "Sync failed");
                eprintln!("Sync failed: {e}");
                return Ok(5); // Fatal error exit code
            }
        };

        // Display summary
        println!();
        println!("📊 Sync Summary:");
        println!("  Total Jobs: {}", summary.total_jobs);
        println!("  Completed: {}", summary.completed_jobs);
        println!("  Failed: {}", summary.failed_jobs);
        println!("  Units: {}", summary.total_units);
        println!("  Files Written: {}", summary.files_written);
        println!("  Files Deleted: {}", summary.files_deleted);
        println!("  Duration: {:.2}s", summary.duration.as_secs_f64());
        println!("  Success Rate: {:.2}%", summary.success_rate());
        println!();

        if !summary.jobs.is_empty() {
            println!("  Jobs:");
            for report in &summary.jobs {
                let marker = if report.is_cancelled() { "⏹" } else { "✅" };
                println!(
                    "    {} {}: {} written, {} deleted in {:.2}s",
                    marker,
                    report.job_name,
                    report.written.len(),
                    report.deleted.len(),
                    report.duration.as_secs_f64()
                );
            }
            println!();
        }

        if !summary.errors.is_empty() {
            println!("⚠️  Errors encountered:");
            for error in &summary.errors {
                println!("  - {:?}: {}", error.error_type, error.message);
                if let Some(context) = &error.context {
                    println!("    Context: {context}");
                }
            }
            println!();
        }

        // Determine exit code
        let exit_code = if summary.interrupted {
            println!();
            println!("⚠️  Sync interrupted gracefully.");
            println!("   Completed batches were saved; run the same command to finish.");
            println!();
            tracing::info!("Sync interrupted by user signal");
            130 // SIGINT exit code (standard Unix convention)
        } else if summary.is_successful() {
            println!("✅ Sync completed successfully!");
            0
        } else if summary.failed_jobs > 0 || !summary.errors.is_empty() {
            println!("⚠️  Sync completed with failures");
            1 // Partial success
        } else {
            println!("✅ Sync completed!");
            0
        };

        Ok(exit_code)
    }
}
