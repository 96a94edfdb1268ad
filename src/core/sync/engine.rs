//! Sync engine - per-job pipeline orchestrator
//!
//! This module drives one job run end to end: resolve the document, split
//! its export units into batches, fetch and transform each batch's images
//! under the shared download limiter, save the results, and reconcile the
//! export directory against what the run wrote.
//!
//! Stages run in a fixed order. Batches are sequential; downloads within a
//! batch are concurrent up to the limiter's capacity and joined together,
//! so a batch either contributes all of its files or none of them. The
//! cancellation signal stops new batches and new downloads; reconciliation
//! runs on both the completed and the cancelled exit paths.

use crate::adapters::figma::FigmaApi;
use crate::config::JobConfig;
use crate::core::sync::batch::split_into_batches;
use crate::core::sync::limiter::DownloadLimiter;
use crate::core::sync::progress::ProgressSink;
use crate::core::sync::reconcile::{remove_stale, snapshot_png_files};
use crate::core::sync::signal::ShutdownSignal;
use crate::core::sync::summary::{JobReport, SyncStatus};
use crate::core::transform::TransformChain;
use crate::domain::ids::{FileKey, NodeId};
use crate::domain::{ExportUnit, FigmaApiError, FigsyncError, Result, UnitFailure};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Instant;

/// Sync engine for a single run
///
/// Holds the run-scoped collaborators: the API client, the shared download
/// limiter, the progress sink, and the cancellation signal. One engine is
/// created per run and reused across that run's jobs.
pub struct SyncEngine {
    api: Arc<dyn FigmaApi>,
    file_key: FileKey,
    limiter: DownloadLimiter,
    progress: Arc<dyn ProgressSink>,
    shutdown: ShutdownSignal,
}

/// What the batch loop produced before reconciliation
struct RunOutcome {
    written: Vec<PathBuf>,
    total_units: usize,
    total_batches: usize,
    batches_completed: usize,
    cancelled: bool,
}

impl SyncEngine {
    /// Create a new sync engine
    pub fn new(
        api: Arc<dyn FigmaApi>,
        file_key: FileKey,
        limiter: DownloadLimiter,
        progress: Arc<dyn ProgressSink>,
        shutdown: ShutdownSignal,
    ) -> Self {
        Self {
            api,
            file_key,
            limiter,
            progress,
            shutdown,
        }
    }

    /// Run one job to a terminal state
    ///
    /// Returns a report for completed and cancelled runs; a failed run
    /// surfaces the error instead and skips reconciliation, leaving the
    /// directory as the last full batch left it.
    ///
    /// The `.png` files already under the export directory are listed
    /// before anything is written; after the batch loop, files from that
    /// snapshot the run did not rewrite are deleted. This also holds on
    /// cancellation, so a cancelled run leaves exactly the files of its
    /// fully completed batches.
    pub async fn sync_job(&self, job: &JobConfig) -> Result<JobReport> {
        let start_time = Instant::now();
        tracing::info!(job = %job.name, node_id = %job.node_id, "Starting sync job");
        self.progress.status("Resolving document");

        let node_id = NodeId::new(job.node_id.as_str()).map_err(FigsyncError::Configuration)?;
        let export_dir = PathBuf::from(&job.export_directory);
        let existing_before = snapshot_png_files(&export_dir)?;

        let outcome = self.run_batches(job, &node_id, &export_dir).await?;

        self.progress.status("Reconciling export directory");
        let written_set: HashSet<PathBuf> = outcome.written.iter().cloned().collect();
        let reconciled = remove_stale(&existing_before, &written_set)?;

        let status = if outcome.cancelled {
            self.progress.status("Cancelled");
            SyncStatus::Cancelled
        } else {
            self.progress.status("Done");
            SyncStatus::Completed
        };

        let report = JobReport {
            job_name: job.name.clone(),
            total_units: outcome.total_units,
            total_batches: outcome.total_batches,
            batches_completed: outcome.batches_completed,
            written: outcome.written,
            deleted: reconciled.deleted,
            duration: start_time.elapsed(),
            status,
        };

        tracing::info!(
            job = %report.job_name,
            units = report.total_units,
            batches = report.batches_completed,
            written = report.written.len(),
            deleted = report.deleted.len(),
            cancelled = report.is_cancelled(),
            duration_ms = report.duration.as_millis() as u64,
            "Sync job finished"
        );

        Ok(report)
    }

    /// Resolve, batch, and process every batch until done or cancelled
    async fn run_batches(
        &self,
        job: &JobConfig,
        node_id: &NodeId,
        export_dir: &Path,
    ) -> Result<RunOutcome> {
        let mut outcome = RunOutcome {
            written: Vec::new(),
            total_units: 0,
            total_batches: 0,
            batches_completed: 0,
            cancelled: self.shutdown.is_triggered(),
        };

        if outcome.cancelled {
            tracing::info!(job = %job.name, "Cancelled before resolving; skipping to reconciliation");
            return Ok(outcome);
        }

        let document = self.api.get_document(&self.file_key, node_id).await?;
        let units = document.export_units();
        outcome.total_units = units.len();

        tracing::info!(
            job = %job.name,
            document = %document.name,
            units = outcome.total_units,
            "Resolved document"
        );

        let chain = TransformChain::from_job(job);
        tracing::debug!(job = %job.name, transforms = %chain.describe(), "Built transform chain");

        self.progress.status("Batching export units");
        let batches = split_into_batches(units, job.batch_size)?;
        outcome.total_batches = batches.len();

        for (index, batch) in batches.into_iter().enumerate() {
            if self.shutdown.is_triggered() {
                tracing::info!(
                    job = %job.name,
                    next_batch = index + 1,
                    "Cancelled; no further batches will start"
                );
                outcome.cancelled = true;
                break;
            }

            self.progress
                .status(&format!("Batch {} of {}", index + 1, outcome.total_batches));
            self.progress.item_progress(0.0);

            match self.process_batch(&chain, batch, export_dir).await {
                Ok(paths) => {
                    outcome.written.extend(paths);
                    outcome.batches_completed += 1;
                    self.progress.batch_progress(
                        outcome.batches_completed as f64 / outcome.total_batches as f64,
                    );
                }
                Err(FigsyncError::Cancelled) => {
                    tracing::info!(job = %job.name, batch = index + 1, "Batch cancelled mid-flight");
                    outcome.cancelled = true;
                    break;
                }
                Err(e) => return Err(e),
            }
        }

        Ok(outcome)
    }

    /// Process one batch: resolve URLs, download, transform, save
    ///
    /// Downloads and transforms run concurrently per unit and are joined
    /// before anything is saved, so a failed or cancelled batch writes no
    /// files. Per-unit failures are collected while siblings finish and
    /// reported together.
    async fn process_batch(
        &self,
        chain: &TransformChain,
        batch: Vec<ExportUnit>,
        export_dir: &Path,
    ) -> Result<Vec<PathBuf>> {
        let batch_len = batch.len();
        let node_ids: Vec<NodeId> = batch.iter().map(|unit| unit.node_id.clone()).collect();
        let url_map = self.api.get_image_urls(&self.file_key, &node_ids).await?;

        let completed = AtomicUsize::new(0);
        let downloads = batch.into_iter().map(|unit| {
            let url = url_map.get(&unit.node_id).cloned().flatten();
            let completed = &completed;
            async move {
                let rendered = self.fetch_and_transform(&unit, url, chain).await;
                if rendered.is_ok() {
                    let done = completed.fetch_add(1, Ordering::SeqCst) + 1;
                    self.progress.item_progress(done as f64 / batch_len as f64);
                }
                (unit, rendered)
            }
        });
        let results = futures::future::join_all(downloads).await;

        let mut rendered = Vec::with_capacity(batch_len);
        let mut failures = Vec::new();
        let mut cancelled = false;
        for (unit, result) in results {
            match result {
                Ok(bytes) => rendered.push((unit, bytes)),
                Err(FigsyncError::Cancelled) => cancelled = true,
                Err(e) => {
                    tracing::error!(unit = %unit.export_name, error = %e, "Export unit failed");
                    failures.push(UnitFailure::new(unit.export_name, e.to_string()));
                }
            }
        }

        // Cancellation outranks collected failures: the batch is discarded
        // either way, and the cancelled exit path still reconciles.
        if cancelled {
            return Err(FigsyncError::Cancelled);
        }
        if !failures.is_empty() {
            return Err(FigsyncError::BatchFailed {
                total: batch_len,
                failures,
            });
        }
        self.shutdown.check()?;

        let mut written = Vec::with_capacity(rendered.len());
        for (unit, bytes) in rendered {
            written.push(save_unit(export_dir, &unit, &bytes)?);
        }
        Ok(written)
    }

    /// Download one unit's image and run it through the transform chain
    ///
    /// The limiter permit covers only the download; transforms are pure
    /// CPU work and don't hold a slot. The signal is re-checked after the
    /// permit wait since queueing can outlast a cancellation.
    async fn fetch_and_transform(
        &self,
        unit: &ExportUnit,
        url: Option<String>,
        chain: &TransformChain,
    ) -> Result<Vec<u8>> {
        self.shutdown.check()?;

        let url = url.ok_or_else(|| FigmaApiError::MissingImageUrl(unit.node_id.to_string()))?;

        let permit = self.limiter.acquire().await?;
        self.shutdown.check()?;

        tracing::trace!(unit = %unit.export_name, "Downloading image");
        let bytes = self.api.download_image(&url).await?;
        drop(permit);

        chain.process(bytes)
    }
}

/// Write one transformed image to `{export_dir}/{export_name}.png`
fn save_unit(export_dir: &Path, unit: &ExportUnit, bytes: &[u8]) -> Result<PathBuf> {
    let path = export_dir.join(format!("{}.png", unit.export_name));

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            FigsyncError::Filesystem(format!(
                "Failed to create directory {}: {e}",
                parent.display()
            ))
        })?;
    }

    std::fs::write(&path, bytes).map_err(|e| {
        FigsyncError::Filesystem(format!("Failed to write {}: {e}", path.display()))
    })?;

    tracing::debug!(path = %path.display(), bytes = bytes.len(), "Saved export unit");
    Ok(path)
}
