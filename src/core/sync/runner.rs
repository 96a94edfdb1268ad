//! Job runner - run admission and sequential job execution
//!
//! The runner owns the scheduling model: one logical run at a time, jobs
//! within a run processed sequentially, and last-writer-wins admission.
//! Starting a new run cancels whichever run is still in progress and waits
//! for it to finish its controlled exit before taking over. After each
//! job's reconciliation the runner notifies the import collaborator exactly
//! once.

use crate::adapters::figma::FigmaApi;
use crate::adapters::import::{ImportRefresh, ImportRequest};
use crate::config::{FigsyncConfig, JobConfig};
use crate::core::sync::engine::SyncEngine;
use crate::core::sync::limiter::DownloadLimiter;
use crate::core::sync::progress::ProgressSink;
use crate::core::sync::signal::ShutdownSignal;
use crate::core::sync::summary::{JobReport, SyncError, SyncErrorType, SyncSummary};
use crate::domain::ids::FileKey;
use crate::domain::{FigsyncError, Result};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::{watch, Mutex};

/// Runs sync jobs with exclusive run admission
pub struct JobRunner {
    api: Arc<dyn FigmaApi>,
    importer: Arc<dyn ImportRefresh>,
    file_key: FileKey,
    limiter: DownloadLimiter,
    progress: Arc<dyn ProgressSink>,
    /// Cancellation sender of the currently admitted run
    current_cancel: Mutex<Option<watch::Sender<bool>>>,
    /// Held for the duration of a run; serializes runs per scope
    run_lock: Mutex<()>,
}

impl JobRunner {
    /// Create a new job runner
    pub fn new(
        api: Arc<dyn FigmaApi>,
        importer: Arc<dyn ImportRefresh>,
        file_key: FileKey,
        max_concurrent_downloads: usize,
        progress: Arc<dyn ProgressSink>,
    ) -> Self {
        Self {
            api,
            importer,
            file_key,
            limiter: DownloadLimiter::new(max_concurrent_downloads),
            progress,
            current_cancel: Mutex::new(None),
            run_lock: Mutex::new(()),
        }
    }

    /// Create a runner wired from the loaded configuration
    pub fn from_config(
        config: &FigsyncConfig,
        api: Arc<dyn FigmaApi>,
        importer: Arc<dyn ImportRefresh>,
        progress: Arc<dyn ProgressSink>,
    ) -> Result<Self> {
        let file_key = FileKey::new(config.api.file_key.as_str())
            .map_err(FigsyncError::Configuration)?;
        Ok(Self::new(
            api,
            importer,
            file_key,
            config.downloads.max_concurrent,
            progress,
        ))
    }

    /// Cancel the currently admitted run, if any
    pub async fn cancel_active(&self) {
        if let Some(sender) = self.current_cancel.lock().await.as_ref() {
            let _ = sender.send(true);
        }
    }

    /// Run every job sequentially and aggregate the outcome
    ///
    /// Admission is last-writer-wins: an already-running invocation is
    /// cancelled first, and this call waits for its controlled exit before
    /// starting. The external shutdown signal (Ctrl-C and friends) is
    /// forwarded into the run's own cancellation channel.
    ///
    /// Job failures don't stop the run; the error is recorded and the next
    /// job starts. The import collaborator is notified once per job that
    /// reached a terminal report, including cancelled ones.
    pub async fn sync_all(
        &self,
        jobs: &[JobConfig],
        external_shutdown: ShutdownSignal,
    ) -> Result<SyncSummary> {
        let (cancel_tx, cancel_rx) = watch::channel(external_shutdown.is_triggered());
        {
            let mut current = self.current_cancel.lock().await;
            if let Some(previous) = current.replace(cancel_tx.clone()) {
                if previous.send(true).is_ok() {
                    tracing::info!("Cancelling in-progress run before starting a new one");
                }
            }
        }
        let _run_guard = self.run_lock.lock().await;

        let forwarder = {
            let external = external_shutdown.clone();
            let cancel_tx = cancel_tx.clone();
            tokio::spawn(async move {
                external.triggered().await;
                let _ = cancel_tx.send(true);
            })
        };

        let shutdown = ShutdownSignal::new(cancel_rx);
        let engine = SyncEngine::new(
            self.api.clone(),
            self.file_key.clone(),
            self.limiter.clone(),
            self.progress.clone(),
            shutdown.clone(),
        );

        let start_time = Instant::now();
        let mut summary = SyncSummary::new();
        summary.total_jobs = jobs.len();

        tracing::info!(jobs = jobs.len(), "Starting sync run");

        for job in jobs {
            // Jobs the cancelled run never reached are skipped outright;
            // their directories are not reconciled.
            if shutdown.is_triggered() {
                tracing::info!(job = %job.name, "Run cancelled; skipping remaining jobs");
                summary.interrupted = true;
                break;
            }

            match engine.sync_job(job).await {
                Ok(report) => {
                    self.refresh_import(job, &report, &mut summary).await;
                    summary.add_report(report);
                }
                Err(e) => {
                    tracing::error!(job = %job.name, error = %e, "Sync job failed");
                    summary.failed_jobs += 1;
                    summary.add_error(
                        SyncError::from_domain(&e).with_context(format!("job={}", job.name)),
                    );
                }
            }
        }

        forwarder.abort();

        let summary = summary.with_duration(start_time.elapsed());
        summary.log_summary();
        Ok(summary)
    }

    /// Notify the import collaborator about a finished job
    ///
    /// An importer failure is recorded but doesn't fail the run; the files
    /// on disk are already in their final state.
    async fn refresh_import(&self, job: &JobConfig, report: &JobReport, summary: &mut SyncSummary) {
        let request = ImportRequest {
            job_name: job.name.clone(),
            export_directory: PathBuf::from(&job.export_directory),
            written_files: report.written.clone(),
            settings: job.import.clone(),
        };

        if let Err(e) = self.importer.refresh(&request).await {
            tracing::warn!(job = %job.name, error = %e, "Import refresh failed");
            summary.add_error(
                SyncError::new(SyncErrorType::Unknown, format!("Import refresh failed: {e}"))
                    .with_context(format!("job={}", job.name)),
            );
        }
    }
}
