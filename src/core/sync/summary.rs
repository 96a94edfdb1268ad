//! Sync summary and reporting
//!
//! This module defines structures for tracking and reporting sync results.

use crate::domain::FigsyncError;
use std::path::PathBuf;
use std::time::Duration;

/// Terminal status of a single job run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncStatus {
    /// Every batch completed and reconciliation ran
    Completed,
    /// The cancellation signal was observed; reconciliation still ran
    Cancelled,
}

/// Result of one job's sync run
///
/// Produced by the engine for completed and cancelled runs. Failed runs
/// surface as errors instead and carry no report.
#[derive(Debug, Clone)]
pub struct JobReport {
    /// Job name from the configuration
    pub job_name: String,

    /// Number of export units extracted from the document
    pub total_units: usize,

    /// Number of batches the units were split into
    pub total_batches: usize,

    /// Number of batches that fully completed
    pub batches_completed: usize,

    /// Paths written during this run, in document order
    pub written: Vec<PathBuf>,

    /// Stale paths deleted during reconciliation
    pub deleted: Vec<PathBuf>,

    /// Duration of the job run
    pub duration: Duration,

    /// Terminal status
    pub status: SyncStatus,
}

impl JobReport {
    /// Check whether this run was cancelled before completing
    pub fn is_cancelled(&self) -> bool {
        self.status == SyncStatus::Cancelled
    }
}

/// Summary of a whole sync run across all jobs
#[derive(Debug, Clone)]
pub struct SyncSummary {
    /// Total number of jobs in the run
    pub total_jobs: usize,

    /// Number of jobs that completed every batch
    pub completed_jobs: usize,

    /// Number of jobs that failed
    pub failed_jobs: usize,

    /// Total export units across all jobs
    pub total_units: usize,

    /// Total files written across all jobs
    pub files_written: usize,

    /// Total stale files deleted across all jobs
    pub files_deleted: usize,

    /// Duration of the whole run
    pub duration: Duration,

    /// Whether the run observed the cancellation signal
    pub interrupted: bool,

    /// Per-job reports for completed and cancelled jobs
    pub jobs: Vec<JobReport>,

    /// Errors encountered during the run
    pub errors: Vec<SyncError>,
}

impl SyncSummary {
    /// Create a new empty sync summary
    pub fn new() -> Self {
        Self {
            total_jobs: 0,
            completed_jobs: 0,
            failed_jobs: 0,
            total_units: 0,
            files_written: 0,
            files_deleted: 0,
            duration: Duration::from_secs(0),
            interrupted: false,
            jobs: Vec::new(),
            errors: Vec::new(),
        }
    }

    /// Set the duration
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Fold a finished job's report into the summary
    pub fn add_report(&mut self, report: JobReport) {
        self.total_units += report.total_units;
        self.files_written += report.written.len();
        self.files_deleted += report.deleted.len();
        match report.status {
            SyncStatus::Completed => self.completed_jobs += 1,
            SyncStatus::Cancelled => self.interrupted = true,
        }
        self.jobs.push(report);
    }

    /// Add an error
    pub fn add_error(&mut self, error: SyncError) {
        self.errors.push(error);
    }

    /// Check if the sync was successful (no failures, no interruption)
    pub fn is_successful(&self) -> bool {
        self.failed_jobs == 0 && self.errors.is_empty() && !self.interrupted
    }

    /// Get job success rate as a percentage
    pub fn success_rate(&self) -> f64 {
        if self.total_jobs == 0 {
            return 100.0;
        }
        (self.completed_jobs as f64 / self.total_jobs as f64) * 100.0
    }

    /// Log the summary
    pub fn log_summary(&self) {
        tracing::info!(
            total_jobs = self.total_jobs,
            completed = self.completed_jobs,
            failed = self.failed_jobs,
            total_units = self.total_units,
            files_written = self.files_written,
            files_deleted = self.files_deleted,
            interrupted = self.interrupted,
            duration_secs = self.duration.as_secs(),
            success_rate = format!("{:.2}%", self.success_rate()),
            "Sync completed"
        );

        if !self.errors.is_empty() {
            tracing::warn!(
                error_count = self.errors.len(),
                "Sync completed with errors"
            );
            for error in &self.errors {
                tracing::warn!(
                    error_type = ?error.error_type,
                    message = %error.message,
                    context = error.context.as_deref().unwrap_or(""),
                    "Sync error"
                );
            }
        }
    }
}

impl Default for SyncSummary {
    fn default() -> Self {
        Self::new()
    }
}

/// Type of sync error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncErrorType {
    /// Configuration error (bad batch size, malformed paths)
    Configuration,
    /// Figma API error (document fetch, image URLs, download)
    Api,
    /// Image decode/transform error
    Transform,
    /// Filesystem error (write/delete)
    Filesystem,
    /// Batch aborted by per-unit failures
    Batch,
    /// Unknown error
    Unknown,
}

impl SyncErrorType {
    /// Classify a domain error for reporting
    pub fn classify(error: &FigsyncError) -> Self {
        match error {
            FigsyncError::Configuration(_) => Self::Configuration,
            FigsyncError::Api(_) => Self::Api,
            FigsyncError::Transform(_) => Self::Transform,
            FigsyncError::Filesystem(_) => Self::Filesystem,
            FigsyncError::BatchFailed { .. } => Self::Batch,
            _ => Self::Unknown,
        }
    }
}

/// Sync error with context
#[derive(Debug, Clone)]
pub struct SyncError {
    /// Type of error
    pub error_type: SyncErrorType,

    /// Error message
    pub message: String,

    /// Optional context (e.g., job name, export name)
    pub context: Option<String>,
}

impl SyncError {
    /// Create a new sync error
    pub fn new(error_type: SyncErrorType, message: String) -> Self {
        Self {
            error_type,
            message,
            context: None,
        }
    }

    /// Build a sync error from a domain error
    pub fn from_domain(error: &FigsyncError) -> Self {
        Self::new(SyncErrorType::classify(error), error.to_string())
    }

    /// Add context to the error
    pub fn with_context(mut self, context: String) -> Self {
        self.context = Some(context);
        self
    }
}
