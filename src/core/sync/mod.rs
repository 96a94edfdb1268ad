//! Sync orchestration and batch processing
//!
//! This module provides the core sync logic for figsync, including:
//! - Batch splitting of export units
//! - Per-job pipeline orchestration
//! - Run admission and sequential job execution
//! - Download concurrency limiting
//! - Cancellation signalling and progress reporting
//! - Export directory reconciliation
//! - Summary and reporting

pub mod batch;
pub mod engine;
pub mod limiter;
pub mod progress;
pub mod reconcile;
pub mod runner;
pub mod signal;
pub mod summary;

pub use batch::split_into_batches;
pub use engine::SyncEngine;
pub use limiter::DownloadLimiter;
pub use progress::{LogProgress, NoopProgress, ProgressSink};
pub use reconcile::{remove_stale, snapshot_png_files, ReconcileReport};
pub use runner::JobRunner;
pub use signal::ShutdownSignal;
pub use summary::{JobReport, SyncError, SyncErrorType, SyncStatus, SyncSummary};
