//! Asset-import collaborator adapter
//!
//! After a job's files are written and reconciled, figsync hands the result
//! to an asset importer so downstream tooling can pick up the changes. The
//! [`ImportRefresh`] trait is that seam; the default [`TracingImporter`]
//! records the request in the logs and does nothing else.

use crate::config::ImportSettings;
use crate::domain::Result;
use async_trait::async_trait;
use std::path::PathBuf;

/// One refresh request, issued once per completed job
#[derive(Debug, Clone)]
pub struct ImportRequest {
    /// Name of the job that produced the files
    pub job_name: String,

    /// Directory the job exported into
    pub export_directory: PathBuf,

    /// Files written during this run, in export order
    pub written_files: Vec<PathBuf>,

    /// Importer settings passed through from the job configuration
    pub settings: ImportSettings,
}

/// Trait for asset-import collaborators
///
/// Implementations are notified exactly once per job, after the export
/// directory has been reconciled. Cancelled runs still trigger a refresh
/// because files may have been written before the stop.
#[async_trait]
pub trait ImportRefresh: Send + Sync {
    /// Signal the importer that a job's export directory changed
    ///
    /// # Errors
    ///
    /// Returns an error if the importer could not process the request.
    async fn refresh(&self, request: &ImportRequest) -> Result<()>;
}

/// Importer that records refresh requests in the logs
///
/// Used when no external importer is wired in. Keeping the refresh visible
/// in the logs makes it easy to confirm the per-job signal fires exactly
/// once.
#[derive(Debug, Default)]
pub struct TracingImporter;

impl TracingImporter {
    /// Create a new tracing importer
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ImportRefresh for TracingImporter {
    async fn refresh(&self, request: &ImportRequest) -> Result<()> {
        tracing::info!(
            job = %request.job_name,
            directory = %request.export_directory.display(),
            file_count = request.written_files.len(),
            readable = request.settings.readable,
            "Import refresh requested"
        );
        Ok(())
    }
}
