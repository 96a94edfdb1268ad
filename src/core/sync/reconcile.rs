//! Export directory reconciliation
//!
//! The engine snapshots every `.png` under the export directory before the
//! first batch runs. After the batches (and on cancellation), anything in
//! that snapshot the run did not rewrite is stale and gets deleted, along
//! with its companion `.meta` file when the host editor keeps one. Files
//! the run itself wrote are never touched.

use crate::domain::{FigsyncError, Result};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Companion metadata suffix some host editors keep next to each asset
const META_SUFFIX: &str = ".meta";

/// Files deleted by a reconciliation pass
#[derive(Debug, Clone, Default)]
pub struct ReconcileReport {
    /// Deleted stale paths in sorted order (companion files not listed)
    pub deleted: Vec<PathBuf>,
}

/// List every `.png` file currently under the export directory
///
/// Taken before any batch runs. A directory that does not exist yet yields
/// an empty set.
pub fn snapshot_png_files(dir: &Path) -> Result<HashSet<PathBuf>> {
    let mut files = HashSet::new();
    if !dir.exists() {
        return Ok(files);
    }

    for entry in WalkDir::new(dir) {
        let entry = entry.map_err(|e| {
            FigsyncError::Filesystem(format!("Failed to list {}: {e}", dir.display()))
        })?;
        if entry.file_type().is_file() && has_png_extension(entry.path()) {
            files.insert(entry.path().to_path_buf());
        }
    }

    Ok(files)
}

/// Delete files present before the run that the run did not rewrite
///
/// `stale = existing_before − written`. Deletion is sorted for stable logs
/// and reports. A deletion failure surfaces immediately; files already
/// deleted by then stay deleted.
pub fn remove_stale(
    existing_before: &HashSet<PathBuf>,
    written: &HashSet<PathBuf>,
) -> Result<ReconcileReport> {
    let mut stale: Vec<&PathBuf> = existing_before.difference(written).collect();
    stale.sort();

    let mut deleted = Vec::with_capacity(stale.len());
    for path in stale {
        fs::remove_file(path).map_err(|e| {
            FigsyncError::Filesystem(format!(
                "Failed to delete stale file {}: {e}",
                path.display()
            ))
        })?;

        let meta = companion_meta_path(path);
        if meta.exists() {
            fs::remove_file(&meta).map_err(|e| {
                FigsyncError::Filesystem(format!(
                    "Failed to delete metadata file {}: {e}",
                    meta.display()
                ))
            })?;
        }

        tracing::debug!(path = %path.display(), "Deleted stale file");
        deleted.push(path.clone());
    }

    if !deleted.is_empty() {
        tracing::info!(count = deleted.len(), "Reconciliation removed stale files");
    }

    Ok(ReconcileReport { deleted })
}

fn has_png_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("png"))
}

fn companion_meta_path(path: &Path) -> PathBuf {
    let mut raw = path.as_os_str().to_os_string();
    raw.push(META_SUFFIX);
    PathBuf::from(raw)
}
