//! Error context extension trait
//!
//! This module provides a context extension trait similar to `anyhow::Context`
//! that works with `Result<T, FigsyncError>`. This allows adding rich context
//! to errors throughout the library code while maintaining type safety.
//!
//! # Examples
//!
//! ```rust
//! use figsync::domain::{FigsyncError, Result};
//! use figsync::domain::context::ResultExt;
//!
//! fn read_file(path: &str) -> Result<String> {
//!     std::fs::read_to_string(path)
//!         .context(format!("Failed to read file: {}", path))
//! }
//!
//! fn process_node(id: &str) -> Result<()> {
//!     fetch_node(id)
//!         .with_context(|| format!("Failed to process node: {}", id))?;
//!     Ok(())
//! }
//! # fn fetch_node(id: &str) -> Result<()> { Ok(()) }
//! ```

use crate::domain::errors::FigsyncError;
use crate::domain::result::Result;

/// Extension trait for adding context to `Result` types
///
/// This trait provides `.context()` and `.with_context()` methods
/// for adding contextual information to errors, similar to `anyhow::Context`.
///
/// The key difference from anyhow is that this maintains the `FigsyncError`
/// type throughout the library code, ensuring type safety and domain-specific
/// errors.
pub trait ResultExt<T> {
    /// Add context to an error
    ///
    /// This method adds contextual information to an error. The context
    /// is evaluated eagerly, so use `.with_context()` if the context
    /// string is expensive to compute.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use figsync::domain::{FigsyncError, Result};
    /// use figsync::domain::context::ResultExt;
    ///
    /// fn load_config(path: &str) -> Result<String> {
    ///     std::fs::read_to_string(path)
    ///         .context(format!("Failed to load configuration from: {}", path))
    /// }
    /// ```
    fn context<C>(self, context: C) -> Result<T>
    where
        C: std::fmt::Display + Send + Sync + 'static;

    /// Add context to an error using a closure (lazy evaluation)
    ///
    /// This method is similar to `.context()` but the context is computed
    /// lazily only if an error occurs. This is more efficient when the
    /// context string is expensive to compute.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use figsync::domain::{FigsyncError, Result};
    /// use figsync::domain::context::ResultExt;
    ///
    /// fn download_image(url: &str, name: &str) -> Result<Vec<u8>> {
    ///     fetch_bytes(url)
    ///         .with_context(|| format!(
    ///             "Failed to download image {} from {}",
    ///             name, url
    ///         ))
    /// }
    /// # fn fetch_bytes(url: &str) -> Result<Vec<u8>> { Ok(Vec::new()) }
    /// ```
    fn with_context<C, F>(self, f: F) -> Result<T>
    where
        C: std::fmt::Display + Send + Sync + 'static,
        F: FnOnce() -> C;
}

/// Implementation for `Result<T, E>` where `E` can be converted to `FigsyncError`
///
/// This allows `.context()` and `.with_context()` to work with any error type
/// that implements `Into<FigsyncError>`, including `FigsyncError` itself and
/// the specialized `FigmaApiError` type.
impl<T, E> ResultExt<T> for std::result::Result<T, E>
where
    E: Into<FigsyncError>,
{
    fn context<C>(self, context: C) -> Result<T>
    where
        C: std::fmt::Display + Send + Sync + 'static,
    {
        self.map_err(|e| {
            let base_error = e.into();
            // Cancellation must stay recognizable through context wrapping
            if matches!(base_error, FigsyncError::Cancelled) {
                return base_error;
            }
            FigsyncError::Other(format!("{context}: {base_error}"))
        })
    }

    fn with_context<C, F>(self, f: F) -> Result<T>
    where
        C: std::fmt::Display + Send + Sync + 'static,
        F: FnOnce() -> C,
    {
        self.map_err(|e| {
            let base_error = e.into();
            if matches!(base_error, FigsyncError::Cancelled) {
                return base_error;
            }
            let context = f();
            FigsyncError::Other(format!("{context}: {base_error}"))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::FigmaApiError;

    #[test]
    fn test_context_with_figsync_error() {
        let result: Result<()> = Err(FigsyncError::Configuration("Invalid config".to_string()));
        let with_context = result.context("Failed to load configuration");

        assert!(with_context.is_err());
        let err_msg = with_context.unwrap_err().to_string();
        assert!(err_msg.contains("Failed to load configuration"));
        assert!(err_msg.contains("Invalid config"));
    }

    #[test]
    fn test_with_context_lazy_evaluation() {
        let expensive_context_called =
            std::sync::Arc::new(std::sync::atomic::AtomicBool::new(false));
        let expensive_context_called_clone = expensive_context_called.clone();

        let result: Result<i32> = Ok(42);
        let with_context = result.with_context(|| {
            expensive_context_called_clone.store(true, std::sync::atomic::Ordering::SeqCst);
            "Expensive context"
        });

        // Context should NOT be evaluated for Ok results
        assert!(with_context.is_ok());
        assert!(!expensive_context_called.load(std::sync::atomic::Ordering::SeqCst));
    }

    #[test]
    fn test_with_context_error_evaluation() {
        let expensive_context_called =
            std::sync::Arc::new(std::sync::atomic::AtomicBool::new(false));
        let expensive_context_called_clone = expensive_context_called.clone();

        let result: Result<()> = Err(FigsyncError::Transform("Decode failed".to_string()));
        let with_context = result.with_context(|| {
            expensive_context_called_clone.store(true, std::sync::atomic::Ordering::SeqCst);
            "Processing batch 5"
        });

        // Context SHOULD be evaluated for Err results
        assert!(with_context.is_err());
        assert!(expensive_context_called.load(std::sync::atomic::Ordering::SeqCst));

        let err_msg = with_context.unwrap_err().to_string();
        assert!(err_msg.contains("Processing batch 5"));
        assert!(err_msg.contains("Decode failed"));
    }

    #[test]
    fn test_context_with_api_error() {
        let result: Result<()> =
            Err(FigmaApiError::ConnectionFailed("Network timeout".to_string()).into());
        let with_context = result.context("Failed to fetch document for node 12:34");

        assert!(with_context.is_err());
        let err_msg = with_context.unwrap_err().to_string();
        assert!(err_msg.contains("Failed to fetch document for node 12:34"));
        assert!(err_msg.contains("Network timeout"));
    }

    #[test]
    fn test_context_preserves_cancelled() {
        let result: Result<()> = Err(FigsyncError::Cancelled);
        let with_context = result.context("while downloading batch 2");

        assert!(matches!(
            with_context.unwrap_err(),
            FigsyncError::Cancelled
        ));
    }

    #[test]
    fn test_context_chaining() {
        let result: Result<()> = Err(FigsyncError::Filesystem("Permission denied".to_string()));
        let with_context = result
            .context("Failed to write image")
            .context("Failed to save batch");

        assert!(with_context.is_err());
        let err_msg = with_context.unwrap_err().to_string();
        // Both contexts should be present
        assert!(err_msg.contains("Failed to save batch"));
        assert!(err_msg.contains("Failed to write image"));
        assert!(err_msg.contains("Permission denied"));
    }

    #[test]
    fn test_io_error_with_context() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "File not found");
        let result: Result<()> = Err(io_error.into());
        let with_context = result.context("Failed to read configuration file 'figsync.toml'");

        assert!(with_context.is_err());
        let err_msg = with_context.unwrap_err().to_string();
        assert!(err_msg.contains("Failed to read configuration file"));
        assert!(err_msg.contains("File not found"));
    }
}
