//! Domain error types
//!
//! This module defines the error hierarchy for figsync. All errors are
//! domain-specific and don't expose third-party types.

use thiserror::Error;

/// Main figsync error type
///
/// This is the primary error type used throughout the application.
/// It wraps specific error types and provides context for error handling.
#[derive(Debug, Error)]
pub enum FigsyncError {
    /// Configuration-related errors (invalid batch size, malformed paths,
    /// bad config file). Fatal before any network call is made.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Figma API errors (document fetch, image-URL batch, image download)
    #[error("Figma API error: {0}")]
    Api(#[from] FigmaApiError),

    /// Image decode/transform errors, scoped to a single export unit
    #[error("Transform error: {0}")]
    Transform(String),

    /// Filesystem errors (write/delete). Surfaced immediately, not retried.
    #[error("Filesystem error: {0}")]
    Filesystem(String),

    /// One or more units in a batch failed. Carries every per-unit failure
    /// collected during the batch's download and transform stages.
    #[error("Batch failed: {} of {} units errored", .failures.len(), .total)]
    BatchFailed {
        total: usize,
        failures: Vec<UnitFailure>,
    },

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// The run's cancellation signal was observed. Control-flow marker:
    /// the engine maps it to a cancelled terminal status, never to a
    /// failure reported to the user.
    #[error("Sync cancelled")]
    Cancelled,

    /// Generic errors with context
    #[error("{0}")]
    Other(String),
}

/// Figma API-specific errors
///
/// Errors that occur when talking to the Figma REST API.
/// These errors don't expose third-party HTTP client types.
#[derive(Debug, Error)]
pub enum FigmaApiError {
    /// Failed to connect to the API host
    #[error("Failed to connect to Figma API: {0}")]
    ConnectionFailed(String),

    /// Authentication failed (bad or missing token)
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    /// Response body did not match the expected shape
    #[error("Invalid response from server: {0}")]
    InvalidResponse(String),

    /// Rate limit exceeded (429)
    #[error("Rate limit exceeded, retry after: {0}")]
    RateLimitExceeded(String),

    /// Server error (5xx)
    #[error("Server error: {status} - {message}")]
    ServerError { status: u16, message: String },

    /// Client error (4xx)
    #[error("Client error: {status} - {message}")]
    ClientError { status: u16, message: String },

    /// Timeout
    #[error("Request timeout: {0}")]
    Timeout(String),

    /// The requested node id was absent from the document response
    #[error("Node not found in document: {0}")]
    NodeNotFound(String),

    /// The image-URL response carried no URL for this node (null or
    /// missing entry). The API does this for nodes it cannot render.
    #[error("No image URL returned for node: {0}")]
    MissingImageUrl(String),
}

/// A single export unit's failure within a batch
///
/// Collected while sibling downloads run to completion, then reported
/// together in [`FigsyncError::BatchFailed`].
#[derive(Debug, Clone)]
pub struct UnitFailure {
    /// Export name of the failed unit
    pub export_name: String,

    /// Error message
    pub message: String,
}

impl UnitFailure {
    /// Creates a new unit failure
    pub fn new(export_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            export_name: export_name.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for UnitFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.export_name, self.message)
    }
}

// Conversion from std::io::Error
impl From<std::io::Error> for FigsyncError {
    fn from(err: std::io::Error) -> Self {
        FigsyncError::Filesystem(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for FigsyncError {
    fn from(err: serde_json::Error) -> Self {
        FigsyncError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for FigsyncError {
    fn from(err: toml::de::Error) -> Self {
        FigsyncError::Configuration(format!("TOML parse error: {err}"))
    }
}

// Conversion from image decode/encode errors
impl From<image::ImageError> for FigsyncError {
    fn from(err: image::ImageError) -> Self {
        FigsyncError::Transform(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_figsync_error_display() {
        let err = FigsyncError::Configuration("Invalid config".to_string());
        assert_eq!(err.to_string(), "Configuration error: Invalid config");
    }

    #[test]
    fn test_api_error_conversion() {
        let api_err = FigmaApiError::ConnectionFailed("Network error".to_string());
        let err: FigsyncError = api_err.into();
        assert!(matches!(err, FigsyncError::Api(_)));
    }

    #[test]
    fn test_batch_failed_display() {
        let err = FigsyncError::BatchFailed {
            total: 10,
            failures: vec![
                UnitFailure::new("Button/Hover", "timeout"),
                UnitFailure::new("Icons/Close", "decode failed"),
            ],
        };
        assert_eq!(err.to_string(), "Batch failed: 2 of 10 units errored");
    }

    #[test]
    fn test_unit_failure_display() {
        let failure = UnitFailure::new("Button/Hover", "connection reset");
        assert_eq!(failure.to_string(), "Button/Hover: connection reset");
    }

    #[test]
    fn test_missing_image_url_display() {
        let err = FigmaApiError::MissingImageUrl("12:34".to_string());
        assert!(err.to_string().contains("12:34"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "File not found");
        let err: FigsyncError = io_err.into();
        assert!(matches!(err, FigsyncError::Filesystem(_)));
    }

    #[test]
    fn test_serde_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let err: FigsyncError = json_err.into();
        assert!(matches!(err, FigsyncError::Serialization(_)));
    }

    #[test]
    fn test_toml_error_conversion() {
        let toml_err = toml::from_str::<toml::Value>("invalid = toml = syntax").unwrap_err();
        let err: FigsyncError = toml_err.into();
        assert!(matches!(err, FigsyncError::Configuration(_)));
        assert!(err.to_string().contains("TOML parse error"));
    }

    #[test]
    fn test_cancelled_is_not_a_failure_message() {
        let err = FigsyncError::Cancelled;
        assert_eq!(err.to_string(), "Sync cancelled");
    }

    #[test]
    fn test_figsync_error_implements_std_error() {
        let err = FigsyncError::Transform("bad pixels".to_string());
        let _: &dyn std::error::Error = &err;
    }

    #[test]
    fn test_api_error_implements_std_error() {
        let err = FigmaApiError::Timeout("30s elapsed".to_string());
        let _: &dyn std::error::Error = &err;
    }
}
