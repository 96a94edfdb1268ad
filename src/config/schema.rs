//! Configuration schema types
//!
//! This module defines the configuration structure for figsync.

use crate::config::SecretString;
use crate::domain::ids::{FileKey, NodeId};
use serde::{Deserialize, Serialize};

/// Main figsync configuration
///
/// This is the root configuration structure that maps to the TOML file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FigsyncConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Figma API connection settings
    pub api: ApiConfig,

    /// Download concurrency settings
    #[serde(default)]
    pub downloads: DownloadConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Export jobs, processed in order
    #[serde(default)]
    pub jobs: Vec<JobConfig>,
}

impl FigsyncConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.api.validate()?;
        self.downloads.validate()?;
        self.logging.validate()?;

        if self.jobs.is_empty() {
            return Err("at least one [[jobs]] entry is required".to_string());
        }

        let mut seen = std::collections::HashSet::new();
        for job in &self.jobs {
            job.validate()?;
            if !seen.insert(job.name.as_str()) {
                return Err(format!("duplicate job name '{}'", job.name));
            }
        }

        Ok(())
    }

    /// Looks up a job by name
    pub fn job(&self, name: &str) -> Option<&JobConfig> {
        self.jobs.iter().find(|j| j.name == name)
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

/// Retry configuration for API requests
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Maximum number of retry attempts
    #[serde(default = "default_max_retries")]
    pub max_retries: usize,

    /// Initial delay in milliseconds
    #[serde(default = "default_initial_delay_ms")]
    pub initial_delay_ms: u64,

    /// Maximum delay in milliseconds
    #[serde(default = "default_max_delay_ms")]
    pub max_delay_ms: u64,

    /// Backoff multiplier
    #[serde(default = "default_backoff_multiplier")]
    pub backoff_multiplier: f64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: default_max_retries(),
            initial_delay_ms: default_initial_delay_ms(),
            max_delay_ms: default_max_delay_ms(),
            backoff_multiplier: default_backoff_multiplier(),
        }
    }
}

/// Figma API connection configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the Figma REST API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// File key of the document to sync from
    pub file_key: String,

    /// Personal access token
    /// Stored securely in memory and automatically zeroized on drop
    pub token: SecretString,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,

    /// Retry configuration
    #[serde(default)]
    pub retry: RetryConfig,
}

impl ApiConfig {
    fn validate(&self) -> Result<(), String> {
        use secrecy::ExposeSecret;

        if self.base_url.is_empty() {
            return Err("api.base_url cannot be empty".to_string());
        }

        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err("api.base_url must start with http:// or https://".to_string());
        }

        FileKey::new(&self.file_key).map_err(|e| format!("api.file_key: {e}"))?;

        let token = self.token.expose_secret();
        if token.is_empty() {
            return Err("api.token cannot be empty".to_string());
        }
        if token.is_placeholder() {
            return Err(
                "api.token is an unresolved ${VAR} placeholder; set the environment variable"
                    .to_string(),
            );
        }

        if self.timeout_seconds == 0 {
            return Err("api.timeout_seconds must be > 0".to_string());
        }

        Ok(())
    }
}

/// Download concurrency configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DownloadConfig {
    /// Maximum concurrent image downloads across the whole run
    #[serde(default = "default_max_concurrent")]
    pub max_concurrent: usize,
}

impl DownloadConfig {
    fn validate(&self) -> Result<(), String> {
        if self.max_concurrent == 0 || self.max_concurrent > 64 {
            return Err(format!(
                "downloads.max_concurrent must be between 1 and 64, got {}",
                self.max_concurrent
            ));
        }
        Ok(())
    }
}

impl Default for DownloadConfig {
    fn default() -> Self {
        Self {
            max_concurrent: default_max_concurrent(),
        }
    }
}

/// One export job: a remote node synced into a local directory
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobConfig {
    /// Job name, used for `sync --job <name>` selection and logging
    pub name: String,

    /// Root node id to export from (its direct children become units)
    pub node_id: String,

    /// Directory the job's PNG files are written into
    pub export_directory: String,

    /// Units per image-URL request. Any value > 0 works; multiples of
    /// ten (10..100) are the conventional presets.
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,

    /// Crop each image to the bounding box of its non-transparent pixels
    #[serde(default)]
    pub auto_crop: bool,

    /// Transparent padding in pixels added on every side after cropping
    #[serde(default)]
    pub padding: u32,

    /// Optional exact target dimensions (stretch, no aspect preservation)
    #[serde(default)]
    pub resize_to: Option<ResizeTarget>,

    /// Expand the canvas so both dimensions are powers of two
    #[serde(default)]
    pub expand_to_power_of_two: bool,

    /// Settings passed through to the asset-import collaborator
    #[serde(default)]
    pub import: ImportSettings,
}

impl JobConfig {
    fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("jobs.name cannot be empty".to_string());
        }

        NodeId::new(&self.node_id).map_err(|e| format!("jobs.node_id ({}): {e}", self.name))?;

        if self.export_directory.trim().is_empty() {
            return Err(format!(
                "jobs.export_directory cannot be empty (job '{}')",
                self.name
            ));
        }

        if self.batch_size == 0 || self.batch_size > 500 {
            return Err(format!(
                "jobs.batch_size must be between 1 and 500, got {} (job '{}')",
                self.batch_size, self.name
            ));
        }

        if let Some(resize) = &self.resize_to {
            if resize.width == 0 || resize.height == 0 {
                return Err(format!(
                    "jobs.resize_to dimensions must be > 0, got {}x{} (job '{}')",
                    resize.width, resize.height, self.name
                ));
            }
        }

        Ok(())
    }
}

/// Exact resize target dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResizeTarget {
    /// Target width in pixels
    pub width: u32,

    /// Target height in pixels
    pub height: u32,
}

/// Settings consumed only by the external asset-import collaborator
///
/// figsync does not interpret these; they are handed to the importer
/// along with the export directory after each job's reconciliation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImportSettings {
    /// Whether imported textures should stay CPU-readable
    #[serde(default)]
    pub readable: bool,

    /// Target compression format for Android builds
    #[serde(default)]
    pub android_format: Option<String>,

    /// Target compression format for iOS builds
    #[serde(default)]
    pub ios_format: Option<String>,

    /// Target compression format for desktop builds
    #[serde(default)]
    pub standalone_format: Option<String>,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable JSON file logging alongside console output
    #[serde(default)]
    pub file_enabled: bool,

    /// Directory for log files
    #[serde(default = "default_file_path")]
    pub file_path: String,

    /// Log rotation strategy (daily, hourly, never)
    #[serde(default = "default_file_rotation")]
    pub file_rotation: String,

    /// ANSI colors on console output
    #[serde(default = "default_true")]
    pub ansi: bool,
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&self.file_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.file_rotation '{}'. Must be one of: {}",
                self.file_rotation,
                valid_rotations.join(", ")
            ));
        }

        if self.file_enabled && self.file_path.trim().is_empty() {
            return Err("logging.file_path cannot be empty when file_enabled = true".to_string());
        }

        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            file_enabled: false,
            file_path: default_file_path(),
            file_rotation: default_file_rotation(),
            ansi: true,
        }
    }
}

// Default value functions
fn default_log_level() -> String {
    "info".to_string()
}

fn default_base_url() -> String {
    "https://api.figma.com".to_string()
}

fn default_true() -> bool {
    true
}

fn default_timeout_seconds() -> u64 {
    30
}

fn default_max_retries() -> usize {
    3
}

fn default_initial_delay_ms() -> u64 {
    1000
}

fn default_max_delay_ms() -> u64 {
    30000
}

fn default_backoff_multiplier() -> f64 {
    2.0
}

fn default_max_concurrent() -> usize {
    5
}

fn default_batch_size() -> usize {
    50
}

fn default_file_path() -> String {
    "logs".to_string()
}

fn default_file_rotation() -> String {
    "daily".to_string()
}
