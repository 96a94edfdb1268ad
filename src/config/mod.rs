//! Configuration management for figsync.
//!
//! This module provides TOML-based configuration loading, parsing, and validation.
//!
//! # Overview
//!
//! figsync uses TOML configuration files with support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - Environment variable overrides (`FIGSYNC_*`)
//! - Default values for optional settings
//! - Comprehensive validation
//! - Type-safe configuration structs
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use figsync::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! // Load configuration from file
//! let config = load_config("figsync.toml")?;
//!
//! // Access configuration sections
//! println!("File key: {}", config.api.file_key);
//! for job in &config.jobs {
//!     println!("Job '{}' -> {}", job.name, job.export_directory);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration Structure
//!
//! The configuration is organized into sections:
//!
//! - [`ApplicationConfig`] - Application settings (log level)
//! - [`ApiConfig`] - Figma API connection and authentication
//! - [`DownloadConfig`] - Download concurrency limits
//! - [`LoggingConfig`] - Logging configuration
//! - [`JobConfig`] - One entry per `[[jobs]]` table: node, directory,
//!   batching, image transforms and importer settings
//!
//! # Example Configuration
//!
//! ```toml
//! [api]
//! file_key = "hJb5c0eXzY4kFM2vTqRnwA"
//! token = "${FIGSYNC_API_TOKEN}"
//!
//! [downloads]
//! max_concurrent = 5
//!
//! [[jobs]]
//! name = "icons"
//! node_id = "12:34"
//! export_directory = "Assets/Textures/Icons"
//! batch_size = 50
//! auto_crop = true
//! padding = 2
//! expand_to_power_of_two = true
//!
//! [jobs.import]
//! readable = false
//! android_format = "ETC2_RGBA8"
//! ios_format = "ASTC_6x6"
//! ```
//!
//! # Environment Variables
//!
//! Use `${VAR_NAME}` syntax for environment variable substitution:
//!
//! ```bash
//! export FIGSYNC_API_TOKEN="figd_..."
//! ```
//!
//! # Validation
//!
//! Configuration is validated on load:
//!
//! ```rust,no_run
//! use figsync::config::load_config;
//!
//! # fn example() {
//! match load_config("figsync.toml") {
//!     Ok(config) => println!("Configuration valid"),
//!     Err(e) => eprintln!("Configuration error: {}", e),
//! }
//! # }
//! ```

pub mod loader;
pub mod schema;
pub mod secret;

// Re-export commonly used types
pub use loader::load_config;
pub use schema::{
    ApiConfig, ApplicationConfig, DownloadConfig, FigsyncConfig, ImportSettings, JobConfig,
    LoggingConfig, ResizeTarget, RetryConfig,
};
pub use secret::{secret_string, SecretString, SecretValue};
