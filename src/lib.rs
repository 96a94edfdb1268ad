// figsync - Figma asset sync tool
// Copyright (c) 2025 Figsync Contributors
// Licensed under the MIT License

//! # figsync - Figma asset sync
//!
//! figsync is a sync tool built in Rust that exports rendered Figma document
//! nodes as PNG files into local directories, post-processes them, and keeps
//! those directories as an exact mirror of the remote document.
//!
//! ## Overview
//!
//! This library provides the core functionality for:
//! - **Resolving** a document node and its children via the Figma REST API
//! - **Downloading** rendered PNGs in batches with bounded concurrency
//! - **Transforming** images (crop, pad, resize, power-of-two expansion)
//! - **Reconciling** export directories by deleting files the sync did not produce
//!
//! ## Architecture
//!
//! figsync follows a layered architecture:
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Business logic (sync engine, transforms, reconciliation)
//! - [`adapters`] - External integrations (Figma API, asset importer)
//! - [`domain`] - Core domain types and models
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging and observability
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use figsync::adapters::figma::FigmaClient;
//! use figsync::adapters::import::TracingImporter;
//! use figsync::config::load_config;
//! use figsync::core::sync::{JobRunner, NoopProgress, ShutdownSignal};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Load configuration
//!     let config = load_config("figsync.toml")?;
//!
//!     // Create the runner with the production API client
//!     let api = Arc::new(FigmaClient::new(&config.api));
//!     let importer = Arc::new(TracingImporter::new());
//!     let runner = JobRunner::from_config(&config, api, importer, Arc::new(NoopProgress))?;
//!
//!     // Execute every configured job
//!     let summary = runner.sync_all(&config.jobs, ShutdownSignal::none()).await?;
//!
//!     println!("Wrote {} files", summary.files_written);
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! ### Directory Mirroring
//!
//! Each job exports the direct children of one Figma node into one directory.
//! After a run, PNG files in that directory that the run did not write are
//! deleted, together with their `.meta` companions, so the directory always
//! reflects the current document.
//!
//! ### Image Transforms
//!
//! Downloaded images pass through a per-job transform chain before they are
//! saved:
//!
//! ```rust,no_run
//! use figsync::config::JobConfig;
//! use figsync::core::transform::TransformChain;
//!
//! # fn example(job: &JobConfig, bytes: Vec<u8>) -> Result<(), Box<dyn std::error::Error>> {
//! let chain = TransformChain::from_job(job);
//! let processed = chain.process(bytes)?;
//! # Ok(())
//! # }
//! ```
//!
//! ### Cancellation
//!
//! A sync run can be stopped at any time through a watch channel. In-flight
//! batches finish downloading but are not saved; completed batches stay on
//! disk and the run still reconciles before reporting.
//!
//! ## Error Handling
//!
//! figsync uses the [`domain::FigsyncError`] type for all errors:
//!
//! ```rust,no_run
//! use figsync::domain::FigsyncError;
//!
//! fn example() -> Result<(), FigsyncError> {
//!     // Errors are automatically converted using the ? operator
//!     let config = figsync::config::load_config("figsync.toml")?;
//!     Ok(())
//! }
//! ```
//!
//! ## Logging
//!
//! figsync uses structured logging with the `tracing` crate:
//!
//! ```rust,no_run
//! use tracing::{info, warn, error};
//!
//! # fn log_examples(err: &figsync::domain::FigsyncError) {
//! info!("Starting sync");
//! warn!(job = "icons", "No exportable children found");
//! error!(error = ?err, "Sync failed");
//! # }
//! ```

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
