//! Core business logic for figsync.
//!
//! This module contains the core sync pipeline and image processing logic.
//!
//! # Modules
//!
//! - [`sync`] - Sync orchestration: batching, downloads, reconciliation
//! - [`transform`] - Image transformations (crop, pad, resize, power-of-two)
//!
//! # Sync Workflow
//!
//! The typical sync workflow for one job:
//!
//! 1. **Resolve**: Fetch the job's root node and flatten it into export units
//! 2. **Batch**: Split the units into fixed-size ordered batches
//! 3. **Fetch URLs**: Resolve each batch's node ids to rendered-image URLs
//! 4. **Download**: Fetch image bytes concurrently under the shared limiter
//! 5. **Transform**: Run each image through the job's transform chain
//! 6. **Save**: Write `{export_directory}/{export_name}.png` files
//! 7. **Reconcile**: Delete previously-exported files the run did not rewrite
//!
//! # Example
//!
//! ```rust,no_run
//! use figsync::adapters::figma::FigmaClient;
//! use figsync::adapters::import::TracingImporter;
//! use figsync::config::load_config;
//! use figsync::core::sync::{JobRunner, NoopProgress, ShutdownSignal};
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("figsync.toml")?;
//!
//! let runner = JobRunner::from_config(
//!     &config,
//!     Arc::new(FigmaClient::new(&config.api)),
//!     Arc::new(TracingImporter::new()),
//!     Arc::new(NoopProgress),
//! )?;
//!
//! let summary = runner.sync_all(&config.jobs, ShutdownSignal::none()).await?;
//!
//! println!("Written: {}", summary.files_written);
//! println!("Deleted: {}", summary.files_deleted);
//! # Ok(())
//! # }
//! ```

pub mod sync;
pub mod transform;
