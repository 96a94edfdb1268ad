//! External system integrations for figsync.
//!
//! This module provides adapters for integrating with external systems:
//!
//! - [`figma`] - Figma REST API access (node resolution, image rendering,
//!   downloads)
//! - [`import`] - Asset-import collaborator notified after each job
//!
//! # Design Pattern
//!
//! Adapters follow the **Adapter Pattern** to isolate external dependencies
//! and enable testing with mock implementations. The sync engine only depends
//! on the [`figma::FigmaApi`] and [`import::ImportRefresh`] traits.
//!
//! # Figma Adapter
//!
//! ```rust,no_run
//! use figsync::adapters::figma::{FigmaApi, FigmaClient};
//! use figsync::config::ApiConfig;
//! use figsync::domain::ids::{FileKey, NodeId};
//! use std::str::FromStr;
//!
//! # async fn example(config: ApiConfig) -> Result<(), Box<dyn std::error::Error>> {
//! let client = FigmaClient::new(&config);
//!
//! let file_key = FileKey::from_str("hJb5c0eXzY4kFM2vTqRnwA")?;
//! let node_id = NodeId::from_str("12:34")?;
//!
//! let document = client.get_document(&file_key, &node_id).await?;
//! println!("{} exportable units", document.export_units().len());
//! # Ok(())
//! # }
//! ```

pub mod figma;
pub mod import;
