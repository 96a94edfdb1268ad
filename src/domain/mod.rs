//! Domain models and types for figsync.
//!
//! This module contains the core domain models, types, and business rules.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Strongly-typed identifiers** ([`FileKey`], [`NodeId`])
//! - **Domain models** ([`RemoteDocument`], [`RemoteNode`], [`ExportUnit`])
//! - **Error types** ([`FigsyncError`], [`FigmaApiError`])
//! - **Result type alias** ([`Result`])
//!
//! # Type Safety
//!
//! figsync uses the newtype pattern for identifiers to prevent mixing
//! different ID types:
//!
//! ```rust
//! use figsync::domain::{FileKey, NodeId};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let file_key = FileKey::new("hJb5c0eXzY4kFM2vTqRnwA")?;
//! let node_id = NodeId::new("12:34")?;
//!
//! // This won't compile - type safety prevents mixing IDs
//! // let wrong: FileKey = node_id;  // Compile error!
//! # Ok(())
//! # }
//! ```
//!
//! # Error Handling
//!
//! All fallible operations return [`Result<T, FigsyncError>`]:
//!
//! ```rust
//! use figsync::domain::{FigsyncError, Result};
//!
//! fn example() -> Result<()> {
//!     let config = figsync::config::load_config("figsync.toml")?;
//!     Ok(())
//! }
//! ```

pub mod context;
pub mod document;
pub mod errors;
pub mod ids;
pub mod result;

// Re-export commonly used types for convenience
pub use context::ResultExt;
pub use document::{ExportUnit, RemoteDocument, RemoteNode};
pub use errors::{FigmaApiError, FigsyncError, UnitFailure};
pub use ids::{FileKey, NodeId};
pub use result::Result;
