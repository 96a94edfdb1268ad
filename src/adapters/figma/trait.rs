//! Figma API trait definition
//!
//! This module defines the `FigmaApi` trait that abstracts the Figma REST API
//! operations figsync depends on. The sync engine only talks to this trait,
//! which keeps the HTTP implementation swappable and testable.

use crate::domain::ids::{FileKey, NodeId};
use crate::domain::{RemoteDocument, Result};
use async_trait::async_trait;
use std::collections::HashMap;

/// Trait for Figma REST API access
///
/// This trait defines the interface the sync engine uses to talk to Figma.
/// The production implementation is [`FigmaClient`](super::FigmaClient);
/// tests substitute in-memory fakes.
///
/// # Example
///
/// ```no_run
/// use figsync::adapters::figma::{FigmaApi, FigmaClient};
/// use figsync::config::ApiConfig;
/// use figsync::domain::ids::{FileKey, NodeId};
/// use std::str::FromStr;
///
/// # async fn example(config: ApiConfig) -> Result<(), Box<dyn std::error::Error>> {
/// let client = FigmaClient::new(&config);
///
/// let file_key = FileKey::from_str("hJb5c0eXzY4kFM2vTqRnwA")?;
/// let node_id = NodeId::from_str("12:34")?;
///
/// // Resolve the node and its children
/// let document = client.get_document(&file_key, &node_id).await?;
/// println!("Resolved '{}' with {} children", document.name, document.children.len());
/// # Ok(())
/// # }
/// ```
#[async_trait]
pub trait FigmaApi: Send + Sync {
    /// Resolve a node and its subtree from a Figma file
    ///
    /// Fetches the node identified by `node_id` with a traversal depth of two
    /// levels, which is enough to see the node's direct children and, for
    /// component sets among them, their variant children.
    ///
    /// # Arguments
    ///
    /// * `file_key` - The Figma file to read from
    /// * `node_id` - The root node to resolve
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the node does not exist in the
    /// file, or the response cannot be parsed.
    async fn get_document(&self, file_key: &FileKey, node_id: &NodeId) -> Result<RemoteDocument>;

    /// Request rendered PNG URLs for a batch of nodes
    ///
    /// Issues a single render request for all given node ids. The returned
    /// map contains one entry per requested node; the value is `None` when
    /// Figma could not render that node.
    ///
    /// # Arguments
    ///
    /// * `file_key` - The Figma file the nodes belong to
    /// * `node_ids` - Node ids to render, sent as one comma-separated request
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the render service reports
    /// a file-level error.
    async fn get_image_urls(
        &self,
        file_key: &FileKey,
        node_ids: &[NodeId],
    ) -> Result<HashMap<NodeId, Option<String>>>;

    /// Download rendered image bytes from a URL
    ///
    /// The URLs returned by [`get_image_urls`](Self::get_image_urls) point at
    /// short-lived storage and require no authentication, so this is a plain
    /// GET for the raw bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if the download fails or the server responds with a
    /// non-success status.
    async fn download_image(&self, url: &str) -> Result<Vec<u8>>;
}
