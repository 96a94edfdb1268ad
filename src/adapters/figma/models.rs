//! Figma REST API wire models
//!
//! This module defines the serde structures for Figma API responses and
//! conversion functions to map them into domain types.

use crate::domain::ids::NodeId;
use crate::domain::{FigmaApiError, RemoteDocument, RemoteNode, Result};
use serde::Deserialize;
use std::collections::HashMap;

/// Response of the nodes endpoint (`GET /v1/files/{file_key}/nodes`)
#[derive(Debug, Deserialize)]
pub struct NodesResponse {
    /// Name of the containing file
    #[serde(default)]
    pub name: String,

    /// Requested node ids mapped to their resolved subtrees.
    /// Unknown ids come back as `null`.
    #[serde(default)]
    pub nodes: HashMap<String, Option<NodeEnvelope>>,
}

impl NodesResponse {
    /// Extract the resolved subtree for `node_id` as a domain document
    ///
    /// # Errors
    ///
    /// Returns `NodeNotFound` if the response has no entry for the id, and
    /// `InvalidResponse` if the subtree contains malformed node ids.
    pub fn into_document(mut self, node_id: &NodeId) -> Result<RemoteDocument> {
        let envelope = self
            .nodes
            .remove(node_id.as_str())
            .flatten()
            .ok_or_else(|| FigmaApiError::NodeNotFound(node_id.to_string()))?;

        let RemoteNode {
            id, name, children, ..
        } = envelope.document.to_domain()?;

        Ok(RemoteDocument::new(id, name, children))
    }
}

/// Wrapper object Figma places around each resolved node
#[derive(Debug, Deserialize)]
pub struct NodeEnvelope {
    /// The resolved node subtree
    pub document: WireNode,
}

/// One node of a resolved subtree
#[derive(Debug, Deserialize)]
pub struct WireNode {
    /// Node id, e.g. `12:34`
    pub id: String,

    /// Layer name as shown in the editor
    pub name: String,

    /// Node type, e.g. `FRAME` or `COMPONENT_SET`
    #[serde(rename = "type")]
    pub node_type: String,

    /// Figma omits this field entirely when the node is visible
    #[serde(default = "default_visible")]
    pub visible: bool,

    /// Child nodes, present down to the requested traversal depth
    #[serde(default)]
    pub children: Vec<WireNode>,
}

impl WireNode {
    /// Convert this wire node and its children to the domain representation
    ///
    /// # Errors
    ///
    /// Returns `InvalidResponse` if any node id in the subtree is malformed.
    pub fn to_domain(&self) -> Result<RemoteNode> {
        let id = NodeId::new(&self.id).map_err(FigmaApiError::InvalidResponse)?;

        let children = self
            .children
            .iter()
            .map(|child| child.to_domain())
            .collect::<Result<Vec<_>>>()?;

        Ok(RemoteNode::new(id, self.name.clone(), self.node_type.clone())
            .with_visible(self.visible)
            .with_children(children))
    }
}

fn default_visible() -> bool {
    true
}

/// Response of the image render endpoint (`GET /v1/images/{file_key}`)
#[derive(Debug, Deserialize)]
pub struct ImagesResponse {
    /// File-level render error, `null` on success
    #[serde(default)]
    pub err: Option<String>,

    /// Node ids mapped to rendered image URLs.
    /// A `null` URL means Figma could not render that node.
    #[serde(default)]
    pub images: HashMap<String, Option<String>>,
}

impl ImagesResponse {
    /// Convert to a domain url map keyed by node id
    ///
    /// Entries with malformed node ids are skipped with a warning; units
    /// pointing at them later surface as missing-URL failures.
    ///
    /// # Errors
    ///
    /// Returns `InvalidResponse` if the render service reported a file-level
    /// error.
    pub fn into_url_map(self) -> Result<HashMap<NodeId, Option<String>>> {
        if let Some(err) = self.err {
            return Err(
                FigmaApiError::InvalidResponse(format!("Image render failed: {err}")).into(),
            );
        }

        let mut urls = HashMap::with_capacity(self.images.len());
        for (raw_id, url) in self.images {
            match NodeId::new(&raw_id) {
                Ok(id) => {
                    urls.insert(id, url);
                }
                Err(e) => {
                    tracing::warn!(
                        node_id = %raw_id,
                        error = %e,
                        "Skipping invalid node id in image response"
                    );
                }
            }
        }

        Ok(urls)
    }
}
