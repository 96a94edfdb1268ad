//! Remote document domain model
//!
//! This module defines the node tree returned by the remote document API and
//! the flattening rule that turns it into the ordered list of export units.

use super::ids::NodeId;
use serde::{Deserialize, Serialize};

/// Node type whose children are exported as individual variants
pub const COMPONENT_SET_TYPE: &str = "COMPONENT_SET";

/// Separator used when joining a component set's name with a variant suffix
pub const EXPORT_NAME_SEPARATOR: char = '/';

/// A node in the remote document tree
///
/// Immutable once fetched; owned by the current sync run and discarded
/// after export-unit extraction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteNode {
    /// Node identifier
    pub id: NodeId,

    /// Node name as authored in the design document
    pub name: String,

    /// Node type string, e.g. `FRAME`, `COMPONENT`, `COMPONENT_SET`
    pub node_type: String,

    /// Visibility flag. Carried through from the API (default true) but
    /// not consulted during extraction: invisible nodes are exported.
    pub visible: bool,

    /// Child nodes in document order
    pub children: Vec<RemoteNode>,
}

impl RemoteNode {
    /// Creates a new node with no children and default visibility
    pub fn new(id: NodeId, name: impl Into<String>, node_type: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            node_type: node_type.into(),
            visible: true,
            children: Vec::new(),
        }
    }

    /// Sets the child nodes
    pub fn with_children(mut self, children: Vec<RemoteNode>) -> Self {
        self.children = children;
        self
    }

    /// Sets the visibility flag
    pub fn with_visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    /// Returns true when this node's children are exported as variants
    pub fn is_component_set(&self) -> bool {
        self.node_type == COMPONENT_SET_TYPE
    }
}

/// The root of a fetched remote document
///
/// Only the root's direct children are considered for export; grandchildren
/// are inspected solely for the component-set flattening rule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteDocument {
    /// Root node identifier
    pub id: NodeId,

    /// Root node name
    pub name: String,

    /// Direct children in document order
    pub children: Vec<RemoteNode>,
}

impl RemoteDocument {
    /// Creates a new document root
    pub fn new(id: NodeId, name: impl Into<String>, children: Vec<RemoteNode>) -> Self {
        Self {
            id,
            name: name.into(),
            children,
        }
    }

    /// Flattens the document into the ordered list of export units
    ///
    /// For each direct child of the root:
    ///
    /// - a `COMPONENT_SET` node contributes one unit per child variant, named
    ///   `{set_name}/{variant_suffix}`, and no unit for the set node itself;
    /// - every other node contributes exactly one unit under its own name.
    ///
    /// The variant suffix is the portion of the variant's name after the
    /// first `=`; a name without `=` is used as-is. Visibility is not
    /// filtered. Order follows document order.
    ///
    /// # Examples
    ///
    /// ```
    /// use figsync::domain::document::{RemoteDocument, RemoteNode};
    /// use figsync::domain::ids::NodeId;
    ///
    /// let set = RemoteNode::new(NodeId::new("1:1").unwrap(), "Button", "COMPONENT_SET")
    ///     .with_children(vec![
    ///         RemoteNode::new(NodeId::new("1:2").unwrap(), "State=Hover", "COMPONENT"),
    ///     ]);
    /// let doc = RemoteDocument::new(NodeId::new("0:0").unwrap(), "Assets", vec![set]);
    ///
    /// let units = doc.export_units();
    /// assert_eq!(units[0].export_name, "Button/Hover");
    /// ```
    pub fn export_units(&self) -> Vec<ExportUnit> {
        let mut units = Vec::new();
        for child in &self.children {
            if child.is_component_set() {
                for variant in &child.children {
                    units.push(ExportUnit::new(
                        variant.id.clone(),
                        format!(
                            "{}{}{}",
                            child.name,
                            EXPORT_NAME_SEPARATOR,
                            variant_suffix(&variant.name)
                        ),
                    ));
                }
            } else {
                units.push(ExportUnit::new(child.id.clone(), child.name.clone()));
            }
        }
        units
    }
}

/// A flattened, export-ready reference to one remote node
///
/// The export name doubles as the output path relative to the job's export
/// directory (the `.png` extension is appended at save time).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportUnit {
    /// Identifier of the node to render
    pub node_id: NodeId,

    /// Relative output name, e.g. `Button/Hover`
    pub export_name: String,
}

impl ExportUnit {
    /// Creates a new export unit
    pub fn new(node_id: NodeId, export_name: impl Into<String>) -> Self {
        Self {
            node_id,
            export_name: export_name.into(),
        }
    }
}

/// Extracts the variant suffix from a component name
///
/// Component-set children are conventionally named `Property=Value`; the
/// suffix is everything after the first `=`. Names without `=` fall back
/// to the raw name so misnamed variants still export instead of failing.
fn variant_suffix(name: &str) -> &str {
    match name.split_once('=') {
        Some((_, suffix)) => suffix,
        None => name,
    }
}
