//! Domain identifier types with validation
//!
//! This module provides newtype wrappers for Figma identifiers. Each type
//! ensures type safety and provides validation for format compliance.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Figma file key newtype wrapper
///
/// Identifies the remote document (the `{file_key}` path segment of the
/// Figma REST API). Opaque alphanumeric token.
///
/// # Examples
///
/// ```
/// use figsync::domain::ids::FileKey;
/// use std::str::FromStr;
///
/// let key = FileKey::from_str("hJb5c0eXzY4kFM2vTqRnwA").unwrap();
/// assert_eq!(key.as_str(), "hJb5c0eXzY4kFM2vTqRnwA");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FileKey(String);

impl FileKey {
    /// Creates a new FileKey from a string
    ///
    /// # Arguments
    ///
    /// * `key` - The file key string
    ///
    /// # Returns
    ///
    /// Returns `Ok(FileKey)` if the key is valid, `Err` otherwise
    pub fn new(key: impl Into<String>) -> Result<Self, String> {
        let key = key.into();
        if key.trim().is_empty() {
            return Err("File key cannot be empty".to_string());
        }
        if key.contains(|c: char| c.is_whitespace() || c == '/') {
            return Err(format!(
                "File key cannot contain whitespace or '/': {key}"
            ));
        }
        Ok(Self(key))
    }

    /// Returns the file key as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes self and returns the inner String
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for FileKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for FileKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for FileKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Figma node identifier newtype wrapper
///
/// Node ids as returned by the API, e.g. `12:34` or instance ids like
/// `I12:34;56:78`. Used both for the per-job root node token and for the
/// ids of individual export units.
///
/// # Examples
///
/// ```
/// use figsync::domain::ids::NodeId;
/// use std::str::FromStr;
///
/// let id = NodeId::from_str("12:34").unwrap();
/// assert_eq!(id.as_str(), "12:34");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeId(String);

impl NodeId {
    /// Creates a new NodeId from a string
    ///
    /// # Arguments
    ///
    /// * `id` - The node identifier string
    ///
    /// # Returns
    ///
    /// Returns `Ok(NodeId)` if the ID is valid, `Err` otherwise
    pub fn new(id: impl Into<String>) -> Result<Self, String> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err("Node ID cannot be empty".to_string());
        }
        if id.contains(char::is_whitespace) {
            return Err(format!("Node ID cannot contain whitespace: {id}"));
        }
        Ok(Self(id))
    }

    /// Returns the node ID as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes self and returns the inner String
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for NodeId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for NodeId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Builds the comma-separated ids parameter for a batched image-URL request
pub fn join_ids(ids: &[NodeId]) -> String {
    ids.iter()
        .map(NodeId::as_str)
        .collect::<Vec<_>>()
        .join(",")
}
