use std::collections::BTreeMap;

use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};

use crate::error::LoadError;

use super::path;

/// One file or directory entry inside a backup snapshot.
///
/// Built only through [`TreeNode::from_json`] (validated server payload) or
/// the `new_dir`/`new_file` constructors, so the invariants below hold:
/// the root is a directory, files have no children and every child is
/// stored under its own name.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TreeNode {
    /// Base name of the entry
    pub name: String,

    /// Path from the snapshot root, as reported by the server
    pub path: String,

    /// True if this is a directory
    pub is_dir: bool,

    /// Size in bytes (0 for directories)
    pub size: u64,

    /// Last modification time, if the server reported one
    #[serde(rename = "mod_time", skip_serializing_if = "Option::is_none")]
    pub modified_at: Option<DateTime<Utc>>,

    /// Child entries keyed by name (empty for files)
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub children: BTreeMap<String, TreeNode>,
}

/// Tree node exactly as the restore API serializes it.
#[derive(Debug, Deserialize)]
struct RawNode {
    name: String,
    path: String,
    is_dir: bool,
    #[serde(default)]
    size: Option<u64>,
    #[serde(default)]
    mod_time: Option<DateTime<Utc>>,
    #[serde(default)]
    children: Option<BTreeMap<String, RawNode>>,
}

impl TreeNode {
    /// Create an empty directory node.
    pub fn new_dir(path: &str) -> Self {
        Self {
            name: path::file_name(path).to_string(),
            path: path::normalize(path),
            is_dir: true,
            size: 0,
            modified_at: None,
            children: BTreeMap::new(),
        }
    }

    /// Create a file node.
    pub fn new_file(path: &str, size: u64, modified_at: Option<DateTime<Utc>>) -> Self {
        Self {
            name: path::file_name(path).to_string(),
            path: path::normalize(path),
            is_dir: false,
            size,
            modified_at,
            children: BTreeMap::new(),
        }
    }

    /// Add a child under its name, replacing any previous entry.
    pub fn insert_child(&mut self, child: TreeNode) {
        self.children.insert(child.name.clone(), child);
    }

    /// Parse and validate a tree payload from the restore API.
    pub fn from_json(bytes: &[u8]) -> Result<Self, LoadError> {
        let raw: RawNode = serde_json::from_slice(bytes)?;

        if !raw.is_dir {
            return Err(LoadError::Malformed(format!(
                "root '{}' is not a directory",
                raw.path
            )));
        }
        if raw.path != path::ROOT {
            return Err(LoadError::Malformed(format!(
                "root path must be '/', got '{}'",
                raw.path
            )));
        }

        Self::from_raw(raw)
    }

    fn from_raw(raw: RawNode) -> Result<Self, LoadError> {
        let children = raw.children.unwrap_or_default();

        if !raw.is_dir && !children.is_empty() {
            return Err(LoadError::Malformed(format!(
                "file '{}' has children",
                raw.path
            )));
        }

        let mut converted = BTreeMap::new();
        for (key, child) in children {
            if key.is_empty() || key == "." || key == ".." || key.contains('/') {
                return Err(LoadError::Malformed(format!(
                    "invalid entry name '{}' under '{}'",
                    key, raw.path
                )));
            }
            if child.name != key {
                return Err(LoadError::Malformed(format!(
                    "entry '{}' under '{}' is named '{}'",
                    key, raw.path, child.name
                )));
            }
            // Paths may be relative, but must sit directly under the parent
            if path::normalize(&child.path) != path::normalize(&path::join(&raw.path, &key)) {
                return Err(LoadError::Malformed(format!(
                    "entry '{}' under '{}' has path '{}'",
                    key, raw.path, child.path
                )));
            }
            converted.insert(key, Self::from_raw(child)?);
        }

        Ok(Self {
            name: raw.name,
            path: raw.path,
            is_dir: raw.is_dir,
            size: if raw.is_dir { 0 } else { raw.size.unwrap_or(0) },
            // A zero timestamp (year 1) means the time is unknown
            modified_at: raw.mod_time.filter(|t| t.year() > 1),
            children: converted,
        })
    }

    /// Look up a direct child by name.
    pub fn child(&self, name: &str) -> Option<&TreeNode> {
        self.children.get(name)
    }

    /// Resolve a path relative to this node by walking its segments.
    ///
    /// Returns `None` if a segment is missing or an intermediate node is a file.
    pub fn resolve(&self, path: &str) -> Option<&TreeNode> {
        let mut node = self;
        for segment in path::segments(path) {
            if !node.is_dir {
                return None;
            }
            node = node.children.get(segment)?;
        }
        Some(node)
    }

    /// Number of files below this node (1 for a file).
    pub fn file_count(&self) -> u64 {
        if self.is_dir {
            self.children.values().map(TreeNode::file_count).sum()
        } else {
            1
        }
    }

    /// Sum of file sizes below this node.
    pub fn total_size(&self) -> u64 {
        if self.is_dir {
            self.children.values().map(TreeNode::total_size).sum()
        } else {
            self.size
        }
    }
}
