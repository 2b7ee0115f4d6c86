//! Resource snapshots
//!
//! A `Resource` is an owned value object describing one node at the moment
//! it was read from a session. It never holds a live handle into the store;
//! all further reads and mutations go back through the session.

use crate::node::NodeData;
use crate::path::NodePath;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Snapshot of one node's identity and type information
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    /// Path the snapshot was taken at (may be transaction-scoped)
    pub path: NodePath,
    /// Primary type (prefixed name)
    pub primary_type: String,
    /// Declared mixins (prefixed names)
    pub mixins: Vec<String>,
    /// Creation timestamp
    pub created: DateTime<Utc>,
    /// Last modification timestamp
    pub modified: DateTime<Utc>,
    /// True when the node was created in the current session and is not
    /// yet committed
    pub new: bool,
}

impl Resource {
    /// Build a snapshot from stored node data
    pub fn from_node(path: NodePath, node: &NodeData, new: bool) -> Self {
        Self {
            path,
            primary_type: node.primary_type.clone(),
            mixins: node.mixins.clone(),
            created: node.created,
            modified: node.modified,
            new,
        }
    }

    /// Check if the resource declares the type (primary or mixin),
    /// by prefixed short form
    pub fn has_type(&self, name: &str) -> bool {
        self.primary_type == name || self.mixins.iter().any(|m| m == name)
    }

    /// All declared type names: primary first, then mixins in order
    pub fn type_names(&self) -> Vec<String> {
        let mut names = Vec::with_capacity(1 + self.mixins.len());
        names.push(self.primary_type.clone());
        names.extend(self.mixins.iter().cloned());
        names
    }

    /// ETag value derived from the canonical path and last-modified
    /// timestamp
    ///
    /// Whole-object: any property or type mutation bumps the modified
    /// timestamp and therefore the tag.
    pub fn etag_value(&self) -> String {
        let mut hasher = DefaultHasher::new();
        self.path.canonical().to_string().hash(&mut hasher);
        self.modified.timestamp_millis().hash(&mut hasher);
        format!("{:x}", hasher.finish())
    }
}
