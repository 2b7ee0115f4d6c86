//! Node data
//!
//! The stored state of one node in the tree. Properties are kept in a
//! `BTreeMap` so iteration order is deterministic and caller-visible;
//! values within a multi-valued property keep insertion order.

use crate::path::NodePath;
use crate::value::PropertyValue;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One labeled version of a node
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionEntry {
    /// Caller-supplied version label, unique per node
    pub label: String,
    /// When the version was created
    pub created: DateTime<Utc>,
}

/// Stored state of one node
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NodeData {
    /// Path identity of the node
    pub path: NodePath,
    /// Primary type (prefixed name), fixed for the node's lifetime
    pub primary_type: String,
    /// Declared mixins (prefixed names), insertion order
    pub mixins: Vec<String>,
    /// Properties, keyed by prefixed name; multi-valued kept in order
    pub properties: BTreeMap<String, Vec<PropertyValue>>,
    /// Creation timestamp
    pub created: DateTime<Utc>,
    /// Last modification timestamp
    pub modified: DateTime<Utc>,
    /// Version history, oldest first
    pub versions: Vec<VersionEntry>,
}

impl NodeData {
    /// Create a fresh node with no properties
    pub fn new(path: NodePath, primary_type: impl Into<String>, at: DateTime<Utc>) -> Self {
        Self {
            path,
            primary_type: primary_type.into(),
            mixins: Vec::new(),
            properties: BTreeMap::new(),
            created: at,
            modified: at,
            versions: Vec::new(),
        }
    }

    /// Values stored under a property name
    pub fn values(&self, name: &str) -> &[PropertyValue] {
        self.properties.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Check if the node stores the property
    pub fn has_property(&self, name: &str) -> bool {
        self.properties.contains_key(name)
    }

    /// Check if the node declares the type (primary or mixin)
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
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node() -> NodeData {
        NodeData::new(
            NodePath::parse("/a").unwrap(),
            "repo:Container",
            Utc::now(),
        )
    }

    #[test]
    fn test_type_names() {
        let mut n = node();
        n.mixins.push("repo:Versionable".to_string());

        assert!(n.has_type("repo:Container"));
        assert!(n.has_type("repo:Versionable"));
        assert!(!n.has_type("ex:Other"));
        assert_eq!(
            n.type_names(),
            vec!["repo:Container".to_string(), "repo:Versionable".to_string()]
        );
    }

    #[test]
    fn test_values_missing_property() {
        let n = node();
        assert!(n.values("dc:title").is_empty());
        assert!(!n.has_property("dc:title"));
    }
}
