//! Node paths
//!
//! A `NodePath` addresses one node in the tree: an ordered sequence of
//! segment names rooted at `/`. Paths are the stable identity of a node
//! within one session; moves and deletes invalidate them.
//!
//! A path may be transaction-scoped: its first segment has the form
//! `tx:<id>`. The scoped form addresses the same node as the canonical
//! form but only resolves inside the named session. `canonical()` strips
//! the scope segment to produce the durable public form.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Prefix marking a transaction-scope segment
pub const TX_SEGMENT_PREFIX: &str = "tx:";

/// Path to a node in the hierarchy
///
/// The root path has zero segments and formats as `/`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodePath {
    segments: Vec<String>,
}

impl NodePath {
    /// The root path
    pub fn root() -> Self {
        Self {
            segments: Vec::new(),
        }
    }

    /// Parse a path string
    ///
    /// The string must start with `/`. Empty segments (`//`) and the
    /// relative segments `.` / `..` are rejected.
    pub fn parse(raw: &str) -> Result<Self> {
        let rest = raw
            .strip_prefix('/')
            .ok_or_else(|| Error::invalid_path(format!("path must start with '/': '{}'", raw)))?;

        if rest.is_empty() {
            return Ok(Self::root());
        }

        // A single trailing slash is tolerated, anything else empty is not.
        let trimmed = rest.strip_suffix('/').unwrap_or(rest);

        let mut segments = Vec::new();
        for segment in trimmed.split('/') {
            validate_segment(segment)?;
            segments.push(segment.to_string());
        }
        Ok(Self { segments })
    }

    /// Build a path from validated segments
    pub fn from_segments<I, S>(iter: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut segments = Vec::new();
        for segment in iter {
            validate_segment(segment.as_ref())?;
            segments.push(segment.as_ref().to_string());
        }
        Ok(Self { segments })
    }

    /// The path's segments, in order
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Check if this is the root path
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// The final segment, if any
    pub fn name(&self) -> Option<&str> {
        self.segments.last().map(|s| s.as_str())
    }

    /// The parent path (None for the root)
    pub fn parent(&self) -> Option<NodePath> {
        if self.segments.is_empty() {
            return None;
        }
        Some(NodePath {
            segments: self.segments[..self.segments.len() - 1].to_vec(),
        })
    }

    /// Append a child segment
    pub fn child(&self, name: &str) -> Result<NodePath> {
        validate_segment(name)?;
        let mut segments = self.segments.clone();
        segments.push(name.to_string());
        Ok(NodePath { segments })
    }

    /// Check if `self` is the immediate parent of `other`
    pub fn is_parent_of(&self, other: &NodePath) -> bool {
        other.segments.len() == self.segments.len() + 1
            && other.segments[..self.segments.len()] == self.segments[..]
    }

    /// Check if the path carries a transaction-scope segment
    pub fn is_transaction_scoped(&self) -> bool {
        self.segments
            .first()
            .is_some_and(|s| s.starts_with(TX_SEGMENT_PREFIX))
    }

    /// The transaction id, if the path is transaction-scoped
    pub fn transaction_id(&self) -> Option<&str> {
        self.segments
            .first()
            .and_then(|s| s.strip_prefix(TX_SEGMENT_PREFIX))
    }

    /// The durable public form: the same path with any leading
    /// transaction-scope segment stripped
    pub fn canonical(&self) -> NodePath {
        if self.is_transaction_scoped() {
            NodePath {
                segments: self.segments[1..].to_vec(),
            }
        } else {
            self.clone()
        }
    }

    /// Scope the path to a transaction
    ///
    /// No-op if the path is already scoped.
    pub fn with_transaction(&self, tx_id: &str) -> NodePath {
        if self.is_transaction_scoped() {
            return self.clone();
        }
        let mut segments = Vec::with_capacity(self.segments.len() + 1);
        segments.push(format!("{}{}", TX_SEGMENT_PREFIX, tx_id));
        segments.extend(self.segments.iter().cloned());
        NodePath { segments }
    }
}

fn validate_segment(segment: &str) -> Result<()> {
    if segment.is_empty() {
        return Err(Error::invalid_path("empty path segment"));
    }
    if segment == "." || segment == ".." {
        return Err(Error::invalid_path(format!(
            "relative segment '{}' not allowed",
            segment
        )));
    }
    if let Some(bad) = segment
        .chars()
        .find(|c| !(c.is_alphanumeric() || matches!(c, '-' | '_' | '.' | ':' | '%')))
    {
        return Err(Error::invalid_path(format!(
            "illegal character '{}' in segment '{}'",
            bad, segment
        )));
    }
    Ok(())
}

impl fmt::Display for NodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.segments.is_empty() {
            return write!(f, "/");
        }
        for segment in &self.segments {
            write!(f, "/{}", segment)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_display() {
        let path = NodePath::parse("/a/b/c").unwrap();
        assert_eq!(path.segments().len(), 3);
        assert_eq!(path.to_string(), "/a/b/c");

        assert_eq!(NodePath::parse("/").unwrap(), NodePath::root());
        assert_eq!(NodePath::root().to_string(), "/");
    }

    #[test]
    fn test_parse_rejects_bad_paths() {
        assert!(NodePath::parse("no-slash").is_err());
        assert!(NodePath::parse("/a//b").is_err());
        assert!(NodePath::parse("/a/../b").is_err());
        assert!(NodePath::parse("/a/b c").is_err());
    }

    #[test]
    fn test_parent_and_name() {
        let path = NodePath::parse("/a/b").unwrap();
        assert_eq!(path.name(), Some("b"));
        assert_eq!(path.parent().unwrap().to_string(), "/a");
        assert_eq!(path.parent().unwrap().parent().unwrap(), NodePath::root());
        assert!(NodePath::root().parent().is_none());
    }

    #[test]
    fn test_is_parent_of() {
        let parent = NodePath::parse("/a").unwrap();
        let child = NodePath::parse("/a/b").unwrap();
        let grandchild = NodePath::parse("/a/b/c").unwrap();

        assert!(parent.is_parent_of(&child));
        assert!(!parent.is_parent_of(&grandchild));
        assert!(NodePath::root().is_parent_of(&parent));
    }

    #[test]
    fn test_transaction_scope() {
        let scoped = NodePath::parse("/tx:42/a/b").unwrap();
        assert!(scoped.is_transaction_scoped());
        assert_eq!(scoped.transaction_id(), Some("42"));
        assert_eq!(scoped.canonical().to_string(), "/a/b");

        let plain = NodePath::parse("/a/b").unwrap();
        assert!(!plain.is_transaction_scoped());
        assert_eq!(plain.canonical(), plain);
        assert_eq!(plain.with_transaction("42"), scoped);

        // Scoping an already-scoped path is a no-op
        assert_eq!(scoped.with_transaction("99"), scoped);
    }

    #[test]
    fn test_child() {
        let path = NodePath::root().child("a").unwrap().child("b").unwrap();
        assert_eq!(path.to_string(), "/a/b");
        assert!(NodePath::root().child("a/b").is_err());
    }
}
