//! Identifier translation between store paths and RDF resource URIs
//!
//! A translator manages one URI namespace, anchored at a base URI. Within
//! that namespace the conversion is a round-trip pair:
//! `to_path(to_uri(p)) == p` for every valid path, and
//! `to_uri(to_path(u)) == u` for every URI this translator produced.
//!
//! Transaction-scoped paths (`/tx:<id>/...`) encode into the URI as-is so
//! the URI stays usable within that session; `canonicalize` strips the
//! scope segment to produce the durable public form used for ETags and
//! cross-session links.

use crate::error::{RdfError, Result};
use grove_db_core::NodePath;
use grove_graph_ir::Term;

/// Path segment under which version URIs hang off their subject
pub const VERSIONS_SEGMENT: &str = "repo:versions";

/// Bidirectional store-path ↔ URI converter for one URI namespace
#[derive(Clone, Debug)]
pub struct IdentifierTranslator {
    /// Base URI, without trailing slash
    base: String,
}

impl IdentifierTranslator {
    /// Create a translator anchored at a base URI
    ///
    /// A trailing slash on the base is tolerated and stripped.
    pub fn new(base: impl Into<String>) -> Self {
        let mut base = base.into();
        while base.ends_with('/') {
            base.pop();
        }
        Self { base }
    }

    /// The base URI this translator manages
    pub fn base(&self) -> &str {
        &self.base
    }

    /// Check whether a URI falls inside this translator's namespace
    pub fn in_namespace(&self, uri: &str) -> bool {
        match uri.strip_prefix(self.base.as_str()) {
            Some("") => true,
            Some(rest) => rest.starts_with('/'),
            None => false,
        }
    }

    /// Convert a store path to its resource URI
    pub fn to_uri(&self, path: &NodePath) -> String {
        if path.is_root() {
            format!("{}/", self.base)
        } else {
            format!("{}{}", self.base, path)
        }
    }

    /// Convert a store path to an IRI term
    pub fn to_term(&self, path: &NodePath) -> Term {
        Term::iri(self.to_uri(path))
    }

    /// Convert a resource URI back to a store path
    ///
    /// Fails when the URI is outside this translator's namespace or the
    /// embedded path is syntactically invalid.
    pub fn to_path(&self, uri: &str) -> Result<NodePath> {
        let rest = uri.strip_prefix(self.base.as_str()).ok_or_else(|| {
            RdfError::Translation(format!(
                "'{}' is outside the namespace of this translator ('{}')",
                uri, self.base
            ))
        })?;
        if rest.is_empty() || rest == "/" {
            return Ok(NodePath::root());
        }
        if !rest.starts_with('/') {
            return Err(RdfError::Translation(format!(
                "'{}' is outside the namespace of this translator ('{}')",
                uri, self.base
            )));
        }
        NodePath::parse(rest).map_err(|e| RdfError::Translation(e.to_string()))
    }

    /// Produce the durable public form of a URI: the same URI with any
    /// transaction-scope segment stripped
    pub fn canonicalize(&self, uri: &str) -> Result<String> {
        let path = self.to_path(uri)?;
        Ok(self.to_uri(&path.canonical()))
    }

    /// The version-identified URI variant of a subject
    pub fn version_uri(&self, path: &NodePath, label: &str) -> String {
        format!("{}/{}/{}", self.to_uri(&path.canonical()), VERSIONS_SEGMENT, label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn translator() -> IdentifierTranslator {
        IdentifierTranslator::new("http://localhost:8080/repo")
    }

    fn path(raw: &str) -> NodePath {
        NodePath::parse(raw).unwrap()
    }

    #[test]
    fn test_round_trip() {
        let t = translator();
        for raw in ["/", "/a", "/a/b/c", "/tx:7/a/b"] {
            let p = path(raw);
            assert_eq!(t.to_path(&t.to_uri(&p)).unwrap(), p);
        }
    }

    #[test]
    fn test_uri_forms() {
        let t = translator();
        assert_eq!(t.to_uri(&NodePath::root()), "http://localhost:8080/repo/");
        assert_eq!(t.to_uri(&path("/a/b")), "http://localhost:8080/repo/a/b");
    }

    #[test]
    fn test_base_trailing_slash_stripped() {
        let t = IdentifierTranslator::new("http://localhost:8080/repo/");
        assert_eq!(t.base(), "http://localhost:8080/repo");
        assert_eq!(t.to_uri(&path("/a")), "http://localhost:8080/repo/a");
    }

    #[test]
    fn test_outside_namespace_is_fatal() {
        let t = translator();
        assert!(matches!(
            t.to_path("http://other.example.org/a"),
            Err(RdfError::Translation(_))
        ));
        // Same host, sibling namespace
        assert!(matches!(
            t.to_path("http://localhost:8080/repository/a"),
            Err(RdfError::Translation(_))
        ));
        assert!(!t.in_namespace("http://other.example.org/a"));
        assert!(t.in_namespace("http://localhost:8080/repo/a"));
    }

    #[test]
    fn test_invalid_embedded_path() {
        let t = translator();
        assert!(matches!(
            t.to_path("http://localhost:8080/repo/a//b"),
            Err(RdfError::Translation(_))
        ));
    }

    #[test]
    fn test_canonicalize_strips_transaction_scope() {
        let t = translator();
        let scoped = t.to_uri(&path("/tx:7/a/b"));
        assert_eq!(
            t.canonicalize(&scoped).unwrap(),
            "http://localhost:8080/repo/a/b"
        );
        // Already-canonical URIs pass through unchanged
        let plain = t.to_uri(&path("/a/b"));
        assert_eq!(t.canonicalize(&plain).unwrap(), plain);
    }

    #[test]
    fn test_version_uri() {
        let t = translator();
        assert_eq!(
            t.version_uri(&path("/a"), "v1"),
            "http://localhost:8080/repo/a/repo:versions/v1"
        );
        // Version URIs are always canonical, even for scoped paths
        assert_eq!(
            t.version_uri(&path("/tx:7/a"), "v1"),
            "http://localhost:8080/repo/a/repo:versions/v1"
        );
    }
}
