//! Namespace bridging between RDF namespace URIs and store prefixes
//!
//! The store addresses properties and types by short prefixed names; RDF
//! speaks in full namespace URIs. `NamespaceBridge` crosses that boundary:
//! lookups go against the session's namespace table, unknown namespaces
//! are registered on demand, and the bridge tracks a delta of what it
//! registered so callers can report or log the allocations.
//!
//! The table is append-only. A URI that is already mapped keeps its
//! prefix forever; a requested prefix that collides with a different URI
//! is never overwritten — the new URI gets the next free synthetic
//! prefix (`ns1`, `ns2`, …) instead.

use crate::error::{RdfError, Result};
use grove_db_core::{split_prefixed, Session};
use grove_vocab::prefixes;

/// Bridge between RDF namespace URIs and the store's prefix table
#[derive(Debug, Default)]
pub struct NamespaceBridge {
    /// Registrations performed through this bridge: (prefix, namespace URI)
    delta: Vec<(String, String)>,
}

impl NamespaceBridge {
    /// Create a bridge with an empty delta
    pub fn new() -> Self {
        Self::default()
    }

    /// Split an absolute IRI into (namespace, local name)
    ///
    /// Splits after the last `/` or `#`. Fails when no split point exists
    /// or the local name is empty.
    pub fn split_iri(iri: &str) -> Result<(&str, &str)> {
        let pos = iri
            .rfind(['/', '#'])
            .ok_or_else(|| RdfError::UnknownNamespace(format!("no namespace in '{}'", iri)))?;
        let (ns, local) = (&iri[..=pos], &iri[pos + 1..]);
        if local.is_empty() {
            return Err(RdfError::UnknownNamespace(format!(
                "'{}' has no local name",
                iri
            )));
        }
        Ok((ns, local))
    }

    /// The prefix for a namespace URI, registering it on demand
    ///
    /// A URI already in the table keeps its existing prefix. Otherwise the
    /// requested prefix is used if free; a collision (or no request)
    /// allocates the next free synthetic prefix.
    pub fn prefix_for(
        &mut self,
        session: &mut Session,
        uri: &str,
        requested: Option<&str>,
    ) -> Result<String> {
        if let Some(prefix) = session.prefix_for_uri(uri)? {
            return Ok(prefix);
        }
        let prefix = match requested {
            Some(req) if session.namespace_uri(req)?.is_none() => req.to_string(),
            _ => self.next_synthetic(session)?,
        };
        session.register_namespace(&prefix, uri)?;
        tracing::debug!(prefix = %prefix, uri = %uri, "registered namespace");
        self.delta.push((prefix.clone(), uri.to_string()));
        Ok(prefix)
    }

    fn next_synthetic(&self, session: &Session) -> Result<String> {
        let mut n: u32 = 1;
        loop {
            let candidate = format!("{}{}", prefixes::SYNTHETIC_STEM, n);
            if session.namespace_uri(&candidate)?.is_none() {
                return Ok(candidate);
            }
            n += 1;
        }
    }

    /// Shorten an absolute IRI to the store's prefixed form, registering
    /// its namespace on demand (write path)
    pub fn shorten(&mut self, session: &mut Session, iri: &str) -> Result<String> {
        let (ns, local) = Self::split_iri(iri)?;
        let prefix = self.prefix_for(session, ns, None)?;
        Ok(format!("{}:{}", prefix, local))
    }

    /// Shorten an absolute IRI using only existing mappings (read path)
    pub fn shorten_existing(session: &Session, iri: &str) -> Result<String> {
        let (ns, local) = Self::split_iri(iri)?;
        let prefix = session
            .prefix_for_uri(ns)?
            .ok_or_else(|| RdfError::UnknownNamespace(ns.to_string()))?;
        Ok(format!("{}:{}", prefix, local))
    }

    /// Expand a prefixed name to its absolute IRI
    pub fn expand(session: &Session, prefixed: &str) -> Result<String> {
        let (prefix, local) = split_prefixed(prefixed).ok_or_else(|| {
            RdfError::UnknownNamespace(format!("'{}' is not a prefixed name", prefixed))
        })?;
        let ns = session
            .namespace_uri(prefix)?
            .ok_or_else(|| RdfError::UnknownNamespace(format!("prefix '{}'", prefix)))?;
        Ok(format!("{}{}", ns, local))
    }

    /// Registrations performed through this bridge
    pub fn delta(&self) -> &[(String, String)] {
        &self.delta
    }

    /// Check if the bridge registered anything
    pub fn has_delta(&self) -> bool {
        !self.delta.is_empty()
    }

    /// Take the delta, resetting it
    pub fn take_delta(&mut self) -> Vec<(String, String)> {
        std::mem::take(&mut self.delta)
    }
}
