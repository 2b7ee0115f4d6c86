//! Store namespace table defaults
//!
//! The store addresses properties and types by short prefixed names
//! (`dc:title`, `repo:Container`). This module seeds the prefix → URI
//! table every repository starts with. New namespaces are allocated
//! lazily at first use on the write path; the table is append-only.

use grove_vocab::{dcterms, foaf, ldp, prefixes, rdf, rdfs, repo, sys, xsd};
use std::collections::BTreeMap;

/// Baseline namespace table (prefix → namespace URI)
pub fn default_namespaces() -> BTreeMap<String, String> {
    let mut map = BTreeMap::new();
    map.insert(prefixes::RDF.to_string(), rdf::NAMESPACE.to_string());
    map.insert(prefixes::RDFS.to_string(), rdfs::NAMESPACE.to_string());
    map.insert(prefixes::XSD.to_string(), xsd::NAMESPACE.to_string());
    map.insert(prefixes::LDP.to_string(), ldp::NAMESPACE.to_string());
    map.insert(prefixes::DC.to_string(), dcterms::NAMESPACE.to_string());
    map.insert(prefixes::FOAF.to_string(), foaf::NAMESPACE.to_string());
    map.insert(prefixes::REPO.to_string(), repo::NAMESPACE.to_string());
    map.insert(prefixes::SYS.to_string(), sys::NAMESPACE.to_string());
    map
}

/// Split a prefixed name into (prefix, local name)
pub fn split_prefixed(name: &str) -> Option<(&str, &str)> {
    name.split_once(':')
}
