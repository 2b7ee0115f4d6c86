//! RDF Vocabulary Constants and Namespace Prefixes for Grove
//!
//! This crate provides a centralized location for the RDF vocabulary IRIs
//! and well-known namespace prefixes used throughout the Grove workspace.
//!
//! # Organization
//!
//! Constants are organized by vocabulary:
//! - `rdf` - RDF vocabulary (http://www.w3.org/1999/02/22-rdf-syntax-ns#)
//! - `rdfs` - RDFS vocabulary (http://www.w3.org/2000/01/rdf-schema#)
//! - `xsd` - XSD vocabulary (http://www.w3.org/2001/XMLSchema#)
//! - `ldp` - Linked Data Platform vocabulary (http://www.w3.org/ns/ldp#)
//! - `repo` - Grove repository vocabulary
//! - `sys` - Grove internal (never exposed) vocabulary
//! - `prefixes` - the store's well-known short prefixes

/// RDF vocabulary constants
pub mod rdf {
    /// The RDF namespace
    pub const NAMESPACE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";

    /// rdf:type IRI
    pub const TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";

    /// rdf:langString IRI
    pub const LANG_STRING: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#langString";
}

/// RDFS vocabulary constants
pub mod rdfs {
    /// The RDFS namespace
    pub const NAMESPACE: &str = "http://www.w3.org/2000/01/rdf-schema#";

    /// rdfs:label IRI
    pub const LABEL: &str = "http://www.w3.org/2000/01/rdf-schema#label";

    /// rdfs:comment IRI
    pub const COMMENT: &str = "http://www.w3.org/2000/01/rdf-schema#comment";
}

/// XSD vocabulary constants
pub mod xsd {
    /// The XSD namespace
    pub const NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema#";

    /// xsd:string IRI
    pub const STRING: &str = "http://www.w3.org/2001/XMLSchema#string";

    /// xsd:boolean IRI
    pub const BOOLEAN: &str = "http://www.w3.org/2001/XMLSchema#boolean";

    /// xsd:integer IRI
    pub const INTEGER: &str = "http://www.w3.org/2001/XMLSchema#integer";

    /// xsd:long IRI
    pub const LONG: &str = "http://www.w3.org/2001/XMLSchema#long";

    /// xsd:int IRI
    pub const INT: &str = "http://www.w3.org/2001/XMLSchema#int";

    /// xsd:short IRI
    pub const SHORT: &str = "http://www.w3.org/2001/XMLSchema#short";

    /// xsd:double IRI
    pub const DOUBLE: &str = "http://www.w3.org/2001/XMLSchema#double";

    /// xsd:float IRI
    pub const FLOAT: &str = "http://www.w3.org/2001/XMLSchema#float";

    /// xsd:decimal IRI
    pub const DECIMAL: &str = "http://www.w3.org/2001/XMLSchema#decimal";

    /// xsd:dateTime IRI
    pub const DATE_TIME: &str = "http://www.w3.org/2001/XMLSchema#dateTime";

    /// xsd:date IRI
    pub const DATE: &str = "http://www.w3.org/2001/XMLSchema#date";

    /// xsd:anyURI IRI
    pub const ANY_URI: &str = "http://www.w3.org/2001/XMLSchema#anyURI";

    /// Check if a datatype IRI is in the XSD integer family
    pub fn is_integer_family(iri: &str) -> bool {
        matches!(iri, INTEGER | LONG | INT | SHORT)
    }

    /// Check if a datatype IRI is string-like (string or anyURI)
    pub fn is_string_like(iri: &str) -> bool {
        matches!(iri, STRING | ANY_URI)
    }
}

/// Linked Data Platform vocabulary constants
pub mod ldp {
    /// The LDP namespace
    pub const NAMESPACE: &str = "http://www.w3.org/ns/ldp#";

    /// ldp:contains IRI
    pub const CONTAINS: &str = "http://www.w3.org/ns/ldp#contains";

    /// ldp:Resource IRI
    pub const RESOURCE: &str = "http://www.w3.org/ns/ldp#Resource";

    /// ldp:RDFSource IRI
    pub const RDF_SOURCE: &str = "http://www.w3.org/ns/ldp#RDFSource";

    /// ldp:BasicContainer IRI
    pub const BASIC_CONTAINER: &str = "http://www.w3.org/ns/ldp#BasicContainer";
}

/// Dublin Core terms vocabulary constants
pub mod dcterms {
    /// The DC terms namespace
    pub const NAMESPACE: &str = "http://purl.org/dc/terms/";

    /// dcterms:title IRI
    pub const TITLE: &str = "http://purl.org/dc/terms/title";

    /// dcterms:description IRI
    pub const DESCRIPTION: &str = "http://purl.org/dc/terms/description";
}

/// FOAF vocabulary constants
pub mod foaf {
    /// The FOAF namespace
    pub const NAMESPACE: &str = "http://xmlns.com/foaf/0.1/";

    /// foaf:name IRI
    pub const NAME: &str = "http://xmlns.com/foaf/0.1/name";
}

/// Grove repository vocabulary constants
///
/// This is the public-facing vocabulary describing repository structure:
/// containment counts, timestamps, and version history.
pub mod repo {
    /// The Grove repository namespace
    pub const NAMESPACE: &str = "https://ns.grove.dev/repository#";

    /// repo:Resource IRI (base class of everything in the tree)
    pub const RESOURCE: &str = "https://ns.grove.dev/repository#Resource";

    /// repo:Container IRI (a resource that may hold children)
    pub const CONTAINER: &str = "https://ns.grove.dev/repository#Container";

    /// repo:Versionable IRI (mixin enabling version history)
    pub const VERSIONABLE: &str = "https://ns.grove.dev/repository#Versionable";

    /// repo:created IRI
    pub const CREATED: &str = "https://ns.grove.dev/repository#created";

    /// repo:lastModified IRI
    pub const LAST_MODIFIED: &str = "https://ns.grove.dev/repository#lastModified";

    /// repo:childCount IRI (integer literal, number of immediate children)
    pub const CHILD_COUNT: &str = "https://ns.grove.dev/repository#childCount";

    /// repo:hasParent IRI
    pub const HAS_PARENT: &str = "https://ns.grove.dev/repository#hasParent";

    /// repo:hasVersion IRI
    pub const HAS_VERSION: &str = "https://ns.grove.dev/repository#hasVersion";

    /// repo:hasVersionLabel IRI
    pub const HAS_VERSION_LABEL: &str = "https://ns.grove.dev/repository#hasVersionLabel";
}

/// Grove internal vocabulary constants
///
/// Properties in this namespace are store bookkeeping. They are never
/// emitted on the read path and the store refuses to mutate them.
pub mod sys {
    /// The internal namespace
    pub const NAMESPACE: &str = "info:grove/system#";

    /// sys:primaryType short name (prefixed form)
    pub const PRIMARY_TYPE: &str = "sys:primaryType";

    /// sys:mixinTypes short name (prefixed form)
    pub const MIXIN_TYPES: &str = "sys:mixinTypes";

    /// sys:created short name (prefixed form)
    pub const CREATED: &str = "sys:created";

    /// sys:lastModified short name (prefixed form)
    pub const LAST_MODIFIED: &str = "sys:lastModified";
}

/// Well-known store prefixes
///
/// The store's namespace table maps these short prefixes to the namespace
/// IRIs above. User namespaces allocate synthetic prefixes (`ns1`, `ns2`, …)
/// when the requested prefix is taken.
pub mod prefixes {
    /// Prefix for the RDF namespace
    pub const RDF: &str = "rdf";

    /// Prefix for the RDFS namespace
    pub const RDFS: &str = "rdfs";

    /// Prefix for the XSD namespace
    pub const XSD: &str = "xsd";

    /// Prefix for the LDP namespace
    pub const LDP: &str = "ldp";

    /// Prefix for the DC terms namespace
    pub const DC: &str = "dc";

    /// Prefix for the FOAF namespace
    pub const FOAF: &str = "foaf";

    /// Prefix for the Grove repository namespace
    pub const REPO: &str = "repo";

    /// Prefix for the internal namespace (protected, never writable)
    pub const SYS: &str = "sys";

    /// Prefix stem for synthetic allocations (`ns1`, `ns2`, …)
    pub const SYNTHETIC_STEM: &str = "ns";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_namespaces_are_distinct() {
        let all = [
            rdf::NAMESPACE,
            rdfs::NAMESPACE,
            xsd::NAMESPACE,
            ldp::NAMESPACE,
            dcterms::NAMESPACE,
            foaf::NAMESPACE,
            repo::NAMESPACE,
            sys::NAMESPACE,
        ];
        for (i, a) in all.iter().enumerate() {
            for b in &all[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_xsd_families() {
        assert!(xsd::is_integer_family(xsd::LONG));
        assert!(!xsd::is_integer_family(xsd::DOUBLE));
        assert!(xsd::is_string_like(xsd::ANY_URI));
        assert!(!xsd::is_string_like(xsd::BOOLEAN));
    }

    #[test]
    fn test_repo_terms_live_in_repo_namespace() {
        assert!(repo::CHILD_COUNT.starts_with(repo::NAMESPACE));
        assert!(repo::HAS_VERSION.starts_with(repo::NAMESPACE));
        assert!(repo::CREATED.starts_with(repo::NAMESPACE));
    }
}
