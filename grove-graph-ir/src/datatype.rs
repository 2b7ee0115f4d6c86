//! RDF datatype representation
//!
//! Datatypes are always explicit in this IR - there is no "untyped" literal.
//! Plain strings default to `xsd:string`, and language-tagged strings use
//! `rdf:langString`.

use grove_vocab::{rdf, xsd};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// RDF literal datatype, stored as an expanded IRI
///
/// Use `Datatype::xsd_string()` for plain strings and
/// `Datatype::rdf_lang_string()` for language-tagged strings.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Datatype(Arc<str>);

impl Datatype {
    /// Create a datatype from an expanded IRI
    pub fn from_iri(iri: impl AsRef<str>) -> Self {
        Datatype(Arc::from(iri.as_ref()))
    }

    /// xsd:string - default for plain string literals
    pub fn xsd_string() -> Self {
        Datatype(Arc::from(xsd::STRING))
    }

    /// xsd:boolean
    pub fn xsd_boolean() -> Self {
        Datatype(Arc::from(xsd::BOOLEAN))
    }

    /// xsd:integer
    pub fn xsd_integer() -> Self {
        Datatype(Arc::from(xsd::INTEGER))
    }

    /// xsd:long
    pub fn xsd_long() -> Self {
        Datatype(Arc::from(xsd::LONG))
    }

    /// xsd:double
    pub fn xsd_double() -> Self {
        Datatype(Arc::from(xsd::DOUBLE))
    }

    /// xsd:dateTime
    pub fn xsd_date_time() -> Self {
        Datatype(Arc::from(xsd::DATE_TIME))
    }

    /// xsd:anyURI
    pub fn xsd_any_uri() -> Self {
        Datatype(Arc::from(xsd::ANY_URI))
    }

    /// rdf:langString - for language-tagged literals
    pub fn rdf_lang_string() -> Self {
        Datatype(Arc::from(rdf::LANG_STRING))
    }

    /// Get the IRI representation of this datatype
    pub fn as_iri(&self) -> &str {
        &self.0
    }

    /// Check if this is the xsd:string datatype
    pub fn is_xsd_string(&self) -> bool {
        self.0.as_ref() == xsd::STRING
    }

    /// Check if this is the rdf:langString datatype
    pub fn is_lang_string(&self) -> bool {
        self.0.as_ref() == rdf::LANG_STRING
    }

    /// Check if this is a numeric type (integer family or double/float/decimal)
    pub fn is_numeric(&self) -> bool {
        xsd::is_integer_family(&self.0)
            || matches!(self.0.as_ref(), xsd::DOUBLE | xsd::FLOAT | xsd::DECIMAL)
    }
}

impl PartialEq for Datatype {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl Eq for Datatype {}

impl Hash for Datatype {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.hash(state);
    }
}

impl PartialOrd for Datatype {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Datatype {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.cmp(&other.0)
    }
}

impl std::fmt::Display for Datatype {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
