//! Triple categories
//!
//! A category names one independently-producible aspect of a resource's
//! description. Callers request an explicit list; unknown category names
//! are a caller error, never silently ignored.

use crate::error::RdfError;
use std::fmt;
use std::str::FromStr;

/// One semantic category of a resource's triples
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TripleCategory {
    /// Stored (non-internal) property values, plus the managed
    /// created/lastModified pair
    Properties,
    /// The immediate-child count literal
    Children,
    /// One containment triple per immediate child
    ChildListing,
    /// Declared primary type and mixins as rdf:type statements
    Types,
    /// Version history labels
    Versions,
}

impl TripleCategory {
    /// Every category, in the default emission order
    pub const ALL: [TripleCategory; 5] = [
        TripleCategory::Properties,
        TripleCategory::Children,
        TripleCategory::ChildListing,
        TripleCategory::Types,
        TripleCategory::Versions,
    ];

    /// The categories describing a resource without enumerating children
    pub const MINIMAL: [TripleCategory; 3] = [
        TripleCategory::Properties,
        TripleCategory::Children,
        TripleCategory::Types,
    ];

    /// The category's wire name
    pub fn name(&self) -> &'static str {
        match self {
            TripleCategory::Properties => "properties",
            TripleCategory::Children => "children",
            TripleCategory::ChildListing => "child-listing",
            TripleCategory::Types => "types",
            TripleCategory::Versions => "versions",
        }
    }
}

impl fmt::Display for TripleCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for TripleCategory {
    type Err = RdfError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "properties" => Ok(TripleCategory::Properties),
            "children" => Ok(TripleCategory::Children),
            "child-listing" => Ok(TripleCategory::ChildListing),
            "types" => Ok(TripleCategory::Types),
            "versions" => Ok(TripleCategory::Versions),
            other => Err(RdfError::UnknownCategory(other.to_string())),
        }
    }
}
