//! RDF triple: (subject, predicate, object)

use crate::Term;
use grove_vocab::rdf;
use serde::{Deserialize, Serialize};

/// An RDF statement
///
/// The predicate is expected to be `Term::Iri`; constructors do not enforce
/// this so producers can surface malformed input to the diff engine, which
/// rejects it per statement instead of panicking.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Triple {
    /// Subject term
    pub s: Term,
    /// Predicate term
    pub p: Term,
    /// Object term
    pub o: Term,
}

impl Triple {
    /// Create a new triple
    pub fn new(s: Term, p: Term, o: Term) -> Self {
        Self { s, p, o }
    }

    /// Check if this is a type statement (predicate is rdf:type)
    pub fn is_type_statement(&self) -> bool {
        self.p.as_iri() == Some(rdf::TYPE)
    }

    /// Positional equivalence for cross-graph comparison
    ///
    /// Blank nodes match blank nodes positionally; all ground components
    /// must be equal. Used by the diff so blank-headed statements from two
    /// graphs can cancel without sharing blank IDs.
    pub fn structurally_matches(&self, other: &Triple) -> bool {
        self.s.structurally_matches(&other.s)
            && self.p.structurally_matches(&other.p)
            && self.o.structurally_matches(&other.o)
    }
}

impl std::fmt::Display for Triple {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} {} .", self.s, self.p, self.o)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_statement() {
        let t = Triple::new(
            Term::iri("http://example.org/s"),
            Term::iri(rdf::TYPE),
            Term::iri("http://example.org/SomeType"),
        );
        assert!(t.is_type_statement());

        let t2 = Triple::new(
            Term::iri("http://example.org/s"),
            Term::iri("http://example.org/p"),
            Term::string("o"),
        );
        assert!(!t2.is_type_statement());
    }

    #[test]
    fn test_structural_match_across_blank_ids() {
        let a = Triple::new(
            Term::blank("b0"),
            Term::iri("http://example.org/p"),
            Term::string("o"),
        );
        let b = Triple::new(
            Term::blank("genid-77"),
            Term::iri("http://example.org/p"),
            Term::string("o"),
        );
        assert!(a.structurally_matches(&b));
        assert_ne!(a, b);

        let c = Triple::new(
            Term::blank("b0"),
            Term::iri("http://example.org/p"),
            Term::string("other"),
        );
        assert!(!a.structurally_matches(&c));
    }

    #[test]
    fn test_display() {
        let t = Triple::new(
            Term::iri("http://example.org/s"),
            Term::iri("http://example.org/p"),
            Term::string("o"),
        );
        assert_eq!(
            format!("{}", t),
            "<http://example.org/s> <http://example.org/p> \"o\" ."
        );
    }
}
