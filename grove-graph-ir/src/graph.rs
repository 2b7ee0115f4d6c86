//! RDF graph - a collection of triples
//!
//! The `Graph` type uses `Vec<Triple>` to preserve duplicates (bag
//! semantics). Call `dedupe()` explicitly if you want set semantics.

use crate::{Term, Triple};

/// A collection of RDF triples
///
/// # Design Decisions
///
/// - **Vec storage**: Uses `Vec<Triple>` instead of `BTreeSet` to preserve
///   duplicates from template instantiation.
/// - **Explicit deduplication**: Call `dedupe()` if you want set semantics.
/// - **Deterministic output**: Call `sort()` before diffing for stable output.
#[derive(Clone, Debug, Default)]
pub struct Graph {
    /// The triples in this graph
    triples: Vec<Triple>,
}

impl Graph {
    /// Create an empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a triple to the graph
    pub fn add(&mut self, triple: Triple) {
        self.triples.push(triple);
    }

    /// Add a triple by components
    pub fn add_triple(&mut self, s: Term, p: Term, o: Term) {
        self.add(Triple::new(s, p, o));
    }

    /// Get the number of triples
    pub fn len(&self) -> usize {
        self.triples.len()
    }

    /// Check if the graph is empty
    pub fn is_empty(&self) -> bool {
        self.triples.is_empty()
    }

    /// Iterate over triples
    pub fn iter(&self) -> impl Iterator<Item = &Triple> {
        self.triples.iter()
    }

    /// Check membership by triple equality
    pub fn contains(&self, triple: &Triple) -> bool {
        self.triples.contains(triple)
    }

    /// Check membership by structural equivalence
    ///
    /// Used when the probe triple comes from a different graph and may carry
    /// foreign blank node IDs.
    pub fn contains_structural(&self, triple: &Triple) -> bool {
        self.triples.iter().any(|t| t.structurally_matches(triple))
    }

    /// Sort triples by SPO for deterministic output
    pub fn sort(&mut self) {
        self.triples.sort();
    }

    /// Remove duplicate triples (apply set semantics)
    ///
    /// Sorts first to group duplicates, so the result is also deterministic.
    pub fn dedupe(&mut self) {
        self.triples.sort();
        self.triples.dedup();
    }

    /// Get all triples (consuming the graph)
    pub fn into_triples(self) -> Vec<Triple> {
        self.triples
    }

    /// Get a reference to the triples
    pub fn triples(&self) -> &[Triple] {
        &self.triples
    }
}

impl IntoIterator for Graph {
    type Item = Triple;
    type IntoIter = std::vec::IntoIter<Triple>;

    fn into_iter(self) -> Self::IntoIter {
        self.triples.into_iter()
    }
}

impl<'a> IntoIterator for &'a Graph {
    type Item = &'a Triple;
    type IntoIter = std::slice::Iter<'a, Triple>;

    fn into_iter(self) -> Self::IntoIter {
        self.triples.iter()
    }
}

impl FromIterator<Triple> for Graph {
    fn from_iter<T: IntoIterator<Item = Triple>>(iter: T) -> Self {
        Graph {
            triples: iter.into_iter().collect(),
        }
    }
}

impl Extend<Triple> for Graph {
    fn extend<T: IntoIterator<Item = Triple>>(&mut self, iter: T) {
        self.triples.extend(iter);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_graph_add() {
        let mut graph = Graph::new();
        graph.add_triple(
            Term::iri("http://example.org/s"),
            Term::iri("http://example.org/p"),
            Term::string("o"),
        );
        assert_eq!(graph.len(), 1);
        assert!(!graph.is_empty());
    }

    #[test]
    fn test_graph_dedupe() {
        let mut graph = Graph::new();

        let triple = Triple::new(
            Term::iri("http://example.org/s"),
            Term::iri("http://example.org/p"),
            Term::string("o"),
        );

        graph.add(triple.clone());
        graph.add(triple.clone());
        graph.add(triple);

        assert_eq!(graph.len(), 3);

        graph.dedupe();
        assert_eq!(graph.len(), 1);
    }

    #[test]
    fn test_contains_structural() {
        let mut graph = Graph::new();
        graph.add_triple(
            Term::blank("b0"),
            Term::iri("http://example.org/p"),
            Term::string("o"),
        );

        let probe = Triple::new(
            Term::blank("other-id"),
            Term::iri("http://example.org/p"),
            Term::string("o"),
        );
        assert!(!graph.contains(&probe));
        assert!(graph.contains_structural(&probe));
    }
}
