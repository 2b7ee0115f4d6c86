//! Lazy triple streams
//!
//! An `RdfStream` carries one fixed subject (the "topic") plus a lazy,
//! finite, single-pass sequence of triples. A consumed stream cannot be
//! rewound; restart by re-invoking the producer that created it.
//!
//! Errors surfaced by the underlying producer propagate as `Err` items
//! and are fatal: there is no partial recovery once a producer has
//! started emitting.

use crate::error::Result;
use grove_graph_ir::{Graph, Term, Triple};

/// A fixed-topic, lazy, single-pass sequence of triples
pub struct RdfStream<'a> {
    topic: Term,
    inner: Box<dyn Iterator<Item = Result<Triple>> + 'a>,
}

impl<'a> RdfStream<'a> {
    /// Create a stream from a topic and a triple iterator
    pub fn new<I>(topic: Term, iter: I) -> Self
    where
        I: Iterator<Item = Result<Triple>> + 'a,
    {
        Self {
            topic,
            inner: Box::new(iter),
        }
    }

    /// An empty stream with only a topic
    pub fn empty(topic: Term) -> Self {
        Self {
            topic,
            inner: Box::new(std::iter::empty()),
        }
    }

    /// A stream over already-materialized triples
    pub fn from_triples(topic: Term, triples: Vec<Triple>) -> Self {
        Self {
            topic,
            inner: Box::new(triples.into_iter().map(Ok)),
        }
    }

    /// The stream's fixed subject
    pub fn topic(&self) -> &Term {
        &self.topic
    }

    /// Concatenate another stream after this one
    ///
    /// The combined stream keeps this stream's topic; concatenation order
    /// is the caller-visible category order.
    pub fn concat(self, other: RdfStream<'a>) -> RdfStream<'a> {
        RdfStream {
            topic: self.topic,
            inner: Box::new(self.inner.chain(other.inner)),
        }
    }

    /// Drain the stream into a graph
    ///
    /// The first producer error aborts collection.
    pub fn collect_graph(self) -> Result<Graph> {
        let mut graph = Graph::new();
        for triple in self.inner {
            graph.add(triple?);
        }
        Ok(graph)
    }

    /// Drain the stream into a triple vector
    pub fn collect_triples(self) -> Result<Vec<Triple>> {
        self.inner.collect()
    }
}

impl Iterator for RdfStream<'_> {
    type Item = Result<Triple>;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }
}

impl std::fmt::Debug for RdfStream<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RdfStream")
            .field("topic", &self.topic)
            .finish_non_exhaustive()
    }
}
