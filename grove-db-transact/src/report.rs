//! Diff application reports
//!
//! The apply engine is best-effort: it records a problem per failing
//! statement and keeps going, because the triple set may mix fixable and
//! unfixable statements and the caller must see the full picture before
//! deciding to commit or discard the session. The engine itself never
//! rolls back.

use grove_graph_ir::Triple;
use serde::{Deserialize, Serialize};

/// Classification of a per-statement problem
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProblemKind {
    /// The statement is not applicable as given (bad namespace, illegal
    /// term kind, server-managed predicate, impossible coercion)
    MalformedRdf,
    /// A type statement referenced a type with no declaration, and
    /// on-the-fly registration was disabled
    UnknownType,
    /// A mixin mutation conflicts with the node's declared type structure
    SchemaConstraint,
    /// The store refused the mutation for permission reasons
    AccessDenied,
}

impl ProblemKind {
    /// Short name used in diagnostics
    pub fn name(&self) -> &'static str {
        match self {
            ProblemKind::MalformedRdf => "malformed-rdf",
            ProblemKind::UnknownType => "unknown-type",
            ProblemKind::SchemaConstraint => "schema-constraint",
            ProblemKind::AccessDenied => "access-denied",
        }
    }
}

impl std::fmt::Display for ProblemKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// One unresolved problem, tagged with the offending statement
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Problem {
    /// Problem classification
    pub kind: ProblemKind,
    /// The statement that could not be applied
    pub triple: Triple,
    /// Human-readable reason
    pub message: String,
}

impl std::fmt::Display for Problem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}: {}", self.kind, self.triple, self.message)
    }
}

/// Outcome of applying a diff: the list of unresolved problems
///
/// An empty report means every statement applied. `is_fatal()` flags
/// `MalformedRdf`-class problems; well-behaved callers do not commit a
/// session whose report is fatal.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DiffReport {
    problems: Vec<Problem>,
}

impl DiffReport {
    /// Create an empty report
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a problem
    pub fn record(&mut self, kind: ProblemKind, triple: Triple, message: impl Into<String>) {
        let message = message.into();
        tracing::warn!(kind = %kind, triple = %triple, message = %message, "diff problem");
        self.problems.push(Problem {
            kind,
            triple,
            message,
        });
    }

    /// The recorded problems, in application order
    pub fn problems(&self) -> &[Problem] {
        &self.problems
    }

    /// Check if every statement applied
    pub fn is_clean(&self) -> bool {
        self.problems.is_empty()
    }

    /// Check if the report carries any `MalformedRdf`-class problem
    ///
    /// One such problem anywhere means "do not commit" for well-behaved
    /// callers; the engine itself never forces a rollback.
    pub fn is_fatal(&self) -> bool {
        self.problems
            .iter()
            .any(|p| p.kind == ProblemKind::MalformedRdf)
    }

    /// Number of recorded problems
    pub fn len(&self) -> usize {
        self.problems.len()
    }

    /// Check if the report is empty
    pub fn is_empty(&self) -> bool {
        self.problems.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use grove_graph_ir::Term;

    fn triple() -> Triple {
        Triple::new(
            Term::iri("http://example.org/s"),
            Term::iri("http://example.org/p"),
            Term::string("o"),
        )
    }

    #[test]
    fn test_clean_report() {
        let report = DiffReport::new();
        assert!(report.is_clean());
        assert!(!report.is_fatal());
    }

    #[test]
    fn test_fatal_classification() {
        let mut report = DiffReport::new();
        report.record(ProblemKind::UnknownType, triple(), "no declaration");
        assert!(!report.is_clean());
        assert!(!report.is_fatal());

        report.record(ProblemKind::MalformedRdf, triple(), "bad namespace");
        assert!(report.is_fatal());
        assert_eq!(report.len(), 2);
    }
}
