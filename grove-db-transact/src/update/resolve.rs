//! Update resolution: WHERE evaluation and template substitution
//!
//! Turns a parsed `UpdateStatement` plus the resource's current triples
//! (the effective default graph) into a concrete `GraphDiff`. WHERE
//! patterns are evaluated as a conjunctive join over the current triples;
//! every solution is substituted into the DELETE and INSERT templates.
//!
//! A template variable that no WHERE pattern can ever bind is rejected
//! here, before any mutation. A WHERE that matches nothing is not an
//! error — it resolves to empty sets.

use crate::diff::GraphDiff;
use crate::update::parse::{TermPattern, TriplePattern, UpdateOperation, UpdateStatement};
use grove_graph_ir::{Term, Triple};
use rustc_hash::FxHashMap;
use thiserror::Error;

/// Errors raised while resolving a parsed update
#[derive(Error, Debug)]
pub enum ResolveError {
    /// A DELETE/INSERT template used a variable no WHERE pattern binds
    #[error("Template variable ?{0} is not bound by any WHERE pattern")]
    UnboundVariable(String),
}

type Binding = FxHashMap<String, Term>;

/// Match one pattern against one triple under an existing binding
///
/// Returns the extended binding on success.
fn match_triple(pattern: &TriplePattern, triple: &Triple, binding: &Binding) -> Option<Binding> {
    let mut extended = binding.clone();
    for (position, term) in [
        (&pattern.s, &triple.s),
        (&pattern.p, &triple.p),
        (&pattern.o, &triple.o),
    ] {
        match position {
            TermPattern::Ground(expected) => {
                if expected != term {
                    return None;
                }
            }
            TermPattern::Var(name) => match extended.get(name) {
                Some(bound) if bound != term => return None,
                Some(_) => {}
                None => {
                    extended.insert(name.clone(), term.clone());
                }
            },
        }
    }
    Some(extended)
}

/// Evaluate WHERE patterns as a conjunctive join over the current triples
fn evaluate(patterns: &[TriplePattern], current: &[Triple]) -> Vec<Binding> {
    let mut solutions = vec![Binding::default()];
    for pattern in patterns {
        let mut next = Vec::new();
        for binding in &solutions {
            for triple in current {
                if let Some(extended) = match_triple(pattern, triple, binding) {
                    next.push(extended);
                }
            }
        }
        solutions = next;
        if solutions.is_empty() {
            break;
        }
    }
    solutions
}

/// Variables a pattern set can bind
fn bound_variables(patterns: &[TriplePattern]) -> Vec<&str> {
    let mut names = Vec::new();
    for pattern in patterns {
        for position in [&pattern.s, &pattern.p, &pattern.o] {
            if let TermPattern::Var(name) = position {
                if !names.contains(&name.as_str()) {
                    names.push(name.as_str());
                }
            }
        }
    }
    names
}

/// Reject templates whose variables nothing can bind
fn check_template_bound(
    template: &[TriplePattern],
    bindable: &[&str],
) -> Result<(), ResolveError> {
    for pattern in template {
        for position in [&pattern.s, &pattern.p, &pattern.o] {
            if let TermPattern::Var(name) = position {
                if !bindable.contains(&name.as_str()) {
                    return Err(ResolveError::UnboundVariable(name.clone()));
                }
            }
        }
    }
    Ok(())
}

/// Substitute a binding into one template pattern
///
/// `solution` distinguishes blank nodes instantiated for different WHERE
/// solutions, since a template blank node denotes a fresh node per
/// solution.
fn instantiate(
    pattern: &TriplePattern,
    binding: &Binding,
    solution: Option<usize>,
) -> Result<Triple, ResolveError> {
    let resolve = |position: &TermPattern| -> Result<Term, ResolveError> {
        match position {
            TermPattern::Ground(Term::BlankNode(id)) => Ok(match solution {
                Some(n) => Term::blank(format!("{}.{}", id.as_str(), n)),
                None => Term::BlankNode(id.clone()),
            }),
            TermPattern::Ground(term) => Ok(term.clone()),
            TermPattern::Var(name) => binding
                .get(name)
                .cloned()
                .ok_or_else(|| ResolveError::UnboundVariable(name.clone())),
        }
    };
    Ok(Triple::new(
        resolve(&pattern.s)?,
        resolve(&pattern.p)?,
        resolve(&pattern.o)?,
    ))
}

fn instantiate_all(
    template: &[TriplePattern],
    bindings: &[Binding],
    out: &mut Vec<Triple>,
) -> Result<(), ResolveError> {
    for (n, binding) in bindings.iter().enumerate() {
        for pattern in template {
            out.push(instantiate(pattern, binding, Some(n))?);
        }
    }
    Ok(())
}

/// Resolve a parsed update against the current triples into concrete
/// add/remove sets
///
/// Operations resolve in source order into one accumulated diff;
/// add/remove pairs cancel when the sets are combined.
pub fn resolve_update(
    statement: &UpdateStatement,
    current: &[Triple],
) -> Result<GraphDiff, ResolveError> {
    let mut to_add = Vec::new();
    let mut to_remove = Vec::new();

    for operation in &statement.operations {
        match operation {
            UpdateOperation::InsertData(triples) => {
                for pattern in triples {
                    to_add.push(instantiate(pattern, &Binding::default(), None)?);
                }
            }
            UpdateOperation::DeleteData(triples) => {
                for pattern in triples {
                    to_remove.push(instantiate(pattern, &Binding::default(), None)?);
                }
            }
            UpdateOperation::DeleteWhere(patterns) => {
                // The pattern set is both the WHERE clause and the DELETE
                // template, so every template variable is bound by
                // construction
                let bindings = evaluate(patterns, current);
                tracing::debug!(bindings = bindings.len(), "resolved DELETE WHERE");
                instantiate_all(patterns, &bindings, &mut to_remove)?;
            }
            UpdateOperation::Modify {
                delete,
                insert,
                where_patterns,
            } => {
                let bindable = bound_variables(where_patterns);
                check_template_bound(delete, &bindable)?;
                check_template_bound(insert, &bindable)?;

                let bindings = evaluate(where_patterns, current);
                tracing::debug!(
                    bindings = bindings.len(),
                    deletes = delete.len(),
                    inserts = insert.len(),
                    "resolved modify operation"
                );
                instantiate_all(delete, &bindings, &mut to_remove)?;
                instantiate_all(insert, &bindings, &mut to_add)?;
            }
        }
    }

    Ok(GraphDiff::from_sets(to_add, to_remove))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::update::parse::parse_update;

    fn triple(s: &str, p: &str, o: Term) -> Triple {
        Triple::new(Term::iri(s), Term::iri(p), o)
    }

    #[test]
    fn test_patch_resolution_replaces_value() {
        // current = {(<s>, <p>, "a")}; delete "a", insert "b"
        let current = vec![triple("http://x.org/s", "http://x.org/p", Term::string("a"))];
        let statement = parse_update(
            "DELETE DATA { <http://x.org/s> <http://x.org/p> \"a\" } ;\n\
             INSERT DATA { <http://x.org/s> <http://x.org/p> \"b\" }",
        )
        .unwrap();

        let diff = resolve_update(&statement, &current).unwrap();
        assert_eq!(
            diff.to_remove,
            vec![triple("http://x.org/s", "http://x.org/p", Term::string("a"))]
        );
        assert_eq!(
            diff.to_add,
            vec![triple("http://x.org/s", "http://x.org/p", Term::string("b"))]
        );
    }

    #[test]
    fn test_modify_binds_where_variables() {
        let current = vec![
            triple("http://x.org/s", "http://x.org/p", Term::string("old")),
            triple("http://x.org/s", "http://x.org/q", Term::string("keep")),
        ];
        let statement = parse_update(
            "DELETE { <http://x.org/s> <http://x.org/p> ?v }\n\
             INSERT { <http://x.org/s> <http://x.org/r> ?v }\n\
             WHERE { <http://x.org/s> <http://x.org/p> ?v }",
        )
        .unwrap();

        let diff = resolve_update(&statement, &current).unwrap();
        assert_eq!(
            diff.to_remove,
            vec![triple("http://x.org/s", "http://x.org/p", Term::string("old"))]
        );
        assert_eq!(
            diff.to_add,
            vec![triple("http://x.org/s", "http://x.org/r", Term::string("old"))]
        );
    }

    #[test]
    fn test_where_joins_across_patterns() {
        let current = vec![
            triple("http://x.org/s", "http://x.org/p", Term::iri("http://x.org/m")),
            triple("http://x.org/m", "http://x.org/q", Term::string("v")),
        ];
        let statement = parse_update(
            "INSERT { <http://x.org/s> <http://x.org/flat> ?v }\n\
             WHERE { <http://x.org/s> <http://x.org/p> ?mid . ?mid <http://x.org/q> ?v }",
        )
        .unwrap();

        let diff = resolve_update(&statement, &current).unwrap();
        assert_eq!(
            diff.to_add,
            vec![triple("http://x.org/s", "http://x.org/flat", Term::string("v"))]
        );
    }

    #[test]
    fn test_zero_matches_is_empty_not_error() {
        let statement = parse_update(
            "DELETE { <http://x.org/s> <http://x.org/p> ?v }\n\
             WHERE { <http://x.org/s> <http://x.org/p> ?v }",
        )
        .unwrap();
        let diff = resolve_update(&statement, &[]).unwrap();
        assert!(diff.is_empty());
    }

    #[test]
    fn test_unbound_template_variable_is_fatal() {
        let statement = parse_update(
            "INSERT { <http://x.org/s> <http://x.org/p> ?nope }\n\
             WHERE { <http://x.org/s> <http://x.org/q> ?v }",
        )
        .unwrap();
        let err = resolve_update(&statement, &[]).unwrap_err();
        assert!(matches!(err, ResolveError::UnboundVariable(v) if v == "nope"));
    }

    #[test]
    fn test_delete_where_removes_all_matches() {
        let current = vec![
            triple("http://x.org/s", "http://x.org/p", Term::string("one")),
            triple("http://x.org/s", "http://x.org/p", Term::string("two")),
            triple("http://x.org/s", "http://x.org/q", Term::string("kept")),
        ];
        let statement =
            parse_update("DELETE WHERE { <http://x.org/s> <http://x.org/p> ?v }").unwrap();

        let diff = resolve_update(&statement, &current).unwrap();
        assert!(diff.to_add.is_empty());
        assert_eq!(diff.to_remove.len(), 2);
    }

    #[test]
    fn test_multiple_solutions_multiply_templates() {
        let current = vec![
            triple("http://x.org/s", "http://x.org/p", Term::string("a")),
            triple("http://x.org/s", "http://x.org/p", Term::string("b")),
        ];
        let statement = parse_update(
            "INSERT { <http://x.org/s> <http://x.org/copy> ?v }\n\
             WHERE { <http://x.org/s> <http://x.org/p> ?v }",
        )
        .unwrap();

        let diff = resolve_update(&statement, &current).unwrap();
        assert_eq!(diff.to_add.len(), 2);
    }

    #[test]
    fn test_template_blank_nodes_fresh_per_solution() {
        let current = vec![
            triple("http://x.org/a", "http://x.org/p", Term::string("1")),
            triple("http://x.org/b", "http://x.org/p", Term::string("2")),
        ];
        let statement = parse_update(
            "INSERT { ?s <http://x.org/tag> _:t }\n\
             WHERE { ?s <http://x.org/p> ?v }",
        )
        .unwrap();

        let diff = resolve_update(&statement, &current).unwrap();
        assert_eq!(diff.to_add.len(), 2);
        let blanks: Vec<_> = diff
            .to_add
            .iter()
            .map(|t| t.o.as_blank().unwrap().as_str().to_string())
            .collect();
        assert_ne!(blanks[0], blanks[1]);
    }

    #[test]
    fn test_add_remove_pairs_cancel() {
        let statement = parse_update(
            "DELETE DATA { <http://x.org/s> <http://x.org/p> \"same\" } ;\n\
             INSERT DATA { <http://x.org/s> <http://x.org/p> \"same\" }",
        )
        .unwrap();
        let diff = resolve_update(&statement, &[]).unwrap();
        assert!(diff.is_empty());
    }
}
