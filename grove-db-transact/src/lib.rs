//! # Grove DB Transact
//!
//! The write path of Grove's Linked Data interface: turning a desired
//! graph (or a textual patch) into mutations against the property store.
//!
//! This crate provides:
//! - Graph diffing (`GraphDiff`: disjoint add/remove sets, blank nodes
//!   matched structurally)
//! - Best-effort application (`DiffApplier`: per-statement problems
//!   accumulate in a `DiffReport`, the engine never rolls back)
//! - RDF term → store value coercion
//! - The SPARQL-Update subset parser and resolver
//!
//! ## Entry points
//!
//! - [`replace_properties`]: full-replacement mode — computes the diff
//!   between the resource's current triples and a desired graph, then
//!   applies it
//! - [`update_properties`]: patch mode — parses and resolves an update
//!   text against the current triples, then applies the explicit sets
//!
//! ## Example
//!
//! ```ignore
//! use grove_db_transact::{update_properties, ApplyOptions};
//!
//! let report = update_properties(
//!     &mut session,
//!     &resource,
//!     &translator,
//!     r#"PREFIX dc: <http://purl.org/dc/terms/>
//!        DELETE { <http://host/repo/a> dc:title ?t }
//!        INSERT { <http://host/repo/a> dc:title "New title" }
//!        WHERE  { <http://host/repo/a> dc:title ?t }"#,
//!     &current,
//!     ApplyOptions::new(),
//! )?;
//! if !report.is_fatal() {
//!     session.commit()?;
//! }
//! ```
//!
//! Everything applied stays scoped to the caller's session; the caller
//! inspects the report and decides whether to commit or discard.

pub mod apply;
pub mod coerce;
pub mod diff;
pub mod error;
pub mod report;
pub mod update;

// Re-exports
pub use apply::{is_server_managed, ApplyOptions, DiffApplier};
pub use coerce::{term_to_value, CoercionError};
pub use diff::GraphDiff;
pub use error::{Result, TransactError};
pub use report::{DiffReport, Problem, ProblemKind};
pub use update::{parse_update, resolve_update, UpdateStatement};

use grove_db_core::{Resource, Session};
use grove_db_rdf::IdentifierTranslator;
use grove_graph_ir::{Graph, Triple};

/// Replace a resource's properties with a desired graph
///
/// Computes `to_add = desired − current` and `to_remove = current −
/// desired` (blank-headed statements matched structurally) and applies
/// the diff statement by statement. Per-statement failures land in the
/// returned report; the session stays uncommitted either way.
pub fn replace_properties(
    session: &mut Session,
    resource: &Resource,
    translator: &IdentifierTranslator,
    desired: &Graph,
    current: &[Triple],
    options: ApplyOptions,
) -> Result<DiffReport> {
    let diff = GraphDiff::compute(current, desired);
    DiffApplier::new(session, translator, options).apply(resource, diff)
}

/// Apply a textual patch to a resource's properties
///
/// Parses the update text, resolves it against the current triples, and
/// applies the resolved sets. Parse errors, undefined prefixes, and
/// unbound template variables fail here, before any mutation; everything
/// scoped to one statement accumulates in the report instead.
pub fn update_properties(
    session: &mut Session,
    resource: &Resource,
    translator: &IdentifierTranslator,
    update_text: &str,
    current: &[Triple],
    options: ApplyOptions,
) -> Result<DiffReport> {
    let statement =
        parse_update(update_text).map_err(|e| TransactError::MalformedRdf(e.to_string()))?;
    let diff = resolve_update(&statement, current)
        .map_err(|e| TransactError::MalformedRdf(e.to_string()))?;
    DiffApplier::new(session, translator, options).apply(resource, diff)
}
