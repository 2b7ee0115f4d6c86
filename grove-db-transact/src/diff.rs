//! Graph diffing
//!
//! A `GraphDiff` is two disjoint triple sets: `to_add` and `to_remove`.
//! Full-replacement diffs are computed by set difference; explicit
//! add/remove sets (from update resolution) go through a cancellation
//! pass so the disjointness invariant holds either way.
//!
//! Blank nodes have no identity across graphs, so any statement carrying
//! one is matched by structural position: a blank-headed statement in
//! `current` is removable only when no structurally-equivalent statement
//! exists in `desired`.

use grove_graph_ir::{Graph, Triple};

fn has_blank(triple: &Triple) -> bool {
    triple.s.is_blank() || triple.o.is_blank()
}

/// Membership test that falls back to structural matching for
/// blank-carrying statements
fn contains(set: &[Triple], probe: &Triple) -> bool {
    if has_blank(probe) {
        set.iter().any(|t| t.structurally_matches(probe))
    } else {
        set.contains(probe)
    }
}

/// The delta transforming a resource's current graph into a desired graph
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GraphDiff {
    /// Statements to apply
    pub to_add: Vec<Triple>,
    /// Statements to retract
    pub to_remove: Vec<Triple>,
}

impl GraphDiff {
    /// Compute a full-replacement diff: `to_add = desired − current`,
    /// `to_remove = current − desired`
    ///
    /// Both inputs are treated with set semantics; duplicates collapse.
    pub fn compute(current: &[Triple], desired: &Graph) -> Self {
        let mut current_set = current.to_vec();
        current_set.sort();
        current_set.dedup();

        let mut desired_set = desired.clone();
        desired_set.dedupe();
        let desired_set = desired_set.into_triples();

        let to_add = desired_set
            .iter()
            .filter(|t| !contains(&current_set, t))
            .cloned()
            .collect();
        let to_remove = current_set
            .iter()
            .filter(|t| !contains(&desired_set, t))
            .cloned()
            .collect();

        Self { to_add, to_remove }
    }

    /// Build a diff from explicit add/remove sets
    ///
    /// Statements appearing in both sets cancel pairwise, so the result
    /// upholds the disjointness invariant. Removing and re-adding the
    /// same statement is a net no-op against the store either way.
    pub fn from_sets(to_add: Vec<Triple>, to_remove: Vec<Triple>) -> Self {
        let mut to_add = to_add;
        let mut to_remove = to_remove;
        to_add.sort();
        to_add.dedup();
        to_remove.sort();
        to_remove.dedup();

        let cancelled: Vec<Triple> = to_add
            .iter()
            .filter(|t| to_remove.contains(t))
            .cloned()
            .collect();
        if !cancelled.is_empty() {
            tracing::debug!(count = cancelled.len(), "cancelled add/remove pairs");
            to_add.retain(|t| !cancelled.contains(t));
            to_remove.retain(|t| !cancelled.contains(t));
        }

        Self { to_add, to_remove }
    }

    /// Type statements (predicate = rdf:type) queued for addition
    pub fn type_additions(&self) -> impl Iterator<Item = &Triple> {
        self.to_add.iter().filter(|t| t.is_type_statement())
    }

    /// Type statements queued for removal
    pub fn type_removals(&self) -> impl Iterator<Item = &Triple> {
        self.to_remove.iter().filter(|t| t.is_type_statement())
    }

    /// Property statements (everything else) queued for addition
    pub fn property_additions(&self) -> impl Iterator<Item = &Triple> {
        self.to_add.iter().filter(|t| !t.is_type_statement())
    }

    /// Property statements queued for removal
    pub fn property_removals(&self) -> impl Iterator<Item = &Triple> {
        self.to_remove.iter().filter(|t| !t.is_type_statement())
    }

    /// Check if the diff mutates nothing
    pub fn is_empty(&self) -> bool {
        self.to_add.is_empty() && self.to_remove.is_empty()
    }
}
