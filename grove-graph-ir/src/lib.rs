//! Format-agnostic RDF graph intermediate representation
//!
//! This crate provides the canonical types for representing RDF statements
//! exchanged between the repository's read path (triple producers) and its
//! write path (the diff engine), regardless of serialization format.
//!
//! # Key Design Principles
//!
//! 1. **Expanded IRIs only** - All IRIs are stored in expanded form.
//!    Compaction to the store's prefixed short names happens at the
//!    store boundary, never here.
//!
//! 2. **Explicit datatypes** - Literals always have an explicit datatype.
//!    Plain strings use `xsd:string`, language-tagged strings use
//!    `rdf:langString`.
//!
//! 3. **Bag semantics by default** - The `Graph` type uses `Vec<Triple>` to
//!    preserve duplicates. Call `dedupe()` explicitly for set semantics.
//!
//! 4. **Blank nodes are local** - A `BlankId` has meaning only within the
//!    triple sequence that produced it. Cross-graph comparison goes through
//!    `structurally_matches`, never through ID equality.

pub mod datatype;
mod graph;
mod term;
mod triple;

pub use datatype::Datatype;
pub use graph::Graph;
pub use term::{BlankId, LiteralValue, Term};
pub use triple::Triple;
