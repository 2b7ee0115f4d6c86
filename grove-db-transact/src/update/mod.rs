//! SPARQL-Update subset: parsing and resolution
//!
//! The patch surface accepted on the write path is the add/remove/where
//! subset of SPARQL Update: `PREFIX` declarations followed by any
//! sequence of `INSERT DATA`, `DELETE DATA`, `DELETE WHERE`, and
//! `DELETE … INSERT … WHERE …` operations.
//!
//! Resolution evaluates the WHERE patterns against the resource's current
//! triples (the effective default graph), substitutes the bindings into
//! the DELETE and INSERT templates, and yields concrete remove/add sets
//! for the diff applier. Everything that can fail here fails *before*
//! any mutation is attempted.

pub mod parse;
pub mod resolve;

pub use parse::{parse_update, ParseError, TermPattern, TriplePattern, UpdateOperation, UpdateStatement};
pub use resolve::{resolve_update, ResolveError};
