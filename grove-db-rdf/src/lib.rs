//! # Grove DB RDF
//!
//! The read path of Grove's Linked Data interface: everything needed to
//! describe a stored resource as RDF.
//!
//! This crate provides:
//! - `IdentifierTranslator`: store path ↔ resource URI, with
//!   transaction-scope canonicalization
//! - `NamespaceBridge`: RDF namespace URIs ↔ the store's short prefixes,
//!   with on-demand registration
//! - `RdfStream`: a fixed-topic, lazy, single-pass triple sequence
//! - `TripleCategory` and the per-category producers, merged by plain
//!   concatenation in caller order
//!
//! ## Error model
//!
//! Producer errors are fatal to the stream that surfaced them; there is
//! no partial recovery once a producer has started emitting. Identifier
//! translation failures are always fatal to the operation that triggered
//! them.

pub mod category;
pub mod context;
pub mod error;
pub mod namespace;
pub mod stream;
pub mod translator;

// Re-export main types
pub use category::TripleCategory;
pub use context::{
    child_listing_context, children_context, properties_context, triples_for, types_context,
    versions_context,
};
pub use error::{RdfError, Result};
pub use namespace::NamespaceBridge;
pub use stream::RdfStream;
pub use translator::{IdentifierTranslator, VERSIONS_SEGMENT};
