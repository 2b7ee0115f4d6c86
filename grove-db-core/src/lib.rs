//! # Grove DB Core
//!
//! The hierarchical property-node store underneath Grove's Linked Data
//! interface.
//!
//! This crate provides:
//! - Core types: `NodePath`, `PropertyValue`, `NodeData`, `Resource`
//! - The runtime-extensible `TypeRegistry` (primary types + mixins)
//! - The store namespace table and its seeded defaults
//! - `Repository` + `Session`: session-scoped mutation with
//!   commit/discard semantics
//!
//! ## Design Principles
//!
//! 1. **Synchronous**: all store operations are ordinary blocking calls;
//!    there is no internal threading and no suspension model
//! 2. **Sessions own visibility**: mutations stage into a session overlay
//!    and publish only on `commit()`; a discarded session leaves no trace
//! 3. **Owned snapshots**: `Resource` is a value object; nothing holds a
//!    live handle into the store across calls

pub mod error;
pub mod namespaces;
pub mod node;
pub mod path;
pub mod resource;
pub mod schema;
pub mod store;
pub mod value;

// Re-export main types
pub use error::{Error, Result};
pub use namespaces::{default_namespaces, split_prefixed};
pub use node::{NodeData, VersionEntry};
pub use path::{NodePath, TX_SEGMENT_PREFIX};
pub use resource::Resource;
pub use schema::{PropertyDef, TypeDecl, TypeRegistry};
pub use store::{Repository, RepositoryConfig, Session};
pub use value::{PropertyType, PropertyValue};
