//! RDF read-path error types

use thiserror::Error;

/// Result type for RDF read-path operations
pub type Result<T> = std::result::Result<T, RdfError>;

/// RDF read-path errors
///
/// Producer errors are fatal to the stream that surfaced them: once a
/// producer has started emitting there is no partial recovery.
#[derive(Error, Debug)]
pub enum RdfError {
    /// URI/path conversion impossible
    #[error("Identifier translation failed: {0}")]
    Translation(String),

    /// A namespace URI or prefix with no mapping in the store table
    #[error("Unknown namespace: {0}")]
    UnknownNamespace(String),

    /// Caller asked for a category that does not exist
    #[error("Unknown triple category: {0}")]
    UnknownCategory(String),

    /// Core store error
    #[error("Core error: {0}")]
    Core(#[from] grove_db_core::Error),
}
