//! Write-path error types
//!
//! Fatal errors abort before any mutation is attempted: an unparsable
//! patch, an undefined prefix, an identifier translation failure. Errors
//! scoped to one statement accumulate in the `DiffReport` instead.

use thiserror::Error;

/// Write-path errors
#[derive(Error, Debug)]
pub enum TransactError {
    /// Core store error
    #[error("Core error: {0}")]
    Core(#[from] grove_db_core::Error),

    /// RDF read-path error (identifier translation, namespace lookup)
    #[error("RDF error: {0}")]
    Rdf(#[from] grove_db_rdf::RdfError),

    /// The supplied graph or patch is not applicable as given
    #[error("Malformed RDF: {0}")]
    MalformedRdf(String),
}

/// Result type for write-path operations
pub type Result<T> = std::result::Result<T, TransactError>;
