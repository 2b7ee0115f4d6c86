//! Error types for grove-db-core

use thiserror::Error;

/// Result type alias using our Error
pub type Result<T> = std::result::Result<T, Error>;

/// Core store error type
#[derive(Error, Debug)]
pub enum Error {
    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid path format
    #[error("Invalid path: {0}")]
    InvalidPath(String),

    /// Mutation refused for permission reasons
    #[error("Access denied: {0}")]
    AccessDenied(String),

    /// Mutation conflicts with the node's declared type structure
    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    /// Referenced type declaration does not exist
    #[error("Unknown type: {0}")]
    UnknownType(String),

    /// Namespace prefix already bound to a different URI
    #[error("Namespace conflict: {0}")]
    NamespaceConflict(String),

    /// Node already exists at the target path
    #[error("Already exists: {0}")]
    AlreadyExists(String),

    /// Generic error with message
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a not found error
    pub fn not_found(msg: impl Into<String>) -> Self {
        Error::NotFound(msg.into())
    }

    /// Create an invalid path error
    pub fn invalid_path(msg: impl Into<String>) -> Self {
        Error::InvalidPath(msg.into())
    }

    /// Create an access denied error
    pub fn access_denied(msg: impl Into<String>) -> Self {
        Error::AccessDenied(msg.into())
    }

    /// Create a constraint violation error
    pub fn constraint(msg: impl Into<String>) -> Self {
        Error::ConstraintViolation(msg.into())
    }

    /// Create an unknown type error
    pub fn unknown_type(msg: impl Into<String>) -> Self {
        Error::UnknownType(msg.into())
    }

    /// Create a namespace conflict error
    pub fn namespace_conflict(msg: impl Into<String>) -> Self {
        Error::NamespaceConflict(msg.into())
    }

    /// Create an already exists error
    pub fn already_exists(msg: impl Into<String>) -> Self {
        Error::AlreadyExists(msg.into())
    }

    /// Create a generic error
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }
}
