//! Custom error types for the common library
//!
//! This module defines the storage error taxonomy shared by the note,
//! session, and credential stores.

use thiserror::Error;

/// Custom error type for storage operations
#[derive(Error, Debug)]
pub enum StorageError {
    /// The supplied note identifier is not UUID-shaped
    #[error("Invalid note id: {0}")]
    InvalidId(String),

    /// No note exists for the supplied identifier
    #[error("Note not found: {0}")]
    NotFound(String),

    /// A required field was empty or missing
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    /// Error occurred during a filesystem operation
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A note file's front-matter could not be parsed or rendered
    #[error("Front-matter error: {0}")]
    FrontMatter(#[from] FrontMatterError),

    /// Error occurred while hashing or parsing the password credential
    #[error("Credential error: {0}")]
    Credential(String),

    /// Error occurred while serializing persisted state
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Error raised by the front-matter codec
#[derive(Error, Debug)]
pub enum FrontMatterError {
    /// The document does not start with a front-matter block
    #[error("missing opening front-matter delimiter")]
    MissingOpeningDelimiter,

    /// The front-matter block is never closed
    #[error("missing closing front-matter delimiter")]
    MissingClosingDelimiter,

    /// The metadata block is not valid YAML
    #[error("invalid front-matter YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Type alias for Result with StorageError
pub type StorageResult<T> = Result<T, StorageError>;
