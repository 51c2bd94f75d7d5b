//! Storage error types for the document store backends.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Storage operation errors.
#[derive(Error, Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StorageError {
    /// Record not found
    #[error("Record not found: {collection} with id {id}")]
    NotFound { collection: String, id: String },
    /// Identifier could not be parsed
    #[error("Invalid identifier: {0}")]
    InvalidIdentifier(String),
    /// Backing store unreachable
    #[error("Connection error: {0}")]
    ConnectionError(String),
    /// General storage error
    #[error("Storage error: {0}")]
    Other(String),
}
