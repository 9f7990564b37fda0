//! Storage error types for the document store backends.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Storage operation errors.
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "detail", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StorageError {
    /// Entity not found
    #[error("Entity not found: {entity_type} with id {entity_id}")]
    NotFound {
        entity_type: String,
        entity_id: String,
    },
    /// Backend could not be reached or refused our credentials
    #[error("Connection error: {0}")]
    ConnectionError(String),
    /// Backend answered with a non-success status
    #[error("Backend returned {status}: {message}")]
    Backend { status: u16, message: String },
    /// Backend payload could not be decoded
    #[error("Invalid data: {0}")]
    InvalidData(String),
    /// Write attempted to set a store-managed field
    #[error("Field '{field}' is managed by the store and cannot be written")]
    ReservedField { field: String },
}

pub type StorageResult<T> = Result<T, StorageError>;

impl From<reqwest::Error> for StorageError {
    fn from(err: reqwest::Error) -> Self {
        match err.status() {
            Some(status) => StorageError::Backend {
                status: status.as_u16(),
                message: err.to_string(),
            },
            None => StorageError::ConnectionError(err.to_string()),
        }
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(err: serde_json::Error) -> Self {
        StorageError::InvalidData(err.to_string())
    }
}
