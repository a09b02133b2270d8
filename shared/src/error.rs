//! Errors raised by the record store

use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Stock record not found: {0}")]
    NotFound(Uuid),

    #[error("Stock record {0} already exists")]
    DuplicateId(Uuid),

    #[error("Unsupported stock data version: {0}")]
    UnsupportedVersion(u32),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),
}
