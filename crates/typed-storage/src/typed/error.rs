//! # Typed Storage Errors
//!
//! [`TypedStorageError`] covers both failure surfaces of a typed wrapper:
//! construction-time schema and key-collision errors, and write failures
//! propagated unchanged from the backing store.
//!
//! An unparseable stored value is deliberately not an error; reads report
//! it as absent.
use thiserror::Error;

use crate::storage::error::StoreWriteError;

#[derive(Debug, Error)]
pub enum TypedStorageError {
    #[error("Key '{key}' is already taken in storage {store}")]
    KeyTaken { key: String, store: String },

    #[error("Schema declares no fields")]
    EmptySchema,

    #[error("Schema declares field '{field}' more than once")]
    DuplicateField { field: String },

    #[error("Storage write failed: {0}")]
    StoreWrite(#[from] StoreWriteError),
}

/// Shorthand for Result with [`TypedStorageError`]
pub type Result<T> = std::result::Result<T, TypedStorageError>;
