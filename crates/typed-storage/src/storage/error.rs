//! # Storage Errors
//!
//! Defines the error types raised by backing stores.
//!
//! [`StoreWriteError`] is what a store returns when it refuses a mutation:
//! a capacity quota would be exceeded, the store is not writable, or a
//! persistent store failed to flush its snapshot. [`StoreOpenError`] covers
//! failures while opening a persistent store.
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreWriteError {
    #[error("Quota exceeded writing key '{key}': {required} units required, quota is {quota}")]
    QuotaExceeded {
        key: String,
        required: usize,
        quota: usize,
    },

    #[error("Access denied for key '{key}' during operation '{operation}'")]
    AccessDenied { key: String, operation: String },

    #[error("I/O error during operation '{operation}' on path '{path}': {source}")]
    Io {
        path: PathBuf,
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Serialization to '{format}' failed: {source}")]
    Serialization {
        format: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync + 'static>,
    },
}

impl StoreWriteError {
    pub fn io(source: std::io::Error, operation: impl Into<String>, path: PathBuf) -> Self {
        StoreWriteError::Io {
            source,
            operation: operation.into(),
            path,
        }
    }

    pub fn access_denied(key: &str, operation: impl Into<String>) -> Self {
        StoreWriteError::AccessDenied {
            key: key.to_string(),
            operation: operation.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum StoreOpenError {
    #[error("I/O error during operation '{operation}' on path '{path}': {source}")]
    Io {
        path: PathBuf,
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Deserialization of '{path}' from '{format}' failed: {source}")]
    Deserialization {
        path: PathBuf,
        format: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync + 'static>,
    },

    #[error("Unsupported snapshot format for path: {0}")]
    UnsupportedFormat(PathBuf),
}
