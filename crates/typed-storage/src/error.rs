//! Crate-level error type wrapping each subsystem's errors.
use std::result::Result as StdResult;

use thiserror::Error as ThisError;

use crate::storage::error::{StoreOpenError, StoreWriteError};
use crate::typed::error::TypedStorageError;

#[derive(Debug, ThisError)]
pub enum Error {
    /// Collision, schema or write error from a typed wrapper
    #[error("Typed storage error: {0}")]
    Typed(#[from] TypedStorageError),

    /// A persistent store could not be opened
    #[error("Storage open error: {0}")]
    StoreOpen(#[from] StoreOpenError),
}

impl From<StoreWriteError> for Error {
    fn from(err: StoreWriteError) -> Self {
        Error::Typed(TypedStorageError::StoreWrite(err))
    }
}

/// Shorthand for Result with our Error type
pub type Result<T> = StdResult<T, Error>;
