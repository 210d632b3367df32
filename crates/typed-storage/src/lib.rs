//! Typed access to synchronous string key-value stores.
//!
//! A [`TypedStorage`] binds a [`Schema`] of named, converter-backed fields to
//! a shared [`Storage`], optionally under a key prefix. Reads and writes go
//! through each field's [`Converter`], and a process-wide [`KeyRegistry`]
//! refuses to let two independently-built wrappers claim the same stored key
//! on the same store.
pub mod converter;
pub mod error;
pub mod storage;
pub mod typed;

// Re-export key public types/traits
pub use converter::Converter;
pub use error::{Error, Result};
pub use storage::{LocalStorage, MemoryStorage, Storage, StoreWriteError};
pub use typed::{
    Defaults, Field, KeyRegistry, Schema, StorageOptions, TypedStorage,
    TypedStorageBuilder, TypedStorageError,
};

#[cfg(test)]
mod tests;
