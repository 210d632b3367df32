//! Typed wrappers over a backing store: field schemas, the cross-instance
//! key registry, and the [`TypedStorage`] instance itself.
pub mod defaults;
pub mod error;
pub mod instance;
pub mod registry;
pub mod schema;

pub use defaults::Defaults;
pub use error::{Result, TypedStorageError};
pub use instance::{StorageOptions, TypedStorage, TypedStorageBuilder};
pub use registry::{KeyRegistry, StoreId};
pub use schema::{Field, Schema};

#[cfg(test)]
mod tests;
