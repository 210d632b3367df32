//! Backing stores: the synchronous string key-value contract typed wrappers
//! are layered over, plus an in-memory and a file-backed implementation.
pub mod config;
pub mod error;
pub mod local;
pub mod memory;
pub mod provider;

/// Re-export key types
pub use config::{LocalStorageConfig, StoreFormat};
pub use error::{StoreOpenError, StoreWriteError};
pub use local::LocalStorage;
pub use memory::MemoryStorage;
pub use provider::Storage;
