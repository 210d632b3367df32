use std::fmt::Debug;

use crate::storage::error::StoreWriteError;

/// A synchronous, string-keyed, string-valued store.
///
/// This is the contract typed wrappers are layered over. Implementations use
/// interior mutability so a single store can be shared behind an `Arc` by
/// any number of wrappers. Store identity is the identity of that `Arc`
/// allocation, never the store's contents.
pub trait Storage: Send + Sync + Debug {
    /// Get the name of this store, used in diagnostics
    fn name(&self) -> &str;

    /// Read the raw value stored under `key`
    fn get_item(&self, key: &str) -> Option<String>;

    /// Write `value` under `key`, replacing any previous value
    fn set_item(&self, key: &str, value: &str) -> Result<(), StoreWriteError>;

    /// Remove `key`. Removing a key that is not present is not an error.
    fn remove_item(&self, key: &str) -> Result<(), StoreWriteError>;

    /// List every key currently present
    fn keys(&self) -> Vec<String>;

    /// Remove every key
    fn clear(&self) -> Result<(), StoreWriteError>;

    /// Number of keys currently present
    fn len(&self) -> usize {
        self.keys().len()
    }

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn contains_key(&self, key: &str) -> bool {
        self.get_item(key).is_some()
    }
}

/// Size of an entry as browsers account for it against a quota: the UTF-16
/// length of the key plus the UTF-16 length of the value.
pub fn entry_size(key: &str, value: &str) -> usize {
    key.encode_utf16().count() + value.encode_utf16().count()
}
