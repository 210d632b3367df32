use std::collections::BTreeMap;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::storage::error::StoreWriteError;
use crate::storage::provider::{entry_size, Storage};

#[derive(Debug, Default, Clone)]
struct Entries {
    map: BTreeMap<String, String>,
    /// Sum of `entry_size` over `map`
    used: usize,
}

/// In-memory store with optional quota and read-only switch
pub struct MemoryStorage {
    name: String,
    entries: RwLock<Entries>,
    quota: Option<usize>,
    read_only: AtomicBool,
}

impl MemoryStorage {
    /// Create an unbounded, writable in-memory store
    pub fn new() -> Self {
        Self::named("memory")
    }

    /// Create an unbounded store with a diagnostic name
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entries: RwLock::new(Entries::default()),
            quota: None,
            read_only: AtomicBool::new(false),
        }
    }

    /// Create a store that rejects writes once the total entry size would
    /// exceed `quota` UTF-16 code units
    pub fn with_quota(quota: usize) -> Self {
        let mut storage = Self::new();
        storage.quota = Some(quota);
        storage
    }

    /// Create a store pre-populated with `entries`, ignoring any quota
    pub fn from_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let storage = Self::new();
        {
            let mut state = storage.write_state();
            for (key, value) in entries {
                let (key, value) = (key.into(), value.into());
                state.used += entry_size(&key, &value);
                if let Some(old) = state.map.insert(key.clone(), value) {
                    state.used -= entry_size(&key, &old);
                }
            }
        }
        storage
    }

    pub fn quota(&self) -> Option<usize> {
        self.quota
    }

    pub(crate) fn set_quota(&mut self, quota: Option<usize>) {
        self.quota = quota;
    }

    /// Total size of all entries, in UTF-16 code units
    pub fn used(&self) -> usize {
        self.read_state().used
    }

    /// Switch the store into (or out of) read-only mode, where every
    /// mutation fails with `AccessDenied`
    pub fn set_read_only(&self, read_only: bool) {
        self.read_only.store(read_only, Ordering::SeqCst);
    }

    pub fn is_read_only(&self) -> bool {
        self.read_only.load(Ordering::SeqCst)
    }

    /// Copy of the current contents
    pub fn snapshot(&self) -> BTreeMap<String, String> {
        self.read_state().map.clone()
    }

    /// Put `key` back to `previous` without quota or access checks.
    /// Used to undo a mutation a persistent store failed to flush.
    pub(crate) fn restore(&self, key: &str, previous: Option<String>) {
        let mut state = self.write_state();
        if let Some(old) = state.map.remove(key) {
            state.used -= entry_size(key, &old);
        }
        if let Some(value) = previous {
            state.used += entry_size(key, &value);
            state.map.insert(key.to_string(), value);
        }
    }

    pub(crate) fn restore_all(&self, entries: BTreeMap<String, String>) {
        let used = entries.iter().map(|(k, v)| entry_size(k, v)).sum();
        *self.write_state() = Entries { map: entries, used };
    }

    fn check_writable(&self, key: &str, operation: &str) -> Result<(), StoreWriteError> {
        if self.is_read_only() {
            return Err(StoreWriteError::access_denied(key, operation));
        }
        Ok(())
    }

    fn read_state(&self) -> RwLockReadGuard<'_, Entries> {
        self.entries.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_state(&self) -> RwLockWriteGuard<'_, Entries> {
        self.entries.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for MemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl Storage for MemoryStorage {
    fn name(&self) -> &str {
        &self.name
    }

    fn get_item(&self, key: &str) -> Option<String> {
        self.read_state().map.get(key).cloned()
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StoreWriteError> {
        self.check_writable(key, "set_item")?;
        let mut state = self.write_state();

        let replaced = state.map.get(key).map(|old| entry_size(key, old)).unwrap_or(0);
        let required = state.used - replaced + entry_size(key, value);
        if let Some(quota) = self.quota {
            if required > quota {
                return Err(StoreWriteError::QuotaExceeded {
                    key: key.to_string(),
                    required,
                    quota,
                });
            }
        }

        state.map.insert(key.to_string(), value.to_string());
        state.used = required;
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StoreWriteError> {
        self.check_writable(key, "remove_item")?;
        let mut state = self.write_state();
        if let Some(old) = state.map.remove(key) {
            state.used -= entry_size(key, &old);
        }
        Ok(())
    }

    fn keys(&self) -> Vec<String> {
        self.read_state().map.keys().cloned().collect()
    }

    fn clear(&self) -> Result<(), StoreWriteError> {
        self.check_writable("*", "clear")?;
        *self.write_state() = Entries::default();
        Ok(())
    }

    fn len(&self) -> usize {
        self.read_state().map.len()
    }
}

impl fmt::Debug for MemoryStorage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryStorage")
            .field("name", &self.name)
            .field("len", &self.len())
            .field("quota", &self.quota)
            .field("read_only", &self.is_read_only())
            .finish()
    }
}
