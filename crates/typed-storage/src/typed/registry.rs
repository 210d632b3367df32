use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use log::{debug, warn};
use once_cell::sync::OnceCell;

use crate::storage::provider::Storage;
use crate::typed::error::{Result, TypedStorageError};

static GLOBAL_REGISTRY: OnceCell<Arc<KeyRegistry>> = OnceCell::new();

/// Identity of a shared store: the address of its `Arc` allocation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StoreId(usize);

impl StoreId {
    pub fn of(store: &Arc<dyn Storage>) -> Self {
        StoreId(Arc::as_ptr(store) as *const () as usize)
    }
}

impl fmt::Display for StoreId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

struct StoreClaims {
    /// Dead once the store is dropped; such entries are pruned on the next claim
    store: Weak<dyn Storage>,
    keys: HashSet<String>,
}

impl StoreClaims {
    fn new(store: &Arc<dyn Storage>) -> Self {
        Self {
            store: Arc::downgrade(store),
            keys: HashSet::new(),
        }
    }
}

/// Record of which effective keys have been claimed on which store.
///
/// Claims are never released: once a typed wrapper has reserved its keys
/// they stay reserved for the life of the registry, whether or not the
/// wrapper is still alive. Collision detection is between schemas, not a
/// resource lifecycle.
pub struct KeyRegistry {
    stores: Mutex<HashMap<StoreId, StoreClaims>>,
}

impl KeyRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            stores: Mutex::new(HashMap::new()),
        }
    }

    /// The process-wide registry used by wrappers that are not given one
    pub fn global() -> Arc<KeyRegistry> {
        GLOBAL_REGISTRY.get_or_init(|| Arc::new(KeyRegistry::new())).clone()
    }

    /// Claim every key in `keys` on `store`, or none of them.
    ///
    /// All keys are checked before any is recorded, under one lock, so two
    /// racing claims for the same key cannot both succeed and a failed claim
    /// leaves the registry untouched. Entries of dropped stores are removed
    /// first, releasing the allocations their weak references hold.
    pub fn claim(&self, store: &Arc<dyn Storage>, keys: &[String]) -> Result<()> {
        let id = StoreId::of(store);
        let mut stores = self.lock();

        stores.retain(|_, claims| claims.store.strong_count() > 0);
        let claims = stores.entry(id).or_insert_with(|| StoreClaims::new(store));

        if let Some(taken) = keys.iter().find(|key| claims.keys.contains(*key)) {
            warn!("Key '{}' is already taken in storage '{}' ({})", taken, store.name(), id);
            return Err(TypedStorageError::KeyTaken {
                key: taken.clone(),
                store: format!("'{}' ({})", store.name(), id),
            });
        }

        claims.keys.extend(keys.iter().cloned());
        debug!("Claimed {} keys in storage '{}' ({}): {:?}", keys.len(), store.name(), id, keys);
        Ok(())
    }

    /// Check whether `key` is claimed on `store`
    pub fn is_claimed(&self, store: &Arc<dyn Storage>, key: &str) -> bool {
        self.lock()
            .get(&StoreId::of(store))
            .filter(|claims| claims.store.upgrade().is_some())
            .map(|claims| claims.keys.contains(key))
            .unwrap_or(false)
    }

    /// Every key claimed on `store`, sorted
    pub fn claimed_keys(&self, store: &Arc<dyn Storage>) -> Vec<String> {
        let mut keys: Vec<String> = self
            .lock()
            .get(&StoreId::of(store))
            .filter(|claims| claims.store.upgrade().is_some())
            .map(|claims| claims.keys.iter().cloned().collect())
            .unwrap_or_default();
        keys.sort();
        keys
    }

    /// Number of stores with at least one claim recorded
    pub fn store_count(&self) -> usize {
        self.lock()
            .values()
            .filter(|claims| claims.store.upgrade().is_some() && !claims.keys.is_empty())
            .count()
    }

    /// Raw number of entries, dead ones included
    #[cfg(test)]
    pub(crate) fn entry_count(&self) -> usize {
        self.lock().len()
    }

    /// Forget every claim. Intended for test isolation only.
    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<StoreId, StoreClaims>> {
        self.stores.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for KeyRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for KeyRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyRegistry")
            .field("stores", &self.store_count())
            .finish()
    }
}
