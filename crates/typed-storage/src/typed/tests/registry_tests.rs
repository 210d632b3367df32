use std::sync::{Arc, Barrier};
use std::thread;

use crate::storage::memory::MemoryStorage;
use crate::storage::provider::Storage;
use crate::typed::error::TypedStorageError;
use crate::typed::registry::{KeyRegistry, StoreId};

fn keys(list: &[&str]) -> Vec<String> {
    list.iter().map(|k| k.to_string()).collect()
}

fn new_store() -> Arc<dyn Storage> {
    Arc::new(MemoryStorage::new())
}

#[test]
fn test_claim_and_query() {
    let registry = KeyRegistry::new();
    let store = new_store();

    registry.claim(&store, &keys(&["b", "a"])).expect("first claim succeeds");
    assert!(registry.is_claimed(&store, "a"));
    assert!(!registry.is_claimed(&store, "c"));
    assert_eq!(registry.claimed_keys(&store), vec!["a", "b"]);
    assert_eq!(registry.store_count(), 1);
}

#[test]
fn test_collision_claims_nothing() {
    super::init_logging();
    let registry = KeyRegistry::new();
    let store = new_store();
    registry.claim(&store, &keys(&["a"])).unwrap();

    let err = registry.claim(&store, &keys(&["x", "a", "y"])).unwrap_err();
    match err {
        TypedStorageError::KeyTaken { key, store: label } => {
            assert_eq!(key, "a");
            assert!(label.contains("memory"), "label was {}", label);
        }
        other => panic!("Expected KeyTaken, got {:?}", other),
    }

    assert_eq!(registry.claimed_keys(&store), vec!["a"], "Failed claim must not reserve x or y");
}

#[test]
fn test_claims_are_per_store() {
    let registry = KeyRegistry::new();
    let first = new_store();
    let second = new_store();

    registry.claim(&first, &keys(&["a"])).unwrap();
    registry.claim(&second, &keys(&["a"])).expect("same key on another store is fine");
    assert_ne!(StoreId::of(&first), StoreId::of(&second));
    assert_eq!(registry.store_count(), 2);
}

#[test]
fn test_identity_not_contents() {
    let registry = KeyRegistry::new();
    let concrete = Arc::new(MemoryStorage::new());
    let as_dyn: Arc<dyn Storage> = concrete.clone();
    let same_again: Arc<dyn Storage> = concrete;

    registry.claim(&as_dyn, &keys(&["a"])).unwrap();
    assert!(registry.claim(&same_again, &keys(&["a"])).is_err(), "Clones of one Arc are one store");

    // An empty store with identical contents is still a different store
    let twin = new_store();
    assert!(registry.claim(&twin, &keys(&["a"])).is_ok());
}

#[test]
fn test_dropped_store_entries_are_pruned() {
    let registry = KeyRegistry::new();
    for _ in 0..100 {
        let store = new_store();
        registry.claim(&store, &keys(&["a"])).unwrap();
    }
    assert_eq!(registry.store_count(), 0);

    let store = new_store();
    registry.claim(&store, &keys(&["a"])).expect("a fresh store starts with no claims");
    assert_eq!(registry.entry_count(), 1, "Only the live store keeps an entry");
    assert_eq!(registry.claimed_keys(&store), vec!["a"]);
}

#[test]
fn test_clear_forgets_claims() {
    let registry = KeyRegistry::new();
    let store = new_store();
    registry.claim(&store, &keys(&["a"])).unwrap();
    registry.clear();
    assert!(!registry.is_claimed(&store, "a"));
    registry.claim(&store, &keys(&["a"])).expect("claim after clear succeeds");
}

#[test]
fn test_global_registry_is_shared() {
    let first = KeyRegistry::global();
    let second = KeyRegistry::global();
    assert!(Arc::ptr_eq(&first, &second));
}

#[test]
fn test_racing_claims_only_one_wins() {
    const THREADS: usize = 8;
    let registry = Arc::new(KeyRegistry::new());
    let store = new_store();
    let barrier = Arc::new(Barrier::new(THREADS));

    let handles: Vec<_> = (0..THREADS)
        .map(|i| {
            let registry = Arc::clone(&registry);
            let store = Arc::clone(&store);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                let own = format!("own_{}", i);
                barrier.wait();
                registry.claim(&store, &keys(&[own.as_str(), "shared"]))
            })
        })
        .collect();

    let successes = handles
        .into_iter()
        .map(|h| h.join().expect("claim thread panicked"))
        .filter(|result| result.is_ok())
        .count();

    assert_eq!(successes, 1);
    // Only the winner's private key was reserved alongside the shared one
    assert_eq!(registry.claimed_keys(&store).len(), 2);
}
