use crate::storage::provider::Storage;
use crate::typed::defaults::Defaults;
use crate::typed::error::TypedStorageError;
use crate::typed::instance::TypedStorage;

use super::common::{setup_store, Counter, Flags, Letter, Toggle};

#[test]
fn test_counter_starts_absent_then_reads_back() -> crate::Result<()> {
    let store = setup_store();
    let storage = TypedStorage::new(store.clone(), Counter::new())?;

    assert_eq!(storage.get_item(|s| &s.count), None);
    storage.set_item(|s| &s.count, 5)?;
    assert_eq!(storage.get_item(|s| &s.count), Some(5));
    Ok(())
}

#[test]
fn test_identical_schemas_collide_and_first_survives() -> crate::Result<()> {
    let store = setup_store();
    let first = TypedStorage::new(store.clone(), Letter::new())?;

    let second = TypedStorage::new(store.clone(), Letter::new());
    match second {
        Err(TypedStorageError::KeyTaken { key, store: label }) => {
            assert_eq!(key, "a");
            assert!(label.contains("scenario"), "label was {}", label);
        }
        other => panic!("Expected KeyTaken, got {:?}", other.map(|_| ())),
    }

    first.set_item(|s| &s.a, "hello".to_string())?;
    assert_eq!(first.get_item(|s| &s.a).as_deref(), Some("hello"));
    assert!(first.has_item(|s| &s.a));
    first.remove_item(|s| &s.a)?;
    assert!(!first.has_item(|s| &s.a));
    Ok(())
}

#[test]
fn test_distinct_prefixes_share_a_store() -> crate::Result<()> {
    let store = setup_store();
    let p = TypedStorage::with_prefix(store.clone(), "p_", Toggle::new())?;
    p.set_item(|s| &s.x, true)?;
    assert_eq!(store.get_item("p_x").as_deref(), Some("1"));

    let q = TypedStorage::with_prefix(store.clone(), "q_", Toggle::new())?;
    assert_eq!(q.get_item(|s| &s.x), None);
    assert_eq!(store.get_item("q_x"), None);
    Ok(())
}

#[test]
fn test_defaults_leave_existing_value_untouched() -> crate::Result<()> {
    let store = setup_store();
    let storage = TypedStorage::new(store.clone(), Flags::new())?;

    storage.set_defaults(&Defaults::<Flags>::new().with(|s| &s.flag, false))?;
    assert_eq!(store.get_item("flag").as_deref(), Some("0"));

    storage.set_defaults(&Defaults::<Flags>::new().with(|s| &s.flag, true))?;
    assert_eq!(store.get_item("flag").as_deref(), Some("0"));
    assert_eq!(storage.get_item(|s| &s.flag), Some(false));
    Ok(())
}
