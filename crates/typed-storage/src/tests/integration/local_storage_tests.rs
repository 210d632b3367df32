use std::sync::Arc;

use chrono::{TimeZone, Utc};
use serde::{Deserialize, Serialize};
use tempfile::tempdir;

use crate::converter::{json, IsoDate, Json};
use crate::storage::local::LocalStorage;
use crate::storage::provider::Storage;
use crate::typed::instance::TypedStorage;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Session {
    user: String,
    scopes: Vec<String>,
}

crate::typed_schema! {
    struct SessionSchema {
        session: Json<Session> = json(),
        opened_at: IsoDate = IsoDate,
    }
}

#[test]
fn test_values_survive_reopen() -> crate::Result<()> {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let path = temp_dir.path().join("session.json");

    let session = Session {
        user: "ada".to_string(),
        scopes: vec!["read".to_string(), "write".to_string()],
    };
    let opened_at = Utc.with_ymd_and_hms(2025, 1, 2, 3, 4, 5).unwrap();

    {
        let store = Arc::new(LocalStorage::open(&path)?);
        let storage = TypedStorage::with_prefix(store, "auth.", SessionSchema::new())?;
        storage.set_item(|s| &s.session, session.clone())?;
        storage.set_item(|s| &s.opened_at, opened_at)?;
    }

    // A reopened file is a new store, so its keys can be claimed again
    let store = Arc::new(LocalStorage::open(&path)?);
    assert_eq!(
        store.get_item("auth.opened_at").as_deref(),
        Some("2025-01-02T03:04:05.000Z")
    );

    let storage = TypedStorage::with_prefix(store, "auth.", SessionSchema::new())?;
    assert_eq!(storage.get_item(|s| &s.session), Some(session));
    assert_eq!(storage.get_item(|s| &s.opened_at), Some(opened_at));
    Ok(())
}
