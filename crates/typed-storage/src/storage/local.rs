use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

use log::{debug, info};
use tempfile::NamedTempFile;

use crate::storage::config::{LocalStorageConfig, StoreFormat};
use crate::storage::error::{StoreOpenError, StoreWriteError};
use crate::storage::memory::MemoryStorage;
use crate::storage::provider::Storage;

/// File-backed store.
///
/// The whole key space is held in memory and written out as a single
/// snapshot file after every mutation. Snapshots are written to a temporary
/// file in the target directory and then persisted over the target, so a
/// crash never leaves a half-written snapshot behind. A mutation whose
/// snapshot could not be written is undone in memory before the error is
/// returned.
pub struct LocalStorage {
    path: PathBuf,
    format: StoreFormat,
    entries: MemoryStorage,
    /// Serializes mutate-then-flush sequences
    flush_lock: Mutex<()>,
}

impl LocalStorage {
    /// Open (or lazily create) the snapshot at `path`, inferring the format
    /// from its extension
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreOpenError> {
        Self::from_config(&LocalStorageConfig::new(path))
    }

    /// Open the snapshot at `path` using an explicit format
    pub fn open_with_format(path: impl Into<PathBuf>, format: StoreFormat) -> Result<Self, StoreOpenError> {
        let mut config = LocalStorageConfig::new(path);
        config.format = Some(format);
        Self::from_config(&config)
    }

    /// Open a store as described by `config`
    pub fn from_config(config: &LocalStorageConfig) -> Result<Self, StoreOpenError> {
        let format = config.resolved_format()?;
        let path = config.path.clone();

        let mut entries = if path.is_file() {
            let content = fs::read_to_string(&path).map_err(|source| StoreOpenError::Io {
                path: path.clone(),
                operation: "read_to_string".to_string(),
                source,
            })?;
            MemoryStorage::from_entries(format.deserialize(&content, &path)?)
        } else {
            MemoryStorage::new()
        };
        entries.set_quota(config.quota);

        info!(
            "Opened local storage at {} ({} entries, format {})",
            path.display(),
            entries.len(),
            format.extension()
        );

        Ok(Self {
            path,
            format,
            entries,
            flush_lock: Mutex::new(()),
        })
    }

    /// Get the snapshot file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get the snapshot format
    pub fn format(&self) -> StoreFormat {
        self.format
    }

    pub fn quota(&self) -> Option<usize> {
        self.entries.quota()
    }

    fn lock(&self) -> MutexGuard<'_, ()> {
        self.flush_lock.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Write the current contents to disk
    fn persist(&self) -> Result<(), StoreWriteError> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&dir).map_err(|e| StoreWriteError::io(e, "create_dir_all", dir.clone()))?;

        let contents = self.format.serialize(&self.entries.snapshot())?;

        // Create a named temporary file in the same directory as the target file
        let mut temp_file = NamedTempFile::new_in(&dir)
            .map_err(|e| StoreWriteError::io(e, "create_temp_file", dir.clone()))?;
        temp_file
            .write_all(contents.as_bytes())
            .map_err(|e| StoreWriteError::io(e, "write_to_temp_file", temp_file.path().to_path_buf()))?;

        // Atomically replace the target file
        temp_file
            .persist(&self.path)
            .map_err(|e| StoreWriteError::io(e.error, "persist_temp_file", self.path.clone()))?;

        debug!("Flushed {} entries to {}", self.entries.len(), self.path.display());
        Ok(())
    }
}

impl Storage for LocalStorage {
    fn name(&self) -> &str {
        "local"
    }

    fn get_item(&self, key: &str) -> Option<String> {
        self.entries.get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StoreWriteError> {
        let _guard = self.lock();
        let previous = self.entries.get_item(key);
        self.entries.set_item(key, value)?;
        if let Err(e) = self.persist() {
            self.entries.restore(key, previous);
            return Err(e);
        }
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StoreWriteError> {
        let _guard = self.lock();
        let Some(previous) = self.entries.get_item(key) else {
            return Ok(());
        };
        self.entries.remove_item(key)?;
        if let Err(e) = self.persist() {
            self.entries.restore(key, Some(previous));
            return Err(e);
        }
        Ok(())
    }

    fn keys(&self) -> Vec<String> {
        self.entries.keys()
    }

    fn clear(&self) -> Result<(), StoreWriteError> {
        let _guard = self.lock();
        let previous: BTreeMap<String, String> = self.entries.snapshot();
        self.entries.clear()?;
        if let Err(e) = self.persist() {
            self.entries.restore_all(previous);
            return Err(e);
        }
        Ok(())
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}

impl fmt::Debug for LocalStorage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocalStorage")
            .field("path", &self.path)
            .field("format", &self.format)
            .field("len", &self.entries.len())
            .finish()
    }
}
