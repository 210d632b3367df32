use std::fmt;

use crate::converter::Converter;
use crate::typed::error::Result;
use crate::typed::instance::TypedStorage;
use crate::typed::schema::{Field, Schema};

type ApplyFn<S> = Box<dyn Fn(&TypedStorage<S>) -> Result<bool>>;

/// Ordered default values for some or all fields of a schema.
///
/// ```
/// use std::sync::Arc;
///
/// use typed_storage::converter::{Boolean, Integer};
/// use typed_storage::typed::{Defaults, TypedStorage};
/// use typed_storage::{MemoryStorage, Storage};
///
/// typed_storage::typed_schema! {
///     struct Prefs {
///         visits: Integer = Integer,
///         dark_mode: Boolean = Boolean,
///     }
/// }
///
/// # fn main() -> typed_storage::typed::Result<()> {
/// let store: Arc<dyn Storage> = Arc::new(MemoryStorage::new());
/// let storage = TypedStorage::new(store, Prefs::new())?;
/// storage.set_item(|s| &s.visits, 3)?;
///
/// let defaults = Defaults::<Prefs>::new()
///     .with(|s| &s.visits, 0)
///     .with(|s| &s.dark_mode, false);
/// storage.set_defaults(&defaults)?;
///
/// assert_eq!(storage.get_item(|s| &s.visits), Some(3));
/// assert_eq!(storage.get_item(|s| &s.dark_mode), Some(false));
/// # Ok(())
/// # }
/// ```
pub struct Defaults<S> {
    entries: Vec<ApplyFn<S>>,
}

impl<S: Schema + 'static> Defaults<S> {
    pub fn new() -> Self {
        Self { entries: Vec::new() }
    }

    /// Add a default for the selected field
    pub fn with<C, F>(mut self, field: F, value: C::Value) -> Self
    where
        C: Converter + 'static,
        C::Value: 'static,
        F: Fn(&S) -> &Field<C>,
        F: 'static,
    {
        self.entries.push(Box::new(move |storage: &TypedStorage<S>| -> Result<bool> {
            let field = field(storage.schema());
            if storage.read(field).is_some() {
                return Ok(false);
            }
            storage.write(field, &value)?;
            Ok(true)
        }));
        self
    }
}

impl<S> Defaults<S> {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Apply in insertion order, stopping at the first failed write.
    /// Returns how many fields were written.
    pub(crate) fn apply(&self, storage: &TypedStorage<S>) -> Result<usize>
    where
        S: Schema,
    {
        let mut written = 0;
        for entry in &self.entries {
            if entry(storage)? {
                written += 1;
            }
        }
        Ok(written)
    }
}

impl<S: Schema + 'static> Default for Defaults<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> fmt::Debug for Defaults<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Defaults").field("len", &self.entries.len()).finish()
    }
}
