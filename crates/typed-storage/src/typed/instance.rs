use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::converter::Converter;
use crate::storage::provider::Storage;
use crate::typed::defaults::Defaults;
use crate::typed::error::{Result, TypedStorageError};
use crate::typed::registry::KeyRegistry;
use crate::typed::schema::{Field, Schema};

/// Construction settings that can come from application configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageOptions {
    /// Prepended to every field name to form the stored key
    #[serde(default)]
    pub prefix: String,
}

/// Typed, prefixed, collision-checked view of a backing store.
///
/// Each field of the schema `S` is stored under `prefix + field_name`.
/// Constructing an instance reserves those keys for the store in a
/// [`KeyRegistry`]; a second instance on the same store asking for any of
/// the same keys is refused.
pub struct TypedStorage<S> {
    store: Arc<dyn Storage>,
    prefix: String,
    schema: S,
}

/// Builder for [`TypedStorage`] with a prefix or an injected registry
pub struct TypedStorageBuilder {
    store: Arc<dyn Storage>,
    prefix: String,
    registry: Option<Arc<KeyRegistry>>,
}

impl TypedStorageBuilder {
    pub fn new(store: Arc<dyn Storage>) -> Self {
        Self {
            store,
            prefix: String::new(),
            registry: None,
        }
    }

    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Claim keys in `registry` instead of the process-wide one
    pub fn registry(mut self, registry: Arc<KeyRegistry>) -> Self {
        self.registry = Some(registry);
        self
    }

    pub fn options(mut self, options: &StorageOptions) -> Self {
        self.prefix = options.prefix.clone();
        self
    }

    /// Validate the schema, claim its keys and build the instance
    pub fn build<S: Schema>(self, schema: S) -> Result<TypedStorage<S>> {
        let keys = {
            let names = schema.field_names();
            if names.is_empty() {
                return Err(TypedStorageError::EmptySchema);
            }

            let mut seen = HashSet::new();
            if let Some(duplicate) = names.iter().find(|name| !seen.insert(**name)) {
                return Err(TypedStorageError::DuplicateField {
                    field: duplicate.to_string(),
                });
            }

            names
                .iter()
                .map(|name| format!("{}{}", self.prefix, name))
                .collect::<Vec<_>>()
        };

        let registry = self.registry.unwrap_or_else(KeyRegistry::global);
        registry.claim(&self.store, &keys)?;

        Ok(TypedStorage {
            store: self.store,
            prefix: self.prefix,
            schema,
        })
    }
}

impl<S: Schema> TypedStorage<S> {
    /// Bind `schema` to `store` with no prefix
    pub fn new(store: Arc<dyn Storage>, schema: S) -> Result<Self> {
        TypedStorageBuilder::new(store).build(schema)
    }

    /// Bind `schema` to `store`, storing every field under `prefix + name`
    pub fn with_prefix(store: Arc<dyn Storage>, prefix: impl Into<String>, schema: S) -> Result<Self> {
        TypedStorageBuilder::new(store).prefix(prefix).build(schema)
    }

    /// Read and parse a field. A missing key and a stored value that does
    /// not parse both read as `None`.
    pub fn get_item<C, F>(&self, field: F) -> Option<C::Value>
    where
        C: Converter,
        F: FnOnce(&S) -> &Field<C>,
    {
        self.read(field(&self.schema))
    }

    /// Read a field's stored string without parsing it
    pub fn get_raw_item<C, F>(&self, field: F) -> Option<String>
    where
        C: Converter,
        F: FnOnce(&S) -> &Field<C>,
    {
        self.store.get_item(&self.key_for(field(&self.schema)))
    }

    /// Whether `get_item` would return a value
    pub fn has_item<C, F>(&self, field: F) -> bool
    where
        C: Converter,
        F: FnOnce(&S) -> &Field<C>,
    {
        self.get_item(field).is_some()
    }

    /// Stringify `value` and write it to the field's key
    pub fn set_item<C, F>(&self, field: F, value: C::Value) -> Result<()>
    where
        C: Converter,
        F: FnOnce(&S) -> &Field<C>,
    {
        self.write(field(&self.schema), &value)
    }

    /// Remove the field's key. Removing an unset field is not an error.
    pub fn remove_item<C, F>(&self, field: F) -> Result<()>
    where
        C: Converter,
        F: FnOnce(&S) -> &Field<C>,
    {
        self.store.remove_item(&self.key_for(field(&self.schema)))?;
        Ok(())
    }

    /// Write each default whose field has no readable value, in the order
    /// the defaults were added. The first failed write is returned; writes
    /// made before it are kept.
    pub fn set_defaults(&self, defaults: &Defaults<S>) -> Result<()> {
        let written = defaults.apply(self)?;
        debug!("Applied {} of {} defaults under prefix '{}'", written, defaults.len(), self.prefix);
        Ok(())
    }

    /// The stored key for a field
    pub fn effective_key<C, F>(&self, field: F) -> String
    where
        C: Converter,
        F: FnOnce(&S) -> &Field<C>,
    {
        self.key_for(field(&self.schema))
    }

    /// Every stored key this instance owns, in schema order
    pub fn keys(&self) -> Vec<String> {
        self.schema
            .field_names()
            .into_iter()
            .map(|name| format!("{}{}", self.prefix, name))
            .collect()
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn schema(&self) -> &S {
        &self.schema
    }

    pub fn store(&self) -> &Arc<dyn Storage> {
        &self.store
    }

    pub(crate) fn read<C: Converter>(&self, field: &Field<C>) -> Option<C::Value> {
        let key = self.key_for(field);
        let raw = self.store.get_item(&key)?;
        let value = field.converter().parse(&raw);
        if value.is_none() {
            debug!("Value stored under '{}' does not parse; reading as absent", key);
        }
        value
    }

    pub(crate) fn write<C: Converter>(&self, field: &Field<C>, value: &C::Value) -> Result<()> {
        let key = self.key_for(field);
        self.store.set_item(&key, &field.converter().stringify(value))?;
        Ok(())
    }

    fn key_for<C>(&self, field: &Field<C>) -> String
    where
        C: Converter,
    {
        format!("{}{}", self.prefix, field.name())
    }
}

impl<S: Schema> fmt::Debug for TypedStorage<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypedStorage")
            .field("store", &self.store.name())
            .field("prefix", &self.prefix)
            .field("keys", &self.keys())
            .finish()
    }
}
