use std::fmt;
use std::marker::PhantomData;

use log::warn;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::converter::Converter;

/// Any serde type stored as compact JSON.
///
/// Malformed JSON, or JSON of the wrong shape, reads as `None`. Types whose
/// `Serialize` impl can fail (maps with non-string keys, for instance) are
/// outside the domain; such a failure is logged and stored as `null`.
pub struct Json<T> {
    _value: PhantomData<fn() -> T>,
}

/// Build a [`Json`] converter for `T`
pub fn json<T>() -> Json<T> {
    Json::new()
}

impl<T> Json<T> {
    pub fn new() -> Self {
        Self { _value: PhantomData }
    }
}

impl<T> Default for Json<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for Json<T> {
    fn clone(&self) -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for Json<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Json<{}>", std::any::type_name::<T>())
    }
}

impl<T: Serialize + DeserializeOwned> Converter for Json<T> {
    type Value = T;

    fn parse(&self, raw: &str) -> Option<T> {
        serde_json::from_str(raw).ok()
    }

    fn stringify(&self, value: &T) -> String {
        serde_json::to_string(value).unwrap_or_else(|e| {
            warn!("Failed to serialize {} to JSON: {}", std::any::type_name::<T>(), e);
            "null".to_string()
        })
    }
}
