use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json;
#[cfg(feature = "yaml-config")]
use serde_yaml;
#[cfg(feature = "toml-config")]
use toml;

use crate::storage::error::{StoreOpenError, StoreWriteError};

/// Supported snapshot file formats for [`LocalStorage`](crate::storage::LocalStorage)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreFormat {
    /// JSON format (.json)
    Json,
    /// YAML format (.yaml, .yml) - requires "yaml-config" feature
    #[cfg(feature = "yaml-config")]
    Yaml,
    /// TOML format (.toml) - requires "toml-config" feature
    #[cfg(feature = "toml-config")]
    Toml,
}

impl StoreFormat {
    /// Get the file extension for this format
    pub fn extension(&self) -> &'static str {
        match self {
            StoreFormat::Json => "json",
            #[cfg(feature = "yaml-config")]
            StoreFormat::Yaml => "yaml",
            #[cfg(feature = "toml-config")]
            StoreFormat::Toml => "toml",
        }
    }

    /// Determine format from file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(|ext| match ext.to_lowercase().as_str() {
                "json" => Some(StoreFormat::Json),
                #[cfg(feature = "yaml-config")]
                "yaml" | "yml" => Some(StoreFormat::Yaml),
                #[cfg(feature = "toml-config")]
                "toml" => Some(StoreFormat::Toml),
                _ => None,
            })
    }

    /// Serialize a snapshot of store entries
    pub fn serialize(&self, entries: &BTreeMap<String, String>) -> Result<String, StoreWriteError> {
        let format = self.extension().to_string();
        match self {
            StoreFormat::Json => serde_json::to_string_pretty(entries)
                .map_err(|e| StoreWriteError::Serialization { format, source: Box::new(e) }),
            #[cfg(feature = "yaml-config")]
            StoreFormat::Yaml => serde_yaml::to_string(entries)
                .map_err(|e| StoreWriteError::Serialization { format, source: Box::new(e) }),
            #[cfg(feature = "toml-config")]
            StoreFormat::Toml => toml::to_string_pretty(entries)
                .map_err(|e| StoreWriteError::Serialization { format, source: Box::new(e) }),
        }
    }

    /// Deserialize a snapshot read from `path`
    pub fn deserialize(&self, data: &str, path: &Path) -> Result<BTreeMap<String, String>, StoreOpenError> {
        match self {
            StoreFormat::Json => serde_json::from_str(data).map_err(|e| self.open_error(path, e)),
            #[cfg(feature = "yaml-config")]
            StoreFormat::Yaml => serde_yaml::from_str(data).map_err(|e| self.open_error(path, e)),
            #[cfg(feature = "toml-config")]
            StoreFormat::Toml => toml::from_str(data).map_err(|e| self.open_error(path, e)),
        }
    }

    fn open_error<E>(&self, path: &Path, source: E) -> StoreOpenError
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        StoreOpenError::Deserialization {
            path: path.to_path_buf(),
            format: self.extension().to_string(),
            source: Box::new(source),
        }
    }
}

/// Settings for opening a [`LocalStorage`](crate::storage::LocalStorage),
/// typically read from an application's own configuration file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocalStorageConfig {
    /// Snapshot file location
    pub path: PathBuf,
    /// Snapshot format; inferred from the file extension when omitted
    #[serde(default)]
    pub format: Option<StoreFormat>,
    /// Capacity in UTF-16 code units; unbounded when omitted
    #[serde(default)]
    pub quota: Option<usize>,
}

impl LocalStorageConfig {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            format: None,
            quota: None,
        }
    }

    /// The explicit format, or the one implied by the path's extension
    pub fn resolved_format(&self) -> Result<StoreFormat, StoreOpenError> {
        self.format
            .or_else(|| StoreFormat::from_path(&self.path))
            .ok_or_else(|| StoreOpenError::UnsupportedFormat(self.path.clone()))
    }
}
