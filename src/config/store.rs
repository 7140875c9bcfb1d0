//! Persistent key/value store backing the configuration file.
//!
//! Keys are case-insensitive and kept lowercase. Values are strings; scalar
//! TOML values written by hand (`nonce = 7`) are read back as their text.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::loader::ConfigError;

/// The configuration file as an ordered string map.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl ConfigStore {
    /// Load the store at `path`. A missing file yields an empty store that is
    /// created on the first [`save`](Self::save).
    pub fn open(path: &Path) -> Result<Self, ConfigError> {
        let entries = if path.exists() {
            let content = fs::read_to_string(path).map_err(ConfigError::Io)?;
            let table: toml::Table = toml::from_str(&content).map_err(ConfigError::Parse)?;
            table
                .into_iter()
                .map(|(k, v)| {
                    let value = match v {
                        toml::Value::String(s) => s,
                        other => other.to_string(),
                    };
                    (normalize(&k), value)
                })
                .collect()
        } else {
            BTreeMap::new()
        };

        Ok(Self {
            path: path.to_path_buf(),
            entries,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn entries(&self) -> &BTreeMap<String, String> {
        &self.entries
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(&normalize(key)).map(String::as_str)
    }

    /// Insert or overwrite a key.
    pub fn add(&mut self, key: &str, value: &str) {
        self.entries.insert(normalize(key), value.to_string());
    }

    /// Overwrite an existing key.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        match self.entries.get_mut(&normalize(key)) {
            Some(slot) => {
                *slot = value.to_string();
                Ok(())
            }
            None => Err(ConfigError::MissingKey(key.to_string())),
        }
    }

    /// Delete an existing key, returning its value.
    pub fn remove(&mut self, key: &str) -> Result<String, ConfigError> {
        self.entries
            .remove(&normalize(key))
            .ok_or_else(|| ConfigError::MissingKey(key.to_string()))
    }

    /// Write the store back to its file.
    pub fn save(&self) -> Result<(), ConfigError> {
        let content = toml::to_string(&self.entries).map_err(ConfigError::Serialize)?;
        fs::write(&self.path, content).map_err(ConfigError::Io)?;
        tracing::debug!(path = %self.path.display(), keys = self.entries.len(), "Config saved");
        Ok(())
    }
}

fn normalize(key: &str) -> String {
    key.trim().to_ascii_lowercase()
}
