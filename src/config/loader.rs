//! Configuration loading from disk.

use std::path::Path;

use crate::config::schema::{Settings, ToolboxConfig, TradeConfig};
use crate::config::store::ConfigStore;

/// Error type for configuration loading and persistence.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Serialize(toml::ser::Error),
    /// The configuration file does not exist.
    NotFound(String),
    /// Lookup, `set` or `del` on a key that is not stored.
    MissingKey(String),
    /// A stored value has the wrong shape for its key.
    Invalid { key: String, value: String },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "IO error: {}", e),
            ConfigError::Parse(e) => write!(f, "Parse error: {}", e),
            ConfigError::Serialize(e) => write!(f, "Serialize error: {}", e),
            ConfigError::NotFound(path) => write!(
                f,
                "config file {} not found, create it with `config add -k <key> -v <value>`",
                path
            ),
            ConfigError::MissingKey(key) => write!(f, "key {} does not exist", key),
            ConfigError::Invalid { key, value } => write!(f, "invalid value <{}> for key {}", value, key),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Load the trade configuration from a store file.
///
/// Unlike [`ConfigStore::open`], a missing file is an error here: a trade
/// cannot proceed without a network and a key.
pub fn load_config(path: &Path) -> Result<ToolboxConfig, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::NotFound(path.display().to_string()));
    }
    let store = ConfigStore::open(path)?;
    from_store(&store)
}

/// Build the typed configuration from already loaded entries.
pub fn from_store(store: &ConfigStore) -> Result<ToolboxConfig, ConfigError> {
    let table: toml::Table = store
        .entries()
        .iter()
        .map(|(k, v)| (k.clone(), toml::Value::String(v.clone())))
        .collect();
    let trade: TradeConfig = toml::Value::Table(table).try_into().map_err(ConfigError::Parse)?;

    let mut settings = Settings::default();
    if let Some(raw) = store.get(Settings::RPC_TIMEOUT_KEY) {
        settings.rpc_timeout_secs = raw
            .trim()
            .parse()
            .ok()
            .filter(|secs: &u64| *secs > 0)
            .ok_or_else(|| ConfigError::Invalid {
                key: Settings::RPC_TIMEOUT_KEY.to_string(),
                value: raw.to_string(),
            })?;
    }
    if let Some(level) = store.get(Settings::LOG_LEVEL_KEY) {
        settings.log_level = level.trim().to_string();
    }

    Ok(ToolboxConfig { trade, settings })
}
