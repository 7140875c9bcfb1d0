//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! .config.toml (flat string table)
//!     → store.rs (case-insensitive key/value CRUD)
//!     → loader.rs (typed view)
//!     → ToolboxConfig (built once per invocation, passed explicitly)
//! ```
//!
//! # Design Decisions
//! - No process-wide settings object; callers hold the config they loaded
//! - All fields have defaults to allow minimal files
//! - Interpreting trade fields belongs to the pipeline, not the loader

pub mod loader;
pub mod schema;
pub mod store;

pub use loader::{from_store, load_config, ConfigError};
pub use schema::{Settings, ToolboxConfig, TradeConfig};
pub use store::ConfigStore;

/// File used when `--config` is not given.
pub const DEFAULT_CONFIG_PATH: &str = ".config.toml";
