//! Configuration for ShelfDB
//!
//! Centralized configuration with sensible defaults.

use std::path::PathBuf;

use crate::storage::Format;

/// Main configuration for a [`Database`](crate::Database) handle
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Storage Configuration
    // -------------------------------------------------------------------------
    /// Root directory for all table files
    /// Internal structure:
    ///   {data_dir}/
    ///     ├── users.json
    ///     └── orders.yaml
    pub data_dir: PathBuf,

    /// Format used by tables opened without an explicit one
    pub format: Format,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./shelfdb_data"),
            format: Format::JsonIndent,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the data directory (root for all table files)
    pub fn data_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.data_dir = path.into();
        self
    }

    /// Set the default table format
    pub fn format(mut self, format: Format) -> Self {
        self.config.format = format;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
