//! Database Module
//!
//! A directory of table files.
//!
//! ## Responsibilities
//! - Own the data directory
//! - Bind table names to `{data_dir}/{name}.{ext}` files
//! - Apply the configured default format

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::error::{Result, ShelfError};
use crate::record::Record;
use crate::storage::{FileStorage, Format};
use crate::table::Table;

/// Handle to a data directory holding one file per table
#[derive(Debug, Clone)]
pub struct Database {
    config: Config,
}

impl Database {
    /// Open a database, creating the data directory if needed
    pub fn open(config: Config) -> Result<Self> {
        fs::create_dir_all(&config.data_dir).map_err(|e| ShelfError::io(&config.data_dir, e))?;

        tracing::info!(
            data_dir = %config.data_dir.display(),
            format = %config.format,
            "Opened database"
        );

        Ok(Self { config })
    }

    /// Open with a path (convenience method)
    ///
    /// Uses default config with the specified data directory
    pub fn open_path(path: &Path) -> Result<Self> {
        let config = Config::builder().data_dir(path).build();
        Self::open(config)
    }

    /// Open the table `name` in the default format
    pub fn table<E>(&self, name: &str) -> Result<Table<E>>
    where
        E: Record + 'static,
    {
        self.table_with_format(name, self.config.format)
    }

    /// Open the table `name` in an explicit format
    pub fn table_with_format<E>(&self, name: &str, format: Format) -> Result<Table<E>>
    where
        E: Record + 'static,
    {
        Self::validate_table_name(name)?;
        let storage = FileStorage::in_dir(&self.config.data_dir, name, format);
        Table::open(storage)
    }

    /// File a table would be stored in
    pub fn table_path(&self, name: &str, format: Format) -> PathBuf {
        self.config
            .data_dir
            .join(format!("{}.{}", name, format.extension()))
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn data_dir(&self) -> &Path {
        &self.config.data_dir
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    // =========================================================================
    // Private Helpers
    // =========================================================================

    /// Table names become file stems and must stay inside the data directory
    fn validate_table_name(name: &str) -> Result<()> {
        if name.is_empty() {
            return Err(ShelfError::Config("Table name must not be empty".to_string()));
        }
        if name == "." || name == ".." || name.contains(['/', '\\']) {
            return Err(ShelfError::Config(format!(
                "Invalid table name: {:?}",
                name
            )));
        }
        Ok(())
    }
}
