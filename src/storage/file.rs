//! File-backed storage
//!
//! One file per table, rewritten in full on every save.

use std::fs;
use std::io::ErrorKind;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use crate::error::{Result, ShelfError};
use crate::record::{Record, Records};

use super::{Format, Storage};

/// Storage bound to a single table file
pub struct FileStorage<E> {
    /// Table file path
    path: PathBuf,
    /// Encoding of the file content
    format: Format,
    _record: PhantomData<fn() -> E>,
}

impl<E> FileStorage<E> {
    /// Bind to an explicit file path
    pub fn new(path: impl Into<PathBuf>, format: Format) -> Self {
        Self {
            path: path.into(),
            format,
            _record: PhantomData,
        }
    }

    /// Bind to `{dir}/{table_name}.{ext}`
    pub fn in_dir(dir: &Path, table_name: &str, format: Format) -> Self {
        let path = dir.join(format!("{}.{}", table_name, format.extension()));
        Self::new(path, format)
    }

    pub fn format(&self) -> Format {
        self.format
    }

    // =========================================================================
    // Private Helpers
    // =========================================================================

    fn ensure_parent_dir(&self) -> Result<()> {
        match self.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => {
                fs::create_dir_all(dir).map_err(|e| ShelfError::io(dir, e))
            }
            _ => Ok(()),
        }
    }

    fn write_bytes(&self, bytes: &[u8]) -> Result<()> {
        self.ensure_parent_dir()?;
        fs::write(&self.path, bytes).map_err(|e| ShelfError::io(&self.path, e))
    }

    fn encode(&self, records: &Records<E>) -> Result<Vec<u8>>
    where
        E: Record,
    {
        self.format
            .encode(records)
            .map_err(|reason| ShelfError::EncodeFailure {
                path: self.path.clone(),
                reason,
            })
    }
}

impl<E: Record> Storage<E> for FileStorage<E> {
    fn load(&self) -> Result<Records<E>> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!("Initializing table file {}", self.path.display());
                let empty = Records::new();
                self.write_bytes(&self.encode(&empty)?)?;
                return Ok(empty);
            }
            Err(e) => return Err(ShelfError::io(&self.path, e)),
        };

        if bytes.is_empty() {
            tracing::warn!(
                "Table file {} is empty, treating it as an empty table",
                self.path.display()
            );
        }

        self.format
            .decode(&bytes)
            .map_err(|reason| ShelfError::DecodeFailure {
                path: self.path.clone(),
                reason,
            })
    }

    fn save(&self, records: &Records<E>) -> Result<()> {
        // Encode before touching the file so a failure keeps the old content
        let bytes = self.encode(records)?;
        self.write_bytes(&bytes)
    }

    fn path(&self) -> &Path {
        &self.path
    }
}
