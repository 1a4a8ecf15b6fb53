//! In-process storage
//!
//! Keeps the encoded table in a shared buffer instead of a file. Clones share
//! the buffer, so a table can be reopened from what an earlier handle saved.

use std::marker::PhantomData;
use std::path::Path;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::error::{Result, ShelfError};
use crate::record::{Record, Records};

use super::{Format, Storage};

const MEMORY_PATH: &str = ":memory:";

/// Storage backed by a shared in-memory byte buffer
pub struct MemoryStorage<E> {
    format: Format,
    /// Encoded table; `None` until the first load or save
    buffer: Arc<Mutex<Option<Vec<u8>>>>,
    _record: PhantomData<fn() -> E>,
}

impl<E> MemoryStorage<E> {
    pub fn new(format: Format) -> Self {
        Self {
            format,
            buffer: Arc::new(Mutex::new(None)),
            _record: PhantomData,
        }
    }

    /// Start from raw encoded content (which may be malformed)
    pub fn with_bytes(format: Format, bytes: Vec<u8>) -> Self {
        Self {
            format,
            buffer: Arc::new(Mutex::new(Some(bytes))),
            _record: PhantomData,
        }
    }

    /// Current encoded content, if the resource has been initialized
    pub fn bytes(&self) -> Option<Vec<u8>> {
        self.buffer.lock().clone()
    }
}

impl<E> Clone for MemoryStorage<E> {
    fn clone(&self) -> Self {
        Self {
            format: self.format,
            buffer: Arc::clone(&self.buffer),
            _record: PhantomData,
        }
    }
}

impl<E: Record> Storage<E> for MemoryStorage<E> {
    fn load(&self) -> Result<Records<E>> {
        let mut buffer = self.buffer.lock();

        if let Some(bytes) = buffer.as_ref() {
            return self
                .format
                .decode(bytes)
                .map_err(|reason| ShelfError::DecodeFailure {
                    path: MEMORY_PATH.into(),
                    reason,
                });
        }

        let empty = Records::new();
        let encoded = self
            .format
            .encode(&empty)
            .map_err(|reason| ShelfError::EncodeFailure {
                path: MEMORY_PATH.into(),
                reason,
            })?;
        *buffer = Some(encoded);
        Ok(empty)
    }

    fn save(&self, records: &Records<E>) -> Result<()> {
        let encoded = self
            .format
            .encode(records)
            .map_err(|reason| ShelfError::EncodeFailure {
                path: MEMORY_PATH.into(),
                reason,
            })?;
        *self.buffer.lock() = Some(encoded);
        Ok(())
    }

    fn path(&self) -> &Path {
        Path::new(MEMORY_PATH)
    }
}
