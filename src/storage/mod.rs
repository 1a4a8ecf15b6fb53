//! Storage Module
//!
//! Whole-table persistence for ShelfDB.
//!
//! ## Responsibilities
//! - Load a table's complete id → record map in one read
//! - Initialize a missing resource to the encoded empty map
//! - Overwrite the resource with the full map on every save
//!
//! ## Persisted Shape
//! ```text
//! ┌────────────────────────────────────────┐
//! │ { "<id>": <record>, "<id>": <record> } │
//! └────────────────────────────────────────┘
//! ```
//! The logical shape is the same for every [`Format`]; only the byte
//! encoding differs. There is no partial or incremental write.

mod file;
mod format;
mod memory;

use std::path::Path;

use crate::error::Result;
use crate::record::Records;

pub use file::FileStorage;
pub use format::Format;
pub use memory::MemoryStorage;

/// Load/save contract a [`Table`](crate::Table) persists through.
pub trait Storage<E>: Send + Sync {
    /// Read the full map. A resource that does not exist yet is created,
    /// holding the encoded empty map, and an empty map is returned.
    fn load(&self) -> Result<Records<E>>;

    /// Replace the resource content with exactly `records`.
    fn save(&self, records: &Records<E>) -> Result<()>;

    /// The resource this storage is bound to
    fn path(&self) -> &Path;
}
