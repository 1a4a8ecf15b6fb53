//! Table Module
//!
//! One in-memory collection of records bound to its storage.
//!
//! ## Responsibilities
//! - Load the whole collection once on open
//! - Point operations by id (get/insert/upsert/delete)
//! - Entry point into the query views
//! - Write the whole collection back on flush

use std::path::Path;

use parking_lot::RwLock;

use crate::error::{Result, ShelfError};
use crate::query::{ListView, SelectView};
use crate::record::{Record, Records};
use crate::storage::Storage;

/// An in-memory table of `E` records
///
/// ## Concurrency:
/// - `records`: one RwLock per table; readers share it, every mutation and
///   every view `delete`/`update` holds the write guard for its full pass
/// - All methods use `&self`, so a table can be shared across threads
///
/// ## Persistence:
/// Mutations stay in memory until [`flush`](Self::flush) or
/// [`close`](Self::close). Dropping the table discards unflushed changes.
pub struct Table<E> {
    /// id → record, the single source of truth for every view
    records: RwLock<Records<E>>,

    /// Where `flush` writes to
    storage: Box<dyn Storage<E>>,
}

impl<E: Record> Table<E> {
    /// Load a table from `storage`, initializing the resource if it is new
    pub fn open<S>(storage: S) -> Result<Self>
    where
        S: Storage<E> + 'static,
    {
        Self::open_boxed(Box::new(storage))
    }

    /// Same as [`open`](Self::open) for an already boxed storage
    pub fn open_boxed(storage: Box<dyn Storage<E>>) -> Result<Self> {
        let loaded = storage.load()?;

        // Keys come from the file; the record's own id wins
        let mut records = Records::with_capacity(loaded.len());
        for (key, record) in loaded {
            let id = record.id();
            if id != key {
                tracing::warn!(
                    "Record stored under {:?} reports id {:?}, rekeying",
                    key,
                    id
                );
            }
            if records.contains_key(&id) {
                return Err(ShelfError::DecodeFailure {
                    path: storage.path().to_path_buf(),
                    reason: format!("two stored records report id {:?}", id),
                });
            }
            records.insert(id, record);
        }

        tracing::debug!(
            path = %storage.path().display(),
            records = records.len(),
            "Opened table"
        );

        Ok(Self {
            records: RwLock::new(records),
            storage,
        })
    }

    // =========================================================================
    // Point Operations
    // =========================================================================

    /// Record stored under `id`
    pub fn get(&self, id: &str) -> Option<E> {
        self.records.read().get(id).cloned()
    }

    /// Record stored under `id`, or `NotFound`
    pub fn require(&self, id: &str) -> Result<E> {
        self.get(id).ok_or_else(|| ShelfError::NotFound { id: id.to_string() })
    }

    pub fn contains(&self, id: &str) -> bool {
        self.records.read().contains_key(id)
    }

    /// Insert a record whose id is not taken yet.
    ///
    /// Returns `AlreadyPresent` and leaves the table unchanged otherwise.
    pub fn insert(&self, record: E) -> Result<()> {
        let id = record.id();
        let mut records = self.records.write();

        if records.contains_key(&id) {
            return Err(ShelfError::AlreadyPresent { id });
        }

        records.insert(id, record);
        Ok(())
    }

    /// Insert or overwrite a record
    pub fn upsert(&self, record: E) {
        let id = record.id();
        self.records.write().insert(id, record);
    }

    /// Insert or overwrite several records under one lock
    pub fn upsert_many<I>(&self, records: I)
    where
        I: IntoIterator<Item = E>,
    {
        let mut guard = self.records.write();
        for record in records {
            guard.insert(record.id(), record);
        }
    }

    /// Remove the record under `id`. Returns whether anything was removed.
    pub fn delete_by_id(&self, id: &str) -> bool {
        self.records.write().remove(id).is_some()
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }

    // =========================================================================
    // Query Entry Points
    // =========================================================================

    /// Unfiltered view over every record
    pub fn select(&self) -> SelectView<'_, E> {
        SelectView::new(&self.records)
    }

    /// View over records accepted by `predicate(id, record)`.
    ///
    /// The predicate runs under this table's lock and must not touch it.
    pub fn filter<'t, F>(&'t self, predicate: F) -> SelectView<'t, E>
    where
        F: Fn(&str, &E) -> bool + Send + Sync + 't,
    {
        self.select().filter(predicate)
    }

    /// Copy of every record, keyed by id
    pub fn all(&self) -> Records<E> {
        self.select().all()
    }

    /// Every record, ordered by id
    pub fn list(&self) -> ListView<'_, E> {
        self.select().list()
    }

    /// Every record, ordered by `less`. `less` must not mutate this table.
    pub fn sort<'t, F>(&'t self, less: F) -> ListView<'t, E>
    where
        F: Fn(&E, &E) -> bool + Send + Sync + 't,
    {
        self.select().sort(less)
    }

    /// Apply `transform` to every record. See [`SelectView::update`].
    ///
    /// Runs under the write lock; `transform` must not touch this table.
    pub fn update<F>(&self, transform: F) -> usize
    where
        F: FnMut(E) -> E,
    {
        self.select().update(transform)
    }

    // =========================================================================
    // Persistence
    // =========================================================================

    /// Write the current content to storage, replacing what was there
    pub fn flush(&self) -> Result<()> {
        let records = self.records.read();
        self.storage.save(&records)?;

        tracing::debug!(
            path = %self.storage.path().display(),
            records = records.len(),
            "Flushed table"
        );
        Ok(())
    }

    /// Flush and release the table
    pub fn close(self) -> Result<()> {
        self.flush()
    }

    /// The resource this table persists to
    pub fn path(&self) -> &Path {
        self.storage.path()
    }
}
