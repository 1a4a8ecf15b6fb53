//! Select view
//!
//! Predicate-filtered lens over a table's map.

use std::ops::ControlFlow;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::record::{Record, Records};

use super::{Comparator, ListView, Predicate};

/// A filtered, non-copying view over a table.
///
/// Cloning a view is cheap; it shares the predicate and the table reference.
pub struct SelectView<'t, E> {
    /// The owning table's map
    records: &'t RwLock<Records<E>>,
    /// Conjunction of every filter applied so far
    predicate: Predicate<'t, E>,
}

impl<'t, E> Clone for SelectView<'t, E> {
    fn clone(&self) -> Self {
        Self {
            records: self.records,
            predicate: Arc::clone(&self.predicate),
        }
    }
}

impl<'t, E: Record> SelectView<'t, E> {
    /// Unfiltered view over `records`
    pub(crate) fn new(records: &'t RwLock<Records<E>>) -> Self {
        Self {
            records,
            predicate: Arc::new(|_: &str, _: &E| true),
        }
    }

    /// Narrow the view. The result matches records accepted by both the
    /// current predicate and `extra`; `self` is left untouched.
    ///
    /// The predicate runs under the table's lock and must not touch the same
    /// table.
    pub fn filter<F>(&self, extra: F) -> Self
    where
        F: Fn(&str, &E) -> bool + Send + Sync + 't,
    {
        let current = Arc::clone(&self.predicate);
        Self {
            records: self.records,
            predicate: Arc::new(move |id: &str, record: &E| {
                current(id, record) && extra(id, record)
            }),
        }
    }

    /// Copy every matching entry out of the table.
    ///
    /// The copy is detached, so the table can be mutated while walking it.
    pub fn all(&self) -> Records<E> {
        let records = self.records.read();
        records
            .iter()
            .filter(|(id, record)| (self.predicate)(id.as_str(), record))
            .map(|(id, record)| (id.clone(), record.clone()))
            .collect()
    }

    /// Ordered view, sorted by id ascending
    pub fn list(&self) -> ListView<'t, E> {
        ListView::new(self.clone(), Arc::new(|a: &E, b: &E| a.id() < b.id()))
    }

    /// Ordered view using `less` as the strict-less comparator.
    ///
    /// `min`/`max` call `less` under the table's read lock, so it must not
    /// mutate the same table.
    pub fn sort<F>(&self, less: F) -> ListView<'t, E>
    where
        F: Fn(&E, &E) -> bool + Send + Sync + 't,
    {
        let less: Comparator<'t, E> = Arc::new(less);
        ListView::new(self.clone(), less)
    }

    /// Visit matching entries in unspecified order. Return
    /// `ControlFlow::Break(())` from `visit` to stop early.
    ///
    /// The table is read-locked for the whole walk; `visit` must not mutate
    /// the same table.
    pub fn iter<F>(&self, mut visit: F)
    where
        F: FnMut(&str, &E) -> ControlFlow<()>,
    {
        let records = self.records.read();
        for (id, record) in records.iter() {
            if !(self.predicate)(id.as_str(), record) {
                continue;
            }
            if visit(id.as_str(), record).is_break() {
                break;
            }
        }
    }

    /// Number of matching entries
    pub fn count(&self) -> usize {
        let records = self.records.read();
        records
            .iter()
            .filter(|(id, record)| (self.predicate)(id.as_str(), record))
            .count()
    }

    /// Remove every matching entry from the table and return what was removed.
    ///
    /// The table is write-locked for the whole pass; the predicate must not
    /// touch the same table.
    pub fn delete(&self) -> Vec<E> {
        let mut records = self.records.write();

        let ids = matching_ids(&records, &self.predicate);
        let removed: Vec<E> = ids.iter().filter_map(|id| records.remove(id)).collect();

        tracing::debug!(removed = removed.len(), remaining = records.len(), "Deleted records");
        removed
    }

    /// Replace every matching record with `transform(record)`.
    ///
    /// The matching set is fixed before any transform runs and each match is
    /// transformed once. The map is only touched after every transform has
    /// returned, so a panicking `transform` leaves the table unchanged. Then
    /// the old keys are removed and the results inserted under their own
    /// ids. A result whose id changed is rekeyed; a result that lands on an
    /// existing id overwrites that record.
    ///
    /// Returns the number of records transformed.
    ///
    /// The table is write-locked for the whole pass; neither the predicate
    /// nor `transform` may touch the same table.
    pub fn update<F>(&self, mut transform: F) -> usize
    where
        F: FnMut(E) -> E,
    {
        let mut records = self.records.write();

        let ids = matching_ids(&records, &self.predicate);
        let results: Vec<(String, E)> = ids
            .into_iter()
            .filter_map(|id| {
                let record = records.get(&id)?.clone();
                Some((id, transform(record)))
            })
            .collect();

        for (old_id, _) in &results {
            records.remove(old_id);
        }

        let updated = results.len();
        let mut rekeyed = 0;
        for (old_id, record) in results {
            let new_id = record.id();
            if new_id != old_id {
                rekeyed += 1;
            }
            records.insert(new_id, record);
        }

        tracing::debug!(updated, rekeyed, "Updated records");
        updated
    }
}

/// Ids of entries accepted by `predicate`
fn matching_ids<E>(records: &Records<E>, predicate: &Predicate<'_, E>) -> Vec<String> {
    records
        .iter()
        .filter(|(id, record)| predicate(id.as_str(), record))
        .map(|(id, _)| id.clone())
        .collect()
}
