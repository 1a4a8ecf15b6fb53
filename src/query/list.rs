//! List view
//!
//! A select view plus a strict-less comparator: sorted materialization and
//! extremum lookup.

use std::ops::ControlFlow;
use std::sync::Arc;

use crate::record::Record;

use super::{Comparator, SelectView};

/// A filtered, ordered, non-copying view over a table
pub struct ListView<'t, E> {
    select: SelectView<'t, E>,
    less: Comparator<'t, E>,
}

impl<'t, E> Clone for ListView<'t, E> {
    fn clone(&self) -> Self {
        Self {
            select: self.select.clone(),
            less: Arc::clone(&self.less),
        }
    }
}

impl<'t, E: Record> ListView<'t, E> {
    pub(crate) fn new(select: SelectView<'t, E>, less: Comparator<'t, E>) -> Self {
        Self { select, less }
    }

    /// Narrow the view, keeping the current order
    pub fn filter<F>(&self, extra: F) -> Self
    where
        F: Fn(&str, &E) -> bool + Send + Sync + 't,
    {
        Self {
            select: self.select.filter(extra),
            less: Arc::clone(&self.less),
        }
    }

    /// Same records, ordered by `less` instead
    pub fn sort<F>(&self, less: F) -> Self
    where
        F: Fn(&E, &E) -> bool + Send + Sync + 't,
    {
        Self {
            select: self.select.clone(),
            less: Arc::new(less),
        }
    }

    /// Every matching record, ascending under the comparator.
    ///
    /// A comparator that is not a strict total order gives an unspecified
    /// order, but the result still holds exactly the matching records.
    pub fn all(&self) -> Vec<E> {
        let mut items = Vec::new();
        self.select.iter(|_, record| {
            items.push(record.clone());
            ControlFlow::Continue(())
        });
        merge_sort(items, &*self.less)
    }

    /// The first `n` records of [`all`](Self::all)
    pub fn first(&self, n: usize) -> Vec<E> {
        let mut items = self.all();
        items.truncate(n);
        items
    }

    /// Smallest matching record, `None` if nothing matches.
    ///
    /// Ties keep whichever record the traversal met first; traversal order is
    /// hash order, so ties are not reproducible across runs.
    pub fn min(&self) -> Option<E> {
        self.extremum(|candidate, best| (self.less)(candidate, best))
    }

    /// Largest matching record, `None` if nothing matches. Ties as in
    /// [`min`](Self::min).
    pub fn max(&self) -> Option<E> {
        self.extremum(|candidate, best| (self.less)(best, candidate))
    }

    // =========================================================================
    // Delegated to the select view
    // =========================================================================

    pub fn iter<F>(&self, visit: F)
    where
        F: FnMut(&str, &E) -> ControlFlow<()>,
    {
        self.select.iter(visit)
    }

    pub fn count(&self) -> usize {
        self.select.count()
    }

    pub fn delete(&self) -> Vec<E> {
        self.select.delete()
    }

    pub fn update<F>(&self, transform: F) -> usize
    where
        F: FnMut(E) -> E,
    {
        self.select.update(transform)
    }

    /// The unordered view underneath
    pub fn as_select(&self) -> &SelectView<'t, E> {
        &self.select
    }

    // =========================================================================
    // Private Helpers
    // =========================================================================

    /// Single pass keeping the record for which `replaces(candidate, best)`
    /// last held
    fn extremum(&self, replaces: impl Fn(&E, &E) -> bool) -> Option<E> {
        let mut best: Option<E> = None;
        self.select.iter(|_, record| {
            let replace = match &best {
                Some(current) => replaces(record, current),
                None => true,
            };
            if replace {
                best = Some(record.clone());
            }
            ControlFlow::Continue(())
        });
        best
    }
}

/// Stable merge sort driven only by a strict-less function.
///
/// Never panics on inconsistent comparators; it only ever moves elements.
fn merge_sort<E>(mut items: Vec<E>, less: &dyn Fn(&E, &E) -> bool) -> Vec<E> {
    if items.len() <= 1 {
        return items;
    }

    let right = items.split_off(items.len() / 2);
    let left = merge_sort(items, less);
    let right = merge_sort(right, less);

    let mut merged = Vec::with_capacity(left.len() + right.len());
    let mut left = left.into_iter().peekable();
    let mut right = right.into_iter().peekable();

    loop {
        // Right wins only when strictly less, which keeps equal items in order
        let take_right = match (left.peek(), right.peek()) {
            (Some(l), Some(r)) => less(r, l),
            _ => break,
        };
        let next = if take_right { right.next() } else { left.next() };
        merged.extend(next);
    }
    merged.extend(left);
    merged.extend(right);

    merged
}
