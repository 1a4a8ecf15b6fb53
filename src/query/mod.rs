//! Query Module
//!
//! Composable views over a table's in-memory map.
//!
//! ## Responsibilities
//! - Filter records with conjunctive predicates
//! - Order and pick extremes with a strict-less comparator
//! - Bulk delete and bulk update through the same filters
//! - Copy data only when a view is materialized
//!
//! ## View Chain
//! ```text
//! Table ──select()/filter()──▶ SelectView ──list()/sort()──▶ ListView
//!                                  │  ▲                          │
//!                                  └──┘ filter()                 └─▶ all() / min() / max()
//! ```
//! Views borrow the table's lock and take it per operation. A view never
//! holds the lock between calls, so mutations through one view are visible to
//! every other view over the same table.

mod list;
mod select;

use std::sync::Arc;

pub use list::ListView;
pub use select::SelectView;

/// Record filter: `(id, record) -> keep`
pub type Predicate<'t, E> = Arc<dyn Fn(&str, &E) -> bool + Send + Sync + 't>;

/// Strict-less ordering: `less(a, b)` means `a` sorts strictly before `b`
pub type Comparator<'t, E> = Arc<dyn Fn(&E, &E) -> bool + Send + Sync + 't>;
