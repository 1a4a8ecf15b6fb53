//! Record identity
//!
//! Every type stored in a [`Table`](crate::Table) names itself through
//! [`Identifiable`]. The id is the key the record lives under, both in memory
//! and in the persisted map.

use serde::de::DeserializeOwned;
use serde::Serialize;

/// A record that can produce its own table key.
///
/// The id must be unique within a table and stable for as long as the record
/// is stored under it. Changing it through an update rekeys the record.
pub trait Identifiable {
    fn id(&self) -> String;
}

/// Everything a type needs to be stored in a table.
///
/// Blanket-implemented; never implement it by hand.
pub trait Record: Identifiable + Clone + Serialize + DeserializeOwned + Send + Sync {}

impl<T> Record for T where T: Identifiable + Clone + Serialize + DeserializeOwned + Send + Sync {}

/// The in-memory and persisted shape of a table: id → record.
pub type Records<E> = std::collections::HashMap<String, E>;
