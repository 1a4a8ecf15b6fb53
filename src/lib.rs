//! # ShelfDB
//!
//! An embedded, single-process record store with:
//! - One in-memory table per record type, loaded whole on open
//! - Composable, non-copying query views (filter, sort, min/max)
//! - Bulk update and bulk delete through the same views
//! - Explicit whole-table persistence in JSON, YAML, BSON or a binary format
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        Database                              │
//! │                 (data dir, default format)                   │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │ table::<E>(name)
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                        Table<E>                              │
//! │               RwLock<HashMap<id, E>>                         │
//! └──────────┬───────────────────────────────────┬──────────────┘
//!            │ select() / filter()               │ flush()
//!            ▼                                   ▼
//!   ┌─────────────────┐                  ┌─────────────┐
//!   │   SelectView    │                  │   Storage   │
//!   │ ──▶ ListView    │                  │ (File/Mem)  │
//!   └─────────────────┘                  └─────────────┘
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use serde::{Deserialize, Serialize};
//! use shelfdb::{Database, Identifiable};
//!
//! #[derive(Debug, Clone, Serialize, Deserialize)]
//! struct User {
//!     name: String,
//!     age: u32,
//! }
//!
//! impl Identifiable for User {
//!     fn id(&self) -> String {
//!         self.name.clone()
//!     }
//! }
//!
//! # fn main() -> shelfdb::Result<()> {
//! let db = Database::open_path("db".as_ref())?;
//! let users = db.table::<User>("users")?;
//!
//! users.upsert(User { name: "Harry".into(), age: 20 });
//! let eldest = users
//!     .filter(|_, u| u.age > 18)
//!     .sort(|a, b| a.age < b.age)
//!     .max();
//! println!("{:?}", eldest);
//!
//! users.close()?;
//! # Ok(())
//! # }
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod record;
pub mod storage;
pub mod query;
pub mod table;
pub mod database;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{Result, ShelfError};
pub use config::Config;
pub use record::{Identifiable, Record, Records};
pub use storage::{FileStorage, Format, MemoryStorage, Storage};
pub use query::{ListView, SelectView};
pub use table::Table;
pub use database::Database;

// =============================================================================
// Version Info
// =============================================================================

/// Current version of ShelfDB
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
