//! Storage Tests
//!
//! Tests verify:
//! - Save/load round trips in every format
//! - Transparent initialization of missing resources
//! - Full overwrite on save
//! - Decode and I/O failures surface as errors

#[path = "../common/mod.rs"]
mod common;
