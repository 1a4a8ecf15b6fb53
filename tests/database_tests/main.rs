//! Database Tests
//!
//! Tests verify:
//! - Opening creates the data directory
//! - Tables bind to `{data_dir}/{name}.{ext}`
//! - Default and explicit formats
//! - Table name validation

use std::fs;

use shelfdb::{Config, Database, Format, ShelfError, Table};
use tempfile::TempDir;

#[path = "../common/mod.rs"]
mod common;

use common::{male, user, User};

// =============================================================================
// Helper Functions
// =============================================================================

fn setup_temp_db(format: Format) -> (TempDir, Database) {
    let temp_dir = TempDir::new().unwrap();
    let config = Config::builder()
        .data_dir(temp_dir.path())
        .format(format)
        .build();
    let db = Database::open(config).unwrap();
    (temp_dir, db)
}

// =============================================================================
// Open Tests
// =============================================================================

#[test]
fn test_open_creates_data_directory() {
    let temp_dir = TempDir::new().unwrap();
    let data_dir = temp_dir.path().join("mydb");

    let db = Database::open_path(&data_dir).unwrap();

    assert!(data_dir.is_dir());
    assert_eq!(db.data_dir(), data_dir);
}

#[test]
fn test_default_config() {
    let config = Config::default();
    assert_eq!(config.format, Format::JsonIndent);
    assert!(config.data_dir.ends_with("shelfdb_data"));
}

// =============================================================================
// Table Binding Tests
// =============================================================================

#[test]
fn test_table_uses_default_format() {
    let (_temp, db) = setup_temp_db(Format::Yaml);

    let users: Table<User> = db.table("users").unwrap();

    assert_eq!(users.path(), db.data_dir().join("users.yaml"));
    assert!(users.path().is_file());
}

#[test]
fn test_table_with_explicit_format() {
    let (_temp, db) = setup_temp_db(Format::Json);

    let users: Table<User> = db.table_with_format("users", Format::Binary).unwrap();

    assert_eq!(users.path(), db.table_path("users", Format::Binary));
    assert!(users.path().ends_with("users.shelf"));
}

#[test]
fn test_tables_are_independent() {
    let (_temp, db) = setup_temp_db(Format::Json);

    let staff: Table<User> = db.table("staff").unwrap();
    let guests: Table<User> = db.table("guests").unwrap();

    staff.upsert(male("Bob", 25));
    guests.upsert(user("Alice", 18));
    staff.flush().unwrap();
    guests.flush().unwrap();

    let staff: Table<User> = db.table("staff").unwrap();
    assert_eq!(staff.len(), 1);
    assert!(staff.contains("Bob"));
    assert!(!staff.contains("Alice"));
}

#[test]
fn test_fresh_table_file_holds_empty_map() {
    let (_temp, db) = setup_temp_db(Format::Json);

    let users: Table<User> = db.table("users").unwrap();
    users.close().unwrap();

    assert_eq!(fs::read(db.table_path("users", Format::Json)).unwrap(), b"{}");
}

#[test]
fn test_reopen_through_database() {
    let (_temp, db) = setup_temp_db(Format::JsonIndent);

    {
        let users: Table<User> = db.table("users").unwrap();
        users.insert(user("Alice", 18)).unwrap();
        users.insert(male("Bob", 25)).unwrap();
        users.close().unwrap();
    }

    let users: Table<User> = db.table("users").unwrap();
    let eldest = users.sort(|a, b| a.age < b.age).max();
    assert_eq!(eldest, Some(male("Bob", 25)));
}

// =============================================================================
// Validation Tests
// =============================================================================

#[test]
fn test_invalid_table_names_are_rejected() {
    let (_temp, db) = setup_temp_db(Format::Json);

    for name in ["", ".", "..", "a/b", "a\\b"] {
        let result = db.table::<User>(name);
        assert!(
            matches!(result, Err(ShelfError::Config(_))),
            "name {:?} should be rejected",
            name
        );
    }
}
