use shelfdb::ShelfError;

use crate::common::{abc_table, male, memory_table, user};

// =============================================================================
// Get Tests
// =============================================================================

#[test]
fn test_new_table_is_empty() {
    let table = memory_table();
    assert_eq!(table.len(), 0);
    assert!(table.is_empty());
    assert!(table.all().is_empty());
}

#[test]
fn test_get_existing_and_missing() {
    let table = abc_table();

    assert_eq!(table.get("Bob"), Some(male("Bob", 25)));
    assert_eq!(table.get("Zed"), None);
    assert!(table.contains("Alice"));
    assert!(!table.contains("Zed"));
}

#[test]
fn test_require_missing_is_not_found() {
    let table = abc_table();

    assert_eq!(table.require("Carol").unwrap(), user("Carol", 30));

    let err = table.require("Zed").unwrap_err();
    match err {
        ShelfError::NotFound { id } => assert_eq!(id, "Zed"),
        other => panic!("expected NotFound, got {:?}", other),
    }
}

// =============================================================================
// Insert Tests
// =============================================================================

#[test]
fn test_insert_new_record() {
    let table = abc_table();

    table.insert(male("Dave", 41)).unwrap();

    assert_eq!(table.len(), 4);
    assert_eq!(table.get("Dave"), Some(male("Dave", 41)));
}

#[test]
fn test_insert_twice_reports_already_present() {
    let table = abc_table();
    let original_len = table.len();

    table.insert(male("Dave", 41)).unwrap();
    let err = table.insert(male("Dave", 99)).unwrap_err();

    match err {
        ShelfError::AlreadyPresent { id } => assert_eq!(id, "Dave"),
        other => panic!("expected AlreadyPresent, got {:?}", other),
    }
    assert_eq!(table.len(), original_len + 1);
    assert_eq!(table.get("Dave"), Some(male("Dave", 41)));
}

#[test]
fn test_insert_existing_leaves_record_unchanged() {
    let table = abc_table();

    assert!(table.insert(user("Alice", 99)).is_err());

    assert_eq!(table.get("Alice"), Some(user("Alice", 18)));
    assert_eq!(table.len(), 3);
}

// =============================================================================
// Upsert Tests
// =============================================================================

#[test]
fn test_upsert_inserts_and_overwrites() {
    let table = abc_table();

    table.upsert(user("Erin", 22));
    table.upsert(user("Alice", 19));

    assert_eq!(table.len(), 4);
    assert_eq!(table.get("Erin"), Some(user("Erin", 22)));
    assert_eq!(table.get("Alice"), Some(user("Alice", 19)));
}

#[test]
fn test_upsert_is_idempotent() {
    let once = abc_table();
    once.upsert(male("Frank", 50));

    let twice = abc_table();
    twice.upsert(male("Frank", 50));
    twice.upsert(male("Frank", 50));

    assert_eq!(once.all(), twice.all());
}

#[test]
fn test_upsert_many() {
    let table = memory_table();

    table.upsert_many(vec![user("A", 1), user("B", 2), user("A", 3)]);

    assert_eq!(table.len(), 2);
    assert_eq!(table.get("A"), Some(user("A", 3)));
}

// =============================================================================
// Delete Tests
// =============================================================================

#[test]
fn test_delete_by_id_then_absent() {
    let table = abc_table();

    assert!(table.delete_by_id("Bob"));
    assert_eq!(table.get("Bob"), None);
    assert!(!table.delete_by_id("Bob"));
    assert_eq!(table.len(), 2);
}

#[test]
fn test_delete_missing_id_is_noop() {
    let table = abc_table();

    assert!(!table.delete_by_id("Nobody"));
    assert_eq!(table.len(), 3);
}

// =============================================================================
// Id Invariant Tests
// =============================================================================

#[test]
fn test_every_key_matches_record_id() {
    let table = abc_table();
    table.upsert(user("Gina", 33));
    table.update(|mut u| {
        u.name = format!("{}!", u.name);
        u
    });

    for (id, record) in table.all() {
        assert_eq!(id, record.name);
    }
}
