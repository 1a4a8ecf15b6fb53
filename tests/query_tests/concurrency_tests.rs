use std::thread;

use crate::common::{memory_table, user, User};

#[test]
fn test_concurrent_upserts_from_many_threads() {
    let table = memory_table();

    thread::scope(|s| {
        for t in 0..8 {
            let table = &table;
            s.spawn(move || {
                for i in 0..100 {
                    table.upsert(user(&format!("t{}-{}", t, i), i));
                }
            });
        }
    });

    assert_eq!(table.len(), 800);
}

#[test]
fn test_concurrent_readers_and_view_mutations() {
    let table = memory_table();
    table.upsert_many((0..500).map(|i| user(&format!("u{:03}", i), i)));

    thread::scope(|s| {
        // Readers: every materialization must be internally consistent
        for _ in 0..4 {
            let table = &table;
            s.spawn(move || {
                for _ in 0..50 {
                    let sorted = table.sort(|a: &User, b: &User| a.age < b.age).all();
                    for pair in sorted.windows(2) {
                        assert!(pair[0].age <= pair[1].age);
                    }
                    let snapshot = table.select().all();
                    for (id, record) in &snapshot {
                        assert_eq!(id, &record.name);
                    }
                }
            });
        }

        // Writers: bulk operations through views
        let table = &table;
        s.spawn(move || {
            table.filter(|_, u| u.age % 2 == 1).delete();
        });
        s.spawn(move || {
            table.filter(|_, u| u.age >= 400).update(|mut u| {
                u.age += 1000;
                u
            });
        });
    });

    // The bump keeps parity, so both writer orders end in the same state
    assert_eq!(table.len(), 250);
    for (id, record) in table.all() {
        assert_eq!(id, record.name);
        assert_eq!(record.age % 2, 0);
    }
    assert_eq!(table.filter(|_, u| u.age >= 1000).count(), 50);
}

#[test]
fn test_views_are_shareable_across_threads() {
    let table = memory_table();
    table.upsert_many((0..100).map(|i| user(&format!("u{}", i), i)));

    let young = table.filter(|_, u| u.age < 50);

    thread::scope(|s| {
        let young = &young;
        let handles: Vec<_> = (0..4).map(|_| s.spawn(move || young.count())).collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), 50);
        }
    });
}
