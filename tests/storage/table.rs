//! Integration tests for DualIndexTable
//!
//! Tests stable indices, tombstones, and cursor lookups.

use canopy_foundation::ErrorKind;
use canopy_storage::{Cursor, DualIndexTable, StableIndex};

// =============================================================================
// Insert and Lookup
// =============================================================================

#[test]
fn insert_then_lookup_by_key_and_index() {
    let mut table = DualIndexTable::new();
    let (index, _) = table.insert_full("velocity", [1.0, 0.0, 0.0]).unwrap();

    assert_eq!(table.get_by_key("velocity"), Some(&[1.0, 0.0, 0.0]));
    assert_eq!(table.get(index), Some(&[1.0, 0.0, 0.0]));
    assert_eq!(table.key_at(index), Some("velocity"));
    assert!(table.contains_key("velocity"));
    assert!(table.is_populated("velocity"));
}

#[test]
fn get_mut_by_every_route() {
    let mut table = DualIndexTable::new();
    table.insert("count", 0u32).unwrap();

    *table.get_by_key_mut("count").unwrap() += 1;
    *table.get_mut(StableIndex::new(0)).unwrap() += 1;
    let mut cursor = Cursor::new("count");
    *table.get_by_cursor_mut(&mut cursor).unwrap() += 1;

    assert_eq!(table.get_by_key("count"), Some(&3));
}

#[test]
fn out_of_range_index() {
    let table: DualIndexTable<i32> = DualIndexTable::new();
    assert_eq!(table.get(StableIndex::new(0)), None);
    let err = table.try_get(StableIndex::new(0)).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::OutOfRange { index: 0, length: 0 }));
}

// =============================================================================
// Tombstones
// =============================================================================

#[test]
fn erase_keeps_size_and_mapping() {
    let mut table = DualIndexTable::new();
    table.insert("a", 1).unwrap();
    let (b, _) = table.insert_full("b", 2).unwrap();

    assert_eq!(table.erase(b), Some(2));
    assert_eq!(table.len(), 2);
    assert_eq!(table.live_len(), 1);
    assert_eq!(table.get_by_key("b"), None);
    assert_eq!(table.index_of("b"), Some(b));
    assert!(table.contains_key("b"));
    assert!(!table.is_populated("b"));
}

#[test]
fn repopulate_returns_original_index() {
    let mut table = DualIndexTable::new();
    for key in ["x", "y", "z"] {
        table.insert(key, key.len()).unwrap();
    }
    let before = table.index_of("y").unwrap();
    table.erase_key("y");
    let (after, value) = table.insert_full("y", 42).unwrap();

    assert_eq!(*value, 42);
    assert_eq!(before, after);
    assert_eq!(table.len(), 3);
}

#[test]
fn live_iteration_skips_tombstones() {
    let mut table = DualIndexTable::new();
    for (i, key) in ["a", "b", "c", "d"].iter().enumerate() {
        table.insert(key, i).unwrap();
    }
    table.erase_key("a");
    table.erase_key("c");

    let keys: Vec<_> = table.keys().collect();
    assert_eq!(keys, vec!["a", "b", "c", "d"]);

    let live: Vec<_> = table.live().map(|(index, key, value)| (index.get(), key, *value)).collect();
    assert_eq!(live, vec![(1, "b", 1), (3, "d", 3)]);
}

// =============================================================================
// Cursors
// =============================================================================

#[test]
fn cursor_survives_unrelated_changes() {
    let mut table = DualIndexTable::new();
    table.insert("a", 1).unwrap();
    table.insert("mass", 2).unwrap();

    let mut cursor = Cursor::new("mass");
    assert_eq!(table.get_by_cursor(&mut cursor), Some(&2));
    let cached = cursor.cached_index();

    table.insert("b", 3).unwrap();
    table.erase_key("a");
    table.insert("a", 4).unwrap();

    assert_eq!(table.get_by_cursor(&mut cursor), Some(&2));
    assert_eq!(cursor.cached_index(), cached);
}

#[test]
fn cursor_falls_back_after_clear() {
    let mut table = DualIndexTable::new();
    table.insert("a", 1).unwrap();
    table.insert("mass", 2).unwrap();

    let mut cursor = Cursor::new("mass");
    table.get_by_cursor(&mut cursor);
    assert_eq!(cursor.cached_index(), Some(StableIndex::new(1)));

    table.clear();
    table.insert("mass", 5).unwrap();
    assert_eq!(table.get_by_cursor(&mut cursor), Some(&5));
    assert_eq!(cursor.cached_index(), Some(StableIndex::new(0)));
}

#[test]
fn cursor_invalidate_forces_lookup() {
    let mut table = DualIndexTable::new();
    table.insert("mass", 1).unwrap();
    let mut cursor = Cursor::new("mass");
    table.resolve(&mut cursor);
    cursor.invalidate();
    assert_eq!(cursor.cached_index(), None);
    assert_eq!(table.resolve(&mut cursor), Some(StableIndex::new(0)));
    assert_eq!(cursor.key(), "mass");
}

#[test]
fn stable_index_formatting() {
    let index = StableIndex::new(3);
    assert_eq!(format!("{index}"), "#3");
    assert_eq!(format!("{index:?}"), "StableIndex(3)");
}
