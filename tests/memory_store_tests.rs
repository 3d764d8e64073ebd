//! Tests for MemoryStore
//!
//! The in-memory backend must honor the same contract as the disk stores.

use raftstore::{LogEntry, LogStore, MemoryStore, StableStore, StoreError};

fn entry(index: u64) -> LogEntry {
    LogEntry::new(index, 1, format!("entry-{}", index).into_bytes())
}

fn populated(indices: impl IntoIterator<Item = u64>) -> MemoryStore {
    let store = MemoryStore::default();
    let entries: Vec<LogEntry> = indices.into_iter().map(entry).collect();
    store.store_logs(&entries).unwrap();
    store
}

#[test]
fn test_empty_indices_are_zero() {
    let store = MemoryStore::default();

    assert_eq!(store.first_index().unwrap(), 0);
    assert_eq!(store.last_index().unwrap(), 0);
    assert!(store.is_empty());
}

#[test]
fn test_round_trip_and_ordering() {
    let store = MemoryStore::default();
    for index in [30, 10, 20] {
        store.store_log(&entry(index)).unwrap();
    }

    assert_eq!(store.first_index().unwrap(), 10);
    assert_eq!(store.last_index().unwrap(), 30);
    assert_eq!(&store.get_log(20).unwrap().data[..], b"entry-20");
    assert!(matches!(store.get_log(15), Err(StoreError::LogNotFound(15))));
}

#[test]
fn test_failed_batch_leaves_nothing_behind() {
    let store = MemoryStore::new(8);

    let batch = vec![entry(1), LogEntry::new(2, 1, vec![0u8; 9]), entry(3)];
    assert!(matches!(
        store.store_logs(&batch),
        Err(StoreError::EntryTooLarge { index: 2, .. })
    ));

    assert!(store.is_empty());
}

#[test]
fn test_delete_range_is_inclusive() {
    let store = populated(1..=5);

    store.delete_range(2, 4).unwrap();

    assert_eq!(store.len(), 2);
    assert!(store.get_log(1).is_ok());
    assert!(store.get_log(5).is_ok());
    for index in 2..=4 {
        assert!(store.get_log(index).unwrap_err().is_not_found());
    }
}

#[test]
fn test_delete_range_min_above_max_is_noop() {
    let store = populated(1..=5);

    store.delete_range(5, 1).unwrap();

    assert_eq!(store.len(), 5);
}

#[test]
fn test_stable_set_get_overwrite() {
    let store = MemoryStore::default();

    store.set(b"k", b"v1").unwrap();
    store.set(b"k", b"v2").unwrap();

    assert_eq!(store.get(b"k").unwrap(), b"v2".to_vec());
    assert!(matches!(store.get(b"other"), Err(StoreError::KeyNotFound)));
}

#[test]
fn test_stable_u64_extremes() {
    let store = MemoryStore::default();

    for value in [0, u64::MAX] {
        store.set_u64(b"term", value).unwrap();
        assert_eq!(store.get_u64(b"term").unwrap(), value);
    }
}
