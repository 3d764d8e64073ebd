//! Tests for DiskStableStore
//!
//! These tests verify:
//! - Set/get and last-write-wins overwrite
//! - KeyNotFound for unset keys
//! - Returned values are independent copies
//! - u64 helpers at the extremes
//! - Independence from the log table

use raftstore::stable::keys;
use raftstore::{
    Config, DiskLogStore, DiskStableStore, LogEntry, LogStore, StableStore, Storage, StoreError,
};
use tempfile::TempDir;

// =============================================================================
// Helper Functions
// =============================================================================

fn setup_temp_storage() -> (TempDir, Storage) {
    let temp_dir = TempDir::new().unwrap();
    let config = Config::builder()
        .path(temp_dir.path().join("raft.redb"))
        .build();
    let storage = Storage::open(&config).unwrap();
    (temp_dir, storage)
}

fn setup_temp_store() -> (TempDir, DiskStableStore) {
    let (temp_dir, storage) = setup_temp_storage();
    (temp_dir, DiskStableStore::new(storage))
}

// =============================================================================
// Basic Operations Tests
// =============================================================================

#[test]
fn test_set_get() {
    let (_temp, store) = setup_temp_store();

    store.set(b"hello", b"world").unwrap();

    assert_eq!(store.get(b"hello").unwrap(), b"world".to_vec());
}

#[test]
fn test_overwrite_last_write_wins() {
    let (_temp, store) = setup_temp_store();

    store.set(b"key", b"value1").unwrap();
    store.set(b"key", b"value2").unwrap();

    assert_eq!(store.get(b"key").unwrap(), b"value2".to_vec());
}

#[test]
fn test_get_unset_key_is_not_found() {
    let (_temp, store) = setup_temp_store();

    let err = store.get(b"missing").unwrap_err();

    assert!(matches!(err, StoreError::KeyNotFound));
    assert!(err.is_not_found());
}

#[test]
fn test_empty_value_is_distinct_from_missing() {
    let (_temp, store) = setup_temp_store();

    store.set(b"empty", b"").unwrap();

    assert_eq!(store.get(b"empty").unwrap(), Vec::<u8>::new());
}

#[test]
fn test_returned_value_is_a_copy() {
    let (_temp, store) = setup_temp_store();
    store.set(b"key", b"original").unwrap();

    let mut value = store.get(b"key").unwrap();
    value.clear();
    value.extend_from_slice(b"mutated");

    assert_eq!(store.get(b"key").unwrap(), b"original".to_vec());
}

#[test]
fn test_binary_keys_and_values() {
    let (_temp, store) = setup_temp_store();
    let key = [0u8, 255, 1, 254];
    let value: Vec<u8> = (0..=255u8).rev().collect();

    store.set(&key, &value).unwrap();

    assert_eq!(store.get(&key).unwrap(), value);
}

#[test]
fn test_delete_key() {
    let (_temp, store) = setup_temp_store();
    store.set(b"key", b"value").unwrap();

    assert!(store.delete(b"key").unwrap());
    assert!(store.get(b"key").unwrap_err().is_not_found());
    assert!(!store.delete(b"key").unwrap());
}

// =============================================================================
// u64 Helper Tests
// =============================================================================

#[test]
fn test_u64_round_trip_extremes() {
    let (_temp, store) = setup_temp_store();

    for value in [0, 1, 255, 256, u64::MAX - 1, u64::MAX] {
        store.set_u64(keys::CURRENT_TERM, value).unwrap();
        assert_eq!(store.get_u64(keys::CURRENT_TERM).unwrap(), value);
    }
}

#[test]
fn test_u64_is_stored_big_endian() {
    let (_temp, store) = setup_temp_store();

    store.set_u64(keys::LAST_VOTE_TERM, 258).unwrap();

    assert_eq!(
        store.get(keys::LAST_VOTE_TERM).unwrap(),
        vec![0, 0, 0, 0, 0, 0, 1, 2]
    );
}

#[test]
fn test_get_u64_missing_key() {
    let (_temp, store) = setup_temp_store();

    assert!(store.get_u64(keys::CURRENT_TERM).unwrap_err().is_not_found());
}

#[test]
fn test_get_u64_on_non_integer_value() {
    let (_temp, store) = setup_temp_store();
    store.set(keys::LAST_VOTE_CAND, b"node-2").unwrap();

    assert!(matches!(
        store.get_u64(keys::LAST_VOTE_CAND),
        Err(StoreError::Corruption(_))
    ));
}

// =============================================================================
// Partition Independence Tests
// =============================================================================

#[test]
fn test_stable_and_log_tables_are_independent() {
    let (_temp, storage) = setup_temp_storage();
    let logs = DiskLogStore::new(storage.clone());
    let stable = DiskStableStore::new(storage);

    // A stable key that looks exactly like an encoded log index
    stable.set(&1u64.to_be_bytes(), b"not a log entry").unwrap();
    assert!(logs.get_log(1).unwrap_err().is_not_found());
    assert_eq!(logs.last_index().unwrap(), 0);

    logs.store_log(&LogEntry::new(2, 1, b"cmd".to_vec())).unwrap();
    assert!(stable.get(&2u64.to_be_bytes()).unwrap_err().is_not_found());

    // Trimming the log leaves metadata alone
    logs.delete_range(0, u64::MAX).unwrap();
    assert_eq!(stable.get(&1u64.to_be_bytes()).unwrap(), b"not a log entry".to_vec());
}
