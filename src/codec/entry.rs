//! Entry value codec
//!
//! Frames a log entry's term, kind and payload for storage. The index is not
//! part of the value: it lives in the key.

use bytes::{Buf, BufMut, Bytes};

use crate::error::{Result, StoreError};
use crate::log::{LogEntry, LogKind};

/// Current on-disk entry format version
pub const ENTRY_VERSION: u8 = 1;

/// Header size: 1 byte version + 4 bytes CRC32
pub const ENTRY_HEADER_SIZE: usize = 5;

/// Encode an entry into its stored value
///
/// Format: version (1) + crc32(body) (4) + body
pub fn encode_entry(entry: &LogEntry) -> Result<Vec<u8>> {
    let body = bincode::serialize(&(entry.term, entry.kind, &entry.data))?;

    let mut value = Vec::with_capacity(ENTRY_HEADER_SIZE + body.len());
    value.put_u8(ENTRY_VERSION);
    value.put_u32(crc32fast::hash(&body));
    value.put_slice(&body);

    Ok(value)
}

/// Decode a stored value back into the entry at `index`
///
/// Fails with `Corruption` when the header is short, the version is unknown,
/// or the checksum does not match.
pub fn decode_entry(index: u64, value: &[u8]) -> Result<LogEntry> {
    if value.len() < ENTRY_HEADER_SIZE {
        return Err(StoreError::Corruption(format!(
            "entry {}: incomplete header ({} bytes)",
            index,
            value.len()
        )));
    }

    let mut buf = value;
    let version = buf.get_u8();
    if version != ENTRY_VERSION {
        return Err(StoreError::Corruption(format!(
            "entry {}: unknown format version {}",
            index, version
        )));
    }

    let expected_crc = buf.get_u32();
    let actual_crc = crc32fast::hash(buf);
    if expected_crc != actual_crc {
        return Err(StoreError::Corruption(format!(
            "entry {}: checksum mismatch (expected {:08x}, got {:08x})",
            index, expected_crc, actual_crc
        )));
    }

    let (term, kind, data): (u64, LogKind, Bytes) = bincode::deserialize(buf)?;

    Ok(LogEntry {
        index,
        term,
        kind,
        data,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> LogEntry {
        LogEntry::new(7, 3, b"set x 1".to_vec()).with_kind(LogKind::Configuration)
    }

    #[test]
    fn test_roundtrip_preserves_fields() {
        let entry = sample();
        let value = encode_entry(&entry).unwrap();

        assert_eq!(value[0], ENTRY_VERSION);
        assert_eq!(decode_entry(7, &value).unwrap(), entry);
    }

    #[test]
    fn test_roundtrip_empty_payload() {
        let entry = LogEntry::new(1, 1, Vec::new());
        let value = encode_entry(&entry).unwrap();
        let decoded = decode_entry(1, &value).unwrap();

        assert!(decoded.data.is_empty());
    }

    #[test]
    fn test_index_comes_from_caller() {
        let value = encode_entry(&sample()).unwrap();
        assert_eq!(decode_entry(99, &value).unwrap().index, 99);
    }

    #[test]
    fn test_flipped_byte_is_detected() {
        let mut value = encode_entry(&sample()).unwrap();
        let last = value.len() - 1;
        value[last] ^= 0xff;

        assert!(matches!(decode_entry(7, &value), Err(StoreError::Corruption(_))));
    }

    #[test]
    fn test_unknown_version_is_rejected() {
        let mut value = encode_entry(&sample()).unwrap();
        value[0] = 42;

        assert!(matches!(decode_entry(7, &value), Err(StoreError::Corruption(_))));
    }

    #[test]
    fn test_short_value_is_rejected() {
        assert!(matches!(decode_entry(7, &[1, 0]), Err(StoreError::Corruption(_))));
    }
}
