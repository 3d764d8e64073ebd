//! Index key codec
//!
//! Big-endian fixed-width encoding so that numeric order equals byte order.
//! Cursor-based first/last lookups and range deletion rely on this.

use crate::error::{Result, StoreError};

/// Width of an encoded index key
pub const KEY_SIZE: usize = 8;

/// Encoded log index as stored in the `logs` table
pub type IndexKey = [u8; KEY_SIZE];

/// Encode a log index into its table key
#[inline]
pub fn encode_index(index: u64) -> IndexKey {
    index.to_be_bytes()
}

/// Decode a table key back into a log index
#[inline]
pub fn decode_index(key: &IndexKey) -> u64 {
    u64::from_be_bytes(*key)
}

/// Encode a `u64` value for the stable table
#[inline]
pub fn encode_u64(value: u64) -> [u8; 8] {
    value.to_be_bytes()
}

/// Decode a `u64` value read back from the stable table
///
/// The stable table holds arbitrary bytes, so the length is checked.
pub fn decode_u64(bytes: &[u8]) -> Result<u64> {
    let array: [u8; 8] = bytes.try_into().map_err(|_| {
        StoreError::Corruption(format!(
            "expected 8-byte integer, found {} bytes",
            bytes.len()
        ))
    })?;
    Ok(u64::from_be_bytes(array))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_order_matches_byte_order() {
        let indices = [0u64, 1, 255, 256, 65_535, 1 << 32, u64::MAX - 1, u64::MAX];
        for pair in indices.windows(2) {
            assert!(encode_index(pair[0]) < encode_index(pair[1]));
        }
    }

    #[test]
    fn test_index_key_is_big_endian() {
        assert_eq!(encode_index(1), [0, 0, 0, 0, 0, 0, 0, 1]);
        assert_eq!(decode_index(&[0, 0, 0, 0, 0, 0, 1, 0]), 256);
    }

    #[test]
    fn test_u64_extremes() {
        for v in [0, 1, u64::MAX] {
            assert_eq!(decode_u64(&encode_u64(v)).unwrap(), v);
        }
    }

    #[test]
    fn test_decode_u64_wrong_length() {
        assert!(matches!(decode_u64(b"short"), Err(StoreError::Corruption(_))));
        assert!(matches!(decode_u64(&[0u8; 9]), Err(StoreError::Corruption(_))));
    }
}
