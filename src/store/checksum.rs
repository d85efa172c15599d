//! CRC32 checksums for snapshot records
//!
//! Every persisted record is followed by a CRC32 (IEEE polynomial) over its
//! payload. Any mismatch on read aborts the snapshot open.

use crc32fast::Hasher;

/// Computes a CRC32 checksum over the provided payload.
pub fn compute_checksum(data: &[u8]) -> u32 {
    let mut hasher = Hasher::new();
    hasher.update(data);
    hasher.finalize()
}

/// Verifies that the computed checksum matches the expected checksum.
pub fn verify_checksum(data: &[u8], expected: u32) -> bool {
    compute_checksum(data) == expected
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checksum_deterministic() {
        let data = b"smith john\x01Smith, John";
        assert_eq!(compute_checksum(data), compute_checksum(data));
    }

    #[test]
    fn test_checksum_detects_flip() {
        let mut data = b"heading record".to_vec();
        let original = compute_checksum(&data);
        data[3] ^= 0x01;
        assert_ne!(original, compute_checksum(&data));
    }

    #[test]
    fn test_verify() {
        let data = b"filter_link";
        let sum = compute_checksum(data);
        assert!(verify_checksum(data, sum));
        assert!(!verify_checksum(data, sum ^ 1));
    }
}
