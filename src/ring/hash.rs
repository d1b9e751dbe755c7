//! Ring Hash Function
//!
//! CRC32 (IEEE) positions for keys and virtual points. Keys and node
//! replica keys share the same 32-bit space so a key lookup can walk
//! straight to the nearest point.

/// Identifiers shorter than this are staged through a fixed stack buffer,
/// keeping the lookup path free of per-call heap allocation.
const SCRATCH_LEN: usize = 64;

/// Hash an identifier onto the ring.
///
/// Deterministic: the same identifier always lands on the same position.
pub(super) fn position(identifier: &str) -> u32 {
    let bytes = identifier.as_bytes();
    if bytes.len() < SCRATCH_LEN {
        let mut scratch = [0u8; SCRATCH_LEN];
        scratch[..bytes.len()].copy_from_slice(bytes);
        crc32fast::hash(&scratch[..bytes.len()])
    } else {
        crc32fast::hash(bytes)
    }
}

/// Derive the replica key for one virtual point of a node.
///
/// The replica index is prefixed to the identity. The encoding must stay
/// stable for the ring's lifetime: add and remove recompute these keys to
/// reverse each other.
pub(super) fn replica_key(index: usize, node: &str) -> String {
    format!("{index}{node}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_deterministic() {
        assert_eq!(position("cache0"), position("cache0"));
        assert_ne!(position("cache0"), position("cache1"));
    }

    #[test]
    fn test_scratch_buffer_matches_direct_hash() {
        // Padding must never leak into the digest.
        for id in ["", "a", "42", "cache0", &"x".repeat(63)] {
            assert_eq!(position(id), crc32fast::hash(id.as_bytes()));
        }
    }

    #[test]
    fn test_long_identifiers_hash_directly() {
        let long = "node-".repeat(20);
        assert!(long.len() >= SCRATCH_LEN);
        assert_eq!(position(&long), crc32fast::hash(long.as_bytes()));
    }

    #[test]
    fn test_replica_key_encoding() {
        assert_eq!(replica_key(0, "cache0"), "0cache0");
        assert_eq!(replica_key(19, "cache2"), "19cache2");
        // Different indices for the same node must produce distinct keys.
        assert_ne!(replica_key(1, "cache0"), replica_key(2, "cache0"));
    }
}
