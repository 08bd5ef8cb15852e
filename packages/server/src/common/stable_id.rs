use sha2::{Digest, Sha256};

/// Largest id that survives a round trip through a JSON number (2^53 - 1).
pub const MAX_STABLE_ID: i64 = (1 << 53) - 1;

/// Derive a positive numeric project id from a string key.
///
/// Sources whose natural identifier is not numeric (arXiv ids, X user ids)
/// use this so the same item always gets the same id across fetches, which
/// is what deduplication by id relies on. The result fits in 53 bits so
/// JavaScript clients read it back exactly.
pub fn stable_id(namespace: &str, key: &str) -> i64 {
    let mut hasher = Sha256::new();
    hasher.update(namespace.as_bytes());
    hasher.update(b":");
    hasher.update(key.as_bytes());
    let digest = hasher.finalize();

    let mut prefix = [0u8; 8];
    prefix.copy_from_slice(&digest[..8]);
    let id = (u64::from_be_bytes(prefix) & MAX_STABLE_ID as u64) as i64;

    // 0 is not a valid id
    id.max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_key_same_id() {
        assert_eq!(stable_id("arxiv", "2301.12345"), stable_id("arxiv", "2301.12345"));
    }

    #[test]
    fn test_namespaces_are_separate() {
        assert_ne!(stable_id("arxiv", "42"), stable_id("x", "42"));
    }

    #[test]
    fn test_range() {
        for key in ["", "a", "2301.12345", "hep-th/9901001", "1234567890"] {
            let id = stable_id("arxiv", key);
            assert!(id >= 1);
            assert!(id <= MAX_STABLE_ID);
        }
    }
}
