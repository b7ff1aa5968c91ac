//! Stable session → [0, 1) mapping.

/// Map `(session_id, test_id)` into [0, 1).
///
/// blake3 over `"{test_id}:{session_id}"`, first eight bytes read as a
/// little-endian u64, keeping its top 53 bits scaled by 2^-53. Salting with
/// the test id keeps arm membership independent across experiments.
pub fn bucket(session_id: &str, test_id: &str) -> f64 {
    let mut hasher = blake3::Hasher::new();
    hasher.update(test_id.as_bytes());
    hasher.update(b":");
    hasher.update(session_id.as_bytes());
    let digest = hasher.finalize();

    let mut head = [0u8; 8];
    head.copy_from_slice(&digest.as_bytes()[..8]);
    // Top 53 bits so the quotient is exact and strictly below 1.
    (u64::from_le_bytes(head) >> 11) as f64 / (1u64 << 53) as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stable_across_calls() {
        assert_eq!(bucket("session-1", "t"), bucket("session-1", "t"));
    }

    #[test]
    fn test_id_salts_the_bucket() {
        let differing = (0..100)
            .filter(|i| {
                let s = format!("s{i}");
                bucket(&s, "alpha") != bucket(&s, "beta")
            })
            .count();
        assert!(differing > 90);
    }

    #[test]
    fn bucket_is_top_53_bits_of_the_digest() {
        let digest = blake3::hash(b"t:session-1");
        let head = u64::from_le_bytes(digest.as_bytes()[..8].try_into().unwrap());
        let b = bucket("session-1", "t");
        assert_eq!(b, (head >> 11) as f64 / 9_007_199_254_740_992.0);
        let scaled = b * 9_007_199_254_740_992.0;
        assert_eq!(scaled.fract(), 0.0);
    }
}
