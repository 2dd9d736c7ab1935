use sha2::{Digest, Sha256};

use crate::Hash256;

/// Compute SHA-256 of arbitrary data.
pub fn sha256(data: &[u8]) -> Hash256 {
    let mut hasher = Sha256::new();
    hasher.update(data);
    finish(hasher)
}

/// Compute SHA-256 of the concatenation of two byte slices.
pub fn sha256_pair(left: &[u8], right: &[u8]) -> Hash256 {
    let mut hasher = Sha256::new();
    hasher.update(left);
    hasher.update(right);
    finish(hasher)
}

/// Hash a store entry as `len(key) || key || value` so that distinct
/// key/value splits of the same bytes never collide.
pub fn sha256_entry(key: &[u8], value: &[u8]) -> Hash256 {
    let mut hasher = Sha256::new();
    hasher.update((key.len() as u64).to_be_bytes());
    hasher.update(key);
    hasher.update(value);
    finish(hasher)
}

fn finish(hasher: Sha256) -> Hash256 {
    let result = hasher.finalize();
    let mut hash = [0u8; 32];
    hash.copy_from_slice(&result);
    hash
}
