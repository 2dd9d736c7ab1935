use mint_math::hash::sha256_pair;
use mint_math::Hash256;

pub const EMPTY_ROOT: Hash256 = [0u8; 32];

/// Root of a binary SHA-256 Merkle tree over pre-hashed leaves.
///
/// An odd node at the end of a level is paired with itself. No leaves
/// gives [`EMPTY_ROOT`].
pub fn merkle_root(leaves: &[Hash256]) -> Hash256 {
    let mut level = leaves.to_vec();
    while level.len() > 1 {
        level = level
            .chunks(2)
            .map(|pair| sha256_pair(&pair[0], pair.get(1).unwrap_or(&pair[0])))
            .collect();
    }
    level.first().copied().unwrap_or(EMPTY_ROOT)
}
