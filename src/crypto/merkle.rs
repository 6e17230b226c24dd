//! Merkle root calculation
//!
//! Used to derive the merkle root committed to by a block header from the
//! IDs of its transactions.

use super::hash::sha256;

/// Calculate the merkle root from a list of transaction hashes
pub fn calculate_merkle_root(hashes: &[Vec<u8>]) -> Vec<u8> {
    if hashes.is_empty() {
        return sha256(b"");
    }

    if hashes.len() == 1 {
        return hashes[0].clone();
    }

    let mut current_level: Vec<Vec<u8>> = hashes.to_vec();

    while current_level.len() > 1 {
        let mut next_level = Vec::new();

        // Process pairs of hashes, duplicating the last one if odd
        for chunk in current_level.chunks(2) {
            let mut data = chunk[0].clone();
            if chunk.len() == 2 {
                data.extend_from_slice(&chunk[1]);
            } else {
                data.extend_from_slice(&chunk[0]);
            }
            next_level.push(sha256(&data));
        }

        current_level = next_level;
    }

    current_level.remove(0)
}
