//! Cryptographic hashing utilities for the chain core
//!
//! Provides the SHA-256 based hashing used for block hashes, transaction
//! IDs, and proof-of-work target comparisons.

use sha2::{Digest, Sha256};

/// Computes SHA-256 hash of the input data
pub fn sha256(data: &[u8]) -> Vec<u8> {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hasher.finalize().to_vec()
}

/// Computes double SHA-256 hash (SHA-256 of SHA-256)
/// Used for block hashes in Bitcoin-style blockchains
pub fn double_sha256(data: &[u8]) -> Vec<u8> {
    sha256(&sha256(data))
}

/// Computes double SHA-256 hash and returns it as a hex string
pub fn double_sha256_hex(data: &[u8]) -> String {
    hex::encode(double_sha256(data))
}

/// Checks if a hash meets the difficulty target
/// The hash must have `difficulty` leading zeros
pub fn meets_difficulty(hash: &[u8], difficulty: u32) -> bool {
    let required_zeros = difficulty as usize / 8;
    let remaining_bits = difficulty as usize % 8;

    // Check full zero bytes
    for byte in hash.iter().take(required_zeros) {
        if *byte != 0 {
            return false;
        }
    }

    // Check remaining bits
    if remaining_bits > 0 && required_zeros < hash.len() {
        let mask = 0xFF << (8 - remaining_bits);
        if hash[required_zeros] & mask != 0 {
            return false;
        }
    }

    true
}

/// Calculate the 256-bit target ceiling for a difficulty expressed as a
/// number of leading zero bits. A hash is acceptable when it is numerically
/// at or below the returned target.
pub fn calculate_target(difficulty: u32) -> Vec<u8> {
    let mut target = vec![0xFF; 32];
    let full_bytes = difficulty as usize / 8;
    let remaining_bits = difficulty as usize % 8;

    for byte in target.iter_mut().take(full_bytes) {
        *byte = 0;
    }

    if remaining_bits > 0 && full_bytes < 32 {
        target[full_bytes] = 0xFF >> remaining_bits;
    }

    target
}
