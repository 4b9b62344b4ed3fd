// src/core/hash.rs

use sha2::{Digest, Sha256};

/// Computes the SHA-256 digest of the given data as a fixed 32-byte array.
pub fn sha256_digest(data: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// Computes the hex-encoded SHA-256 digest of the given data.
pub fn sha256_hex(data: &[u8]) -> String {
    hex::encode(sha256_digest(data))
}
