//! SHA-256 digests shared by workflow identifiers and content hashes.

use sha2::{Digest, Sha256};

/// Lowercase hex digest of a document's raw bytes.
#[must_use]
pub fn content_hash(data: &[u8]) -> String {
    format!("{:x}", Sha256::digest(data))
}

/// Leading eight digest bytes read as a big-endian integer.
#[must_use]
pub fn digest_prefix(data: &[u8]) -> u64 {
    let digest = Sha256::digest(data);
    let mut prefix = [0u8; 8];
    prefix.copy_from_slice(&digest[..8]);
    u64::from_be_bytes(prefix)
}
