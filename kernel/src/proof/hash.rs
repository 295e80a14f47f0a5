//! Canonical hashing types and domain separation constants.
//!
//! Algorithm: SHA-256 with a null-terminated domain prefix.

use sha2::{Digest, Sha256};

/// A content-addressed digest, written `"sha256:<hex>"`.
///
/// Only [`canonical_hash`] constructs one, so the algorithm tag and the
/// 64-digit lowercase hex body are always present.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContentHash(String);

impl ContentHash {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ContentHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Domain prefix for structural graph snapshots.
pub const DOMAIN_SNAPSHOT: &[u8] = b"PERMAFROST::SNAPSHOT::V1\0";

/// Domain prefix for diagnostics reports.
pub const DOMAIN_REPORT: &[u8] = b"PERMAFROST::REPORT::V1\0";

/// Compute `sha256(domain || data)` as a [`ContentHash`].
#[must_use]
pub fn canonical_hash(domain: &[u8], data: &[u8]) -> ContentHash {
    let mut hasher = Sha256::new();
    hasher.update(domain);
    hasher.update(data);
    ContentHash(format!("sha256:{}", hex::encode(hasher.finalize())))
}
