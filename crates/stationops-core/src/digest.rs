//! # Credential Digest
//!
//! One-way digest applied to a replacement credential before it is
//! transmitted. The plaintext credential never leaves the process; the
//! remote store only ever sees the digest.

use sha2::{Digest, Sha256};

/// SHA-256 digest of `input` as a lowercase hex string (64 characters).
pub fn sha256_hex(input: &str) -> String {
    let digest = Sha256::digest(input.as_bytes());
    digest.iter().map(|b| format!("{b:02x}")).collect()
}
