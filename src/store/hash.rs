//! Version Hash - content fingerprint
//!
//! The version hash is the optimistic-concurrency token of the commit
//! protocol: a commit must present the hash it last observed. The hash is
//! a pure function of the content, so two documents with identical content
//! carry identical hashes. It detects conflicts; it is not a content
//! address across documents.

use sha2::{Digest, Sha256};

/// Compute the version hash for document content: lowercase hex SHA-256.
pub fn version_hash(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    let digest = hasher.finalize();

    let mut out = String::with_capacity(digest.len() * 2);
    for byte in digest {
        out.push_str(&format!("{:02x}", byte));
    }
    out
}
