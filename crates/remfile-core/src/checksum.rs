//! Content fingerprints (lowercase hex).
//!
//! Records store the digest of their bytes once; the same digest is used by
//! the disk store when it writes new files. SHA-256 is the default. Hosts that
//! deduplicate on MD5 fingerprints (the usual document-framework convention)
//! select [`ContentDigest::Md5`] so stored hashes compare equal to theirs.

use md5::Md5;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::record::Content;

/// Digest used for `content_hash`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentDigest {
    #[default]
    Sha256,
    Md5,
}

impl ContentDigest {
    /// Digest of `bytes` as lowercase hex.
    pub fn hex(self, bytes: &[u8]) -> String {
        match self {
            ContentDigest::Sha256 => sha256_bytes(bytes),
            ContentDigest::Md5 => hex::encode(Md5::digest(bytes)),
        }
    }
}

/// SHA-256 of `bytes` as lowercase hex.
pub fn sha256_bytes(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}

/// Fingerprint of record content; text is hashed as its UTF-8 bytes.
pub fn content_hash(content: &Content, digest: ContentDigest) -> String {
    digest.hex(content.as_bytes())
}
