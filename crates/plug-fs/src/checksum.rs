//! SHA-256 checksum utilities
//!
//! One canonical checksum format (`sha256:<hex>`) is used everywhere content
//! integrity is recorded, in particular for the before/after descriptors in
//! the operation log.

use sha2::{Digest, Sha256};
use std::path::Path;

/// Prefix for all checksums produced by this module
const PREFIX: &str = "sha256:";

fn digest(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("{}{:x}", PREFIX, hasher.finalize())
}

/// Compute the checksum of in-memory content.
pub fn content_checksum(content: &[u8]) -> String {
    digest(content)
}

/// Compute the checksum of a file's contents.
///
/// # Errors
///
/// Returns an error if the file cannot be read.
pub fn file_checksum(path: &Path) -> std::io::Result<String> {
    Ok(digest(&std::fs::read(path)?))
}
