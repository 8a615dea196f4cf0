//! SHA-256 checksum utilities
//!
//! Provides a single canonical checksum format (`sha256:<hex>`) used for
//! content-based change detection.

use sha2::{Digest, Sha256};

use crate::{ReadFs, RelPath, Result};

/// Prefix for all checksums produced by this module
const PREFIX: &str = "sha256:";

/// Compute the SHA-256 checksum of in-memory content.
///
/// Returns a string in the canonical format `"sha256:<hex>"`.
pub fn compute_content_checksum(content: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content);
    format!("{}{:x}", PREFIX, hasher.finalize())
}

/// Compute the SHA-256 checksum of a file read through a capability.
///
/// # Errors
///
/// Returns an error if the file cannot be read.
pub fn compute_file_checksum<F: ReadFs + ?Sized>(fs: &F, path: &RelPath) -> Result<String> {
    let content = fs.read_file(path)?;
    Ok(compute_content_checksum(&content))
}
