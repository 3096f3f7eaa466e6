//! Content hashing for cache-busting URLs.

use std::{fs::File, io, path::Path};

/// Number of hex characters kept from the digest.
pub const HASH_LEN: usize = 32;

/// Computes a deterministic digest of a file's contents.
pub trait ContentHasher: Send + Sync {
    /// Hash the file at `path`.
    fn hash(&self, path: &Path) -> io::Result<String>;
}

/// BLAKE3 content hasher, hex encoded and truncated to [`HASH_LEN`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Blake3Hasher;

impl ContentHasher for Blake3Hasher {
    fn hash(&self, path: &Path) -> io::Result<String> {
        let file = File::open(path)?;
        let mut hasher = blake3::Hasher::new();
        hasher.update_reader(file)?;
        let digest = hasher.finalize();
        Ok(hex::encode(&digest.as_bytes()[..HASH_LEN / 2]))
    }
}
