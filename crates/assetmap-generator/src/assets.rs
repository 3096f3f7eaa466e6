//! Copying hashed assets.
//!
//! Places each source file at `<dest>/<url_with_hash>` so the hashed URLs in
//! the manifest resolve when `dest` is served.

use std::{
    fs,
    path::{Component, Path, PathBuf},
};

use assetmap_core::AssetRecord;
use thiserror::Error;
use tracing::{debug, info};

/// Asset copy errors.
#[derive(Debug, Error)]
pub enum AssetError {
    /// Copying one file failed.
    #[error("failed to copy {from} to {to}: {source}")]
    Copy {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Destination would escape the output directory.
    #[error("invalid asset destination: {0}")]
    InvalidPath(PathBuf),
}

/// Result type for asset operations.
pub type Result<T> = std::result::Result<T, AssetError>;

/// Copies collected assets to their hashed locations.
#[derive(Debug, Clone)]
pub struct AssetCopier {
    dest_root: PathBuf,
}

impl AssetCopier {
    /// Create a copier writing under `dest_root`.
    #[must_use]
    pub fn new(dest_root: impl Into<PathBuf>) -> Self {
        Self {
            dest_root: dest_root.into(),
        }
    }

    /// Copy every record's source file. Returns the number of files copied.
    pub fn copy_all(&self, records: &[AssetRecord]) -> Result<usize> {
        info!(
            dest = %self.dest_root.display(),
            count = records.len(),
            "copying assets"
        );

        for record in records {
            let dest = record.copy_target(&self.dest_root);
            if Path::new(&record.url_with_hash)
                .components()
                .any(|c| matches!(c, Component::ParentDir))
            {
                return Err(AssetError::InvalidPath(dest));
            }

            Self::copy_file(&record.source, &dest).map_err(|source| AssetError::Copy {
                from: record.source.clone(),
                to: dest.clone(),
                source,
            })?;

            debug!(
                src = %record.source.display(),
                dest = %dest.display(),
                "copied asset"
            );
        }

        Ok(records.len())
    }

    /// Copy a single file, creating parent directories.
    pub fn copy_file(source: &Path, dest: &Path) -> std::io::Result<()> {
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::copy(source, dest)?;
        Ok(())
    }
}
