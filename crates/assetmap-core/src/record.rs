//! Asset records produced by collection.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::identifier::derive_identifier;

/// One discovered asset: its generated constant name and hashed public URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetRecord {
    /// Identifier used as the constant name in the manifest.
    pub identifier: String,

    /// Public URL with the content hash embedded.
    pub url_with_hash: String,

    /// File the record was discovered at.
    #[serde(skip)]
    pub source: PathBuf,
}

impl AssetRecord {
    /// Build a record for a file, deriving its identifier from `relative_path`.
    #[must_use]
    pub fn new(
        relative_path: &str,
        url_with_hash: impl Into<String>,
        source: impl Into<PathBuf>,
    ) -> Self {
        Self {
            identifier: derive_identifier(relative_path),
            url_with_hash: url_with_hash.into(),
            source: source.into(),
        }
    }

    /// Where this asset lands when copied under `root`.
    ///
    /// The URL's leading `/` is removed so the result stays inside `root`.
    #[must_use]
    pub fn copy_target(&self, root: &Path) -> PathBuf {
        root.join(self.url_with_hash.trim_start_matches('/'))
    }
}
