//! Asset collection.
//!
//! Walks the assets directory, hashes every file, and turns each one into an
//! [`AssetRecord`]. The result is sorted by identifier and checked for
//! collisions before anything downstream sees it.

use std::{
    io,
    path::{Path, PathBuf},
};

use assetmap_core::{AssetConfig, AssetConfigBuilder, AssetRecord, CoreError};
use rayon::prelude::*;
use thiserror::Error;
use tracing::{debug, info, trace, warn};

use crate::{
    collision::{describe_duplicates, find_duplicate_identifiers},
    hash::{Blake3Hasher, ContentHasher},
    walk::{FsWalker, Traversal},
};

/// Asset collection errors.
#[derive(Debug, Error)]
pub enum CollectError {
    /// Configuration is invalid.
    #[error(transparent)]
    Config(#[from] CoreError),

    /// Walking the assets directory failed.
    #[error("failed to walk {root}: {source}")]
    Traversal {
        root: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Hashing a file failed.
    #[error("failed to hash {path}: {source}")]
    Hash {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A file's relative path has no characters to build an identifier from.
    #[error("no identifier can be derived for {path} (relative path {relative:?})")]
    EmptyIdentifier { path: PathBuf, relative: String },

    /// Two or more files derive the same identifier.
    #[error("duplicate asset identifiers: {}", describe_duplicates(.0))]
    DuplicateIdentifiers(Vec<String>),

    /// The blocking collection task did not complete.
    #[error("collection task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// Result type for collector operations.
pub type Result<T> = std::result::Result<T, CollectError>;

/// Collects asset records from a directory.
#[derive(Debug)]
pub struct AssetCollector<W = FsWalker, H = Blake3Hasher> {
    config: AssetConfig,
    walker: W,
    hasher: H,
}

impl AssetCollector {
    /// Create a collector using the filesystem walker and BLAKE3 hashing.
    #[must_use]
    pub fn new(config: AssetConfig) -> Self {
        Self::with_collaborators(config, FsWalker, Blake3Hasher)
    }
}

impl<W: Traversal, H: ContentHasher> AssetCollector<W, H> {
    /// Create a collector with a custom walker and hasher.
    #[must_use]
    pub fn with_collaborators(config: AssetConfig, walker: W, hasher: H) -> Self {
        Self {
            config,
            walker,
            hasher,
        }
    }

    /// Configuration this collector runs with.
    #[must_use]
    pub fn config(&self) -> &AssetConfig {
        &self.config
    }

    /// Collect every asset, sorted by identifier.
    ///
    /// The walk has to finish before hashing starts, and every file has to be
    /// hashed before sorting and collision detection. Any error aborts the
    /// whole collection.
    pub fn collect(&self) -> Result<Vec<AssetRecord>> {
        let root = self.config.assets_path();
        info!(root = %root.display(), "collecting assets");

        let files = self
            .walker
            .walk(root)
            .collect::<io::Result<Vec<_>>>()
            .map_err(|source| CollectError::Traversal {
                root: root.to_path_buf(),
                source,
            })?;
        debug!(count = files.len(), "found asset files");

        let mut records = files
            .par_iter()
            .map(|file| self.record_for(file))
            .collect::<Result<Vec<_>>>()?;

        records.sort_by(|a, b| {
            a.identifier
                .cmp(&b.identifier)
                .then_with(|| a.url_with_hash.cmp(&b.url_with_hash))
        });

        let duplicates = find_duplicate_identifiers(&records);
        if !duplicates.is_empty() {
            warn!(
                count = duplicates.len(),
                identifiers = %describe_duplicates(&duplicates),
                "identifier collision"
            );
            return Err(CollectError::DuplicateIdentifiers(duplicates));
        }

        info!(count = records.len(), "assets collected");
        Ok(records)
    }

    fn record_for(&self, file: &Path) -> Result<AssetRecord> {
        let relative = self.config.replace_path(file);
        let hash = self
            .hasher
            .hash(file)
            .map_err(|source| CollectError::Hash {
                path: file.to_path_buf(),
                source,
            })?;
        let url = self.config.build_url(&relative, &hash);

        let record = AssetRecord::new(&relative, url, file);
        if record.identifier.is_empty() {
            return Err(CollectError::EmptyIdentifier {
                path: file.to_path_buf(),
                relative,
            });
        }
        trace!(
            path = %file.display(),
            identifier = %record.identifier,
            url = %record.url_with_hash,
            "collected asset"
        );
        Ok(record)
    }
}

impl<W, H> AssetCollector<W, H>
where
    W: Traversal + 'static,
    H: ContentHasher + 'static,
{
    /// Run [`collect`](Self::collect) on the blocking thread pool and await it.
    pub async fn collect_async(self) -> Result<Vec<AssetRecord>> {
        tokio::task::spawn_blocking(move || self.collect()).await?
    }
}

/// Validate `config` and collect its assets with the default collaborators.
pub async fn collect_assets(config: AssetConfigBuilder) -> Result<Vec<AssetRecord>> {
    let config = config.build()?;
    AssetCollector::new(config).collect_async().await
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    /// Walker yielding a fixed list of paths.
    struct ListWalker(Vec<&'static str>);

    impl Traversal for ListWalker {
        fn walk<'a>(
            &'a self,
            _root: &'a Path,
        ) -> Box<dyn Iterator<Item = io::Result<PathBuf>> + 'a> {
            Box::new(self.0.iter().map(|p| Ok(PathBuf::from(p))))
        }
    }

    /// Walker failing after its first file.
    struct BrokenWalker;

    impl Traversal for BrokenWalker {
        fn walk<'a>(
            &'a self,
            _root: &'a Path,
        ) -> Box<dyn Iterator<Item = io::Result<PathBuf>> + 'a> {
            Box::new(
                [
                    Ok(PathBuf::from("ok.png")),
                    Err(io::Error::new(io::ErrorKind::PermissionDenied, "denied")),
                ]
                .into_iter(),
            )
        }
    }

    /// Hasher returning the same value for everything.
    struct ConstHasher(&'static str);

    impl ContentHasher for ConstHasher {
        fn hash(&self, _path: &Path) -> io::Result<String> {
            Ok(self.0.to_string())
        }
    }

    /// Hasher failing on one specific file.
    struct FailingHasher(&'static str);

    impl ContentHasher for FailingHasher {
        fn hash(&self, path: &Path) -> io::Result<String> {
            if path == Path::new(self.0) {
                Err(io::Error::new(io::ErrorKind::NotFound, "gone"))
            } else {
                Ok("HASH".to_string())
            }
        }
    }

    fn test_config() -> AssetConfig {
        AssetConfig::builder()
            .assets_path("app/assets/")
            .output_path("out")
            .module_namespace("Test")
            .replace_path(|p| p.to_string_lossy().replace("app", "_app_"))
            .build_url(|name, hash| name.replacen('.', &format!("-{hash}."), 1))
            .build()
            .unwrap()
    }

    #[test]
    fn test_collect_sorted_by_identifier() {
        let collector = AssetCollector::with_collaborators(
            test_config(),
            ListWalker(vec!["foo.png", "bar.png"]),
            ConstHasher("HASH"),
        );

        let records = collector.collect().unwrap();
        let pairs: Vec<_> = records
            .iter()
            .map(|r| (r.identifier.as_str(), r.url_with_hash.as_str()))
            .collect();

        assert_eq!(
            pairs,
            vec![("bar_png", "bar-HASH.png"), ("foo_png", "foo-HASH.png")]
        );
        assert_eq!(records[0].source, PathBuf::from("bar.png"));
    }

    #[test]
    fn test_collect_rejects_duplicates() {
        let collector = AssetCollector::with_collaborators(
            test_config(),
            ListWalker(vec!["foo.png", "foo.png", "testFile.svg", "test_file.svg"]),
            ConstHasher("HASH"),
        );

        match collector.collect() {
            Err(CollectError::DuplicateIdentifiers(ids)) => {
                assert!(ids.contains(&"foo_png".to_string()));
                assert!(ids.contains(&"testFile_svg".to_string()));
                assert!(ids.iter().all(|id| id == "foo_png" || id == "testFile_svg"));
            }
            other => panic!("expected duplicate error, got {other:?}"),
        }
    }

    #[test]
    fn test_duplicate_error_message() {
        let err = CollectError::DuplicateIdentifiers(vec![
            "foo_png".to_string(),
            "foo_png".to_string(),
        ]);
        assert_eq!(err.to_string(), "duplicate asset identifiers: foo_png");
    }

    #[test]
    fn test_empty_identifier_rejected() {
        let config = AssetConfig::builder()
            .assets_path("assets")
            .output_path("out")
            .module_namespace("Test")
            .replace_path(|p| p.to_string_lossy().replace("assets/", ""))
            .build_url(|name, hash| format!("{name}?{hash}"))
            .build()
            .unwrap();
        let collector = AssetCollector::with_collaborators(
            config,
            ListWalker(vec!["assets/ok.png", "assets/-"]),
            ConstHasher("H"),
        );

        match collector.collect() {
            Err(CollectError::EmptyIdentifier { path, relative }) => {
                assert_eq!(path, PathBuf::from("assets/-"));
                assert_eq!(relative, "-");
            }
            other => panic!("expected empty identifier error, got {other:?}"),
        }
    }

    #[test]
    fn test_traversal_error_aborts() {
        let collector =
            AssetCollector::with_collaborators(test_config(), BrokenWalker, ConstHasher("H"));

        let err = collector.collect().unwrap_err();
        assert!(matches!(err, CollectError::Traversal { .. }));
        assert!(err.to_string().contains("app/assets"));
    }

    #[test]
    fn test_hash_error_aborts() {
        let collector = AssetCollector::with_collaborators(
            test_config(),
            ListWalker(vec!["a.png", "b.png", "c.png"]),
            FailingHasher("b.png"),
        );

        match collector.collect() {
            Err(CollectError::Hash { path, .. }) => assert_eq!(path, PathBuf::from("b.png")),
            other => panic!("expected hash error, got {other:?}"),
        }
    }

    #[test]
    fn test_collect_is_idempotent() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("icons")).unwrap();
        fs::write(dir.path().join("icons/arrow-left.svg"), "<svg/>").unwrap();
        fs::write(dir.path().join("Logo@2x.png"), b"logo").unwrap();
        fs::write(dir.path().join("1st.jpg"), b"first").unwrap();

        let root = dir.path().to_path_buf();
        let config = AssetConfig::builder()
            .assets_path(&root)
            .output_path(dir.path().join("out"))
            .module_namespace("App")
            .replace_path(move |p| assetmap_core::config::relative_to(&root, p))
            .build_url(|rel, hash| assetmap_core::config::hashed_url("/", rel, hash))
            .build()
            .unwrap();

        let first = AssetCollector::new(config.clone()).collect().unwrap();
        let second = AssetCollector::new(config).collect().unwrap();

        assert_eq!(first, second);
        let ids: Vec<_> = first.iter().map(|r| r.identifier.as_str()).collect();
        assert_eq!(ids, vec!["icons_arrowLeft_svg", "img1st_jpg", "logo_2x_png"]);
        assert!(first[0].url_with_hash.starts_with("/icons/arrow-left-"));
        assert!(first[0].url_with_hash.ends_with(".svg"));
    }

    #[tokio::test]
    async fn test_collect_async() {
        let collector = AssetCollector::with_collaborators(
            test_config(),
            ListWalker(vec!["b.png", "a.png"]),
            ConstHasher("1"),
        );

        let records = collector.collect_async().await.unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].identifier, "a_png");
    }

    #[tokio::test]
    async fn test_collect_assets_validates_first() {
        let err = collect_assets(AssetConfig::builder()).await.unwrap_err();
        match err {
            CollectError::Config(e) => {
                let msg = e.to_string();
                assert!(msg.contains("assetsPath"));
                assert!(msg.contains("buildUrl"));
            }
            other => panic!("expected config error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_collect_assets_missing_dir() {
        let dir = TempDir::new().unwrap();
        let builder = AssetConfig::builder()
            .assets_path(dir.path().join("missing"))
            .output_path(dir.path())
            .module_namespace("App")
            .replace_path(|p| p.display().to_string())
            .build_url(|rel, _| rel.to_string());

        let err = collect_assets(builder).await.unwrap_err();
        assert!(matches!(err, CollectError::Traversal { .. }));
    }
}
