//! Manifest build orchestration.
//!
//! Collects assets, copies them when configured, and writes the manifest.
//! Nothing is written until collection has produced a complete,
//! collision-free record list.

use std::{
    fmt, fs,
    path::{Path, PathBuf},
    time::{Duration, Instant},
};

use assetmap_core::{AssetConfig, AssetConfigBuilder, AssetRecord};
use thiserror::Error;
use tracing::{debug, info};

use crate::{
    assets::{AssetCopier, AssetError},
    collector::{AssetCollector, CollectError},
    hash::{Blake3Hasher, ContentHasher},
    manifest::{EmitError, ManifestEmitter},
    walk::{FsWalker, Traversal},
};

/// Build errors.
#[derive(Debug, Error)]
pub enum BuildError {
    /// Collection failed.
    #[error(transparent)]
    Collect(#[from] CollectError),

    /// Copying assets failed.
    #[error("asset error: {0}")]
    Asset(#[from] AssetError),

    /// Rendering the manifest failed.
    #[error("render error: {0}")]
    Emit(#[from] EmitError),

    /// Writing the manifest failed.
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The blocking write task did not complete.
    #[error("build task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// Result type for build operations.
pub type Result<T> = std::result::Result<T, BuildError>;

/// Outcome of a successful build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildReport {
    /// Path of the written manifest.
    pub manifest_path: PathBuf,

    /// Number of assets in the manifest.
    pub assets: usize,

    /// Number of files copied to the assets output directory.
    pub copied: usize,

    /// Build duration in milliseconds.
    pub duration_ms: u64,
}

impl BuildReport {
    /// Human-readable status line.
    #[must_use]
    pub fn status(&self) -> String {
        format!(
            "Wrote {} ({} image assets)",
            self.manifest_path.display(),
            self.assets
        )
    }
}

impl fmt::Display for BuildReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.status())
    }
}

/// Runs collection, copying and manifest emission for one configuration.
#[derive(Debug)]
pub struct ManifestBuilder<W = FsWalker, H = Blake3Hasher> {
    collector: AssetCollector<W, H>,
    emitter: ManifestEmitter,
}

impl ManifestBuilder {
    /// Create a builder with the default walker, hasher and templates.
    #[must_use]
    pub fn new(config: AssetConfig) -> Self {
        Self::with_collector(AssetCollector::new(config))
    }
}

impl<W, H> ManifestBuilder<W, H>
where
    W: Traversal + 'static,
    H: ContentHasher + 'static,
{
    /// Create a builder around an existing collector.
    #[must_use]
    pub fn with_collector(collector: AssetCollector<W, H>) -> Self {
        let emitter = ManifestEmitter::new(collector.config().format());
        Self { collector, emitter }
    }

    /// Replace the manifest emitter.
    #[must_use]
    pub fn with_emitter(mut self, emitter: ManifestEmitter) -> Self {
        self.emitter = emitter;
        self
    }

    /// Execute the build.
    ///
    /// Dropping the returned future before collection finishes leaves the
    /// output directories untouched.
    pub async fn build(self) -> Result<BuildReport> {
        let start = Instant::now();
        let Self { collector, emitter } = self;
        let config = collector.config().clone();

        let records = collector.collect_async().await?;
        let assets = records.len();

        let (manifest_path, copied) =
            tokio::task::spawn_blocking(move || emit(&config, &emitter, &records)).await??;

        let report = BuildReport {
            manifest_path,
            assets,
            copied,
            duration_ms: millis(start.elapsed()),
        };

        info!(
            path = %report.manifest_path.display(),
            assets = report.assets,
            copied = report.copied,
            duration_ms = report.duration_ms,
            "manifest written"
        );

        Ok(report)
    }
}

/// Copy assets if configured, then render and write the manifest.
fn emit(
    config: &AssetConfig,
    emitter: &ManifestEmitter,
    records: &[AssetRecord],
) -> Result<(PathBuf, usize)> {
    let copied = match config.assets_output_path() {
        Some(dest) => AssetCopier::new(dest).copy_all(records)?,
        None => 0,
    };

    let text = emitter.render(&config.module_name(), records)?;
    let manifest_path = config.manifest_path();
    write_manifest(&manifest_path, &text)?;

    Ok((manifest_path, copied))
}

/// Whole milliseconds in `duration`, saturating at `u64::MAX`.
fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

fn write_manifest(path: &Path, text: &str) -> Result<()> {
    let to_write_err = |source| BuildError::Write {
        path: path.to_path_buf(),
        source,
    };

    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).map_err(to_write_err)?;
    }
    fs::write(path, text).map_err(to_write_err)?;

    debug!(path = %path.display(), bytes = text.len(), "wrote manifest");
    Ok(())
}

/// Validate `config`, build the manifest, and return the status line.
pub async fn build_manifest(config: AssetConfigBuilder) -> Result<String> {
    let config = config.build().map_err(CollectError::from)?;
    let report = ManifestBuilder::new(config).build().await?;
    Ok(report.status())
}
