//! Command implementations.

pub mod build;
pub mod check;

use std::path::{Path, PathBuf};

use assetmap_core::{ManifestFormat, Settings};
use color_eyre::eyre::{Result, WrapErr};

/// Command-line overrides for values in the settings file.
#[derive(Debug, Clone, Default, PartialEq, Eq, clap::Args)]
pub struct SettingsArgs {
    /// Directory to scan for assets
    #[arg(short, long)]
    pub assets: Option<PathBuf>,

    /// Root directory the manifest is written under
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Module namespace (also the manifest's subdirectory)
    #[arg(short, long)]
    pub namespace: Option<String>,

    /// Copy hashed assets into this directory
    #[arg(long)]
    pub copy_to: Option<PathBuf>,

    /// Prefix for generated URLs (e.g., /assets/)
    #[arg(long)]
    pub url_prefix: Option<String>,

    /// Manifest format (elm, json)
    #[arg(long)]
    pub format: Option<ManifestFormat>,
}

impl SettingsArgs {
    /// Apply the overrides on top of loaded settings.
    pub fn apply(self, settings: &mut Settings) {
        if let Some(path) = self.assets {
            settings.assets_path = Some(path.to_string_lossy().to_string());
        }
        if let Some(path) = self.output {
            settings.output_path = Some(path.to_string_lossy().to_string());
        }
        if let Some(ns) = self.namespace {
            settings.module_namespace = Some(ns);
        }
        if let Some(path) = self.copy_to {
            settings.assets_output_path = Some(path.to_string_lossy().to_string());
        }
        if let Some(prefix) = self.url_prefix {
            settings.url_prefix = prefix;
        }
        if let Some(format) = self.format {
            settings.format = format;
        }
    }
}

/// Settings file read when `--config` is not given.
pub const DEFAULT_CONFIG: &str = "assetmap.toml";

/// Load settings from file and environment, then apply CLI overrides.
///
/// An explicit `config_path` must exist; the default file is optional.
pub fn load_settings(config_path: Option<&Path>, args: SettingsArgs) -> Result<Settings> {
    let mut settings = match config_path {
        Some(path) => Settings::load(path),
        None => Settings::load_with_env(Path::new(DEFAULT_CONFIG)),
    }
    .wrap_err_with(|| {
        format!(
            "Failed to load settings from {}",
            config_path.unwrap_or(Path::new(DEFAULT_CONFIG)).display()
        )
    })?;
    args.apply(&mut settings);
    tracing::debug!(?settings, "resolved settings");
    Ok(settings)
}
