//! Build command - generates the asset manifest

use std::{path::Path, time::Instant};

use assetmap_generator::{BuildReport, ManifestBuilder};
use color_eyre::eyre::{Result, WrapErr};

use super::{SettingsArgs, load_settings};

/// Run the build command.
///
/// Collects assets, copies them when a copy directory is configured, and
/// writes the manifest.
pub async fn run(config_path: Option<&Path>, args: SettingsArgs) -> Result<BuildReport> {
    let start = Instant::now();
    tracing::info!(?config_path, ?args, "Starting build");

    let settings = load_settings(config_path, args)?;
    let config = settings
        .into_builder()
        .build()
        .wrap_err("Invalid configuration")?;
    tracing::debug!(?config, "Resolved configuration");

    let report = ManifestBuilder::new(config)
        .build()
        .await
        .wrap_err("Build failed")?;

    let duration = start.elapsed();

    println!("{}", report.status());
    if report.copied > 0 {
        println!("Copied {} assets", report.copied);
    }

    tracing::info!(?report, ?duration, "Build completed successfully");

    Ok(report)
}
