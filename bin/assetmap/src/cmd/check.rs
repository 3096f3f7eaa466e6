//! Check command - validate configuration and assets without writing

use std::path::Path;

use assetmap_generator::{AssetCollector, CollectError};
use color_eyre::eyre::{Result, bail};

use super::{SettingsArgs, load_settings};

/// Validation result.
#[derive(Debug, Default)]
struct ValidationResult {
    errors: Vec<String>,
    assets: usize,
}

impl ValidationResult {
    fn add_error(&mut self, msg: impl Into<String>) {
        self.errors.push(msg.into());
    }

    fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// Run the check command.
///
/// Validates the configuration and runs a full collection, reporting every
/// identifier collision. Nothing is written.
pub async fn run(config_path: Option<&Path>, args: SettingsArgs) -> Result<usize> {
    tracing::info!(?config_path, "Checking configuration and assets");

    let mut result = ValidationResult::default();

    println!("Checking configuration...");
    let settings = load_settings(config_path, args)?;
    let config = match settings.into_builder().build() {
        Ok(config) => {
            println!("  ✓ Configuration valid");
            Some(config)
        }
        Err(e) => {
            println!("  ✗ Configuration invalid");
            result.add_error(e.to_string());
            None
        }
    };

    if let Some(config) = config {
        println!("\nCollecting assets...");
        match AssetCollector::new(config).collect_async().await {
            Ok(records) => {
                result.assets = records.len();
                println!("  ✓ {} assets, all identifiers unique", records.len());
            }
            Err(CollectError::DuplicateIdentifiers(ids)) => {
                println!("  ✗ Identifier collisions");
                let mut seen = Vec::new();
                for id in ids {
                    if !seen.contains(&id) {
                        result.add_error(format!("Duplicate identifier: {id}"));
                        seen.push(id);
                    }
                }
            }
            Err(e) => {
                println!("  ✗ Collection failed");
                result.add_error(e.to_string());
            }
        }
    }

    println!();
    println!("Summary:");
    println!("  Assets: {}", result.assets);
    println!("  Errors: {}", result.errors.len());

    if result.has_errors() {
        println!();
        println!("Errors:");
        for err in &result.errors {
            println!("  ✗ {err}");
        }
        bail!("Validation failed with {} error(s)", result.errors.len());
    }

    println!();
    println!("✓ All checks passed");

    Ok(result.assets)
}
