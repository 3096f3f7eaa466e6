//! assetmap CLI library
//!
//! Command implementations for the `assetmap` binary, exposed as a library so
//! they can be driven from tests and other tools.
//!
//! # Modules
//!
//! - [`cmd`] - Command implementations (build, check)
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//!
//! use assetmap::cmd::{self, SettingsArgs};
//!
//! # async fn run() -> color_eyre::eyre::Result<()> {
//! cmd::build::run(Some(Path::new("assetmap.toml")), SettingsArgs::default()).await?;
//! # Ok(())
//! # }
//! ```

pub mod cmd;

// Re-export core types for convenience
pub use assetmap_core::{AssetConfig, AssetRecord, Settings};
pub use assetmap_generator::{BuildReport, ManifestBuilder};

/// Initialize tracing with the specified verbosity level.
///
/// # Arguments
///
/// * `verbose` - Verbosity level (0 = WARN, 1 = INFO, 2 = DEBUG, 3+ = TRACE)
pub fn init_tracing(verbose: u8) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();
}
