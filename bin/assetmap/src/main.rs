//! assetmap CLI
//!
//! Generates a cache-busting asset manifest from a directory of images.
//!
//! This is the binary entry point. The library functionality is in `lib.rs`.

use assetmap::cmd::SettingsArgs;
use clap::Parser;
use color_eyre::eyre::Result;

/// Command-line interface for assetmap.
#[derive(Parser)]
#[command(
    name = "assetmap",
    version,
    about = "Generate cache-busting asset manifests"
)]
struct Cli {
    /// Path to settings file (must exist when given; defaults to an optional assetmap.toml)
    #[arg(short, long)]
    config: Option<std::path::PathBuf>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Available CLI commands.
#[derive(clap::Subcommand)]
enum Commands {
    /// Collect assets and write the manifest
    Build {
        #[command(flatten)]
        settings: SettingsArgs,
    },
    /// Validate configuration and identifiers without writing anything
    Check {
        #[command(flatten)]
        settings: SettingsArgs,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    assetmap::init_tracing(cli.verbose);

    match cli.command {
        Commands::Build { settings } => {
            assetmap::cmd::build::run(cli.config.as_deref(), settings).await?;
        }
        Commands::Check { settings } => {
            assetmap::cmd::check::run(cli.config.as_deref(), settings).await?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use assetmap_core::ManifestFormat;
    use clap::Parser;

    use super::*;

    #[test]
    fn test_cli_build_command_parsing() {
        let args = ["assetmap", "build", "--output", "src/generated"];
        let cli = Cli::parse_from(args);

        assert!(cli.config.is_none());
        assert_eq!(cli.verbose, 0);

        match cli.command {
            Commands::Build { settings } => {
                assert_eq!(settings.output, Some(PathBuf::from("src/generated")));
                assert!(settings.assets.is_none());
                assert!(settings.format.is_none());
            }
            _ => panic!("Expected Build command"),
        }
    }

    #[test]
    fn test_cli_build_all_overrides() {
        let args = [
            "assetmap",
            "build",
            "-a",
            "app/assets",
            "-n",
            "MyApp",
            "--copy-to",
            "dist",
            "--url-prefix",
            "/static/",
            "--format",
            "json",
        ];
        let cli = Cli::parse_from(args);

        match cli.command {
            Commands::Build { settings } => {
                assert_eq!(settings.assets, Some(PathBuf::from("app/assets")));
                assert_eq!(settings.namespace.as_deref(), Some("MyApp"));
                assert_eq!(settings.copy_to, Some(PathBuf::from("dist")));
                assert_eq!(settings.url_prefix.as_deref(), Some("/static/"));
                assert_eq!(settings.format, Some(ManifestFormat::Json));
            }
            _ => panic!("Expected Build command"),
        }
    }

    #[test]
    fn test_cli_rejects_unknown_format() {
        let result = Cli::try_parse_from(["assetmap", "build", "--format", "yaml"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_check_command_parsing() {
        let args = ["assetmap", "check", "--assets", "img"];
        let cli = Cli::parse_from(args);

        match cli.command {
            Commands::Check { settings } => {
                assert_eq!(settings.assets, Some(PathBuf::from("img")));
            }
            _ => panic!("Expected Check command"),
        }
    }

    #[test]
    fn test_cli_verbosity_flags() {
        let args = ["assetmap", "-vvv", "build"];
        let cli = Cli::parse_from(args);
        assert_eq!(cli.verbose, 3);
    }

    #[test]
    fn test_cli_custom_config_path() {
        let args = ["assetmap", "--config", "assets.toml", "check"];
        let cli = Cli::parse_from(args);
        assert_eq!(cli.config, Some(PathBuf::from("assets.toml")));
    }
}
