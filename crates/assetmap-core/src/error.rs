//! Error types for the assetmap core library.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias using `CoreError`.
pub type Result<T> = std::result::Result<T, CoreError>;

/// Core error types for assetmap.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Configuration is missing values or could not be loaded.
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Settings file does not exist.
    #[error("Configuration file not found: {0}")]
    NotFound(PathBuf),

    /// Generic configuration crate error.
    #[error("Config crate error: {0}")]
    ConfigCrate(#[from] config::ConfigError),
}

impl CoreError {
    /// Create a new configuration error with a message.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            source: None,
        }
    }

    /// Create a new configuration error with source.
    pub fn config_with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Config {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error() {
        let err = CoreError::config("assetsPath is required");
        assert!(err.to_string().contains("Configuration error"));
        assert!(err.to_string().contains("assetsPath"));
    }

    #[test]
    fn test_config_error_with_source() {
        let io_err = std::io::Error::new(std::io::ErrorKind::InvalidData, "bad bytes");
        let err = CoreError::config_with_source("failed to read settings", io_err);
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_not_found_error() {
        let err = CoreError::NotFound(PathBuf::from("assetmap.toml"));
        assert!(err.to_string().contains("not found"));
        assert!(err.to_string().contains("assetmap.toml"));
    }

    #[test]
    fn test_config_crate_error_conversion() {
        let err: CoreError = config::ConfigError::NotFound("url_prefix".to_string()).into();
        assert!(err.to_string().contains("Config crate error"));
        assert!(err.to_string().contains("url_prefix"));
    }
}
