//! assetmap core library
//!
//! Core types, configuration, and identifier rules for the assetmap manifest
//! generator.

pub mod config;
pub mod error;
pub mod identifier;
pub mod record;

pub use config::{AssetConfig, AssetConfigBuilder, BuildUrl, ManifestFormat, ReplacePath, Settings};
pub use error::{CoreError, Result};
pub use identifier::{camel_case, derive_identifier};
pub use record::AssetRecord;
