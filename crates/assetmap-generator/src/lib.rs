//! assetmap generator library
//!
//! Asset collection and manifest generation engine for assetmap.
//!
//! # Modules
//!
//! - [`walk`] - Directory traversal
//! - [`hash`] - Content hashing for cache-busting URLs
//! - [`collector`] - Asset collection, ordering, and validation
//! - [`collision`] - Identifier collision detection
//! - [`template`] - Text templates with variable interpolation
//! - [`manifest`] - Manifest rendering (Elm, JSON)
//! - [`assets`] - Copying assets to their hashed locations
//! - [`build`] - Build orchestration

pub mod assets;
pub mod build;
pub mod collector;
pub mod collision;
pub mod hash;
pub mod manifest;
pub mod template;
pub mod walk;

pub use assets::{AssetCopier, AssetError};
pub use build::{BuildError, BuildReport, ManifestBuilder, build_manifest};
pub use collector::{AssetCollector, CollectError, collect_assets};
pub use collision::find_duplicate_identifiers;
pub use hash::{Blake3Hasher, ContentHasher};
pub use manifest::{EmitError, ManifestEmitter};
pub use template::{Template, TemplateContext, TemplateError, TemplateRegistry};
pub use walk::{FsWalker, Traversal};
