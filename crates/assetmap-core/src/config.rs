//! Generator configuration.
//!
//! [`AssetConfig`] is the validated, immutable configuration one invocation
//! runs with. It is assembled through [`AssetConfigBuilder`], which checks
//! every required value at once, or from an on-disk [`Settings`] file.

use std::{
    fmt,
    path::{Component, Path, PathBuf},
    str::FromStr,
    sync::Arc,
};

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};

/// Maps an absolute asset path to the relative path used for naming and URLs.
pub type ReplacePath = Arc<dyn Fn(&Path) -> String + Send + Sync>;

/// Builds the public URL from a relative path and a content hash.
pub type BuildUrl = Arc<dyn Fn(&str, &str) -> String + Send + Sync>;

/// Output format of the generated manifest.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ManifestFormat {
    /// An Elm module exposing one `Asset` constant per file.
    #[default]
    Elm,
    /// A JSON object keyed by identifier.
    Json,
}

impl ManifestFormat {
    /// File name of the manifest inside the namespace directory.
    #[must_use]
    pub fn file_name(self) -> &'static str {
        match self {
            Self::Elm => "Assets.elm",
            Self::Json => "assets.json",
        }
    }
}

impl FromStr for ManifestFormat {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "elm" => Ok(Self::Elm),
            "json" => Ok(Self::Json),
            other => Err(CoreError::config(format!(
                "unknown manifest format '{other}' (expected 'elm' or 'json')"
            ))),
        }
    }
}

impl fmt::Display for ManifestFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Elm => f.write_str("elm"),
            Self::Json => f.write_str("json"),
        }
    }
}

/// Validated configuration for one generator run.
#[derive(Clone)]
pub struct AssetConfig {
    assets_path: PathBuf,
    output_path: PathBuf,
    module_namespace: String,
    replace_path: ReplacePath,
    build_url: BuildUrl,
    assets_output_path: Option<PathBuf>,
    format: ManifestFormat,
}

impl AssetConfig {
    /// Start building a configuration.
    #[must_use]
    pub fn builder() -> AssetConfigBuilder {
        AssetConfigBuilder::default()
    }

    /// Directory walked for assets.
    #[must_use]
    pub fn assets_path(&self) -> &Path {
        &self.assets_path
    }

    /// Root directory the manifest is written under.
    #[must_use]
    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    /// Module namespace, also the manifest's directory below `output_path`.
    #[must_use]
    pub fn module_namespace(&self) -> &str {
        &self.module_namespace
    }

    /// Directory hashed copies of the assets go to, if copying is enabled.
    #[must_use]
    pub fn assets_output_path(&self) -> Option<&Path> {
        self.assets_output_path.as_deref()
    }

    /// Manifest output format.
    #[must_use]
    pub fn format(&self) -> ManifestFormat {
        self.format
    }

    /// Fully qualified module name, e.g. `MyApp.Assets`.
    #[must_use]
    pub fn module_name(&self) -> String {
        format!("{}.Assets", self.module_namespace)
    }

    /// Path of the generated manifest file.
    #[must_use]
    pub fn manifest_path(&self) -> PathBuf {
        self.output_path
            .join(&self.module_namespace)
            .join(self.format.file_name())
    }

    /// Apply the caller's path mapping to a discovered file.
    #[must_use]
    pub fn replace_path(&self, absolute: &Path) -> String {
        (self.replace_path)(absolute)
    }

    /// Apply the caller's URL builder.
    #[must_use]
    pub fn build_url(&self, relative: &str, hash: &str) -> String {
        (self.build_url)(relative, hash)
    }
}

impl fmt::Debug for AssetConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AssetConfig")
            .field("assets_path", &self.assets_path)
            .field("output_path", &self.output_path)
            .field("module_namespace", &self.module_namespace)
            .field("assets_output_path", &self.assets_output_path)
            .field("format", &self.format)
            .finish_non_exhaustive()
    }
}

/// Builder for [`AssetConfig`].
///
/// Nothing is checked until [`validate`](Self::validate) or
/// [`build`](Self::build); both report every problem in one error.
#[derive(Clone, Default)]
pub struct AssetConfigBuilder {
    assets_path: Option<PathBuf>,
    output_path: Option<PathBuf>,
    module_namespace: Option<String>,
    replace_path: Option<ReplacePath>,
    build_url: Option<BuildUrl>,
    assets_output_path: Option<PathBuf>,
    format: ManifestFormat,
}

impl AssetConfigBuilder {
    /// Set the directory to walk.
    #[must_use]
    pub fn assets_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.assets_path = Some(path.into());
        self
    }

    /// Set the manifest output root.
    #[must_use]
    pub fn output_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_path = Some(path.into());
        self
    }

    /// Set the module namespace.
    #[must_use]
    pub fn module_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.module_namespace = Some(namespace.into());
        self
    }

    /// Set the absolute-to-relative path mapping.
    #[must_use]
    pub fn replace_path<F>(mut self, f: F) -> Self
    where
        F: Fn(&Path) -> String + Send + Sync + 'static,
    {
        self.replace_path = Some(Arc::new(f));
        self
    }

    /// Set the URL builder.
    #[must_use]
    pub fn build_url<F>(mut self, f: F) -> Self
    where
        F: Fn(&str, &str) -> String + Send + Sync + 'static,
    {
        self.build_url = Some(Arc::new(f));
        self
    }

    /// Copy hashed assets under this directory.
    #[must_use]
    pub fn assets_output_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.assets_output_path = Some(path.into());
        self
    }

    /// Set the manifest format.
    #[must_use]
    pub fn format(mut self, format: ManifestFormat) -> Self {
        self.format = format;
        self
    }

    /// Check every required value, collecting all problems.
    pub fn validate(&self) -> Result<()> {
        let mut problems = Vec::new();

        check_path(&mut problems, "assetsPath", self.assets_path.as_deref());
        check_path(&mut problems, "outputPath", self.output_path.as_deref());
        match self.module_namespace.as_deref() {
            None => problems.push("moduleNamespace is required".to_string()),
            Some(ns) if ns.trim().is_empty() => {
                problems.push("moduleNamespace must not be empty".to_string());
            }
            Some(_) => {}
        }
        if self.replace_path.is_none() {
            problems.push("replacePath function is required".to_string());
        }
        if self.build_url.is_none() {
            problems.push("buildUrl function is required".to_string());
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(CoreError::config(format!(
                "invalid asset configuration: {}",
                problems.join("; ")
            )))
        }
    }

    /// Validate and produce the immutable configuration.
    pub fn build(self) -> Result<AssetConfig> {
        self.validate()?;

        match self {
            Self {
                assets_path: Some(assets_path),
                output_path: Some(output_path),
                module_namespace: Some(module_namespace),
                replace_path: Some(replace_path),
                build_url: Some(build_url),
                assets_output_path,
                format,
            } => Ok(AssetConfig {
                assets_path,
                output_path,
                module_namespace,
                replace_path,
                build_url,
                assets_output_path,
                format,
            }),
            _ => Err(CoreError::config("invalid asset configuration")),
        }
    }
}

fn check_path(problems: &mut Vec<String>, name: &str, value: Option<&Path>) {
    match value {
        None => problems.push(format!("{name} is required")),
        Some(p) if p.as_os_str().is_empty() => problems.push(format!("{name} must not be empty")),
        Some(_) => {}
    }
}

/// On-disk settings, usually `assetmap.toml`.
///
/// ```toml
/// assets_path = "app/assets"
/// output_path = "src/generated"
/// module_namespace = "MyApp"
/// assets_output_path = "dist"
/// url_prefix = "/assets/"
/// format = "elm"
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Directory walked for assets.
    #[serde(default)]
    pub assets_path: Option<String>,

    /// Manifest output root.
    #[serde(default)]
    pub output_path: Option<String>,

    /// Module namespace.
    #[serde(default)]
    pub module_namespace: Option<String>,

    /// Where hashed copies go; copying is off when unset.
    #[serde(default)]
    pub assets_output_path: Option<String>,

    /// Prefix prepended to every generated URL.
    #[serde(default = "default_url_prefix")]
    pub url_prefix: String,

    /// Manifest format.
    #[serde(default)]
    pub format: ManifestFormat,
}

fn default_url_prefix() -> String {
    "/".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            assets_path: None,
            output_path: None,
            module_namespace: None,
            assets_output_path: None,
            url_prefix: default_url_prefix(),
            format: ManifestFormat::default(),
        }
    }
}

impl Settings {
    /// Load settings from a file that must exist, layered under `ASSETMAP_*`
    /// environment variables.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(CoreError::NotFound(path.to_path_buf()));
        }
        Self::layered(path, true)
    }

    /// Like [`load`](Self::load), but a missing file is not an error, so a
    /// run can be configured from the environment and command line alone.
    pub fn load_with_env(path: &Path) -> Result<Self> {
        Self::layered(path, false)
    }

    fn layered(path: &Path, required: bool) -> Result<Self> {
        let parse_err = |e| {
            CoreError::config_with_source(
                format!("Failed to parse settings file: {}", path.display()),
                e,
            )
        };

        let settings = config::Config::builder()
            .set_default("url_prefix", default_url_prefix())?
            .add_source(
                config::File::from(path)
                    .format(config::FileFormat::Toml)
                    .required(required),
            )
            .add_source(config::Environment::with_prefix("ASSETMAP"))
            .build()
            .map_err(parse_err)?;

        let settings: Settings = settings.try_deserialize().map_err(parse_err)?;
        tracing::debug!(?settings, path = %path.display(), "loaded settings");
        Ok(settings)
    }

    /// Turn the settings into a builder with file-based path and URL rules.
    ///
    /// Paths are made relative to `assets_path` and URLs are
    /// `url_prefix + relative` with `-<hash>` before the extension.
    #[must_use]
    pub fn into_builder(self) -> AssetConfigBuilder {
        let root = PathBuf::from(self.assets_path.clone().unwrap_or_default());
        let prefix = self.url_prefix;

        let mut builder = AssetConfigBuilder::default()
            .replace_path(move |path| relative_to(&root, path))
            .build_url(move |relative, hash| hashed_url(&prefix, relative, hash))
            .format(self.format);

        if let Some(path) = self.assets_path {
            builder = builder.assets_path(path);
        }
        if let Some(path) = self.output_path {
            builder = builder.output_path(path);
        }
        if let Some(ns) = self.module_namespace {
            builder = builder.module_namespace(ns);
        }
        if let Some(path) = self.assets_output_path {
            builder = builder.assets_output_path(path);
        }
        builder
    }
}

/// Express `path` relative to `root` with `/` separators.
///
/// Paths outside `root` are returned whole.
#[must_use]
pub fn relative_to(root: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    relative
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// Insert `-<hash>` before the final extension and prepend `prefix`.
///
/// `hashed_url("/assets/", "img/logo.png", "abc")` is `/assets/img/logo-abc.png`.
/// Files without an extension get the hash appended.
#[must_use]
pub fn hashed_url(prefix: &str, relative: &str, hash: &str) -> String {
    let name_start = relative.rfind('/').map_or(0, |i| i + 1);
    let hashed = match relative[name_start..].rfind('.') {
        Some(dot) if dot > 0 => {
            let dot = name_start + dot;
            format!("{}-{hash}{}", &relative[..dot], &relative[dot..])
        }
        _ => format!("{relative}-{hash}"),
    };

    if prefix.is_empty() {
        hashed
    } else {
        format!("{}/{hashed}", prefix.trim_end_matches('/'))
    }
}
