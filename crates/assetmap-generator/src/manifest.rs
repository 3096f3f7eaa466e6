//! Manifest rendering.

use assetmap_core::{AssetRecord, ManifestFormat};
use thiserror::Error;

use crate::template::{
    ELM_DOC, ELM_ENTRY, ELM_MODULE, TemplateContext, TemplateError, TemplateRegistry,
};

/// Manifest rendering errors.
#[derive(Debug, Error)]
pub enum EmitError {
    /// Template rendering failed.
    #[error("template error: {0}")]
    Template(#[from] TemplateError),

    /// JSON serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for manifest rendering.
pub type Result<T> = std::result::Result<T, EmitError>;

/// Renders sorted asset records into manifest text.
#[derive(Debug, Clone)]
pub struct ManifestEmitter {
    format: ManifestFormat,
    templates: TemplateRegistry,
}

impl ManifestEmitter {
    /// Create an emitter for the given format with the built-in templates.
    #[must_use]
    pub fn new(format: ManifestFormat) -> Self {
        Self {
            format,
            templates: TemplateRegistry::new(),
        }
    }

    /// Replace the template registry, e.g. to customize the Elm output.
    #[must_use]
    pub fn with_templates(mut self, templates: TemplateRegistry) -> Self {
        self.templates = templates;
        self
    }

    /// Output format.
    #[must_use]
    pub fn format(&self) -> ManifestFormat {
        self.format
    }

    /// Render the manifest for `module_name`.
    ///
    /// Records are emitted in the order given.
    pub fn render(&self, module_name: &str, records: &[AssetRecord]) -> Result<String> {
        match self.format {
            ManifestFormat::Elm => self.render_elm(module_name, records),
            ManifestFormat::Json => render_json(records),
        }
    }

    fn render_elm(&self, module_name: &str, records: &[AssetRecord]) -> Result<String> {
        let mut docs = String::new();
        let mut entries = String::new();

        for record in records {
            let ctx = TemplateContext::new()
                .with_var("identifier", &record.identifier)
                .with_var("url", escape_elm_string(&record.url_with_hash));
            docs.push_str(&self.templates.render(ELM_DOC, &ctx)?);
            entries.push_str(&self.templates.render(ELM_ENTRY, &ctx)?);
        }

        let ctx = TemplateContext::new()
            .with_var("module_name", module_name)
            .with_var("docs", docs)
            .with_var("entries", entries);
        Ok(self.templates.render(ELM_MODULE, &ctx)?)
    }
}

fn render_json(records: &[AssetRecord]) -> Result<String> {
    let map: serde_json::Map<String, serde_json::Value> = records
        .iter()
        .map(|r| {
            (
                r.identifier.clone(),
                serde_json::Value::String(r.url_with_hash.clone()),
            )
        })
        .collect();

    let mut json = serde_json::to_string_pretty(&map)?;
    json.push('\n');
    Ok(json)
}

/// Escape a value for use inside an Elm double-quoted string literal.
#[must_use]
pub fn escape_elm_string(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }
    out
}
