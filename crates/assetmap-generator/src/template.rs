//! Text templates for manifest generation.
//!
//! A lightweight template system using string interpolation rather than a
//! full template engine like Tera or Handlebars. Variables are written as
//! `{{ name }}`; `{{ name? }}` renders as empty when the variable is unset.

use std::collections::HashMap;

use thiserror::Error;

/// Template rendering errors.
#[derive(Debug, Error)]
pub enum TemplateError {
    /// Missing required variable.
    #[error("missing required variable: {0}")]
    MissingVariable(String),

    /// Template not found.
    #[error("template not found: {0}")]
    NotFound(String),

    /// Invalid template syntax.
    #[error("invalid template syntax: {0}")]
    InvalidSyntax(String),
}

/// Result type for template operations.
pub type Result<T> = std::result::Result<T, TemplateError>;

/// Template context with variables for interpolation.
#[derive(Debug, Clone, Default)]
pub struct TemplateContext {
    variables: HashMap<String, String>,
}

impl TemplateContext {
    /// Create a new empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a variable, replacing any previous value.
    #[must_use]
    pub fn with_var(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.variables.insert(key.into(), value.into());
        self
    }

    fn get(&self, key: &str) -> Option<&str> {
        self.variables.get(key).map(String::as_str)
    }
}

/// A named template string.
#[derive(Debug, Clone)]
pub struct Template {
    name: String,
    content: String,
}

impl Template {
    /// Create a new template with the given name and content.
    #[must_use]
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }

    /// Render the template with the given context.
    ///
    /// Substituted values are not scanned again, so a value containing `{{`
    /// is emitted verbatim.
    pub fn render(&self, context: &TemplateContext) -> Result<String> {
        let mut result = self.content.clone();
        let mut pos = 0;

        while let Some(start) = result[pos..].find("{{") {
            let start = pos + start;
            let end = result[start..]
                .find("}}")
                .ok_or_else(|| TemplateError::InvalidSyntax("unclosed {{ delimiter".to_string()))?;
            let end = start + end + 2;

            let var_name = result[start + 2..end - 2].trim();

            let (var_name, optional) = match var_name.strip_suffix('?') {
                Some(stripped) => (stripped, true),
                None => (var_name, false),
            };

            let value = match context.get(var_name) {
                Some(v) => v.to_string(),
                None if optional => String::new(),
                None => return Err(TemplateError::MissingVariable(var_name.to_string())),
            };

            result.replace_range(start..end, &value);
            pos = start + value.len();
        }

        Ok(result)
    }
}

/// Registry of templates.
#[derive(Debug, Clone, Default)]
pub struct TemplateRegistry {
    templates: HashMap<String, Template>,
}

impl TemplateRegistry {
    /// Create a new registry with the built-in Elm templates.
    #[must_use]
    pub fn new() -> Self {
        let mut registry = Self::default();
        registry.register(Template::new(ELM_MODULE, ELM_MODULE_TEMPLATE));
        registry.register(Template::new(ELM_DOC, ELM_DOC_TEMPLATE));
        registry.register(Template::new(ELM_ENTRY, ELM_ENTRY_TEMPLATE));
        registry
    }

    /// Register a template, replacing any with the same name.
    pub fn register(&mut self, template: Template) {
        self.templates.insert(template.name.clone(), template);
    }

    /// Render a named template with the given context.
    pub fn render(&self, name: &str, context: &TemplateContext) -> Result<String> {
        self.templates
            .get(name)
            .ok_or_else(|| TemplateError::NotFound(name.to_string()))?
            .render(context)
    }
}

/// Name of the Elm module template.
pub const ELM_MODULE: &str = "elm_module";
/// Name of the per-asset `@docs` line template.
pub const ELM_DOC: &str = "elm_doc";
/// Name of the per-asset constant template.
pub const ELM_ENTRY: &str = "elm_entry";

/// Elm module skeleton. `docs` and `entries` are the concatenated per-asset parts.
pub const ELM_MODULE_TEMPLATE: &str = r#"module {{ module_name }} exposing (..)

{-|
{{ docs? }}-}

import AssetPath exposing (Asset(AssetPath))
{{ entries? }}"#;

/// One `@docs` line.
pub const ELM_DOC_TEMPLATE: &str = "@docs {{ identifier }}\n";

/// One asset constant.
pub const ELM_ENTRY_TEMPLATE: &str = r#"

{-| -}
{{ identifier }} : Asset
{{ identifier }} =
    AssetPath "{{ url }}"
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_render() {
        let template = Template::new("t", "@docs {{ identifier }}");
        let ctx = TemplateContext::new().with_var("identifier", "logo_png");
        assert_eq!(template.render(&ctx).unwrap(), "@docs logo_png");
    }

    #[test]
    fn test_missing_variable() {
        let template = Template::new("t", "{{ url }}");
        let err = template.render(&TemplateContext::new()).unwrap_err();
        assert!(matches!(err, TemplateError::MissingVariable(ref v) if v == "url"));
    }

    #[test]
    fn test_optional_variable() {
        let template = Template::new("t", "[{{ docs? }}]");
        assert_eq!(template.render(&TemplateContext::new()).unwrap(), "[]");
    }

    #[test]
    fn test_unclosed_delimiter() {
        let template = Template::new("t", "{{ url");
        let err = template.render(&TemplateContext::new()).unwrap_err();
        assert!(matches!(err, TemplateError::InvalidSyntax(_)));
    }

    #[test]
    fn test_values_not_rescanned() {
        let template = Template::new("t", "{{ a }}{{ b }}");
        let ctx = TemplateContext::new()
            .with_var("a", "{{ b }}")
            .with_var("b", "x");
        assert_eq!(template.render(&ctx).unwrap(), "{{ b }}x");
    }

    #[test]
    fn test_registry_defaults() {
        let registry = TemplateRegistry::new();
        let ctx = TemplateContext::new()
            .with_var("module_name", "A.Assets")
            .with_var("identifier", "a_png")
            .with_var("url", "/a.png");
        for name in [ELM_MODULE, ELM_DOC, ELM_ENTRY] {
            assert!(registry.render(name, &ctx).is_ok(), "{name}");
        }
        assert!(matches!(
            registry.render("nope", &TemplateContext::new()),
            Err(TemplateError::NotFound(_))
        ));
    }

    #[test]
    fn test_registry_override() {
        let mut registry = TemplateRegistry::new();
        registry.register(Template::new(ELM_DOC, "-- {{ identifier }}\n"));

        let ctx = TemplateContext::new().with_var("identifier", "a_png");
        assert_eq!(registry.render(ELM_DOC, &ctx).unwrap(), "-- a_png\n");
    }
}
