//! Template rendering for file contents and file names.
//! Wraps a MiniJinja environment configured for plain-text output and
//! extended with YAML helpers.
use crate::context::parse_yaml_mapping;
use crate::error::{Error, Result};
use minijinja::{AutoEscape, Environment, Value};
use std::collections::BTreeMap;

/// Trait for template rendering engines.
pub trait TemplateRenderer {
    /// Renders a template string with the given context.
    ///
    /// # Arguments
    /// * `name` - Name reported in errors, usually the source path
    /// * `template` - Template string to render
    /// * `context` - Context variables for rendering
    ///
    /// # Returns
    /// * `Result<String>` - Rendered template string
    fn render(&self, name: &str, template: &str, context: &serde_json::Value) -> Result<String>;
}

/// MiniJinja-based template rendering engine.
pub struct MiniJinjaRenderer {
    /// MiniJinja environment instance
    env: Environment<'static>,
}

impl MiniJinjaRenderer {
    /// Creates a renderer with the builtin library plus `toYaml` and `fromYaml`.
    pub fn new() -> Self {
        let mut env = Environment::new();
        env.set_auto_escape_callback(|_| AutoEscape::None);
        env.set_keep_trailing_newline(true);
        env.add_function("toYaml", to_yaml);
        env.add_filter("toYaml", to_yaml);
        env.add_function("fromYaml", from_yaml);
        env.add_filter("fromYaml", from_yaml);
        Self { env }
    }
}

impl Default for MiniJinjaRenderer {
    fn default() -> Self {
        MiniJinjaRenderer::new()
    }
}

impl TemplateRenderer for MiniJinjaRenderer {
    /// # Errors
    /// * `Error::TemplateError` on syntax errors or failed evaluation
    fn render(&self, name: &str, template: &str, context: &serde_json::Value) -> Result<String> {
        self.env
            .render_named_str(name, template, context)
            .map_err(|source| Error::TemplateError { name: name.to_string(), source })
    }
}

/// Serializes a value to YAML without the trailing newline.
/// Returns an empty string if the value cannot be serialized.
pub fn to_yaml(value: Value) -> String {
    match serde_yaml::to_string(&value) {
        Ok(yaml) => yaml.strip_suffix('\n').unwrap_or(&yaml).to_string(),
        Err(_) => String::new(),
    }
}

/// Parses a YAML mapping from a string.
/// On failure the result is a mapping whose `Error` key holds the message.
pub fn from_yaml(source: String) -> Value {
    match parse_yaml_mapping(&source) {
        Ok(mapping) => Value::from_serialize(&mapping),
        Err(reason) => Value::from_serialize(BTreeMap::from([("Error", reason)])),
    }
}
