//! Render context assembly.
//!
//! The context maps namespace names to key/value mappings. It is built from,
//! in order, the process environment (`Env`), the inline `data` namespaces and
//! the `include` documents. A later source replaces an earlier namespace of
//! the same name wholesale; namespaces are never merged.

use crate::config::Config;
use crate::error::{Error, Result};
use indexmap::IndexMap;
use log::debug;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Reserved namespace holding the environment variables.
pub const ENV_NAMESPACE: &str = "Env";

/// Environment variables captured at a single point in time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvSnapshot(BTreeMap<String, String>);

impl EnvSnapshot {
    /// Captures the current process environment.
    /// Variables whose name or value is not valid Unicode are skipped.
    pub fn capture() -> Self {
        let vars = std::env::vars_os()
            .filter_map(|(key, value)| Some((key.into_string().ok()?, value.into_string().ok()?)))
            .collect();
        Self(vars)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    fn to_namespace(&self) -> Map<String, Value> {
        self.0
            .iter()
            .map(|(key, value)| (key.clone(), Value::String(value.clone())))
            .collect()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for EnvSnapshot {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// The full set of namespaces handed to a template.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderContext {
    namespaces: IndexMap<String, Map<String, Value>>,
}

impl RenderContext {
    pub fn namespace(&self, name: &str) -> Option<&Map<String, Value>> {
        self.namespaces.get(name)
    }

    /// Last writer wins.
    fn insert(&mut self, name: &str, values: Map<String, Value>) {
        if self.namespaces.insert(name.to_string(), values).is_some() {
            debug!("Namespace '{}' overridden", name);
        }
    }

    /// Converts the context into the single top-level value passed to templates.
    pub fn into_value(self) -> Value {
        Value::Object(
            self.namespaces
                .into_iter()
                .map(|(name, values)| (name, Value::Object(values)))
                .collect(),
        )
    }
}

/// Builds [`RenderContext`]s for a configuration.
#[derive(Debug)]
pub struct ContextBuilder<'a> {
    config: &'a Config,
    config_dir: PathBuf,
    env: EnvSnapshot,
}

impl<'a> ContextBuilder<'a> {
    /// `config_dir` is the directory relative includes are resolved against.
    pub fn new<P: Into<PathBuf>>(config: &'a Config, config_dir: P, env: EnvSnapshot) -> Self {
        Self { config, config_dir: config_dir.into(), env }
    }

    /// Resolves an include path against the configuration directory.
    pub fn resolve_include(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.config_dir.join(path)
        }
    }

    /// Assembles the context. Fails without a partial result if any include
    /// cannot be read or parsed.
    pub fn build(&self) -> Result<RenderContext> {
        let mut context = RenderContext::default();
        context.insert(ENV_NAMESPACE, self.env.to_namespace());

        for (name, values) in &self.config.data {
            context.insert(name, values.clone());
        }

        for (name, path) in &self.config.includes {
            let resolved = self.resolve_include(path);
            debug!("Loading include '{}' from {}", name, resolved.display());
            let include_error = |reason: String| Error::IncludeError {
                namespace: name.clone(),
                path: resolved.display().to_string(),
                reason,
            };
            let content =
                std::fs::read_to_string(&resolved).map_err(|e| include_error(e.to_string()))?;
            let values = parse_yaml_mapping(&content).map_err(include_error)?;
            context.insert(name, values);
        }

        Ok(context)
    }
}

/// Parses a YAML document that must be a key/value mapping.
/// An empty document yields an empty mapping. Merge keys (`<<`) are applied
/// and scalar keys at any depth become strings.
pub fn parse_yaml_mapping(content: &str) -> std::result::Result<Map<String, Value>, String> {
    if content.trim().is_empty() {
        return Ok(Map::new());
    }
    let mut value: serde_yaml::Value = serde_yaml::from_str(content).map_err(|e| e.to_string())?;
    value.apply_merge().map_err(|e| e.to_string())?;
    match yaml_to_json(value)? {
        Value::Null => Ok(Map::new()),
        Value::Object(mapping) => Ok(mapping),
        _ => Err("document is not a mapping".to_string()),
    }
}

fn yaml_to_json(value: serde_yaml::Value) -> std::result::Result<Value, String> {
    Ok(match value {
        serde_yaml::Value::Null => Value::Null,
        serde_yaml::Value::Bool(b) => Value::Bool(b),
        serde_yaml::Value::Number(n) => serde_json::to_value(&n).map_err(|e| e.to_string())?,
        serde_yaml::Value::String(s) => Value::String(s),
        serde_yaml::Value::Sequence(items) => {
            Value::Array(items.into_iter().map(yaml_to_json).collect::<std::result::Result<_, _>>()?)
        }
        serde_yaml::Value::Mapping(mapping) => {
            let mut object = Map::new();
            for (key, value) in mapping {
                object.insert(yaml_key(key)?, yaml_to_json(value)?);
            }
            Value::Object(object)
        }
        serde_yaml::Value::Tagged(tagged) => yaml_to_json(tagged.value)?,
    })
}

fn yaml_key(key: serde_yaml::Value) -> std::result::Result<String, String> {
    match key {
        serde_yaml::Value::String(s) => Ok(s),
        serde_yaml::Value::Number(n) => Ok(n.to_string()),
        serde_yaml::Value::Bool(b) => Ok(b.to_string()),
        serde_yaml::Value::Null => Ok("null".to_string()),
        serde_yaml::Value::Tagged(tagged) => yaml_key(tagged.value),
        _ => Err("mapping keys must be scalars".to_string()),
    }
}
