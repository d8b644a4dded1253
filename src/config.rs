//! Configuration handling for tymlate.
//! The configuration is a YAML document describing the data made available
//! to templates and the rules deciding which files are processed.

use crate::error::{Error, Result};
use indexmap::IndexMap;
use log::debug;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Suffix marking a source file as a template when none is configured.
pub const DEFAULT_TEMPLATE_SUFFIX: &str = ".tmpl";

/// Top-level configuration document.
///
/// ```yaml
/// data:
///   Data:
///     user:
///       name: alice
/// include:
///   Versions: versions.yml
/// templates:
///   suffix: .tmpl
///   processFilename: true
///   excludes:
///     - '\.log$'
/// ```
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Inline namespaces, each a key/value mapping.
    pub data: IndexMap<String, serde_json::Map<String, serde_json::Value>>,

    /// Namespaces loaded from external YAML documents.
    /// Relative paths are resolved against the configuration file's directory.
    #[serde(rename = "include")]
    pub includes: IndexMap<String, PathBuf>,

    pub templates: TemplatesConfig,
}

#[derive(Debug, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TemplatesConfig {
    /// Files whose name ends with this marker are rendered; the marker is
    /// stripped from the output name.
    pub suffix: String,

    /// Render the target path itself as a template.
    pub process_filename: bool,

    /// Regular expressions; a matching path is skipped.
    pub excludes: Vec<String>,

    /// Regular expressions; when non-empty only matching paths are processed.
    pub includes: Vec<String>,
}

impl Default for TemplatesConfig {
    fn default() -> Self {
        Self {
            suffix: DEFAULT_TEMPLATE_SUFFIX.to_string(),
            process_filename: false,
            excludes: Vec::new(),
            includes: Vec::new(),
        }
    }
}

impl Config {
    /// Reads and parses the configuration file at `path`.
    ///
    /// # Errors
    /// * `Error::ConfigError` if the file cannot be read or is not valid YAML
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(Error::ConfigError(format!(
                "Invalid configuration path: {}",
                path.display()
            )));
        }

        debug!("Loading configuration from {}", path.display());
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::ConfigError(format!("Failed to read {}: {}", path.display(), e))
        })?;

        Self::from_yaml_str(&content).map_err(|e| match e {
            Error::ConfigError(reason) => {
                Error::ConfigError(format!("{} in {}", reason, path.display()))
            }
            other => other,
        })
    }

    /// Parses a configuration document. An empty document yields the defaults.
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content)
            .map_err(|e| Error::ConfigError(format!("Invalid configuration format: {}", e)))
    }
}
