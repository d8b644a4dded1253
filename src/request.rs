//! Validated inputs of a single generation run.

use crate::config::Config;
use crate::error::{Error, Result};
use std::path::{Path, PathBuf};

/// Everything a generation run needs. Immutable once created.
#[derive(Debug)]
pub struct GenerationRequest {
    pub source_dir: PathBuf,
    pub target_dir: PathBuf,
    /// Path of the configuration file, if one was given.
    pub config_path: Option<PathBuf>,
    pub config: Config,
    pub stop_if_target_not_empty: bool,
}

impl GenerationRequest {
    /// Validates the inputs and loads the configuration file, if any.
    ///
    /// # Errors
    /// * `Error::MissingInputError` if the source or target path is empty
    /// * `Error::TargetNotEmptyError` if `stop_if_target_not_empty` is set and
    ///   the target directory already has entries
    /// * `Error::ConfigError` if the configuration cannot be loaded
    pub fn new<S, T, C>(
        source_dir: S,
        target_dir: T,
        config_path: Option<C>,
        stop_if_target_not_empty: bool,
    ) -> Result<Self>
    where
        S: Into<PathBuf>,
        T: Into<PathBuf>,
        C: Into<PathBuf>,
    {
        let config_path: Option<PathBuf> = config_path.map(Into::into);
        let config = match &config_path {
            Some(path) if !path.as_os_str().is_empty() => Config::load(path)?,
            _ => Config::default(),
        };
        Self::with_config(source_dir, target_dir, config, config_path, stop_if_target_not_empty)
    }

    /// Builds a request around an already-parsed configuration.
    pub fn with_config<S, T>(
        source_dir: S,
        target_dir: T,
        config: Config,
        config_path: Option<PathBuf>,
        stop_if_target_not_empty: bool,
    ) -> Result<Self>
    where
        S: Into<PathBuf>,
        T: Into<PathBuf>,
    {
        let source_dir = source_dir.into();
        let target_dir = target_dir.into();
        if source_dir.as_os_str().is_empty() {
            return Err(Error::MissingInputError("source"));
        }
        if target_dir.as_os_str().is_empty() {
            return Err(Error::MissingInputError("target"));
        }
        if stop_if_target_not_empty {
            ensure_empty_target(&target_dir)?;
        }

        Ok(Self { source_dir, target_dir, config_path, config, stop_if_target_not_empty })
    }

    /// Directory relative include paths are resolved against.
    pub fn config_dir(&self) -> PathBuf {
        self.config_path
            .as_deref()
            .and_then(Path::parent)
            .filter(|dir| !dir.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."))
    }
}

/// Fails if `target_dir` is an existing directory with at least one entry.
pub fn ensure_empty_target(target_dir: &Path) -> Result<()> {
    if !target_dir.is_dir() {
        return Ok(());
    }
    if std::fs::read_dir(target_dir)?.next().is_some() {
        return Err(Error::TargetNotEmptyError {
            target_dir: target_dir.display().to_string(),
        });
    }
    Ok(())
}
