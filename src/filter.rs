//! Include/exclude path filtering.
//! Decides which source entries have their content processed, based on the
//! regular expressions listed under `templates.excludes` and `templates.includes`.

use crate::config::TemplatesConfig;
use crate::error::Result;
use log::{debug, warn};
use regex::RegexSet;

/// Printed when both lists are configured.
pub const BOTH_LISTS_ADVISORY: &str =
    "Both excludes and includes are defined in config file, so only includes will be used.";

#[derive(Debug)]
pub enum PathFilter {
    /// Skip an entry if any pattern matches.
    Exclude(RegexSet),
    /// Keep an entry only if at least one pattern matches.
    Include(RegexSet),
}

impl PathFilter {
    /// Compiles the configured patterns.
    ///
    /// # Notes
    /// - Patterns are regular expressions matched anywhere in the path, not globs
    /// - A non-empty include list always wins; the exclude list is then ignored
    ///
    /// # Errors
    /// * `Error::PatternError` if a pattern is not a valid regular expression
    pub fn from_config(templates: &TemplatesConfig) -> Result<Self> {
        if templates.includes.is_empty() {
            return Ok(Self::Exclude(RegexSet::new(&templates.excludes)?));
        }
        if let Some(advisory) = Self::advisory(templates) {
            println!("{}", advisory);
            warn!("Ignoring {} exclude pattern(s)", templates.excludes.len());
        }
        Ok(Self::Include(RegexSet::new(&templates.includes)?))
    }

    /// The line printed when the exclude list is overridden by the include list.
    pub fn advisory(templates: &TemplatesConfig) -> Option<&'static str> {
        (!templates.includes.is_empty() && !templates.excludes.is_empty())
            .then_some(BOTH_LISTS_ADVISORY)
    }

    /// Returns `true` if the entry at `path` should be processed.
    pub fn is_selected(&self, path: &str) -> bool {
        let selected = match self {
            Self::Exclude(patterns) => !patterns.is_match(path),
            Self::Include(patterns) => patterns.is_match(path),
        };
        if !selected {
            debug!("Skipping '{}'", path);
        }
        selected
    }
}
