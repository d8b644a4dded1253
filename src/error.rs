//! Error handling for tymlate.
//! Defines the error type and result alias used throughout the crate.

use std::io;
use thiserror::Error;

/// All errors that can abort a generation run.
///
/// Generation is fail-fast: the first error encountered is returned and
/// nothing after it is processed.
#[derive(Error, Debug)]
pub enum Error {
    /// Represents errors that occur during file system operations
    #[error("IO error: {0}.")]
    IoError(#[from] io::Error),

    /// Represents errors raised while walking the source tree
    #[error("Failed to walk source directory: {0}.")]
    WalkError(#[from] walkdir::Error),

    /// Represents errors that occur during configuration parsing or processing
    #[error("Configuration error: {0}.")]
    ConfigError(String),

    /// An include/exclude pattern is not a valid regular expression
    #[error("Invalid filter pattern: {0}.")]
    PatternError(#[from] regex::Error),

    /// An included YAML document could not be read or parsed
    #[error("Failed to load include '{namespace}' from '{path}': {reason}.")]
    IncludeError { namespace: String, path: String, reason: String },

    /// Template parse or execution failure
    #[error("Template error in '{name}': {source}.")]
    TemplateError {
        name: String,
        #[source]
        source: minijinja::Error,
    },

    #[error("'{path}' is not a regular file.")]
    NotRegularFileError { path: String },

    #[error("Failed to create directory '{path}': {source}.")]
    CreateDirError {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("The target directory is not empty: '{target_dir}'.")]
    TargetNotEmptyError { target_dir: String },

    #[error("{0} must be set.")]
    MissingInputError(&'static str),

    /// Wraps the first failure of a walk with the source path being processed
    #[error("Failed to process '{path}': {source}")]
    ProcessError {
        path: String,
        #[source]
        source: Box<Error>,
    },
}

/// Convenience type alias for Results with [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Default error handler that prints the error and exits the program.
///
/// # Behavior
/// Prints the error message to stderr and exits with status code 1
pub fn default_error_handler(err: Error) {
    eprintln!("{}", err);
    std::process::exit(1);
}
