//! Tymlate reproduces a source directory tree under a target directory,
//! rendering template files (and optionally file names) against data taken
//! from the environment, the configuration and included YAML documents.

/// Command-line interface module
pub mod cli;

/// Configuration document (`data`, `include`, `templates`)
pub mod config;

/// Render context assembly from environment, inline data and includes
pub mod context;

/// Error types and handling
pub mod error;

/// Regex-based include/exclude filtering of source entries
pub mod filter;

/// Tree walk orchestration: target resolution, rendering and copying
pub mod processor;

/// Template engine and the YAML helper functions
pub mod renderer;

/// Validated inputs of a generation run
pub mod request;
