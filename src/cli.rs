//! Command-line interface implementation for tymlate.
//! Provides argument parsing and help text formatting using clap.

use clap::{error::ErrorKind, Command, CommandFactory, Parser};
use std::path::PathBuf;

/// Command-line arguments structure for tymlate.
#[derive(Parser, Debug)]
#[command(author, version, about = "Tymlate: render a directory tree of templates", long_about = None)]
pub struct Args {
    /// Directory containing the templates and plain files
    #[arg(value_name = "SOURCE_DIR")]
    pub source_dir: PathBuf,

    /// Directory where the generated tree will be written
    #[arg(value_name = "TARGET_DIR")]
    pub target_dir: PathBuf,

    /// YAML configuration file with data, includes and template rules
    #[arg(short, long, value_name = "CONFIG")]
    pub config: Option<PathBuf>,

    /// Fail if the target directory already contains files
    #[arg(long)]
    pub stop_if_not_empty: bool,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,
}

/// Help shown when a required argument is missing.
pub fn short_help() -> Command {
    Args::command().help_template(
        "{about-section}\n{usage-heading} {usage}\n\n{all-args}\n{after-help}\n",
    )
}

/// Parses command line arguments and returns the Args structure.
///
/// # Exits
/// * With status code 1 if required arguments are missing
/// * With clap's default error handling for other argument errors
pub fn get_args() -> Args {
    match Args::try_parse() {
        Ok(args) => args,
        Err(e) if e.kind() == ErrorKind::MissingRequiredArgument => {
            if let Err(io_err) = short_help().print_help() {
                eprintln!("{}", io_err);
            }
            std::process::exit(1);
        }
        Err(e) => e.exit(),
    }
}
