//! Command-line interface implementation for scaffoldify.
//! Provides argument parsing using clap.

use clap::Parser;
use std::path::PathBuf;

/// Command-line arguments structure for scaffoldify.
#[derive(Parser, Debug)]
#[command(author, version, about = "scaffoldify: generate files from templates with path mappers", long_about = None)]
pub struct Args {
    /// Path to the configuration file (JSON or YAML)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Path to the templates directory, overrides the configured one
    #[arg(short, long, value_name = "DIR")]
    pub templates: Option<PathBuf>,

    /// Destination root, overrides the configured one
    #[arg(long, value_name = "DIR")]
    pub cwd: Option<PathBuf>,

    /// Read answers as a JSON object from stdin.
    /// Questions answered this way are not prompted.
    #[arg(short, long)]
    pub stdin: bool,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,
}

/// Parses command line arguments, exiting through clap on invalid input.
pub fn get_args() -> Args {
    Args::parse()
}
