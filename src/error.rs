//! Error handling for scaffoldify.
//! Defines the error taxonomy and result type used throughout the crate.

use std::io;
use thiserror::Error;

/// All errors a scaffold run can fail with.
///
/// Every variant is fatal for the run: nothing is retried and files that
/// were already written stay on disk.
#[derive(Error, Debug)]
pub enum Error {
    /// Malformed configuration (bad mapper declaration, bad inquiry list, ...).
    #[error("Configuration error: {0}.")]
    ConfigError(String),

    /// The configured templates root is missing.
    #[error("Templates directory '{templates_dir}' does not exist.")]
    TemplatesDoNotExistError { templates_dir: String },

    /// A directory of the template tree could not be read.
    #[error("Failed to traverse '{path}': {source}.")]
    WalkError {
        path: String,
        #[source]
        source: walkdir::Error,
    },

    /// A template could not be read as UTF-8 text.
    #[error("Failed to read template '{template}': {source}.")]
    ReadError {
        template: String,
        #[source]
        source: io::Error,
    },

    /// A template failed to render against the answer context.
    #[error("Failed to render '{template}': {source}.")]
    RenderError {
        template: String,
        #[source]
        source: minijinja::Error,
    },

    /// The destination directory or file could not be written.
    #[error("Failed to write '{target}': {source}.")]
    WriteError {
        target: String,
        #[source]
        source: io::Error,
    },

    #[error("IO error: {0}.")]
    IoError(#[from] io::Error),

    #[error("JSON error: {0}.")]
    JSONParseError(#[from] serde_json::Error),

    #[error("YAML error: {0}.")]
    YAMLParseError(#[from] serde_yaml::Error),

    #[error("Prompt error: {0}.")]
    PromptError(#[from] dialoguer::Error),
}

/// Convenience type alias for results with [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Prints the error to stderr and exits with status code 1.
pub fn default_error_handler(err: Error) {
    eprintln!("{err}");
    std::process::exit(1);
}
