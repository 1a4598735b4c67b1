//! scaffoldify copies and renders a directory of templates into a
//! destination tree, remapping paths with configurable mapper rules and
//! rendering contents against user answers.

/// Command-line interface
pub mod cli;

/// Configuration loading (JSON and YAML) and the programmatic config surface
pub mod config;

/// Common constants
pub mod constants;

/// Error types
pub mod error;

/// Logger setup for the binary
pub mod logger;

/// Mapper rule normalization and destination resolution
pub mod mapper;

/// Rendering and writing of a single template
pub mod materializer;

/// Inquiry and answer parsing
pub mod parser;

/// Answer collection
pub mod prompt;

/// Template rendering engines
pub mod renderer;

/// Run orchestration
pub mod scaffold;

/// Template tree traversal
pub mod walker;
