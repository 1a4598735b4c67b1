//! Common constants used throughout scaffoldify.

/// Configuration files looked up in the working directory, in order.
pub const CONFIG_FILES: [&str; 3] = ["scaffoldify.json", "scaffoldify.yml", "scaffoldify.yaml"];

/// Fallback configuration file in the user's home directory.
pub const RC_FILE: &str = ".scaffoldifyrc";

/// Extension stripped from template file names by the default mapping.
pub const TEMPLATE_SUFFIX: &str = ".tmpl";

/// Rendered in place of a `[placeholder]` with no matching answer.
pub const UNDEFINED_PLACEHOLDER: &str = "undefined";
