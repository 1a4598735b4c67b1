//! Configuration handling for scaffoldify.
//! Loads the raw configuration from JSON or YAML files and provides the
//! programmatic surface (dynamic destinations, transforms) that files cannot express.

use crate::constants::{CONFIG_FILES, RC_FILE};
use crate::error::{Error, Result};
use indexmap::IndexMap;
use log::{debug, info};
use serde::{Deserialize, Deserializer};
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Merged answers and static options, used both for `[placeholder]`
/// substitution in destinations and for template rendering.
pub type AnswerContext = IndexMap<String, serde_json::Value>;

/// Computes a destination path from the answer context.
pub type DynamicResolver = Arc<dyn Fn(&AnswerContext) -> String + Send + Sync>;

/// Rewrites the answer context once, after answers are collected.
pub type Transform = Box<dyn FnOnce(AnswerContext) -> AnswerContext>;

/// Destination of a mapping rule.
#[derive(Clone)]
pub enum Destination {
    /// Path with optional `[placeholder]` tokens.
    Static(String),
    /// Path computed from the context; the result is used verbatim.
    Dynamic(DynamicResolver),
}

impl Destination {
    pub fn dynamic<F>(resolver: F) -> Self
    where
        F: Fn(&AnswerContext) -> String + Send + Sync + 'static,
    {
        Self::Dynamic(Arc::new(resolver))
    }
}

impl fmt::Debug for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Destination::Static(to) => f.debug_tuple("Static").field(to).finish(),
            Destination::Dynamic(_) => f.write_str("Dynamic(..)"),
        }
    }
}

// Only the static form can come from a configuration file.
impl<'de> Deserialize<'de> for Destination {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        String::deserialize(deserializer).map(Destination::Static)
    }
}

/// Object form of a mapper declaration.
#[derive(Debug, Clone, Deserialize)]
pub struct ObjectDecl {
    pub from: String,
    #[serde(default)]
    pub to: Option<Destination>,
    #[serde(default)]
    pub overwrite: Option<bool>,
}

/// A mapper entry as declared by the user.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum MapperDecl {
    /// `"from=>to"`, optionally suffixed with `?overwrite=false`.
    Compact(String),
    Object(ObjectDecl),
    /// Anything else; dropped during normalization.
    Malformed(serde_json::Value),
}

impl From<&str> for MapperDecl {
    fn from(value: &str) -> Self {
        MapperDecl::Compact(value.to_string())
    }
}

impl From<ObjectDecl> for MapperDecl {
    fn from(value: ObjectDecl) -> Self {
        MapperDecl::Object(value)
    }
}

/// Configuration as produced by a loader, before normalization.
#[derive(Default, Deserialize)]
#[serde(default)]
pub struct RawConfig {
    /// Root directory of the templates.
    pub templates: Option<PathBuf>,
    /// Destination root; defaults to the working directory.
    pub cwd: Option<PathBuf>,
    pub mappers: Vec<MapperDecl>,
    /// Static values merged underneath the collected answers.
    pub options: AnswerContext,
    /// Passed through untouched to the answer collector.
    pub inquiries: serde_json::Value,
    #[serde(skip)]
    pub transform: Option<Transform>,
}

impl fmt::Debug for RawConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RawConfig")
            .field("templates", &self.templates)
            .field("cwd", &self.cwd)
            .field("mappers", &self.mappers)
            .field("options", &self.options)
            .field("inquiries", &self.inquiries)
            .field("transform", &self.transform.as_ref().map(|_| ".."))
            .finish()
    }
}

impl RawConfig {
    pub fn new<P: Into<PathBuf>>(templates: P) -> Self {
        Self { templates: Some(templates.into()), ..Default::default() }
    }

    pub fn with_cwd<P: Into<PathBuf>>(mut self, cwd: P) -> Self {
        self.cwd = Some(cwd.into());
        self
    }

    pub fn with_mapper<M: Into<MapperDecl>>(mut self, mapper: M) -> Self {
        self.mappers.push(mapper.into());
        self
    }

    pub fn with_option<K: Into<String>>(mut self, key: K, value: serde_json::Value) -> Self {
        self.options.insert(key.into(), value);
        self
    }

    pub fn with_inquiries(mut self, inquiries: serde_json::Value) -> Self {
        self.inquiries = inquiries;
        self
    }

    pub fn with_transform<F>(mut self, transform: F) -> Self
    where
        F: FnOnce(AnswerContext) -> AnswerContext + 'static,
    {
        self.transform = Some(Box::new(transform));
        self
    }
}

/// Parses configuration content, trying JSON first and YAML second.
pub fn parse_config(content: &str) -> Result<RawConfig> {
    match serde_json::from_str(content) {
        Ok(config) => Ok(config),
        Err(e) => {
            debug!("Configuration is not JSON ({e}), trying YAML");
            Ok(serde_yaml::from_str(content)?)
        }
    }
}

/// Loads a configuration file.
///
/// # Errors
/// * `Error::ConfigError` if the file does not exist
/// * `Error::YAMLParseError` if the content is neither JSON nor YAML
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<RawConfig> {
    let path = path.as_ref();
    if !path.is_file() {
        return Err(Error::ConfigError(format!(
            "configuration file '{}' does not exist",
            path.display()
        )));
    }
    debug!("Loading configuration from {}", path.display());
    let content = std::fs::read_to_string(path)?;
    parse_config(&content)
}

/// Finds the configuration to use when none was given explicitly.
///
/// Looks for one of [`CONFIG_FILES`] in `cwd`, then for [`RC_FILE`] in
/// `home`, and falls back to an empty configuration.
pub fn discover_config<P: AsRef<Path>>(cwd: P, home: Option<&Path>) -> Result<RawConfig> {
    let local = CONFIG_FILES.iter().map(|file| cwd.as_ref().join(file)).find(|p| p.is_file());
    if let Some(path) = local {
        info!("Using {}", path.display());
        return load_config(path);
    }

    if let Some(rc) = home.map(|home| home.join(RC_FILE)).filter(|p| p.is_file()) {
        info!("Configuration file not specified, using {} instead", rc.display());
        return load_config(rc);
    }

    info!("Configuration file not specified, using default configuration");
    Ok(RawConfig::default())
}
