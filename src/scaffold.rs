//! Scaffold orchestration.
//! Compiles the raw configuration, collects answers and materializes every
//! template of the tree at its resolved destination.

use crate::config::{AnswerContext, RawConfig, Transform};
use crate::error::{Error, Result};
use crate::mapper::{normalize_mappers, resolve, MappingRule, ResolvedDestination};
use crate::materializer::materialize;
use crate::prompt::AnswerCollector;
use crate::renderer::TemplateRenderer;
use crate::walker::TemplateTree;
use log::{debug, info};
use std::fmt;
use std::path::{Path, PathBuf};

/// Configuration ready for a run.
pub struct NormalizedConfig {
    pub templates: PathBuf,
    pub cwd: PathBuf,
    pub mappers: Vec<MappingRule>,
    pub options: AnswerContext,
    pub transform: Transform,
    pub inquiries: serde_json::Value,
}

impl fmt::Debug for NormalizedConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NormalizedConfig")
            .field("templates", &self.templates)
            .field("cwd", &self.cwd)
            .field("mappers", &self.mappers)
            .field("options", &self.options)
            .field("inquiries", &self.inquiries)
            .finish_non_exhaustive()
    }
}

impl NormalizedConfig {
    /// Validates and normalizes a raw configuration.
    ///
    /// # Errors
    /// * `Error::ConfigError` if no templates root is configured or a mapper is malformed
    /// * `Error::TemplatesDoNotExistError` if the templates root is missing
    pub fn compile(raw: RawConfig) -> Result<Self> {
        let templates = raw
            .templates
            .ok_or_else(|| Error::ConfigError("template directory is not provided".to_string()))?;
        if !templates.exists() {
            return Err(Error::TemplatesDoNotExistError {
                templates_dir: templates.display().to_string(),
            });
        }

        let cwd = match raw.cwd {
            Some(cwd) => cwd,
            None => std::env::current_dir()?.canonicalize()?,
        };

        Ok(Self {
            templates,
            cwd,
            mappers: normalize_mappers(raw.mappers)?,
            options: raw.options,
            transform: raw.transform.unwrap_or_else(|| Box::new(|answers: AnswerContext| answers)),
            inquiries: raw.inquiries,
        })
    }
}

/// What happened to one template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileAction {
    /// Written to a new file.
    Write,
    /// Replaced an existing file.
    Overwrite,
    /// Destination exists and overwriting is disabled.
    Skip,
}

impl fmt::Display for FileAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let action = match self {
            FileAction::Write => "write",
            FileAction::Overwrite => "overwrite",
            FileAction::Skip => "skip",
        };
        f.write_str(action)
    }
}

/// Absolute target of a resolved destination, always below `cwd`.
pub fn target_path<P: AsRef<Path>>(cwd: P, to: &str) -> PathBuf {
    cwd.as_ref().join(to.trim_start_matches('/'))
}

/// Decides what to do with a target given its current state on disk.
pub fn file_action(target_exists: bool, overwrite: bool) -> FileAction {
    match (target_exists, overwrite) {
        (false, _) => FileAction::Write,
        (true, true) => FileAction::Overwrite,
        (true, false) => FileAction::Skip,
    }
}

/// Wires answer collection, mapper resolution and materialization together.
pub struct Scaffolder<'a> {
    renderer: &'a dyn TemplateRenderer,
    collector: &'a dyn AnswerCollector,
}

impl<'a> Scaffolder<'a> {
    pub fn new(renderer: &'a dyn TemplateRenderer, collector: &'a dyn AnswerCollector) -> Self {
        Self { renderer, collector }
    }

    /// Runs one scaffold and returns the final answer context.
    ///
    /// # Flow
    /// 1. Compiles the configuration
    /// 2. Collects answers for the configured inquiries
    /// 3. Merges answers over the static options
    /// 4. Applies the transform
    /// 5. Materializes every template at its resolved destination
    pub fn run(&self, raw: RawConfig) -> Result<AnswerContext> {
        let config = NormalizedConfig::compile(raw)?;
        let answers = self.collector.collect(&config.inquiries)?;

        let mut context = config.options;
        context.extend(answers);
        let context = (config.transform)(context);

        let tree = TemplateTree::new(&config.templates);
        for template in tree.files() {
            let template = template?;
            let destination = resolve(&config.mappers, &config.templates, &template).resolve(&context);
            self.process(&template, &config.cwd, destination, &context)?;
        }
        Ok(context)
    }

    fn process(
        &self,
        template: &Path,
        cwd: &Path,
        destination: ResolvedDestination,
        context: &AnswerContext,
    ) -> Result<()> {
        if destination.to.is_empty() {
            debug!("Skipping '{}': no destination", template.display());
            return Ok(());
        }
        let target = target_path(cwd, &destination.to);
        let action = file_action(target.exists(), destination.overwrite);
        if action != FileAction::Skip {
            materialize(self.renderer, template, &target, context)?;
        }
        info!("{}: '{}'", action, target.display());
        Ok(())
    }
}
