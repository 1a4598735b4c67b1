//! Renders one template and writes it to its destination.

use crate::config::AnswerContext;
use crate::error::{Error, Result};
use crate::renderer::TemplateRenderer;
use std::fs;
use std::path::Path;

/// Reads `template_file`, renders it against `context` and writes the
/// result to `dest_file`, creating missing parent directories.
///
/// Existing content at `dest_file` is always replaced; whether to call this
/// at all is the caller's decision.
///
/// # Errors
/// * `Error::ReadError` if the template is unreadable or not UTF-8
/// * `Error::RenderError` if rendering fails
/// * `Error::WriteError` if the directory or file cannot be written
pub fn materialize<P: AsRef<Path>, Q: AsRef<Path>>(
    renderer: &dyn TemplateRenderer,
    template_file: P,
    dest_file: Q,
    context: &AnswerContext,
) -> Result<()> {
    let template_file = template_file.as_ref();
    let dest_file = dest_file.as_ref();
    let template_name = template_file.display().to_string();

    let content = fs::read_to_string(template_file)
        .map_err(|source| Error::ReadError { template: template_name.clone(), source })?;
    let output = renderer.render(&template_name, &content, context)?;

    let write_error = |source| Error::WriteError { target: dest_file.display().to_string(), source };
    if let Some(parent) = dest_file.parent() {
        fs::create_dir_all(parent).map_err(write_error)?;
    }
    fs::write(dest_file, output).map_err(write_error)
}
