//! Template rendering for scaffoldify.
//! Interpolates `<%= expr %>` expressions against the answer context using MiniJinja.
use crate::config::AnswerContext;
use crate::error::{Error, Result};
use cruet::Inflector;
use minijinja::syntax::SyntaxConfig;
use minijinja::{AutoEscape, Environment, UndefinedBehavior};

/// Trait for template rendering engines.
pub trait TemplateRenderer {
    /// Renders `template` with the given context.
    ///
    /// # Arguments
    /// * `name` - Name used in error messages, usually the template path
    /// * `template` - Template text to render
    /// * `context` - Variables in scope while rendering
    ///
    /// # Errors
    /// * `Error::RenderError` on invalid syntax or undefined variables
    fn render(&self, name: &str, template: &str, context: &AnswerContext) -> Result<String>;
}

/// MiniJinja-based rendering engine with `<%= %>` expressions, `<% %>`
/// statements and `<%# %>` comments. `{{` and `{%` are plain text.
pub struct MiniJinjaRenderer {
    env: Environment<'static>,
}

impl MiniJinjaRenderer {
    /// Creates the renderer.
    ///
    /// Undefined variables are errors, nothing is auto-escaped and a trailing
    /// newline is kept, so text without expressions renders unchanged.
    pub fn new() -> Result<Self> {
        let syntax = SyntaxConfig::builder()
            .block_delimiters("<%", "%>")
            .variable_delimiters("<%=", "%>")
            .comment_delimiters("<%#", "%>")
            .build()
            .map_err(|source| Error::RenderError { template: "<syntax>".to_string(), source })?;

        let mut env = Environment::new();
        env.set_syntax(syntax);
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        env.set_auto_escape_callback(|_| AutoEscape::None);
        env.set_keep_trailing_newline(true);
        register_case_filters(&mut env);
        Ok(Self { env })
    }
}

fn register_case_filters(env: &mut Environment<'static>) {
    env.add_filter("camel_case", |s: String| s.to_camel_case());
    env.add_filter("pascal_case", |s: String| s.to_pascal_case());
    env.add_filter("snake_case", |s: String| s.to_snake_case());
    env.add_filter("kebab_case", |s: String| s.to_kebab_case());
    env.add_filter("screaming_snake_case", |s: String| s.to_screaming_snake_case());
    env.add_filter("title_case", |s: String| s.to_title_case());
    env.add_filter("train_case", |s: String| s.to_train_case());
}

impl TemplateRenderer for MiniJinjaRenderer {
    fn render(&self, name: &str, template: &str, context: &AnswerContext) -> Result<String> {
        self.env
            .render_named_str(name, template, context)
            .map_err(|source| Error::RenderError { template: name.to_string(), source })
    }
}
