//! Answer collection.
//! The scaffold run hands the configured inquiries to an [`AnswerCollector`]
//! and merges whatever it returns over the static options.

use crate::config::AnswerContext;
use crate::error::{Error, Result};
use crate::parser::{
    get_checkbox_defaults, get_confirm_default, get_list_default, get_text_default,
    parse_inquiries, Inquiry, InquiryKind,
};
use dialoguer::{Confirm, Input, MultiSelect, Password, Select};
use log::debug;

/// Source of user answers.
pub trait AnswerCollector {
    /// Collects answers for the opaque `inquiries` specification.
    fn collect(&self, inquiries: &serde_json::Value) -> Result<AnswerContext>;
}

/// Returns the same answers whatever is asked.
#[derive(Debug, Clone, Default)]
pub struct StaticAnswers(pub AnswerContext);

impl AnswerCollector for StaticAnswers {
    fn collect(&self, _inquiries: &serde_json::Value) -> Result<AnswerContext> {
        Ok(self.0.clone())
    }
}

/// Interactive terminal prompts.
///
/// Questions already answered by the preloaded answers are not asked.
#[derive(Debug, Default)]
pub struct DialoguerCollector {
    preloaded: AnswerContext,
}

impl DialoguerCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_preloaded(preloaded: AnswerContext) -> Self {
        Self { preloaded }
    }

    fn ask(&self, inquiry: &Inquiry) -> Result<serde_json::Value> {
        let prompt = inquiry.prompt();
        let value = match inquiry.kind {
            InquiryKind::Input => {
                let mut input = Input::<String>::new().with_prompt(prompt);
                if let Some(default) = get_text_default(inquiry) {
                    input = input.default(default);
                }
                serde_json::Value::String(input.interact_text()?)
            }
            InquiryKind::Number => {
                let mut input = Input::<f64>::new().with_prompt(prompt);
                if let Some(default) = inquiry.default.as_ref().and_then(|v| v.as_f64()) {
                    input = input.default(default);
                }
                number_value(input.interact_text()?)
            }
            InquiryKind::Password => {
                serde_json::Value::String(Password::new().with_prompt(prompt).interact()?)
            }
            InquiryKind::Confirm => serde_json::Value::Bool(
                Confirm::new().with_prompt(prompt).default(get_confirm_default(inquiry)).interact()?,
            ),
            InquiryKind::List => {
                let choices = require_choices(inquiry)?;
                let selection = Select::new()
                    .with_prompt(prompt)
                    .default(get_list_default(inquiry))
                    .items(&choices)
                    .interact()?;
                inquiry.choices[selection].value()
            }
            InquiryKind::Checkbox => {
                let choices = require_choices(inquiry)?;
                let selection = MultiSelect::new()
                    .with_prompt(prompt)
                    .items_checked(choices.into_iter().zip(get_checkbox_defaults(inquiry)))
                    .interact()?;
                serde_json::Value::Array(
                    selection.into_iter().map(|i| inquiry.choices[i].value()).collect(),
                )
            }
        };
        Ok(value)
    }
}

fn require_choices(inquiry: &Inquiry) -> Result<Vec<&str>> {
    if inquiry.choices.is_empty() {
        return Err(Error::ConfigError(format!("question '{}' has no choices", inquiry.name)));
    }
    Ok(inquiry.choices.iter().map(|c| c.name()).collect())
}

fn number_value(n: f64) -> serde_json::Value {
    if n.fract() == 0.0 && n.abs() < i64::MAX as f64 {
        serde_json::Value::from(n as i64)
    } else {
        serde_json::Number::from_f64(n).map(serde_json::Value::Number).unwrap_or_default()
    }
}

impl AnswerCollector for DialoguerCollector {
    fn collect(&self, inquiries: &serde_json::Value) -> Result<AnswerContext> {
        let mut answers = AnswerContext::new();
        for inquiry in parse_inquiries(inquiries)? {
            let value = if let Some(preloaded) = self.preloaded.get(&inquiry.name) {
                debug!("Using preloaded answer for '{}'", inquiry.name);
                preloaded.clone()
            } else if !inquiry.when {
                match &inquiry.default {
                    Some(default) => default.clone(),
                    None => continue,
                }
            } else {
                self.ask(&inquiry)?
            };
            answers.insert(inquiry.name, value);
        }
        // Preloaded answers without a matching question are kept as well.
        for (key, value) in &self.preloaded {
            answers.entry(key.clone()).or_insert_with(|| value.clone());
        }
        Ok(answers)
    }
}
