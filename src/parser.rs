//! Parsing of inquiry specifications and preloaded answers.

use crate::config::AnswerContext;
use crate::error::{Error, Result};
use serde::Deserialize;
use std::io::Read;

/// Kind of prompt shown for an inquiry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InquiryKind {
    #[default]
    Input,
    Number,
    Confirm,
    List,
    Checkbox,
    Password,
}

/// A selectable choice, either a bare string or a `{name, value}` pair.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Choice {
    Plain(String),
    Named { name: String, value: serde_json::Value },
}

impl Choice {
    pub fn name(&self) -> &str {
        match self {
            Choice::Plain(name) | Choice::Named { name, .. } => name,
        }
    }

    pub fn value(&self) -> serde_json::Value {
        match self {
            Choice::Plain(name) => serde_json::Value::String(name.clone()),
            Choice::Named { value, .. } => value.clone(),
        }
    }

    fn matches(&self, value: &serde_json::Value) -> bool {
        self.value() == *value || value.as_str() == Some(self.name())
    }
}

fn default_when() -> bool {
    true
}

/// One question of the inquiry specification.
#[derive(Debug, Clone, Deserialize)]
pub struct Inquiry {
    #[serde(rename = "type", default)]
    pub kind: InquiryKind,
    pub name: String,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub default: Option<serde_json::Value>,
    #[serde(default)]
    pub choices: Vec<Choice>,
    /// Questions with `when: false` are not asked.
    #[serde(default = "default_when")]
    pub when: bool,
}

impl Inquiry {
    /// Prompt text; falls back to the answer name.
    pub fn prompt(&self) -> &str {
        self.message.as_deref().unwrap_or(&self.name)
    }
}

/// Parses an inquiry specification: `null` is no questions, an object is a
/// single question and an array is a list of questions.
pub fn parse_inquiries(value: &serde_json::Value) -> Result<Vec<Inquiry>> {
    let inquiries = match value {
        serde_json::Value::Null => Vec::new(),
        serde_json::Value::Object(_) => vec![serde_json::from_value(value.clone())?],
        serde_json::Value::Array(_) => serde_json::from_value(value.clone())?,
        other => {
            return Err(Error::ConfigError(format!(
                "inquiries must be a list of questions, got {other}"
            )))
        }
    };
    Ok(inquiries)
}

/// Index of the default choice for a list question, 0 when there is none.
pub fn get_list_default(inquiry: &Inquiry) -> usize {
    match &inquiry.default {
        Some(serde_json::Value::Number(n)) => {
            n.as_u64().map(|i| i as usize).filter(|i| *i < inquiry.choices.len()).unwrap_or(0)
        }
        Some(default) => inquiry.choices.iter().position(|c| c.matches(default)).unwrap_or(0),
        None => 0,
    }
}

/// Per-choice checked state for a checkbox question.
pub fn get_checkbox_defaults(inquiry: &Inquiry) -> Vec<bool> {
    let defaults: &[serde_json::Value] = match &inquiry.default {
        Some(serde_json::Value::Array(values)) => values.as_slice(),
        _ => &[],
    };
    inquiry.choices.iter().map(|c| defaults.iter().any(|d| c.matches(d))).collect()
}

/// Default text shown for an input question.
pub fn get_text_default(inquiry: &Inquiry) -> Option<String> {
    match &inquiry.default {
        None | Some(serde_json::Value::Null) => None,
        Some(serde_json::Value::String(s)) => Some(s.clone()),
        Some(other) => Some(other.to_string()),
    }
}

/// Default answer for a confirm question.
pub fn get_confirm_default(inquiry: &Inquiry) -> bool {
    inquiry.default.as_ref().and_then(|v| v.as_bool()).unwrap_or(false)
}

/// Parses preloaded answers. Blank input means no answers.
pub fn parse_answers(content: &str) -> Result<AnswerContext> {
    let content = content.trim();
    if content.is_empty() {
        return Ok(AnswerContext::new());
    }
    match serde_json::from_str::<serde_json::Value>(content)? {
        serde_json::Value::Object(map) => Ok(map.into_iter().collect()),
        other => Err(Error::ConfigError(format!("answers must be a JSON object, got {other}"))),
    }
}

/// Reads preloaded answers as JSON from stdin.
pub fn load_answers_from_stdin() -> Result<AnswerContext> {
    let mut buffer = String::new();
    std::io::stdin().read_to_string(&mut buffer)?;
    parse_answers(&buffer)
}
