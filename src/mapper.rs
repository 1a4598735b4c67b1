//! Path mapper resolution.
//! Normalizes mapper declarations into [`MappingRule`]s and decides, per
//! template file, where its output goes and whether an existing file may be replaced.

use crate::config::{AnswerContext, Destination, MapperDecl, ObjectDecl};
use crate::constants::{TEMPLATE_SUFFIX, UNDEFINED_PLACEHOLDER};
use crate::error::{Error, Result};
use log::{debug, warn};
use regex::{Captures, Regex};
use std::path::{Component, Path};
use std::sync::LazyLock;

static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[(.+?)\]").expect("placeholder pattern is valid"));

const COMPACT_SEPARATOR: &str = "=>";

/// Canonical mapping rule.
#[derive(Debug, Clone)]
pub struct MappingRule {
    /// Matched against the tail of the template path relative to the templates root.
    pub from: String,
    pub to: Destination,
    pub overwrite: bool,
}

/// Where one template goes for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedDestination {
    /// Output path relative to the destination root. Empty means "do not write".
    pub to: String,
    pub overwrite: bool,
}

/// Parses the compact `"from=>to"` form.
///
/// `to` may carry a query-like suffix; `?overwrite=false` disables overwriting
/// and anything from the first `?` on is dropped from the path.
pub fn parse_compact(decl: &str) -> Result<MappingRule> {
    let (from, to) = decl.split_once(COMPACT_SEPARATOR).ok_or_else(|| {
        Error::ConfigError(format!("mapper '{decl}' is missing '{COMPACT_SEPARATOR}'"))
    })?;
    let to = to.trim();
    let overwrite = !to.contains("overwrite=false");
    let to = match to.split_once('?') {
        Some((path, query)) if !query.is_empty() => path,
        _ => to,
    };

    Ok(MappingRule {
        from: from.trim().to_string(),
        to: Destination::Static(to.to_string()),
        overwrite,
    })
}

fn from_object(decl: ObjectDecl) -> MappingRule {
    let to = match decl.to {
        Some(Destination::Static(to)) => Destination::Static(to.trim().to_string()),
        Some(dynamic) => dynamic,
        None => Destination::Static(String::new()),
    };
    MappingRule { from: decl.from.trim().to_string(), to, overwrite: decl.overwrite != Some(false) }
}

/// Normalizes declarations in order. Malformed entries and rules with an
/// empty `from`, which would match every template, are dropped.
pub fn normalize_mappers(decls: Vec<MapperDecl>) -> Result<Vec<MappingRule>> {
    let mut rules = Vec::with_capacity(decls.len());
    for decl in decls {
        let rule = match decl {
            MapperDecl::Compact(s) => parse_compact(&s)?,
            MapperDecl::Object(o) => from_object(o),
            MapperDecl::Malformed(value) => {
                warn!("Ignoring malformed mapper: {value}");
                continue;
            }
        };
        if rule.from.is_empty() {
            warn!("Ignoring mapper with an empty 'from': {:?}", rule.to);
            continue;
        }
        rules.push(rule);
    }
    Ok(rules)
}

/// Path of `template_path` below `templates_root`, joined with `/`.
pub fn relative_key<P: AsRef<Path>, Q: AsRef<Path>>(templates_root: P, template_path: Q) -> String {
    let template_path = template_path.as_ref();
    let relative = template_path.strip_prefix(templates_root.as_ref()).unwrap_or(template_path);
    relative
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// First rule, in declaration order, whose `from` is a suffix of `key`.
pub fn find_rule<'a>(rules: &'a [MappingRule], key: &str) -> Option<&'a MappingRule> {
    rules.iter().find(|rule| key.ends_with(&rule.from))
}

/// Same directory and file name, with a trailing `.tmpl` removed.
pub fn default_destination(key: &str) -> String {
    let (dir, name) = match key.rsplit_once('/') {
        Some((dir, name)) => (Some(dir), name),
        None => (None, key),
    };
    let name = name.strip_suffix(TEMPLATE_SUFFIX).filter(|n| !n.is_empty()).unwrap_or(name);
    match dir {
        Some(dir) => format!("{dir}/{name}"),
        None => name.to_string(),
    }
}

fn stringify(value: Option<&serde_json::Value>) -> String {
    match value {
        Some(serde_json::Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
        None => UNDEFINED_PLACEHOLDER.to_string(),
    }
}

/// Replaces every `[name]` token with the context value for `name`.
pub fn substitute_placeholders(to: &str, context: &AnswerContext) -> String {
    PLACEHOLDER
        .replace_all(to, |caps: &Captures| stringify(context.get(&caps[1])))
        .into_owned()
}

/// Destination decision for one template, pending the answer context.
#[derive(Debug, Clone)]
pub struct Resolver<'a> {
    key: String,
    rule: Option<&'a MappingRule>,
}

impl Resolver<'_> {
    /// Root-relative key the rule was matched against.
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn resolve(&self, context: &AnswerContext) -> ResolvedDestination {
        match self.rule {
            Some(rule) => {
                let to = match &rule.to {
                    Destination::Static(to) => substitute_placeholders(to, context),
                    Destination::Dynamic(resolver) => resolver(context),
                };
                ResolvedDestination { to, overwrite: rule.overwrite }
            }
            None => ResolvedDestination { to: default_destination(&self.key), overwrite: true },
        }
    }
}

/// Selects the rule for `template_path` and returns a resolver for it.
pub fn resolve<'a, P: AsRef<Path>, Q: AsRef<Path>>(
    rules: &'a [MappingRule],
    templates_root: P,
    template_path: Q,
) -> Resolver<'a> {
    let key = relative_key(templates_root, template_path);
    let rule = find_rule(rules, &key);
    debug!("Template '{}' matched {:?}", key, rule.map(|r| &r.from));
    Resolver { key, rule }
}
