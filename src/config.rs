//! SCM configuration and validation
//!
//! Two string fields drive the adapter: a view tag and a newline-delimited
//! block of load rules. Validation runs at configuration time, never during
//! a build, and reports structured per-field errors so a form layer can
//! attach them to the right input.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cleartool::ClearToolError;
use crate::scm::HistoryFetcher;

/// Adapter configuration as entered by the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScmConfig {
    /// View tag identifying the ClearCase view
    pub view_name: String,

    /// Newline-delimited load rules scoping history and checkout
    pub load_rules: String,
}

impl ScmConfig {
    pub fn new(view_name: impl Into<String>, load_rules: impl Into<String>) -> Self {
        Self {
            view_name: view_name.into(),
            load_rules: load_rules.into(),
        }
    }

    /// Load rules split into individual, trimmed rules
    pub fn load_rules_as_list(&self) -> Vec<String> {
        split_load_rules(&self.load_rules)
    }
}

/// Which configuration field a validation error belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigField {
    ViewName,
    LoadRules,
}

impl ConfigField {
    pub fn name(self) -> &'static str {
        match self {
            Self::ViewName => "view name",
            Self::LoadRules => "load rules",
        }
    }
}

/// A single validation failure, attached to a field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: ConfigField,
    pub message: String,
}

impl FieldError {
    fn new(field: ConfigField, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field.name(), self.message)
    }
}

/// Errors raised by configuration validation
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid configuration: {}", format_field_errors(.0))]
    Invalid(Vec<FieldError>),

    /// Could not ask the tool whether the view exists
    #[error(transparent)]
    Tool(#[from] ClearToolError),
}

fn format_field_errors(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Split a load-rule block into non-empty, trimmed rules.
///
/// Rules are separated by newline runs; both `\r\n` and `\n` conventions
/// are accepted and empty segments are dropped.
pub fn split_load_rules(raw: &str) -> Vec<String> {
    raw.split(['\r', '\n'])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Check the load-rule block without touching the tool.
pub fn validate_load_rules(value: &str) -> Vec<FieldError> {
    let mut errors = Vec::new();
    let rules = split_load_rules(value);

    if rules.is_empty() {
        errors.push(FieldError::new(ConfigField::LoadRules, "must not be empty"));
        return errors;
    }

    for rule in &rules {
        if rule.chars().any(char::is_whitespace) {
            errors.push(FieldError::new(
                ConfigField::LoadRules,
                format!("rule {rule:?} contains whitespace"),
            ));
        }
    }

    let mut seen = std::collections::HashSet::new();
    for rule in &rules {
        if !seen.insert(rule.as_str()) {
            errors.push(FieldError::new(
                ConfigField::LoadRules,
                format!("rule {rule:?} is duplicated"),
            ));
        }
    }

    errors
}

/// Check the view tag without touching the tool.
pub fn validate_view_name(value: &str) -> Vec<FieldError> {
    let mut errors = Vec::new();
    let trimmed = value.trim();

    if trimmed.is_empty() {
        errors.push(FieldError::new(ConfigField::ViewName, "must not be empty"));
        return errors;
    }

    if trimmed.chars().any(char::is_whitespace) {
        errors.push(FieldError::new(
            ConfigField::ViewName,
            "must not contain whitespace",
        ));
    }

    errors
}

/// Validate a full configuration, including view existence.
///
/// Field-level checks run first; the tool is only consulted when the view
/// tag is otherwise well-formed.
pub fn validate(config: &ScmConfig, fetcher: &impl HistoryFetcher) -> Result<(), ConfigError> {
    let mut errors = validate_load_rules(&config.load_rules);
    let view_errors = validate_view_name(&config.view_name);
    let view_well_formed = view_errors.is_empty();
    errors.extend(view_errors);

    if view_well_formed && !fetcher.view_exists(config.view_name.trim())? {
        errors.push(FieldError::new(
            ConfigField::ViewName,
            format!("view {:?} does not exist", config.view_name.trim()),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::Invalid(errors))
    }
}
