//! Validation engine
//!
//! Pure functions from a [`FormSchema`] and a [`FormSnapshot`] to per-field
//! messages. Nothing here holds state.

use super::field::{FieldName, FormSnapshot};
use super::schema::{FieldFormat, FieldSchema, FormSchema};
use regex::Regex;
use std::collections::BTreeMap;
use std::sync::OnceLock;

/// Dot-atom local part, then dot-separated host labels ending in an alphabetic TLD
const EMAIL_PATTERN: &str = concat!(
    r"^[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]+(?:\.[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]+)*",
    r"@(?:[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?\.)+[A-Za-z]{2,}$",
);

static EMAIL_RE: OnceLock<Option<Regex>> = OnceLock::new();

/// Current messages per field. A missing key or an empty list means valid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationResult {
    messages: BTreeMap<FieldName, Vec<String>>,
}

impl ValidationResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_valid(&self, field: FieldName) -> bool {
        self.messages(field).is_empty()
    }

    pub fn messages(&self, field: FieldName) -> &[String] {
        self.messages.get(&field).map(Vec::as_slice).unwrap_or(&[])
    }

    /// True if any field carries at least one message
    pub fn has_errors(&self) -> bool {
        self.messages.values().any(|m| !m.is_empty())
    }

    /// Replace the entry of one field, leaving the others untouched
    pub fn set(&mut self, field: FieldName, messages: Vec<String>) {
        self.messages.insert(field, messages);
    }

    /// Copy every entry of `other` over this result
    pub fn merge(&mut self, other: ValidationResult) {
        self.messages.extend(other.messages);
    }

    pub fn invalid_fields(&self) -> impl Iterator<Item = FieldName> + '_ {
        self.messages
            .iter()
            .filter(|(_, m)| !m.is_empty())
            .map(|(field, _)| *field)
    }

    pub fn clear(&mut self) {
        self.messages.clear();
    }
}

/// Validate every field the schema knows about
pub fn validate(schema: &FormSchema, values: &FormSnapshot) -> ValidationResult {
    let mut result = ValidationResult::new();
    for (field, rules) in schema.iter() {
        result.set(field, check(rules, values.value(field)));
    }
    result
}

/// Validate a single field. Fields without a schema entry have no messages.
pub fn validate_field(schema: &FormSchema, field: FieldName, values: &FormSnapshot) -> Vec<String> {
    schema
        .get(field)
        .map(|rules| check(rules, values.value(field)))
        .unwrap_or_default()
}

/// Join messages into one sentence for inline help
pub fn help_text(messages: &[String]) -> String {
    if messages.is_empty() {
        String::new()
    } else {
        format!("{}.", messages.join(", "))
    }
}

/// Presence first, then format; stop at the first failure
fn check(rules: &FieldSchema, value: &str) -> Vec<String> {
    if value.is_empty() {
        return if rules.required {
            vec![format!("{} is required", rules.label)]
        } else {
            Vec::new()
        };
    }

    match rules.format {
        Some(FieldFormat::Email) if !is_email(value) => {
            vec![format!("{} must be a valid email", rules.label)]
        }
        _ => Vec::new(),
    }
}

fn is_email(value: &str) -> bool {
    EMAIL_RE
        .get_or_init(|| Regex::new(EMAIL_PATTERN).ok())
        .as_ref()
        .is_some_and(|re| re.is_match(value))
}
