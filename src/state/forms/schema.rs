//! Declarative per-field rules

use super::field::FieldName;
use std::collections::BTreeMap;

/// Format constraint applied after the presence check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldFormat {
    Email,
}

/// Rules for one field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSchema {
    /// Human label used in generated messages
    pub label: String,
    pub required: bool,
    pub format: Option<FieldFormat>,
}

impl FieldSchema {
    /// An optional free-text field
    pub fn text(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            required: false,
            format: None,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn email(mut self) -> Self {
        self.format = Some(FieldFormat::Email);
        self
    }
}

/// Mapping of field name to its rules
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormSchema {
    rules: BTreeMap<FieldName, FieldSchema>,
}

impl FormSchema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, field: FieldName, schema: FieldSchema) -> Self {
        self.rules.insert(field, schema);
        self
    }

    /// Rules of the help-desk ticket form
    pub fn ticket() -> Self {
        Self::new()
            .with(
                FieldName::Name,
                FieldSchema::text("Customer's name").required(),
            )
            .with(
                FieldName::Email,
                FieldSchema::text("Customer's email").email().required(),
            )
            .with(
                FieldName::Subject,
                FieldSchema::text("Ticket's subject").required(),
            )
            .with(
                FieldName::Message,
                FieldSchema::text("Ticket's message").required(),
            )
    }

    pub fn get(&self, field: FieldName) -> Option<&FieldSchema> {
        self.rules.get(&field)
    }

    pub fn contains(&self, field: FieldName) -> bool {
        self.rules.contains_key(&field)
    }

    pub fn fields(&self) -> impl Iterator<Item = FieldName> + '_ {
        self.rules.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (FieldName, &FieldSchema)> {
        self.rules.iter().map(|(field, schema)| (*field, schema))
    }
}
