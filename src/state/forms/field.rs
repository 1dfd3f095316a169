//! Form field value objects and the field registry

use super::error::FormError;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// The fixed set of editable ticket fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldName {
    Name,
    Email,
    Subject,
    Message,
}

impl FieldName {
    /// All fields in display order
    pub const ALL: [FieldName; 4] = [
        FieldName::Name,
        FieldName::Email,
        FieldName::Subject,
        FieldName::Message,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Subject => "subject",
            Self::Message => "message",
        }
    }

    /// Title shown on the input border
    pub fn title(&self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Email => "Email",
            Self::Subject => "Subject",
            Self::Message => "Message",
        }
    }

    /// Hint shown while the input is empty
    pub fn placeholder(&self) -> &'static str {
        match self {
            Self::Name => "Customer's name",
            Self::Email => "Customer's email",
            Self::Subject => "Ticket's subject",
            Self::Message => "Ticket's message",
        }
    }

    pub fn is_multiline(&self) -> bool {
        matches!(self, Self::Message)
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Field values captured at one instant.
///
/// Lookups of a field that was not captured yield the empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FormSnapshot(BTreeMap<FieldName, String>);

impl FormSnapshot {
    pub fn value(&self, field: FieldName) -> &str {
        self.0.get(&field).map(String::as_str).unwrap_or("")
    }
}

#[cfg(test)]
impl FormSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, field: FieldName, value: impl Into<String>) -> Self {
        self.insert(field, value);
        self
    }

    pub fn insert(&mut self, field: FieldName, value: impl Into<String>) {
        self.0.insert(field, value.into());
    }

    pub fn iter(&self) -> impl Iterator<Item = (FieldName, &str)> {
        self.0.iter().map(|(field, value)| (*field, value.as_str()))
    }
}

impl FromIterator<(FieldName, String)> for FormSnapshot {
    fn from_iter<I: IntoIterator<Item = (FieldName, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// A single bound input and its raw value
#[derive(Debug, Clone)]
pub struct FormField {
    pub name: FieldName,
    pub value: String,
}

impl FormField {
    pub fn new(name: FieldName) -> Self {
        Self {
            name,
            value: String::new(),
        }
    }

    pub fn label(&self) -> &'static str {
        self.name.title()
    }

    pub fn is_multiline(&self) -> bool {
        self.name.is_multiline()
    }

    /// Push a character to the field value
    pub fn push_char(&mut self, c: char) {
        self.value.push(c);
    }

    /// Remove the last character from the field value
    pub fn pop_char(&mut self) {
        self.value.pop();
    }

    pub fn clear(&mut self) {
        self.value.clear();
    }
}

/// The editable fields of one mounted form, in declaration order
#[derive(Debug, Clone)]
pub struct FieldRegistry {
    fields: Vec<FormField>,
}

impl FieldRegistry {
    /// Bind the declared fields. Each name may appear once.
    pub fn bind(bindings: &[FieldName]) -> Result<Self, FormError> {
        if bindings.is_empty() {
            return Err(FormError::NoFields);
        }

        let mut fields: Vec<FormField> = Vec::with_capacity(bindings.len());
        for &name in bindings {
            if fields.iter().any(|f| f.name == name) {
                return Err(FormError::DuplicateBinding(name));
            }
            fields.push(FormField::new(name));
        }

        Ok(Self { fields })
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn names(&self) -> impl Iterator<Item = FieldName> + '_ {
        self.fields.iter().map(|f| f.name)
    }

    pub fn contains(&self, name: FieldName) -> bool {
        self.fields.iter().any(|f| f.name == name)
    }

    pub fn get(&self, index: usize) -> Option<&FormField> {
        self.fields.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut FormField> {
        self.fields.get_mut(index)
    }

    /// Copy every current value in one pass
    pub fn snapshot(&self) -> FormSnapshot {
        self.fields
            .iter()
            .map(|f| (f.name, f.value.clone()))
            .collect()
    }

    pub fn clear_all(&mut self) {
        for field in &mut self.fields {
            field.clear();
        }
    }
}

#[cfg(test)]
impl FieldRegistry {
    pub fn field(&self, name: FieldName) -> Option<&FormField> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn field_mut(&mut self, name: FieldName) -> Option<&mut FormField> {
        self.fields.iter_mut().find(|f| f.name == name)
    }
}
