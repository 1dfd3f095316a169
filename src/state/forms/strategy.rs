//! Validation strategy: when validation runs and what it currently says

use super::field::{FieldName, FormSnapshot};
use super::schema::FormSchema;
use super::validation::{self, ValidationResult};

/// Capability the form controller uses to validate its fields.
///
/// `handle_validation` and `validate` are the only mutators.
pub trait ValidationStrategy: Send {
    /// Blur hook: validate one field and update only its entry
    fn handle_validation(&mut self, field: FieldName, values: &FormSnapshot);

    /// Validate every known field. Returns `true` when any field has errors.
    fn validate(&mut self, values: &FormSnapshot) -> bool;

    /// True iff the field has no current messages. Untouched fields are valid.
    fn is_valid(&self, field: FieldName) -> bool;

    fn get_validation_messages(&self, field: FieldName) -> &[String];

    /// Forget every result, returning to the untouched state
    fn clear_validations(&mut self);

    /// Rules this strategy validates against
    fn schema(&self) -> &FormSchema;
}

/// Strategy backed by a [`FormSchema`] and the synchronous engine
#[derive(Debug, Clone)]
pub struct SchemaStrategy {
    schema: FormSchema,
    results: ValidationResult,
}

impl SchemaStrategy {
    pub fn new(schema: FormSchema) -> Self {
        Self {
            schema,
            results: ValidationResult::new(),
        }
    }
}

impl ValidationStrategy for SchemaStrategy {
    fn handle_validation(&mut self, field: FieldName, values: &FormSnapshot) {
        let messages = validation::validate_field(&self.schema, field, values);
        tracing::debug!(%field, errors = messages.len(), "field validated");
        self.results.set(field, messages);
    }

    fn validate(&mut self, values: &FormSnapshot) -> bool {
        self.results.merge(validation::validate(&self.schema, values));
        let has_errors = self.results.has_errors();
        if has_errors {
            let invalid: Vec<_> = self.results.invalid_fields().collect();
            tracing::debug!(?invalid, "form has errors");
        }
        has_errors
    }

    fn is_valid(&self, field: FieldName) -> bool {
        self.results.is_valid(field)
    }

    fn get_validation_messages(&self, field: FieldName) -> &[String] {
        self.results.messages(field)
    }

    fn clear_validations(&mut self) {
        self.results.clear();
    }

    fn schema(&self) -> &FormSchema {
        &self.schema
    }
}
