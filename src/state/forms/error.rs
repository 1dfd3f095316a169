//! Invariant violations detected while binding a form

use super::field::FieldName;
use thiserror::Error;

/// Errors raised when a form is constructed with inconsistent bindings.
///
/// These are programming errors: a form that fails to bind is never shown.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("form declares no fields")]
    NoFields,

    #[error("field `{0}` is bound more than once")]
    DuplicateBinding(FieldName),

    #[error("field `{0}` is bound but has no schema entry")]
    MissingSchema(FieldName),

    #[error("schema entry `{0}` has no bound field")]
    UnboundField(FieldName),
}
