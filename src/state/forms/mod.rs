//! Form domain layer
//!
//! The validation-driven state machine behind the ticket form:
//! - `field`: field names, the field registry and snapshots
//! - `schema`: per-field rules
//! - `validation`: the stateless validation engine
//! - `strategy`: when validation runs and what it currently reports
//! - `lifecycle`: submission lifecycle props, payload and hooks
//! - `controller`: the form controller tying it together

mod controller;
mod error;
mod field;
mod lifecycle;
mod schema;
mod strategy;
mod validation;

pub use controller::{
    ButtonKind, FieldDecoration, FormController, FormDecoration, SubmitButton, SubmitOutcome,
};
pub use field::FormField;
pub use lifecycle::{
    FormHooks, LifecycleProps, LifecycleState, SubmissionContext, SubmissionPayload,
};

#[cfg(test)]
pub use field::{FieldName, FormSnapshot};
