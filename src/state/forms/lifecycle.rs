//! Submission lifecycle types shared between the form and its collaborators

use super::field::{FieldName, FormSnapshot};
use serde::Serialize;

/// Overall submission status of one form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LifecycleState {
    #[default]
    Idle,
    Validating,
    Submitting,
    Fulfilled,
    Failed,
}

impl LifecycleState {
    /// Resting state implied by the externally owned props
    pub fn from_props(props: &LifecycleProps) -> Self {
        if props.is_loading {
            Self::Submitting
        } else if props.is_fulfilled {
            Self::Fulfilled
        } else if props.show_error {
            Self::Failed
        } else {
            Self::Idle
        }
    }
}

/// Read-only lifecycle flags owned by the submission reporter
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LifecycleProps {
    pub is_loading: bool,
    pub is_fulfilled: bool,
    pub show_error: bool,
    pub response_message: String,
    pub is_authenticated: bool,
}

/// Fields supplied by the enclosing context rather than the user
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmissionContext {
    pub agent_name: String,
    pub agent_email: String,
}

/// Everything handed to the submit collaborator
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionPayload {
    #[serde(flatten)]
    pub fields: FormSnapshot,
    pub agent_name: String,
    pub agent_email: String,
}

impl SubmissionPayload {
    pub fn new(fields: FormSnapshot, context: &SubmissionContext) -> Self {
        Self {
            fields,
            agent_name: context.agent_name.clone(),
            agent_email: context.agent_email.clone(),
        }
    }

    /// Customer the ticket is written for
    pub fn customer(&self) -> &str {
        self.fields.value(FieldName::Name)
    }
}

/// Collaborators the form controller calls out to.
///
/// `submit` is fire-and-forget: its result comes back later as new
/// [`LifecycleProps`].
#[cfg_attr(test, mockall::automock)]
pub trait FormHooks {
    fn submit(&mut self, payload: SubmissionPayload);

    /// Clear the submission result flags held by the reporter
    fn reset(&mut self);
}
