//! Submission lifecycle reporter
//!
//! Owns the lifecycle props the ticket form renders from. The app feeds it
//! submission outcomes; the form only ever reads a copy.

use crate::state::forms::LifecycleProps;

#[derive(Debug, Clone, Default)]
pub struct SubmissionReporter {
    props: LifecycleProps,
}

impl SubmissionReporter {
    pub fn new(is_authenticated: bool) -> Self {
        Self {
            props: LifecycleProps {
                is_authenticated,
                ..Default::default()
            },
        }
    }

    pub fn props(&self) -> LifecycleProps {
        self.props.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.props.is_loading
    }

    /// A payload went out
    pub fn begin(&mut self) {
        self.props.is_loading = true;
        self.props.is_fulfilled = false;
        self.props.show_error = false;
    }

    pub fn fulfill(&mut self, message: impl Into<String>) {
        self.props.is_loading = false;
        self.props.is_fulfilled = true;
        self.props.show_error = false;
        self.props.response_message = message.into();
    }

    pub fn fail(&mut self, message: impl Into<String>) {
        self.props.is_loading = false;
        self.props.is_fulfilled = false;
        self.props.show_error = true;
        self.props.response_message = message.into();
    }

    /// Clear the result flags; the last message stays visible
    pub fn reset(&mut self) {
        self.props.is_fulfilled = false;
        self.props.show_error = false;
    }
}
