//! Form controller
//!
//! Binds the field registry, the validation strategy and the submission
//! lifecycle of one mounted ticket form. Every method runs to completion on
//! the UI thread; submission results arrive later through [`FormController::observe`].

use super::error::FormError;
use super::field::{FieldName, FieldRegistry, FormField};
use super::lifecycle::{
    FormHooks, LifecycleProps, LifecycleState, SubmissionContext, SubmissionPayload,
};
use super::schema::FormSchema;
use super::strategy::{SchemaStrategy, ValidationStrategy};
use super::validation;

pub const LOGIN_FIRST_LABEL: &str = "Login first!";
pub const RETRY_LABEL: &str = "Try again";
pub const SEND_LABEL: &str = "Send";

/// Visual state of one field group
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldDecoration {
    Normal,
    Error,
}

/// Visual state of the whole form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormDecoration {
    Ready,
    Loading,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonKind {
    Success,
    Error,
}

/// Everything needed to draw the submit button
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitButton {
    pub label: &'static str,
    pub kind: ButtonKind,
    pub is_loading: bool,
    pub is_disabled: bool,
}

impl SubmitButton {
    /// Whether a press should reach the controller
    pub fn accepts_press(&self) -> bool {
        !self.is_disabled && !self.is_loading
    }
}

/// What happened to a submit attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Validation failed; messages are shown inline
    Invalid,
    /// The payload was handed to the submit hook
    Dispatched,
}

pub struct FormController {
    registry: FieldRegistry,
    strategy: Box<dyn ValidationStrategy>,
    context: SubmissionContext,
    props: LifecycleProps,
    state: LifecycleState,
    /// Set once the current fulfillment has cleared the form
    fulfillment_handled: bool,
    /// Index into the registry; `registry.len()` is the submit button
    focus: usize,
}

impl FormController {
    /// Bind `bindings` and check them against the strategy's schema
    pub fn new(
        bindings: &[FieldName],
        strategy: Box<dyn ValidationStrategy>,
        context: SubmissionContext,
    ) -> Result<Self, FormError> {
        let registry = FieldRegistry::bind(bindings)?;
        check_schema(&registry, strategy.schema())?;

        Ok(Self {
            registry,
            strategy,
            context,
            props: LifecycleProps::default(),
            state: LifecycleState::Idle,
            fulfillment_handled: false,
            focus: 0,
        })
    }

    /// The help-desk ticket form with its default rules
    pub fn ticket(context: SubmissionContext) -> Result<Self, FormError> {
        Self::new(
            &FieldName::ALL,
            Box::new(SchemaStrategy::new(FormSchema::ticket())),
            context,
        )
    }

    pub fn fields(&self) -> &FieldRegistry {
        &self.registry
    }

    pub fn props(&self) -> &LifecycleProps {
        &self.props
    }

    pub fn lifecycle_state(&self) -> LifecycleState {
        self.state
    }

    // === Focus ===

    pub fn focus(&self) -> usize {
        self.focus
    }

    pub fn focused_field(&self) -> Option<FieldName> {
        self.registry.get(self.focus).map(|f| f.name)
    }

    pub fn is_submit_focused(&self) -> bool {
        self.focus == self.registry.len()
    }

    /// Focus positions: every field plus the submit button
    fn focus_slots(&self) -> usize {
        self.registry.len() + 1
    }

    pub fn focus_next(&mut self) {
        let next = (self.focus + 1) % self.focus_slots();
        self.set_focus(next);
    }

    pub fn focus_prev(&mut self) {
        let prev = if self.focus == 0 {
            self.focus_slots() - 1
        } else {
            self.focus - 1
        };
        self.set_focus(prev);
    }

    /// Move focus, blurring the field that loses it
    pub fn set_focus(&mut self, index: usize) {
        let index = index.min(self.registry.len());
        if index == self.focus {
            return;
        }
        if let Some(field) = self.focused_field() {
            self.blur(field);
        }
        tracing::debug!(from = self.focus, to = index, "focus moved");
        self.focus = index;
    }

    /// Blur hook for one field
    pub fn blur(&mut self, field: FieldName) {
        let values = self.registry.snapshot();
        self.strategy.handle_validation(field, &values);
    }

    // === Editing ===

    fn focused_mut(&mut self) -> Option<&mut FormField> {
        self.registry.get_mut(self.focus)
    }

    pub fn insert_char(&mut self, c: char) {
        if let Some(field) = self.focused_mut() {
            field.push_char(c);
        }
    }

    /// Newlines only go into multiline fields
    pub fn insert_newline(&mut self) {
        if let Some(field) = self.focused_mut() {
            if field.is_multiline() {
                field.push_char('\n');
            }
        }
    }

    pub fn backspace(&mut self) {
        if let Some(field) = self.focused_mut() {
            field.pop_char();
        }
    }

    // === Submission ===

    /// Validate the whole form and, if it passes, hand the payload to `hooks`.
    ///
    /// A failed validation is a normal outcome: messages are left in the
    /// strategy and nothing is dispatched.
    pub fn on_submit(&mut self, hooks: &mut dyn FormHooks) -> SubmitOutcome {
        let resting = self.state;
        self.state = LifecycleState::Validating;

        let values = self.registry.snapshot();
        if self.strategy.validate(&values) {
            tracing::debug!("submit blocked by validation errors");
            self.state = resting;
            return SubmitOutcome::Invalid;
        }

        let payload = SubmissionPayload::new(values, &self.context);
        self.state = LifecycleState::Submitting;
        self.fulfillment_handled = false;
        tracing::info!(customer = payload.customer(), "dispatching ticket");
        hooks.submit(payload);
        SubmitOutcome::Dispatched
    }

    /// Take in new lifecycle props.
    ///
    /// Returns `true` when this update cleared the form. A fulfillment clears
    /// the form and calls `reset` once; further updates that still report
    /// fulfilled are ignored until the flag drops or a new payload goes out.
    pub fn observe(&mut self, props: LifecycleProps, hooks: &mut dyn FormHooks) -> bool {
        self.props = props;
        self.state = LifecycleState::from_props(&self.props);

        if !self.props.is_fulfilled {
            self.fulfillment_handled = false;
            return false;
        }
        if self.fulfillment_handled {
            return false;
        }

        self.fulfillment_handled = true;
        self.clear_form_data(hooks);
        true
    }

    fn clear_form_data(&mut self, hooks: &mut dyn FormHooks) {
        self.registry.clear_all();
        self.strategy.clear_validations();
        self.focus = 0;
        tracing::info!("ticket fulfilled, form cleared");
        hooks.reset();
    }

    // === Derived view state ===

    pub fn is_valid(&self, field: FieldName) -> bool {
        self.strategy.is_valid(field)
    }

    pub fn messages(&self, field: FieldName) -> &[String] {
        self.strategy.get_validation_messages(field)
    }

    pub fn help_text(&self, field: FieldName) -> String {
        validation::help_text(self.messages(field))
    }

    pub fn field_decoration(&self, field: FieldName) -> FieldDecoration {
        if self.is_valid(field) {
            FieldDecoration::Normal
        } else {
            FieldDecoration::Error
        }
    }

    pub fn form_decoration(&self) -> FormDecoration {
        if self.props.is_loading {
            FormDecoration::Loading
        } else {
            FormDecoration::Ready
        }
    }

    pub fn button_label(&self) -> &'static str {
        if !self.props.is_authenticated {
            LOGIN_FIRST_LABEL
        } else if self.props.show_error {
            RETRY_LABEL
        } else {
            SEND_LABEL
        }
    }

    pub fn submit_button(&self) -> SubmitButton {
        SubmitButton {
            label: self.button_label(),
            kind: if self.props.show_error {
                ButtonKind::Error
            } else {
                ButtonKind::Success
            },
            is_loading: self.props.is_loading,
            is_disabled: !self.props.is_authenticated,
        }
    }
}

#[cfg(test)]
impl FormController {
    pub fn value(&self, field: FieldName) -> &str {
        self.registry
            .field(field)
            .map(|f| f.value.as_str())
            .unwrap_or("")
    }

    pub fn set_value(&mut self, field: FieldName, value: impl Into<String>) {
        if let Some(f) = self.registry.field_mut(field) {
            f.value = value.into();
        }
    }
}

/// Every bound field needs rules and every rule needs a bound field
fn check_schema(registry: &FieldRegistry, schema: &FormSchema) -> Result<(), FormError> {
    if let Some(field) = registry.names().find(|f| !schema.contains(*f)) {
        return Err(FormError::MissingSchema(field));
    }
    if let Some(field) = schema.fields().find(|f| !registry.contains(*f)) {
        return Err(FormError::UnboundField(field));
    }
    Ok(())
}
