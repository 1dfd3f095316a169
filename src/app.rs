//! Application state and core logic

use crate::config::TuiConfig;
use crate::service::{OutboxTicketService, TicketReceipt, TicketServiceTrait};
use crate::state::forms::{FormController, FormHooks, SubmissionPayload, SubmitOutcome};
use crate::state::{AppState, SubmissionReporter};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::sync::Arc;
use tokio::sync::mpsc;

/// Result of one submission, delivered back to the event loop
#[derive(Debug)]
pub enum SubmissionEvent {
    Accepted {
        receipt: TicketReceipt,
        customer: String,
    },
    Rejected(String),
}

/// Main application struct
pub struct App {
    /// State around the form (lifecycle props, spinner, status line)
    pub state: AppState,
    /// The ticket form
    pub form: FormController,
    /// Where submitted tickets go
    service: Arc<dyn TicketServiceTrait>,
    outcome_tx: mpsc::UnboundedSender<SubmissionEvent>,
    outcome_rx: mpsc::UnboundedReceiver<SubmissionEvent>,
    /// Whether the app should quit
    quit: bool,
}

impl App {
    /// Create a new App writing tickets into the configured outbox
    pub fn new(config: &TuiConfig) -> Result<Self> {
        let service = OutboxTicketService::new(config.outbox_dir());
        tracing::info!(outbox = %service.outbox_dir().display(), "writing tickets to outbox");
        Self::with_service(config, Arc::new(service))
    }

    pub fn with_service(config: &TuiConfig, service: Arc<dyn TicketServiceTrait>) -> Result<Self> {
        let form = FormController::ticket(config.submission_context())?;
        let (outcome_tx, outcome_rx) = mpsc::unbounded_channel();

        let mut app = Self {
            state: AppState::new(config.is_authenticated(), TuiConfig::config_path()),
            form,
            service,
            outcome_tx,
            outcome_rx,
            quit: false,
        };
        app.sync_lifecycle();

        if !config.is_authenticated() {
            tracing::warn!("no agent identity configured, submissions are disabled");
        }
        Ok(app)
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Whether something on screen is animating
    pub fn is_animating(&self) -> bool {
        self.state.spinner.is_some()
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        let on_button = self.form.is_submit_focused();

        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.request_quit();
            }
            KeyCode::Esc => self.request_quit(),
            // Keyboard shortcuts (work from anywhere)
            KeyCode::Char('s') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.press_submit();
            }
            KeyCode::Char('y') if key.modifiers.contains(crate::platform::COPY_MODIFIER) => {
                self.copy_response();
            }
            KeyCode::Tab | KeyCode::Down => self.form.focus_next(),
            KeyCode::BackTab | KeyCode::Up => self.form.focus_prev(),
            KeyCode::Enter if on_button => self.press_submit(),
            KeyCode::Enter => {
                // Enter in the message field adds a newline, elsewhere it moves on
                if self.form.focused_field().is_some_and(|f| f.is_multiline()) {
                    self.form.insert_newline();
                } else {
                    self.form.focus_next();
                }
            }
            KeyCode::Backspace => self.form.backspace(),
            KeyCode::Char(c)
                if !key
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT | KeyModifiers::SUPER) =>
            {
                self.form.insert_char(c);
            }
            _ => {}
        }
    }

    /// Quit unless a ticket is still in flight
    fn request_quit(&mut self) {
        if self.state.reporter.is_loading() {
            tracing::info!("quit refused while a ticket is sending");
            self.state.status_message = Some("Ticket still sending".to_string());
            return;
        }
        self.quit = true;
    }

    /// The submit control was activated
    pub fn press_submit(&mut self) {
        let button = self.form.submit_button();
        if button.is_disabled {
            self.state.status_message = Some("Log in before sending tickets".to_string());
            return;
        }
        if !button.accepts_press() {
            return;
        }

        let mut hooks = Dispatcher {
            reporter: &mut self.state.reporter,
            service: &self.service,
            outcome_tx: &self.outcome_tx,
        };
        match self.form.on_submit(&mut hooks) {
            SubmitOutcome::Invalid => {
                self.state.status_message = Some("Fix the highlighted fields".to_string());
            }
            SubmitOutcome::Dispatched => {
                self.state.status_message = None;
            }
        }
        self.sync_lifecycle();
    }

    /// Apply every submission outcome that has arrived. Returns true if any did.
    pub fn poll_submissions(&mut self) -> bool {
        let mut changed = false;
        while let Ok(event) = self.outcome_rx.try_recv() {
            self.apply_submission_event(event);
            changed = true;
        }
        changed
    }

    pub fn apply_submission_event(&mut self, event: SubmissionEvent) {
        match event {
            SubmissionEvent::Accepted { receipt, customer } => {
                tracing::info!(
                    id = %receipt.id,
                    created_at = %receipt.created_at,
                    path = %receipt.path.display(),
                    "ticket accepted"
                );
                self.state.reporter.fulfill(format!(
                    "Ticket {} created for {}",
                    receipt.short_id(),
                    customer
                ));
            }
            SubmissionEvent::Rejected(error) => {
                self.state
                    .reporter
                    .fail(format!("Failed to submit ticket: {error}"));
            }
        }
        self.sync_lifecycle();
    }

    /// Feed the reporter's props to the form until they stop changing
    fn sync_lifecycle(&mut self) {
        loop {
            let props = self.state.reporter.props();
            let mut hooks = Dispatcher {
                reporter: &mut self.state.reporter,
                service: &self.service,
                outcome_tx: &self.outcome_tx,
            };
            if !self.form.observe(props, &mut hooks) {
                break;
            }
        }
        self.state.sync_spinner();
    }

    fn copy_response(&mut self) {
        let message = self.state.reporter.props().response_message;
        if message.is_empty() {
            self.state.status_message = Some("Nothing to copy".to_string());
            return;
        }

        match self.copy_to_clipboard(&message) {
            Ok(()) => self.state.status_message = Some("Copied response".to_string()),
            Err(e) => {
                tracing::warn!("clipboard unavailable: {e}");
                self.state.status_message = Some(format!("Copy failed: {e}"));
            }
        }
    }

    fn copy_to_clipboard(&self, text: &str) -> Result<()> {
        use arboard::Clipboard;
        let mut clipboard = Clipboard::new()?;
        clipboard.set_text(text)?;
        Ok(())
    }
}

/// Form hooks backed by the reporter and the ticket service
struct Dispatcher<'a> {
    reporter: &'a mut SubmissionReporter,
    service: &'a Arc<dyn TicketServiceTrait>,
    outcome_tx: &'a mpsc::UnboundedSender<SubmissionEvent>,
}

impl FormHooks for Dispatcher<'_> {
    fn submit(&mut self, payload: SubmissionPayload) {
        self.reporter.begin();

        let service = Arc::clone(self.service);
        let outcome_tx = self.outcome_tx.clone();
        tokio::spawn(async move {
            let event = match service.submit_ticket(&payload).await {
                Ok(receipt) => SubmissionEvent::Accepted {
                    receipt,
                    customer: payload.customer().to_string(),
                },
                Err(e) => {
                    tracing::warn!("ticket submission failed: {e:#}");
                    SubmissionEvent::Rejected(e.to_string())
                }
            };
            // The receiver lives as long as the app
            let _ = outcome_tx.send(event);
        });
    }

    fn reset(&mut self) {
        self.reporter.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::MockTicketServiceTrait;
    use crate::state::forms::{FieldName, LifecycleState};
    use anyhow::anyhow;
    use chrono::Utc;
    use std::path::PathBuf;
    use uuid::Uuid;

    fn agent_config() -> TuiConfig {
        TuiConfig {
            agent_name: Some("Sam Agent".to_string()),
            agent_email: Some("sam@desk.io".to_string()),
            outbox_dir: None,
        }
    }

    fn receipt() -> TicketReceipt {
        TicketReceipt {
            id: Uuid::parse_str("0f1e2d3c-4b5a-6978-8796-a5b4c3d2e1f0").unwrap(),
            created_at: Utc::now(),
            path: PathBuf::from("outbox/ticket.json"),
        }
    }

    fn app_with(config: &TuiConfig, service: MockTicketServiceTrait) -> App {
        App::with_service(config, Arc::new(service)).unwrap()
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            app.handle_key(key(KeyCode::Char(c)));
        }
    }

    fn fill_valid(app: &mut App) {
        type_text(app, "Jane");
        app.handle_key(key(KeyCode::Tab));
        type_text(app, "jane@x.com");
        app.handle_key(key(KeyCode::Tab));
        type_text(app, "Help");
        app.handle_key(key(KeyCode::Tab));
        type_text(app, "hi");
    }

    /// Wait for the spawned submission and apply its outcome
    async fn deliver_outcome(app: &mut App) {
        let event = app.outcome_rx.recv().await.unwrap();
        app.apply_submission_event(event);
    }

    mod keys {
        use super::*;

        #[tokio::test]
        async fn test_typing_and_tab_fill_fields() {
            let mut app = app_with(&agent_config(), MockTicketServiceTrait::new());
            fill_valid(&mut app);
            assert_eq!(app.form.value(FieldName::Name), "Jane");
            assert_eq!(app.form.value(FieldName::Email), "jane@x.com");
            assert_eq!(app.form.value(FieldName::Message), "hi");
        }

        #[tokio::test]
        async fn test_tab_blur_shows_inline_error() {
            let mut app = app_with(&agent_config(), MockTicketServiceTrait::new());
            app.handle_key(key(KeyCode::Tab));
            type_text(&mut app, "not-an-email");
            app.handle_key(key(KeyCode::Tab));

            assert!(!app.form.is_valid(FieldName::Name));
            assert_eq!(
                app.form.help_text(FieldName::Email),
                "Customer's email must be a valid email."
            );
            assert!(app.form.is_valid(FieldName::Subject));
        }

        #[tokio::test]
        async fn test_enter_in_message_adds_newline() {
            let mut app = app_with(&agent_config(), MockTicketServiceTrait::new());
            app.form.set_focus(3);
            type_text(&mut app, "line one");
            app.handle_key(key(KeyCode::Enter));
            type_text(&mut app, "line two");
            assert_eq!(app.form.value(FieldName::Message), "line one\nline two");
        }

        #[tokio::test]
        async fn test_enter_in_single_line_field_moves_on() {
            let mut app = app_with(&agent_config(), MockTicketServiceTrait::new());
            app.handle_key(key(KeyCode::Enter));
            assert_eq!(app.form.focused_field(), Some(FieldName::Email));
        }

        #[tokio::test]
        async fn test_control_chars_are_not_typed() {
            let mut app = app_with(&agent_config(), MockTicketServiceTrait::new());
            app.handle_key(ctrl('x'));
            assert_eq!(app.form.value(FieldName::Name), "");
        }

        #[tokio::test]
        async fn test_quit_waits_for_in_flight_ticket() {
            let mut service = MockTicketServiceTrait::new();
            service
                .expect_submit_ticket()
                .returning(|_| Ok(receipt()));

            let mut app = app_with(&agent_config(), service);
            fill_valid(&mut app);
            app.press_submit();
            assert!(app.state.reporter.is_loading());

            app.handle_key(key(KeyCode::Esc));
            app.handle_key(ctrl('c'));
            assert!(!app.should_quit());
            assert_eq!(app.state.status_message.as_deref(), Some("Ticket still sending"));

            deliver_outcome(&mut app).await;
            app.handle_key(key(KeyCode::Esc));
            assert!(app.should_quit());
        }

        #[tokio::test]
        async fn test_quit_keys() {
            let mut app = app_with(&agent_config(), MockTicketServiceTrait::new());
            assert!(!app.should_quit());
            app.handle_key(ctrl('c'));
            assert!(app.should_quit());

            let mut app = app_with(&agent_config(), MockTicketServiceTrait::new());
            app.handle_key(key(KeyCode::Esc));
            assert!(app.should_quit());
        }
    }

    mod submission {
        use super::*;

        #[tokio::test]
        async fn test_unauthenticated_submit_never_reaches_service() {
            let mut service = MockTicketServiceTrait::new();
            service.expect_submit_ticket().never();

            let mut app = app_with(&TuiConfig::default(), service);
            fill_valid(&mut app);
            app.handle_key(ctrl('s'));

            assert_eq!(app.form.button_label(), "Login first!");
            assert!(!app.state.reporter.is_loading());
            assert_eq!(
                app.state.status_message.as_deref(),
                Some("Log in before sending tickets")
            );
        }

        #[tokio::test]
        async fn test_invalid_submit_never_reaches_service() {
            let mut service = MockTicketServiceTrait::new();
            service.expect_submit_ticket().never();

            let mut app = app_with(&agent_config(), service);
            app.handle_key(ctrl('s'));

            assert_eq!(app.form.lifecycle_state(), LifecycleState::Idle);
            for field in FieldName::ALL {
                assert!(!app.form.is_valid(field));
            }
            assert_eq!(
                app.state.status_message.as_deref(),
                Some("Fix the highlighted fields")
            );
        }

        #[tokio::test]
        async fn test_successful_submit_clears_form() {
            let mut service = MockTicketServiceTrait::new();
            service
                .expect_submit_ticket()
                .withf(|payload| {
                    payload.customer() == "Jane"
                        && payload.agent_name == "Sam Agent"
                        && payload.agent_email == "sam@desk.io"
                })
                .times(1)
                .returning(|_| Ok(receipt()));

            let mut app = app_with(&agent_config(), service);
            fill_valid(&mut app);
            app.handle_key(ctrl('s'));

            assert!(app.state.reporter.is_loading());
            assert!(app.is_animating());
            assert_eq!(app.form.lifecycle_state(), LifecycleState::Submitting);

            deliver_outcome(&mut app).await;

            for field in FieldName::ALL {
                assert_eq!(app.form.value(field), "");
            }
            let props = app.state.reporter.props();
            assert!(!props.is_fulfilled);
            assert!(!props.is_loading);
            assert_eq!(props.response_message, "Ticket 0f1e2d3c created for Jane");
            assert_eq!(app.form.button_label(), "Send");
            assert_eq!(app.form.focused_field(), Some(FieldName::Name));
            assert!(!app.is_animating());
        }

        #[tokio::test]
        async fn test_failed_submit_keeps_fields_and_offers_retry() {
            let mut service = MockTicketServiceTrait::new();
            service
                .expect_submit_ticket()
                .times(1)
                .returning(|_| Err(anyhow!("disk full")));

            let mut app = app_with(&agent_config(), service);
            fill_valid(&mut app);
            app.press_submit();
            deliver_outcome(&mut app).await;

            assert_eq!(app.form.value(FieldName::Name), "Jane");
            assert_eq!(app.form.button_label(), "Try again");
            assert_eq!(app.form.lifecycle_state(), LifecycleState::Failed);
            assert_eq!(
                app.state.reporter.props().response_message,
                "Failed to submit ticket: disk full"
            );
        }

        #[tokio::test]
        async fn test_retry_after_failure() {
            let mut service = MockTicketServiceTrait::new();
            let mut calls = 0;
            service.expect_submit_ticket().times(2).returning(move |_| {
                calls += 1;
                if calls == 1 {
                    Err(anyhow!("timeout"))
                } else {
                    Ok(receipt())
                }
            });

            let mut app = app_with(&agent_config(), service);
            fill_valid(&mut app);
            app.press_submit();
            deliver_outcome(&mut app).await;
            assert_eq!(app.form.button_label(), "Try again");

            app.press_submit();
            deliver_outcome(&mut app).await;
            assert_eq!(app.form.button_label(), "Send");
            assert_eq!(app.form.value(FieldName::Subject), "");
        }

        #[tokio::test]
        async fn test_press_while_loading_is_ignored() {
            let mut service = MockTicketServiceTrait::new();
            service
                .expect_submit_ticket()
                .times(1)
                .returning(|_| Ok(receipt()));

            let mut app = app_with(&agent_config(), service);
            fill_valid(&mut app);
            app.press_submit();
            app.press_submit();
            deliver_outcome(&mut app).await;
            assert!(app.outcome_rx.try_recv().is_err());
        }

        #[tokio::test]
        async fn test_enter_on_button_submits() {
            let mut service = MockTicketServiceTrait::new();
            service
                .expect_submit_ticket()
                .times(1)
                .returning(|_| Ok(receipt()));

            let mut app = app_with(&agent_config(), service);
            fill_valid(&mut app);
            app.handle_key(key(KeyCode::Tab));
            assert!(app.form.is_submit_focused());
            app.handle_key(key(KeyCode::Enter));
            deliver_outcome(&mut app).await;
            assert_eq!(app.form.value(FieldName::Name), "");
        }

        #[tokio::test]
        async fn test_poll_without_outcomes_changes_nothing() {
            let mut app = app_with(&agent_config(), MockTicketServiceTrait::new());
            assert!(!app.poll_submissions());
        }
    }

    mod clipboard {
        use super::*;

        #[tokio::test]
        async fn test_copy_with_no_response() {
            let mut app = app_with(&agent_config(), MockTicketServiceTrait::new());
            app.handle_key(KeyEvent::new(
                KeyCode::Char('y'),
                crate::platform::COPY_MODIFIER,
            ));
            assert_eq!(app.state.status_message.as_deref(), Some("Nothing to copy"));
        }
    }
}
