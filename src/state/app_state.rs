//! Application state definitions

use super::spinner_state::SpinnerState;
use super::submission::SubmissionReporter;
use std::path::PathBuf;

/// State around the ticket form that the form itself does not own
#[derive(Debug, Default)]
pub struct AppState {
    /// Lifecycle props fed back into the form
    pub reporter: SubmissionReporter,
    /// Spinner shown while a submission is in flight
    pub spinner: Option<SpinnerState>,
    /// One-line feedback in the status bar
    pub status_message: Option<String>,
    /// Where the agent identity is configured, for the login hint
    pub config_path: Option<PathBuf>,
}

impl AppState {
    pub fn new(is_authenticated: bool, config_path: Option<PathBuf>) -> Self {
        Self {
            reporter: SubmissionReporter::new(is_authenticated),
            spinner: None,
            status_message: None,
            config_path,
        }
    }

    /// Start or stop the spinner to match the reporter
    pub fn sync_spinner(&mut self) {
        match (self.reporter.is_loading(), self.spinner.is_some()) {
            (true, false) => self.spinner = Some(SpinnerState::new()),
            (false, true) => self.spinner = None,
            _ => {}
        }
    }
}
