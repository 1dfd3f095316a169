//! Application state module

mod app_state;
pub mod forms;
mod spinner_state;
mod submission;

pub use app_state::AppState;
pub use submission::SubmissionReporter;
