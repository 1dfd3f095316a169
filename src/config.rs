//! Configuration handling for the TUI

use crate::state::forms::SubmissionContext;
use anyhow::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

const AGENT_NAME_ENV: &str = "TICKET_AGENT_NAME";
const AGENT_EMAIL_ENV: &str = "TICKET_AGENT_EMAIL";
const OUTBOX_DIR_ENV: &str = "TICKET_OUTBOX_DIR";

/// User configuration for the TUI
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TuiConfig {
    /// Name of the agent writing tickets
    pub agent_name: Option<String>,
    /// Email of the agent writing tickets
    pub agent_email: Option<String>,
    /// Directory submitted tickets are written to
    pub outbox_dir: Option<PathBuf>,
}

impl TuiConfig {
    fn project_dirs() -> Option<ProjectDirs> {
        ProjectDirs::from("io", "ticketdesk", "ticket-tui")
    }

    /// Get the config file path
    pub fn config_path() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Directory for the log file
    pub fn log_dir() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.data_dir().to_path_buf())
    }

    /// Load configuration from file, then apply environment overrides
    pub fn load() -> Result<Self> {
        let mut config = Self::load_file()?;
        config.apply_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    fn load_file() -> Result<Self> {
        let path = Self::config_path();

        if let Some(path) = path {
            if path.exists() {
                let content = fs::read_to_string(&path)?;
                let config: TuiConfig = serde_json::from_str(&content)?;
                return Ok(config);
            }
        }

        Ok(Self::default())
    }

    /// Replace fields with values found by `lookup`
    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(name) = lookup(AGENT_NAME_ENV) {
            self.agent_name = Some(name);
        }
        if let Some(email) = lookup(AGENT_EMAIL_ENV) {
            self.agent_email = Some(email);
        }
        if let Some(dir) = lookup(OUTBOX_DIR_ENV) {
            self.outbox_dir = Some(PathBuf::from(dir));
        }
    }

    /// The agent is logged in once both name and email are known
    pub fn is_authenticated(&self) -> bool {
        let present = |v: &Option<String>| v.as_deref().is_some_and(|s| !s.trim().is_empty());
        present(&self.agent_name) && present(&self.agent_email)
    }

    /// Context fields attached to every submitted ticket
    pub fn submission_context(&self) -> SubmissionContext {
        SubmissionContext {
            agent_name: self.agent_name.clone().unwrap_or_default(),
            agent_email: self.agent_email.clone().unwrap_or_default(),
        }
    }

    /// Configured outbox, or `outbox/` under the data directory
    pub fn outbox_dir(&self) -> PathBuf {
        self.outbox_dir
            .clone()
            .or_else(|| Self::project_dirs().map(|dirs| dirs.data_dir().join("outbox")))
            .unwrap_or_else(|| PathBuf::from("outbox"))
    }
}
