//! Trait abstraction for the ticket service to enable mocking in tests

use super::client::TicketReceipt;
use crate::state::forms::SubmissionPayload;
use anyhow::Result;
use async_trait::async_trait;

/// Trait for ticket service operations, enabling mocking in tests
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TicketServiceTrait: Send + Sync {
    /// Accept a ticket and return its receipt
    async fn submit_ticket(&self, payload: &SubmissionPayload) -> Result<TicketReceipt>;
}
