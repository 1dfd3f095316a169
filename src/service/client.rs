//! Local outbox ticket service
//!
//! Accepts tickets by writing each one as a JSON file into an outbox
//! directory, where a separate sync process can pick them up.

use super::traits::TicketServiceTrait;
use crate::state::forms::SubmissionPayload;
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Proof that a ticket was accepted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TicketReceipt {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    /// Where the ticket was written
    pub path: PathBuf,
}

impl TicketReceipt {
    /// First eight hex digits of the id, for display
    pub fn short_id(&self) -> String {
        self.id.simple().to_string().chars().take(8).collect()
    }
}

/// On-disk layout of one ticket
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TicketRecord<'a> {
    id: Uuid,
    created_at: DateTime<Utc>,
    #[serde(flatten)]
    payload: &'a SubmissionPayload,
}

/// Ticket service that writes into a local outbox directory
#[derive(Debug, Clone)]
pub struct OutboxTicketService {
    outbox_dir: PathBuf,
}

impl OutboxTicketService {
    pub fn new(outbox_dir: impl Into<PathBuf>) -> Self {
        Self {
            outbox_dir: outbox_dir.into(),
        }
    }

    pub fn outbox_dir(&self) -> &Path {
        &self.outbox_dir
    }
}

#[async_trait]
impl TicketServiceTrait for OutboxTicketService {
    async fn submit_ticket(&self, payload: &SubmissionPayload) -> Result<TicketReceipt> {
        tokio::fs::create_dir_all(&self.outbox_dir)
            .await
            .map_err(|e| anyhow!("Failed to create outbox {}: {}", self.outbox_dir.display(), e))?;

        let id = Uuid::new_v4();
        let created_at = Utc::now();
        let record = TicketRecord {
            id,
            created_at,
            payload,
        };
        let content = serde_json::to_vec_pretty(&record)?;

        let path = self.outbox_dir.join(format!("{id}.json"));
        tokio::fs::write(&path, content)
            .await
            .map_err(|e| anyhow!("Failed to write ticket {}: {}", path.display(), e))?;

        tracing::info!(%id, path = %path.display(), "ticket written to outbox");
        Ok(TicketReceipt {
            id,
            created_at,
            path,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::forms::{FieldName, FormSnapshot, SubmissionContext};
    use pretty_assertions::assert_eq;

    fn payload() -> SubmissionPayload {
        let fields = FormSnapshot::new()
            .with(FieldName::Name, "Jane")
            .with(FieldName::Email, "jane@x.com")
            .with(FieldName::Subject, "Help")
            .with(FieldName::Message, "hi");
        SubmissionPayload::new(
            fields,
            &SubmissionContext {
                agent_name: "Sam".into(),
                agent_email: "sam@desk.io".into(),
            },
        )
    }

    fn scratch_dir() -> PathBuf {
        std::env::temp_dir().join(format!("ticket-tui-test-{}", Uuid::new_v4()))
    }

    #[tokio::test]
    async fn test_submit_writes_record() {
        let dir = scratch_dir();
        let service = OutboxTicketService::new(&dir);

        let receipt = service.submit_ticket(&payload()).await.unwrap();
        assert_eq!(receipt.path, dir.join(format!("{}.json", receipt.id)));

        let written = std::fs::read_to_string(&receipt.path).unwrap();
        let json: serde_json::Value = serde_json::from_str(&written).unwrap();
        assert_eq!(json["id"], receipt.id.to_string());
        assert_eq!(json["name"], "Jane");
        assert_eq!(json["email"], "jane@x.com");
        assert_eq!(json["subject"], "Help");
        assert_eq!(json["message"], "hi");
        assert_eq!(json["agentName"], "Sam");
        assert_eq!(json["agentEmail"], "sam@desk.io");
        assert!(json["createdAt"].is_string());

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[tokio::test]
    async fn test_each_ticket_gets_its_own_file() {
        let dir = scratch_dir();
        let service = OutboxTicketService::new(&dir);

        let first = service.submit_ticket(&payload()).await.unwrap();
        let second = service.submit_ticket(&payload()).await.unwrap();
        assert_ne!(first.id, second.id);
        assert_eq!(std::fs::read_dir(&dir).unwrap().count(), 2);

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[tokio::test]
    async fn test_unwritable_outbox_is_an_error() {
        let blocker = scratch_dir();
        std::fs::write(&blocker, b"not a directory").unwrap();
        let service = OutboxTicketService::new(blocker.join("outbox"));

        let err = service.submit_ticket(&payload()).await.unwrap_err();
        assert!(err.to_string().contains("Failed to create outbox"));

        std::fs::remove_file(&blocker).unwrap();
    }

    #[test]
    fn test_short_id_is_eight_chars() {
        let receipt = TicketReceipt {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            path: PathBuf::from("x.json"),
        };
        let short = receipt.short_id();
        assert_eq!(short.len(), 8);
        assert!(receipt.id.simple().to_string().starts_with(&short));
    }

    #[test]
    fn test_outbox_dir_accessor() {
        let service = OutboxTicketService::new("/tmp/outbox");
        assert_eq!(service.outbox_dir(), Path::new("/tmp/outbox"));
    }

    #[test]
    fn test_trait_object_submit_with_block_on() {
        let dir = scratch_dir();
        let service: Box<dyn TicketServiceTrait> = Box::new(OutboxTicketService::new(&dir));
        let receipt = tokio_test::block_on(service.submit_ticket(&payload())).unwrap();
        assert!(receipt.path.exists());
        std::fs::remove_dir_all(&dir).unwrap();
    }
}
