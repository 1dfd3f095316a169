//! Ticket service module: where submitted tickets go

mod client;
mod traits;

pub use client::{OutboxTicketService, TicketReceipt};
pub use traits::TicketServiceTrait;

#[cfg(test)]
pub use traits::MockTicketServiceTrait;
