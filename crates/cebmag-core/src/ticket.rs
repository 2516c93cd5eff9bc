//! # The Ticket Record
//!
//! The PQRS ticket entity and its embedded records. Construction and
//! mutation discipline:
//!
//! - `id`, `ticket_number`, and `created_at` are assigned at creation and
//!   never change.
//! - `status` is only ever written by the transition guard in
//!   `cebmag-state`; there is no raw setter.
//! - `history` only grows, via [`Ticket::record_event`].
//! - `subject` and `description` are validated non-empty before a ticket
//!   exists and every patch re-validates them.

use chrono::{DateTime, Days, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::classify::{TicketChannel, TicketKind, TicketOrigin, TicketStatus};
use crate::history::HistoryEvent;
use crate::number::TicketNumber;

/// Days after creation at which a ticket is due when the caller does not
/// supply an explicit due date.
pub const DEFAULT_SLA_DAYS: u64 = 15;

/// The person or organization that raised the ticket.
///
/// Informational only — no uniqueness or referential constraint is enforced
/// here. Optional fields are omitted from the serialized form when absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Requester {
    /// Identity document type, e.g. `"CC"` or `"TI"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document_type: Option<String>,
    /// Identity document number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document_number: Option<String>,
    /// Full name. Required non-empty at ticket creation.
    pub name: String,
    /// Contact phone.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Contact email.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl Requester {
    /// Normalize empty or whitespace-only optional fields to absent.
    ///
    /// The legacy front-end submitted `""` for unfilled inputs; those must
    /// not survive into the stored record.
    pub fn normalized(mut self) -> Self {
        let clean = |v: Option<String>| v.map(|s| s.trim().to_string()).filter(|s| !s.is_empty());
        self.document_type = clean(self.document_type);
        self.document_number = clean(self.document_number);
        self.phone = clean(self.phone);
        self.email = clean(self.email);
        self.name = self.name.trim().to_string();
        self
    }
}

/// A file attached to a ticket. Append/remove only; content is never
/// inspected or validated here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    /// Original file name.
    pub name: String,
    /// Size in bytes, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
    /// Download URL, when the file has been stored externally.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// MIME type, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mime: Option<String>,
}

/// A PQRS ticket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ticket {
    /// Opaque unique identifier, owned by the store.
    pub id: Uuid,
    /// Human-readable number (`PQ-<year>-<seq>`), unique, immutable.
    pub ticket_number: TicketNumber,
    /// Classification: petition, complaint, claim, or suggestion.
    pub kind: TicketKind,
    /// Lifecycle status. Written only by the transition guard.
    pub status: TicketStatus,
    /// Who raised the ticket.
    pub origin: TicketOrigin,
    /// Intake channel.
    pub channel: TicketChannel,
    /// Requester contact record.
    pub requester: Requester,
    /// Short summary. Never empty.
    pub subject: String,
    /// Full description. Never empty.
    pub description: String,
    /// Responsible party or team.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    /// SLA due date. Defaulted to creation date + [`DEFAULT_SLA_DAYS`]
    /// when not supplied at creation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    /// Attached files.
    #[serde(default)]
    pub attachments: Vec<Attachment>,
    /// Append-only audit trail.
    #[serde(default)]
    pub history: Vec<HistoryEvent>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl Ticket {
    /// Append one event to the history. The only mutation path for
    /// `history` — entries are never edited or removed.
    pub fn record_event(&mut self, date: NaiveDate, event: impl Into<String>, note: Option<&str>) {
        self.history.push(HistoryEvent::new(date, event, note));
    }

    /// Whether the ticket has breached its SLA as of `today`.
    ///
    /// Breach is computed, never stored: due date in the past and the
    /// ticket not closed.
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        match self.due_date {
            Some(due) => due < today && self.status != TicketStatus::Closed,
            None => false,
        }
    }

    /// The default due date for a ticket created on `created`.
    pub fn default_due_date(created: NaiveDate) -> NaiveDate {
        // Days::new cannot overflow for any representable NaiveDate + 15.
        created
            .checked_add_days(Days::new(DEFAULT_SLA_DAYS))
            .unwrap_or(created)
    }
}
