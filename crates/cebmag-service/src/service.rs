//! # Ticket Service
//!
//! The composition root of the PQRS core. Callers (the HTTP layer, tests)
//! go through [`TicketService`] exclusively; it wires the sequence
//! generator, the store, and the transition guard into operations that
//! either fully apply or leave no trace.

use chrono::{Datelike, NaiveDate, Utc};
use uuid::Uuid;

use cebmag_core::{
    Attachment, Requester, Ticket, TicketChannel, TicketKind, TicketNumber, TicketOrigin,
    TicketStatus,
};
use cebmag_state::transition;

use crate::error::ServiceError;
use crate::store::TicketStore;

/// History event recorded when a ticket is filed.
const FILED_EVENT: &str = "Radicado";

/// Page size used when the caller does not specify one.
const DEFAULT_PAGE_SIZE: u32 = 20;
/// Upper bound on page size.
const MAX_PAGE_SIZE: u32 = 100;

/// Fields for creating a ticket. Classification values arrive as typed
/// enums — normalization from external strings happens at the API
/// boundary, never here.
#[derive(Debug, Clone)]
pub struct NewTicket {
    /// Caller-supplied ticket number; allocated from the year sequence
    /// when absent.
    pub ticket_number: Option<TicketNumber>,
    /// Classification.
    pub kind: TicketKind,
    /// Who raised the ticket.
    pub origin: TicketOrigin,
    /// Intake channel.
    pub channel: TicketChannel,
    /// Requester contact record. `name` must be non-empty.
    pub requester: Requester,
    /// Short summary. Must be non-empty.
    pub subject: String,
    /// Full description. Must be non-empty.
    pub description: String,
    /// Responsible party or team.
    pub owner: Option<String>,
    /// Explicit SLA due date; defaults to creation date + 15 days.
    pub due_date: Option<NaiveDate>,
    /// Initial attachments.
    pub attachments: Vec<Attachment>,
}

/// Field-level patch for an existing ticket. `None` means "leave as is".
///
/// `status` routes through the transition guard — there is no way to
/// overwrite the status directly. History is not patchable at all; it only
/// grows through guarded transitions.
#[derive(Debug, Clone, Default)]
pub struct TicketPatch {
    /// New classification.
    pub kind: Option<TicketKind>,
    /// New origin.
    pub origin: Option<TicketOrigin>,
    /// New channel.
    pub channel: Option<TicketChannel>,
    /// Replacement requester record.
    pub requester: Option<Requester>,
    /// New subject. Must be non-empty when present.
    pub subject: Option<String>,
    /// New description. Must be non-empty when present.
    pub description: Option<String>,
    /// New owner. An empty string clears the field.
    pub owner: Option<String>,
    /// New due date.
    pub due_date: Option<NaiveDate>,
    /// Replacement attachment list.
    pub attachments: Option<Vec<Attachment>>,
    /// Requested status transition, validated by the guard.
    pub status: Option<TicketStatus>,
    /// Note attached to the status transition (required when closing or
    /// reopening).
    pub note: Option<String>,
}

/// Listing filter. `page` is 1-indexed; `page_size` is clamped to
/// `[1, 100]` with a default of 20.
#[derive(Debug, Clone, Default)]
pub struct ListFilter {
    /// Case-insensitive match against ticket number, subject, and owner.
    pub query: Option<String>,
    /// Exact status filter.
    pub status: Option<TicketStatus>,
    /// Exact kind filter.
    pub kind: Option<TicketKind>,
    /// 1-indexed page; values below 1 are treated as 1.
    pub page: Option<u32>,
    /// Page size, clamped to `[1, 100]`.
    pub page_size: Option<u32>,
}

/// One page of listing results. `total` counts all tickets matching the
/// filter, not just this page.
#[derive(Debug, Clone)]
pub struct Page {
    /// The tickets on this page, newest first.
    pub items: Vec<Ticket>,
    /// Total matching tickets.
    pub total: usize,
    /// The 1-indexed page actually served.
    pub page: u32,
    /// The page size actually applied.
    pub page_size: u32,
}

/// The ticket service. Cheap to clone; clones share the same store.
#[derive(Debug, Clone, Default)]
pub struct TicketService {
    store: TicketStore,
}

fn require_non_empty(value: &str, field: &'static str) -> Result<(), ServiceError> {
    if value.trim().is_empty() {
        return Err(ServiceError::Validation(format!("{field} must not be empty")));
    }
    Ok(())
}

impl TicketService {
    /// Create a service over a fresh, empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a service over an existing store (used by tests that seed
    /// state directly).
    pub fn with_store(store: TicketStore) -> Self {
        Self { store }
    }

    /// File a new ticket.
    ///
    /// Validates `subject`, `description`, and `requester.name` non-empty;
    /// assigns id and ticket number (allocated per-year unless supplied);
    /// sets `status = Open` and defaults the due date to creation + 15
    /// days; records the initial `"Radicado"` history event.
    pub fn create(&self, new: NewTicket) -> Result<Ticket, ServiceError> {
        require_non_empty(&new.subject, "subject")?;
        require_non_empty(&new.description, "description")?;
        require_non_empty(&new.requester.name, "requester.name")?;

        let NewTicket {
            ticket_number,
            kind,
            origin,
            channel,
            requester,
            subject,
            description,
            owner,
            due_date,
            attachments,
        } = new;

        let created_at = Utc::now();
        let today = created_at.date_naive();
        let due_date = due_date.unwrap_or_else(|| Ticket::default_due_date(today));
        let requester = requester.normalized();
        let subject = subject.trim().to_string();
        let description = description.trim().to_string();
        let owner = owner.map(|o| o.trim().to_string()).filter(|o| !o.is_empty());

        let build = move |number: TicketNumber| {
            let mut ticket = Ticket {
                id: Uuid::new_v4(),
                ticket_number: number,
                kind,
                status: TicketStatus::Open,
                origin,
                channel,
                requester,
                subject,
                description,
                owner,
                due_date: Some(due_date),
                attachments,
                history: Vec::new(),
                created_at,
            };
            ticket.record_event(today, FILED_EVENT, None);
            ticket
        };

        let ticket = match ticket_number {
            Some(number) => self
                .store
                .insert_numbered(|| build(number))
                .map_err(|dup| {
                    ServiceError::Conflict(format!("ticket number {} already exists", dup.0))
                })?,
            None => self.store.insert_sequenced(today.year(), build),
        };

        tracing::info!(
            ticket = %ticket.ticket_number,
            kind = %ticket.kind,
            "ticket filed"
        );
        Ok(ticket)
    }

    /// Apply a field-level patch. A `status` in the patch goes through the
    /// transition guard; the whole patch commits atomically or not at all.
    pub fn update(&self, id: &Uuid, patch: TicketPatch) -> Result<Ticket, ServiceError> {
        if let Some(ref subject) = patch.subject {
            require_non_empty(subject, "subject")?;
        }
        if let Some(ref description) = patch.description {
            require_non_empty(description, "description")?;
        }
        if let Some(ref requester) = patch.requester {
            require_non_empty(&requester.name, "requester.name")?;
        }

        let today = Utc::now().date_naive();
        self.store
            .try_update(id, |ticket| {
                if let Some(kind) = patch.kind {
                    ticket.kind = kind;
                }
                if let Some(origin) = patch.origin {
                    ticket.origin = origin;
                }
                if let Some(channel) = patch.channel {
                    ticket.channel = channel;
                }
                if let Some(requester) = patch.requester.clone() {
                    ticket.requester = requester.normalized();
                }
                if let Some(subject) = patch.subject.clone() {
                    ticket.subject = subject.trim().to_string();
                }
                if let Some(description) = patch.description.clone() {
                    ticket.description = description.trim().to_string();
                }
                if let Some(owner) = patch.owner.clone() {
                    let owner = owner.trim().to_string();
                    ticket.owner = if owner.is_empty() { None } else { Some(owner) };
                }
                if let Some(due_date) = patch.due_date {
                    ticket.due_date = Some(due_date);
                }
                if let Some(attachments) = patch.attachments.clone() {
                    ticket.attachments = attachments;
                }
                if let Some(target) = patch.status {
                    transition::apply(ticket, target, patch.note.as_deref(), today)
                        .map_err(ServiceError::from)?;
                }
                Ok(())
            })
            .ok_or_else(|| ServiceError::NotFound(format!("ticket {id} not found")))?
    }

    /// Close a ticket with a mandatory, non-empty closing note.
    pub fn close(&self, id: &Uuid, note: &str) -> Result<Ticket, ServiceError> {
        require_non_empty(note, "closing note")?;
        let today = Utc::now().date_naive();
        self.store
            .try_update(id, |ticket| {
                transition::apply(ticket, TicketStatus::Closed, Some(note), today)
                    .map_err(ServiceError::from)
            })
            .ok_or_else(|| ServiceError::NotFound(format!("ticket {id} not found")))?
    }

    /// Reopen a closed ticket with a mandatory, non-empty reason.
    ///
    /// Fails with a conflict when the ticket is not currently closed —
    /// reopening is meaningful only for closed tickets, and the caller
    /// should re-fetch before retrying.
    pub fn reopen(&self, id: &Uuid, reason: &str) -> Result<Ticket, ServiceError> {
        require_non_empty(reason, "reopen reason")?;
        let today = Utc::now().date_naive();
        self.store
            .try_update(id, |ticket| {
                if ticket.status != TicketStatus::Closed {
                    return Err(ServiceError::Conflict(format!(
                        "ticket {} is {}, only closed tickets can be reopened",
                        ticket.ticket_number, ticket.status
                    )));
                }
                transition::apply(ticket, TicketStatus::Reopened, Some(reason), today)
                    .map_err(ServiceError::from)
            })
            .ok_or_else(|| ServiceError::NotFound(format!("ticket {id} not found")))?
    }

    /// Resolve a ticket by internal id first, falling back to ticket
    /// number. External callers hold the human-readable number; internal
    /// relations hold the id — both arrive through the same lookup.
    pub fn find_by_id_or_number(&self, key: &str) -> Result<Ticket, ServiceError> {
        if let Ok(id) = Uuid::parse_str(key) {
            if let Some(ticket) = self.store.get(&id) {
                return Ok(ticket);
            }
        }
        self.store
            .get_by_number(key)
            .ok_or_else(|| ServiceError::NotFound(format!("ticket {key} not found")))
    }

    /// Get a ticket by id.
    pub fn get(&self, id: &Uuid) -> Result<Ticket, ServiceError> {
        self.store
            .get(id)
            .ok_or_else(|| ServiceError::NotFound(format!("ticket {id} not found")))
    }

    /// List tickets matching `filter`, newest first, paginated.
    pub fn list(&self, filter: &ListFilter) -> Page {
        let page = filter.page.unwrap_or(1).max(1);
        let page_size = filter
            .page_size
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .clamp(1, MAX_PAGE_SIZE);

        let query = filter
            .query
            .as_deref()
            .map(str::trim)
            .filter(|q| !q.is_empty())
            .map(str::to_lowercase);

        let mut items: Vec<Ticket> = self
            .store
            .list()
            .into_iter()
            .filter(|t| filter.status.map_or(true, |s| t.status == s))
            .filter(|t| filter.kind.map_or(true, |k| t.kind == k))
            .filter(|t| match &query {
                None => true,
                Some(q) => {
                    t.ticket_number.as_str().to_lowercase().contains(q)
                        || t.subject.to_lowercase().contains(q)
                        || t.owner.as_deref().is_some_and(|o| o.to_lowercase().contains(q))
                }
            })
            .collect();

        // Newest first; ties broken by the number's numeric suffix.
        items.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.ticket_number.sequence().cmp(&a.ticket_number.sequence()))
        });

        let total = items.len();
        let start = ((page - 1) as usize).saturating_mul(page_size as usize);
        let items = items
            .into_iter()
            .skip(start)
            .take(page_size as usize)
            .collect();

        Page {
            items,
            total,
            page,
            page_size,
        }
    }

    /// Remove a ticket outright.
    ///
    /// Administrative use only — this bypasses the state machine entirely
    /// and the freed number is never reissued.
    pub fn delete(&self, id: &Uuid) -> Result<(), ServiceError> {
        self.store
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| ServiceError::NotFound(format!("ticket {id} not found")))
    }
}
