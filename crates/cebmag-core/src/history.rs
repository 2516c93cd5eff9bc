//! # History Events
//!
//! A ticket's audit trail is an append-only ordered sequence of
//! [`HistoryEvent`] entries. Entries are never mutated or reordered after
//! the fact; the only legal operation is appending.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single audit-trail entry attached to a ticket.
///
/// `note` is omitted from the serialized form entirely when absent — an
/// empty string is not a valid way to express "no note", and construction
/// normalizes empty input to `None` so round-trips are unambiguous.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEvent {
    /// Calendar date of the event (`YYYY-MM-DD`).
    pub date: NaiveDate,
    /// Event name, e.g. `"Radicado"` at creation or the target state of an
    /// accepted status transition.
    pub event: String,
    /// Optional free-text note attached to the event.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl HistoryEvent {
    /// Build an event, normalizing an empty or whitespace-only note to `None`.
    pub fn new(date: NaiveDate, event: impl Into<String>, note: Option<&str>) -> Self {
        let note = note
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map(String::from);
        Self {
            date,
            event: event.into(),
            note,
        }
    }
}
