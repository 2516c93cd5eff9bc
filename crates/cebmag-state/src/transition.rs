//! # Status Transition Guard
//!
//! Validates and applies status changes. Checks run before any mutation,
//! so a rejected transition leaves both `status` and `history` exactly as
//! they were.

use chrono::NaiveDate;
use thiserror::Error;

use cebmag_core::{Ticket, TicketStatus};

/// A rejected status transition.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransitionError {
    /// The `(from, to)` pair is not in the transition table. Self
    /// transitions are rejected too — re-submitting the current status is
    /// not a transition.
    #[error("invalid status transition: {from} -> {to}")]
    InvalidTransition {
        /// Status before the attempted transition.
        from: TicketStatus,
        /// The requested target status.
        to: TicketStatus,
    },

    /// Transition into `to` requires a non-empty note (closing note or
    /// reopen reason) and none was supplied.
    #[error("transition to {to} requires a non-empty note")]
    MissingNote {
        /// The requested target status.
        to: TicketStatus,
    },
}

/// The targets legally reachable from `from`.
pub fn allowed_targets(from: TicketStatus) -> &'static [TicketStatus] {
    match from {
        TicketStatus::Open => &[TicketStatus::InProgress, TicketStatus::Closed],
        TicketStatus::InProgress => &[TicketStatus::Open, TicketStatus::Closed],
        TicketStatus::Reopened => &[TicketStatus::InProgress, TicketStatus::Closed],
        TicketStatus::Closed => &[TicketStatus::Reopened],
    }
}

/// Whether `from -> to` is in the transition table.
pub fn is_allowed(from: TicketStatus, to: TicketStatus) -> bool {
    allowed_targets(from).contains(&to)
}

/// Whether transitioning into `to` requires a non-empty note.
fn requires_note(to: TicketStatus) -> bool {
    matches!(to, TicketStatus::Closed | TicketStatus::Reopened)
}

/// Validate and apply a status transition on `ticket`.
///
/// On success the ticket's status becomes `target` and exactly one history
/// event named after the target state is appended, dated `today`, carrying
/// `note` when present. On error the ticket is untouched.
///
/// Closing requires a non-empty `note`; reopening requires a non-empty
/// reason passed the same way.
pub fn apply(
    ticket: &mut Ticket,
    target: TicketStatus,
    note: Option<&str>,
    today: NaiveDate,
) -> Result<(), TransitionError> {
    if !is_allowed(ticket.status, target) {
        return Err(TransitionError::InvalidTransition {
            from: ticket.status,
            to: target,
        });
    }

    let note = note.map(str::trim).filter(|n| !n.is_empty());
    if requires_note(target) && note.is_none() {
        return Err(TransitionError::MissingNote { to: target });
    }

    ticket.status = target;
    ticket.record_event(today, target.as_str(), note);
    Ok(())
}
