#![deny(missing_docs)]

//! # cebmag-core — Foundational Types for the CEBMAG Case-Management Core
//!
//! This crate defines the types every other crate in the workspace depends
//! on. It has no internal crate dependencies — only `serde`, `serde_json`,
//! `thiserror`, `chrono`, and `uuid` from the external ecosystem.
//!
//! ## Design Principles
//!
//! 1. **Newtype wrappers for domain primitives.** A [`TicketNumber`] is a
//!    distinct type, not a `String`. Construction validates the
//!    `PQ-<year>-<seq>` shape once; the rest of the stack never re-parses.
//!
//! 2. **Enums at the boundary, never raw strings.** Every classification
//!    field ([`TicketKind`], [`TicketOrigin`], [`TicketChannel`]) is an enum
//!    with a pure bidirectional mapping between canonical name, backend code,
//!    and legacy display label. External input is normalized through
//!    `from_any()` before it reaches business logic.
//!
//! 3. **Absent means absent.** Optional fields serialize as missing keys,
//!    never as empty strings. Empty-string input for an optional value is
//!    normalized to `None` at construction.
//!
//! 4. **Structured errors with `thiserror`.** No `Box<dyn Error>`, no
//!    `.unwrap()` outside tests.

pub mod classify;
pub mod error;
pub mod history;
pub mod number;
pub mod ticket;

// Re-export primary types at crate root for ergonomic imports.
pub use classify::{TicketChannel, TicketKind, TicketOrigin, TicketStatus};
pub use error::ValidationError;
pub use history::HistoryEvent;
pub use number::TicketNumber;
pub use ticket::{Attachment, Requester, Ticket, DEFAULT_SLA_DAYS};
