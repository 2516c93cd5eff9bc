#![deny(missing_docs)]

//! # cebmag-state — Ticket Lifecycle State Machine
//!
//! The status transition rules for PQRS tickets and the guard that
//! enforces them.
//!
//! ## Transitions
//!
//! ```text
//!          ┌──────────────────────────┐
//!          ▼                          │
//!  Open ──────▶ InProgress ──────▶ Open
//!    │              │
//!    │              ▼
//!    └─────────▶ Closed ◀───────── Reopened
//!                   │                  ▲  │
//!                   └──────────────────┘  │
//!                      reopen (reason)    │
//!                                         ▼
//!                            InProgress / Closed
//! ```
//!
//! In table form (source → allowed targets):
//!
//! | Source       | Targets                  |
//! |--------------|--------------------------|
//! | `Open`       | `InProgress`, `Closed`   |
//! | `InProgress` | `Open`, `Closed`         |
//! | `Reopened`   | `InProgress`, `Closed`   |
//! | `Closed`     | `Reopened`               |
//!
//! No state is absorbing: `Closed` can transition to `Reopened`, which
//! requires a non-empty reason. Closing always requires a non-empty note.
//!
//! ## Guard Discipline
//!
//! [`transition::apply`] is the only code in the workspace that writes
//! `Ticket::status`. The legacy implementation also carried a generic
//! update path that overwrote the status field directly, bypassing the
//! table; that path is deliberately not reproduced. Every accepted
//! transition appends exactly one history event named after the target
//! state, and a rejected transition leaves the ticket untouched.

pub mod transition;

pub use transition::{allowed_targets, apply, is_allowed, TransitionError};
