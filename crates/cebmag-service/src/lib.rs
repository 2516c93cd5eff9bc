#![deny(missing_docs)]

//! # cebmag-service — Ticket Store, Sequencing, and the Service Root
//!
//! Composition of the PQRS core: the thread-safe in-memory [`TicketStore`],
//! the per-year [`sequence`] generator, and [`TicketService`], the only
//! entry point callers use to create and mutate tickets.
//!
//! ## Atomicity
//!
//! Every operation either fully applies (state and history updated
//! together) or leaves the ticket untouched. Mutations run against a
//! scratch copy under the store's write lock and commit only on success;
//! ticket-number allocation and insertion share the same critical section,
//! which makes sequence uniqueness strict for this store rather than the
//! best-effort behavior of the legacy implementation.

pub mod error;
pub mod sequence;
pub mod service;
pub mod store;

pub use error::ServiceError;
pub use service::{ListFilter, NewTicket, Page, TicketPatch, TicketService};
pub use store::TicketStore;
