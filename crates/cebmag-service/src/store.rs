//! # Ticket Store
//!
//! Thread-safe, cloneable in-memory store for ticket records, keyed by id
//! with a secondary unique index by ticket number and a per-year sequence
//! high-water mark.
//!
//! Everything here is synchronous: no method awaits while holding the
//! lock, so a plain `parking_lot::RwLock` suffices and there is no
//! poisoning to recover from after a panicked writer.
//!
//! Number allocation, uniqueness checking, and insertion share one write
//! lock, so two concurrent creations in the same year cannot race to the
//! same sequence value. The high-water mark only grows: a suffix is never
//! reissued, even when the highest-numbered ticket of a year is deleted.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use uuid::Uuid;

use cebmag_core::{Ticket, TicketNumber};

use crate::sequence;

/// Failure to insert a ticket with a caller-supplied number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateNumber(pub TicketNumber);

#[derive(Debug, Default)]
struct Inner {
    by_id: HashMap<Uuid, Ticket>,
    id_by_number: HashMap<String, Uuid>,
    /// Highest sequence ever allocated or observed per year. Grows only.
    year_high: HashMap<i32, u32>,
}

impl Inner {
    fn observe(&mut self, number: &TicketNumber) {
        let high = self.year_high.entry(number.year()).or_insert(0);
        *high = (*high).max(number.sequence());
    }
}

/// Thread-safe in-memory ticket store.
#[derive(Debug, Clone, Default)]
pub struct TicketStore {
    inner: Arc<RwLock<Inner>>,
}

impl TicketStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate the next ticket number for `year` and insert the ticket
    /// built from it, atomically under one write lock.
    pub fn insert_sequenced(&self, year: i32, build: impl FnOnce(TicketNumber) -> Ticket) -> Ticket {
        let mut inner = self.inner.write();

        let live_next = sequence::next_sequence(
            inner.by_id.values().map(|t| &t.ticket_number),
            year,
        );
        let watermark_next = inner.year_high.get(&year).copied().unwrap_or(0) + 1;
        let number = TicketNumber::compose(year, live_next.max(watermark_next));

        let ticket = build(number.clone());
        debug_assert_eq!(ticket.ticket_number, number);
        inner.observe(&number);
        inner.id_by_number.insert(number.as_str().to_string(), ticket.id);
        inner.by_id.insert(ticket.id, ticket.clone());
        ticket
    }

    /// Insert a ticket carrying a caller-supplied number.
    ///
    /// Rejects numbers already in use; on success the year's high-water
    /// mark absorbs the supplied sequence so later allocations stay above it.
    pub fn insert_numbered(
        &self,
        build: impl FnOnce() -> Ticket,
    ) -> Result<Ticket, DuplicateNumber> {
        let mut inner = self.inner.write();
        let ticket = build();
        let number = ticket.ticket_number.clone();

        if inner.id_by_number.contains_key(number.as_str()) {
            return Err(DuplicateNumber(number));
        }
        inner.observe(&number);
        inner.id_by_number.insert(number.as_str().to_string(), ticket.id);
        inner.by_id.insert(ticket.id, ticket.clone());
        Ok(ticket)
    }

    /// Retrieve a ticket by id.
    pub fn get(&self, id: &Uuid) -> Option<Ticket> {
        self.inner.read().by_id.get(id).cloned()
    }

    /// Retrieve a ticket by its human-readable number.
    pub fn get_by_number(&self, number: &str) -> Option<Ticket> {
        let inner = self.inner.read();
        let id = inner.id_by_number.get(number)?;
        inner.by_id.get(id).cloned()
    }

    /// Snapshot of all tickets, in no particular order.
    pub fn list(&self) -> Vec<Ticket> {
        self.inner.read().by_id.values().cloned().collect()
    }

    /// Atomically read-validate-update a ticket.
    ///
    /// The closure receives a scratch copy; the store commits it only when
    /// the closure returns `Ok`, so a failing operation leaves the stored
    /// record untouched — no partial-failure state is observable. The
    /// closure must not change `id` or `ticket_number` (both are immutable
    /// by construction; debug builds assert it).
    ///
    /// Returns `None` if the id is unknown, otherwise `Some` with the
    /// closure's result, carrying the committed ticket on success.
    pub fn try_update<E>(
        &self,
        id: &Uuid,
        f: impl FnOnce(&mut Ticket) -> Result<(), E>,
    ) -> Option<Result<Ticket, E>> {
        let mut inner = self.inner.write();
        let current = inner.by_id.get(id)?;

        let mut scratch = current.clone();
        if let Err(e) = f(&mut scratch) {
            return Some(Err(e));
        }
        debug_assert_eq!(scratch.id, *id);
        debug_assert_eq!(
            scratch.ticket_number,
            inner.by_id[id].ticket_number,
            "ticket numbers are immutable"
        );
        inner.by_id.insert(*id, scratch.clone());
        Some(Ok(scratch))
    }

    /// Remove a ticket by id, returning it. The number index entry goes
    /// with it; the year high-water mark deliberately does not shrink.
    pub fn remove(&self, id: &Uuid) -> Option<Ticket> {
        let mut inner = self.inner.write();
        let ticket = inner.by_id.remove(id)?;
        inner.id_by_number.remove(ticket.ticket_number.as_str());
        Some(ticket)
    }

    /// Number of stored tickets.
    pub fn len(&self) -> usize {
        self.inner.read().by_id.len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
