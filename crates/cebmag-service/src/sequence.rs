//! # Per-Year Sequence Generator
//!
//! Produces the next ticket number for a calendar year: the highest
//! existing sequence for that year, plus one, zero-padded to four digits.
//! The first ticket of a year is `PQ-<year>-0001`.
//!
//! This is a pure scan over the numbers currently in use. On its own it
//! would hand a deleted maximum's suffix back out, so `TicketStore` pairs
//! it with a per-year high-water mark that only grows — deleted suffixes
//! are never reissued. Malformed numbers cannot reach this function:
//! [`TicketNumber`] validates shape at the boundary, so the "silently
//! treat an unparseable suffix as zero" failure mode of the legacy
//! implementation is unrepresentable here.
//!
//! Callers that need strict uniqueness under concurrent creation must
//! invoke this while holding the store's write lock; `TicketStore` does
//! exactly that.

use cebmag_core::TicketNumber;

/// The next sequence value for `year` given the numbers currently in use.
pub fn next_sequence<'a>(existing: impl IntoIterator<Item = &'a TicketNumber>, year: i32) -> u32 {
    existing
        .into_iter()
        .filter(|n| n.year() == year)
        .map(TicketNumber::sequence)
        .max()
        .unwrap_or(0)
        + 1
}

/// The next ticket number for `year` given the numbers currently in use.
pub fn next_number<'a>(existing: impl IntoIterator<Item = &'a TicketNumber>, year: i32) -> TicketNumber {
    TicketNumber::compose(year, next_sequence(existing, year))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_ticket_of_a_year_is_0001() {
        let number = next_number([], 2026);
        assert_eq!(number.as_str(), "PQ-2026-0001");
    }

    #[test]
    fn sequence_increments_from_the_year_maximum() {
        let existing = [
            TicketNumber::compose(2026, 1),
            TicketNumber::compose(2026, 7),
            TicketNumber::compose(2026, 3),
        ];
        assert_eq!(next_number(&existing, 2026).as_str(), "PQ-2026-0008");
    }

    #[test]
    fn years_are_independent() {
        let existing = [
            TicketNumber::compose(2025, 412),
            TicketNumber::compose(2026, 2),
        ];
        assert_eq!(next_number(&existing, 2026).as_str(), "PQ-2026-0003");
        assert_eq!(next_number(&existing, 2025).as_str(), "PQ-2025-0413");
        assert_eq!(next_number(&existing, 2027).as_str(), "PQ-2027-0001");
    }

    #[test]
    fn interior_gaps_do_not_lower_the_next_sequence() {
        // 0002 and 0003 were deleted; the live maximum 0004 still governs.
        // No-reuse after deleting the maximum itself is the store's
        // high-water mark's job, not this scan's.
        let existing = [
            TicketNumber::compose(2026, 1),
            TicketNumber::compose(2026, 4),
        ];
        assert_eq!(next_sequence(&existing, 2026), 5);
    }

    #[test]
    fn sequence_widens_past_four_digits() {
        let existing = [TicketNumber::compose(2026, 9999)];
        assert_eq!(next_number(&existing, 2026).as_str(), "PQ-2026-10000");
    }
}
