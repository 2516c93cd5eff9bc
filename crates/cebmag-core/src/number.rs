//! # Ticket Number (Radicado)
//!
//! The human-readable ticket identifier `PQ-<year>-<sequence>`, e.g.
//! `PQ-2026-0014`. External callers (links, receipts) reference tickets by
//! this number while internal relations use the opaque id.
//!
//! The sequence is zero-padded to at least four digits and strictly
//! increasing within a calendar year. Padding may grow beyond four digits
//! once a year exceeds 9999 tickets; comparison and allocation are therefore
//! numeric, never lexicographic.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// A validated ticket number of the form `PQ-<year>-<sequence>`.
///
/// Serializes/deserializes as a plain string; validated on construction so
/// the rest of the stack never re-parses.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TicketNumber {
    raw: String,
    year: i32,
    sequence: u32,
}

impl TicketNumber {
    /// Compose a ticket number from a year and sequence.
    ///
    /// The sequence is zero-padded to four digits; wider sequences keep
    /// their natural width.
    pub fn compose(year: i32, sequence: u32) -> Self {
        Self {
            raw: format!("{}{sequence:04}", Self::prefix_for_year(year)),
            year,
            sequence,
        }
    }

    /// Parse and validate a ticket number string.
    ///
    /// Only the canonical form is accepted: a four-digit year and a
    /// sequence of at least four digits, zero-padded to exactly four
    /// (wider sequences carry no leading zero). This makes the string
    /// representation a function of `(year, sequence)` — two numbers with
    /// equal components are equal strings, so the store's unique number
    /// index is also unique per numeric suffix.
    pub fn parse(value: &str) -> Result<Self, ValidationError> {
        let invalid = || ValidationError::InvalidTicketNumber(value.to_string());

        let rest = value.strip_prefix("PQ-").ok_or_else(invalid)?;
        let (year_part, seq_part) = rest.split_once('-').ok_or_else(invalid)?;
        if year_part.len() != 4 || !year_part.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        if seq_part.len() < 4
            || !seq_part.bytes().all(|b| b.is_ascii_digit())
            || (seq_part.len() > 4 && seq_part.starts_with('0'))
        {
            return Err(invalid());
        }
        let year: i32 = year_part.parse().map_err(|_| invalid())?;
        let sequence: u32 = seq_part.parse().map_err(|_| invalid())?;

        Ok(Self {
            raw: value.to_string(),
            year,
            sequence,
        })
    }

    /// The `PQ-<year>-` prefix shared by all numbers of a calendar year.
    pub fn prefix_for_year(year: i32) -> String {
        format!("PQ-{year}-")
    }

    /// The calendar year encoded in the number.
    pub fn year(&self) -> i32 {
        self.year
    }

    /// The numeric sequence suffix.
    pub fn sequence(&self) -> u32 {
        self.sequence
    }

    /// The full number as a string slice.
    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

impl std::fmt::Display for TicketNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.raw)
    }
}

impl TryFrom<String> for TicketNumber {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<TicketNumber> for String {
    fn from(number: TicketNumber) -> Self {
        number.raw
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compose_pads_to_four_digits() {
        let n = TicketNumber::compose(2025, 7);
        assert_eq!(n.as_str(), "PQ-2025-0007");
        assert_eq!(n.year(), 2025);
        assert_eq!(n.sequence(), 7);
    }

    #[test]
    fn compose_keeps_wide_sequences() {
        let n = TicketNumber::compose(2025, 12345);
        assert_eq!(n.as_str(), "PQ-2025-12345");
        assert_eq!(n.sequence(), 12345);
    }

    #[test]
    fn parse_accepts_canonical_form() {
        let n = TicketNumber::parse("PQ-2024-0132").unwrap();
        assert_eq!(n.year(), 2024);
        assert_eq!(n.sequence(), 132);
    }

    #[test]
    fn parse_rejects_malformed_input() {
        for bad in [
            "",
            "PQ-2024",
            "PQ--0001",
            "PQ-24-0001",
            "PQ-2024-",
            "PQ-2024-00x1",
            "QX-2024-0001",
            "PQ-abcd-0001",
            "PQ-+024-0001",
            "PQ-2024-+001",
        ] {
            assert!(TicketNumber::parse(bad).is_err(), "accepted: {bad:?}");
        }
    }

    #[test]
    fn parse_rejects_non_canonical_sequence_widths() {
        // A short or over-padded suffix would let "PQ-2026-1" coexist with
        // "PQ-2026-0001" in the store's number index while sharing the same
        // numeric suffix.
        for bad in ["PQ-2026-1", "PQ-2026-001", "PQ-2026-012345"] {
            assert!(TicketNumber::parse(bad).is_err(), "accepted: {bad:?}");
        }
    }

    #[test]
    fn equal_components_imply_equal_strings() {
        let parsed = TicketNumber::parse("PQ-2026-0001").unwrap();
        let composed = TicketNumber::compose(2026, 1);
        assert_eq!(parsed, composed);
        assert_eq!(parsed.as_str(), composed.as_str());

        let wide = TicketNumber::parse("PQ-2026-12345").unwrap();
        assert_eq!(wide, TicketNumber::compose(2026, 12345));
    }

    #[test]
    fn serde_roundtrips_as_plain_string() {
        let n = TicketNumber::compose(2026, 42);
        let json = serde_json::to_string(&n).unwrap();
        assert_eq!(json, "\"PQ-2026-0042\"");
        let back: TicketNumber = serde_json::from_str(&json).unwrap();
        assert_eq!(back, n);
    }

    #[test]
    fn deserialization_rejects_malformed_strings() {
        let result: Result<TicketNumber, _> = serde_json::from_str("\"nope\"");
        assert!(result.is_err());
    }
}
