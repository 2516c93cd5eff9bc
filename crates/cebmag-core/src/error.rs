//! # Validation Errors
//!
//! Structured error types for domain-primitive validation, built with
//! `thiserror`. Each variant carries the rejected value so operators can
//! see exactly what was submitted.

use thiserror::Error;

/// Domain-primitive validation failure.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Ticket number does not conform to `PQ-<year>-<seq>` format.
    #[error("invalid ticket number: \"{0}\" (expected PQ-<year>-<sequence>)")]
    InvalidTicketNumber(String),

    /// A required free-text field was empty or whitespace-only.
    #[error("{field} must not be empty")]
    EmptyField {
        /// Name of the offending field.
        field: &'static str,
    },

    /// A classification value was not recognized in any accepted
    /// representation (canonical name, backend code, or display label).
    #[error("unknown {field} value: \"{value}\"")]
    UnknownValue {
        /// Name of the classification field.
        field: &'static str,
        /// The rejected input.
        value: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_carries_rejected_value() {
        let err = ValidationError::InvalidTicketNumber("XX-1".to_string());
        assert!(err.to_string().contains("XX-1"));

        let err = ValidationError::UnknownValue {
            field: "status",
            value: "Pendiente".to_string(),
        };
        assert!(err.to_string().contains("status"));
        assert!(err.to_string().contains("Pendiente"));
    }

    #[test]
    fn display_names_empty_field() {
        let err = ValidationError::EmptyField { field: "subject" };
        assert_eq!(err.to_string(), "subject must not be empty");
    }
}
