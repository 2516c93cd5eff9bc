//! # Service Error Taxonomy
//!
//! The four failure classes of the ticket service. The HTTP layer maps
//! these onto status codes; nothing below the API boundary knows about
//! HTTP.

use thiserror::Error;

use cebmag_state::TransitionError;

/// A failed ticket-service operation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ServiceError {
    /// Missing or empty required field, unknown classification value, or
    /// an illegal status transition. Never retried.
    #[error("validation error: {0}")]
    Validation(String),

    /// Lookup by id or ticket number yielded nothing.
    #[error("not found: {0}")]
    NotFound(String),

    /// The operation conflicts with current state: reopening a ticket that
    /// is not closed, or a caller-supplied ticket number that already
    /// exists. The caller may re-fetch and retry the whole operation.
    #[error("conflict: {0}")]
    Conflict(String),

    /// Underlying persistence failure. Detail is logged server-side; the
    /// API layer surfaces a generic message.
    #[error("store error: {0}")]
    Store(String),
}

impl From<TransitionError> for ServiceError {
    fn from(err: TransitionError) -> Self {
        // Both illegal pairs and missing close/reopen notes are caller
        // mistakes, reported as validation failures.
        Self::Validation(err.to_string())
    }
}

impl From<cebmag_core::ValidationError> for ServiceError {
    fn from(err: cebmag_core::ValidationError) -> Self {
        Self::Validation(err.to_string())
    }
}
