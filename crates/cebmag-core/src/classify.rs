//! # Ticket Classification Enums
//!
//! The three classification axes of a PQRS ticket: kind, origin, and
//! intake channel.
//!
//! Each enum carries a pure, stateless, bidirectional mapping between three
//! representations:
//!
//! - **canonical name** — the serialized form used on the wire
//!   (e.g. `"Complaint"`),
//! - **backend code** — the storage enum of the legacy database
//!   (e.g. `"QUEJA"`),
//! - **display label** — the Spanish UI label of the legacy front-end
//!   (e.g. `"Queja"`).
//!
//! The legacy implementation kept these as global mutable dictionaries and
//! tolerated raw strings deep inside update handlers. Here the mapping is a
//! `match` on a `Copy` enum, and [`from_any`](TicketKind::from_any) is the
//! single normalization point at the system boundary — raw external strings
//! never reach business logic.

use serde::{Deserialize, Serialize};

/// The kind of a PQRS ticket: petition, complaint, claim, or suggestion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TicketKind {
    /// A request for information or action (Petición).
    Petition,
    /// An expression of dissatisfaction with the service (Queja).
    Complaint,
    /// A claim about a breached obligation (Reclamo).
    Claim,
    /// A proposal to improve the service (Sugerencia).
    Suggestion,
}

impl TicketKind {
    /// The canonical serialized name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Petition => "Petition",
            Self::Complaint => "Complaint",
            Self::Claim => "Claim",
            Self::Suggestion => "Suggestion",
        }
    }

    /// The backend storage code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Petition => "PETICION",
            Self::Complaint => "QUEJA",
            Self::Claim => "RECLAMO",
            Self::Suggestion => "SUGERENCIA",
        }
    }

    /// The legacy display label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Petition => "Petición",
            Self::Complaint => "Queja",
            Self::Claim => "Reclamo",
            Self::Suggestion => "Sugerencia",
        }
    }

    /// Normalize any accepted external representation — canonical name,
    /// backend code, or display label — to the enum. Returns `None` for
    /// anything else.
    pub fn from_any(value: &str) -> Option<Self> {
        match value.trim() {
            "Petition" | "PETICION" | "Petición" => Some(Self::Petition),
            "Complaint" | "QUEJA" | "Queja" => Some(Self::Complaint),
            "Claim" | "RECLAMO" | "Reclamo" => Some(Self::Claim),
            "Suggestion" | "SUGERENCIA" | "Sugerencia" => Some(Self::Suggestion),
            _ => None,
        }
    }
}

impl std::fmt::Display for TicketKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Who raised the ticket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TicketOrigin {
    /// A registered beneficiary of the program.
    Beneficiary,
    /// Any other person or organization.
    ThirdParty,
}

impl TicketOrigin {
    /// The canonical serialized name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Beneficiary => "Beneficiary",
            Self::ThirdParty => "ThirdParty",
        }
    }

    /// The backend storage code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Beneficiary => "BENEFICIARIO",
            Self::ThirdParty => "TERCERO",
        }
    }

    /// The legacy display label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Beneficiary => "Beneficiario",
            Self::ThirdParty => "Tercero",
        }
    }

    /// Normalize any accepted external representation to the enum.
    pub fn from_any(value: &str) -> Option<Self> {
        match value.trim() {
            "Beneficiary" | "BENEFICIARIO" | "Beneficiario" => Some(Self::Beneficiary),
            "ThirdParty" | "TERCERO" | "Tercero" => Some(Self::ThirdParty),
            _ => None,
        }
    }
}

impl std::fmt::Display for TicketOrigin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The channel through which the ticket was received.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TicketChannel {
    /// Self-service web form.
    Web,
    /// Telephone call (Teléfono).
    Phone,
    /// In-person visit (Presencial).
    InPerson,
    /// Electronic mail.
    Email,
}

impl TicketChannel {
    /// The canonical serialized name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Web => "Web",
            Self::Phone => "Phone",
            Self::InPerson => "InPerson",
            Self::Email => "Email",
        }
    }

    /// The backend storage code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Web => "WEB",
            Self::Phone => "TELEFONO",
            Self::InPerson => "PRESENCIAL",
            Self::Email => "EMAIL",
        }
    }

    /// The legacy display label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Web => "Web",
            Self::Phone => "Teléfono",
            Self::InPerson => "Presencial",
            Self::Email => "Email",
        }
    }

    /// Normalize any accepted external representation to the enum.
    pub fn from_any(value: &str) -> Option<Self> {
        match value.trim() {
            "Web" | "WEB" => Some(Self::Web),
            "Phone" | "TELEFONO" | "Teléfono" => Some(Self::Phone),
            "InPerson" | "PRESENCIAL" | "Presencial" => Some(Self::InPerson),
            "Email" | "EMAIL" => Some(Self::Email),
            _ => None,
        }
    }
}

impl std::fmt::Display for TicketChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The lifecycle status of a ticket.
///
/// The transition rules between statuses live in `cebmag-state`; this type
/// only names the states and their external representations. There is no
/// raw setter anywhere in the stack — status mutation goes through the
/// transition guard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TicketStatus {
    /// Newly filed, awaiting triage (Abierta). Initial state.
    Open,
    /// Being worked by the responsible team (En trámite).
    InProgress,
    /// Closed ticket reopened after new information (Re Abierto).
    Reopened,
    /// Resolved and closed (Cerrada). Not absorbing — a closed ticket can
    /// be reopened.
    Closed,
}

impl TicketStatus {
    /// The canonical serialized name. Doubles as the history-event name
    /// recorded when a transition into this state is accepted.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "Open",
            Self::InProgress => "InProgress",
            Self::Reopened => "Reopened",
            Self::Closed => "Closed",
        }
    }

    /// The backend storage code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Open => "ABIERTA",
            Self::InProgress => "EN_TRAMITE",
            Self::Reopened => "RE_ABIERTO",
            Self::Closed => "CERRADA",
        }
    }

    /// The legacy display label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Open => "Abierta",
            Self::InProgress => "En trámite",
            Self::Reopened => "Re Abierto",
            Self::Closed => "Cerrada",
        }
    }

    /// Normalize any accepted external representation to the enum.
    ///
    /// The legacy update path tolerated label, code, and mixed-case
    /// variants of the reopened label; all of those are accepted here,
    /// anything else is rejected.
    pub fn from_any(value: &str) -> Option<Self> {
        match value.trim() {
            "Open" | "ABIERTA" | "Abierta" => Some(Self::Open),
            "InProgress" | "EN_TRAMITE" | "En trámite" => Some(Self::InProgress),
            "Reopened" | "RE_ABIERTO" | "Re Abierto" | "Re abierto" => Some(Self::Reopened),
            "Closed" | "CERRADA" | "Cerrada" => Some(Self::Closed),
            _ => None,
        }
    }
}

impl std::fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
