//! # PQRS Ticket API
//!
//! The full ticket surface: filing, lookup, listing, field updates,
//! guarded close/reopen, and deletion.
//!
//! ## Endpoints
//!
//! - `POST /v1/tickets` — file a ticket
//! - `GET /v1/tickets` — list with filters and pagination
//! - `GET /v1/tickets/:key` — get by id or ticket number
//! - `PATCH /v1/tickets/:key` — update fields / transition status
//! - `POST /v1/tickets/:key/close` — close with a note
//! - `POST /v1/tickets/:key/reopen` — reopen with a reason
//! - `DELETE /v1/tickets/:key` — delete
//!
//! Classification and status values are normalized at this boundary: the
//! canonical name, the legacy backend code, and the legacy display label
//! are all accepted on input; responses always carry canonical names.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use cebmag_core::{
    Attachment, HistoryEvent, Requester, Ticket, TicketChannel, TicketKind, TicketNumber,
    TicketOrigin, TicketStatus,
};
use cebmag_service::{ListFilter, NewTicket, TicketPatch};

use crate::error::AppError;
use crate::extractors::{extract_json, extract_validated_json, Validate};
use crate::state::AppState;

// ── Request/Response DTOs ───────────────────────────────────────────

/// Requester contact details.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RequesterDto {
    /// Identity document type, e.g. `"CC"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document_type: Option<String>,
    /// Identity document number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document_number: Option<String>,
    /// Full name. Required non-empty when filing.
    pub name: String,
    /// Contact phone.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Contact email.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl From<RequesterDto> for Requester {
    fn from(dto: RequesterDto) -> Self {
        Requester {
            document_type: dto.document_type,
            document_number: dto.document_number,
            name: dto.name,
            phone: dto.phone,
            email: dto.email,
        }
    }
}

impl From<Requester> for RequesterDto {
    fn from(r: Requester) -> Self {
        RequesterDto {
            document_type: r.document_type,
            document_number: r.document_number,
            name: r.name,
            phone: r.phone,
            email: r.email,
        }
    }
}

/// A file attached to a ticket.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AttachmentDto {
    /// Original file name.
    pub name: String,
    /// Size in bytes, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
    /// Download URL, when stored externally.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// MIME type, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mime: Option<String>,
}

impl From<AttachmentDto> for Attachment {
    fn from(dto: AttachmentDto) -> Self {
        Attachment {
            name: dto.name,
            size: dto.size,
            url: dto.url,
            mime: dto.mime,
        }
    }
}

impl From<Attachment> for AttachmentDto {
    fn from(a: Attachment) -> Self {
        AttachmentDto {
            name: a.name,
            size: a.size,
            url: a.url,
            mime: a.mime,
        }
    }
}

/// One entry of a ticket's audit trail.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct HistoryEventDto {
    /// Calendar date of the event.
    pub date: NaiveDate,
    /// Event name, e.g. `"Radicado"` or `"Closed"`.
    pub event: String,
    /// Free-form note, when one was recorded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl From<HistoryEvent> for HistoryEventDto {
    fn from(e: HistoryEvent) -> Self {
        HistoryEventDto {
            date: e.date,
            event: e.event,
            note: e.note,
        }
    }
}

/// API representation of a ticket. Classification and status fields are
/// canonical names; `overdue` is computed against today's date.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct TicketDto {
    pub id: Uuid,
    /// Human-readable number, `PQ-<year>-<seq>`.
    pub ticket_number: String,
    pub kind: String,
    pub status: String,
    pub origin: String,
    pub channel: String,
    pub requester: RequesterDto,
    pub subject: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    /// Whether the ticket has breached its SLA as of today.
    pub overdue: bool,
    pub attachments: Vec<AttachmentDto>,
    /// Append-only audit trail, oldest first.
    pub history: Vec<HistoryEventDto>,
    pub created_at: DateTime<Utc>,
}

impl From<Ticket> for TicketDto {
    fn from(t: Ticket) -> Self {
        let overdue = t.is_overdue(Utc::now().date_naive());
        TicketDto {
            id: t.id,
            ticket_number: t.ticket_number.as_str().to_string(),
            kind: t.kind.as_str().to_string(),
            status: t.status.as_str().to_string(),
            origin: t.origin.as_str().to_string(),
            channel: t.channel.as_str().to_string(),
            requester: t.requester.into(),
            subject: t.subject,
            description: t.description,
            owner: t.owner,
            due_date: t.due_date,
            overdue,
            attachments: t.attachments.into_iter().map(Into::into).collect(),
            history: t.history.into_iter().map(Into::into).collect(),
            created_at: t.created_at,
        }
    }
}

/// Request to file a new ticket.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateTicketRequest {
    /// Explicit ticket number (migration use). Allocated when absent.
    pub ticket_number: Option<String>,
    /// Ticket kind: canonical name, backend code, or display label.
    pub kind: String,
    /// Who raised the ticket.
    pub origin: String,
    /// Intake channel.
    pub channel: String,
    /// Requester contact record.
    pub requester: RequesterDto,
    /// Short summary.
    pub subject: String,
    /// Full description.
    pub description: String,
    /// Responsible party or team.
    pub owner: Option<String>,
    /// Explicit SLA due date; defaults to filing date + 15 days.
    pub due_date: Option<NaiveDate>,
    /// Initial attachments.
    #[serde(default)]
    pub attachments: Vec<AttachmentDto>,
}

impl Validate for CreateTicketRequest {
    fn validate(&self) -> Result<(), String> {
        if self.subject.trim().is_empty() {
            return Err("subject must not be empty".to_string());
        }
        if self.description.trim().is_empty() {
            return Err("description must not be empty".to_string());
        }
        if self.requester.name.trim().is_empty() {
            return Err("requester.name must not be empty".to_string());
        }
        Ok(())
    }
}

/// Request to update an existing ticket. Absent fields are left as is;
/// a present `status` goes through the transition guard.
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateTicketRequest {
    pub kind: Option<String>,
    pub origin: Option<String>,
    pub channel: Option<String>,
    pub requester: Option<RequesterDto>,
    pub subject: Option<String>,
    pub description: Option<String>,
    /// New owner. An empty string clears the assignment.
    pub owner: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub attachments: Option<Vec<AttachmentDto>>,
    /// Requested status transition (any accepted representation).
    pub status: Option<String>,
    /// Note for the transition; required when closing or reopening.
    pub note: Option<String>,
}

impl Validate for UpdateTicketRequest {
    fn validate(&self) -> Result<(), String> {
        if let Some(ref subject) = self.subject {
            if subject.trim().is_empty() {
                return Err("subject must not be empty if provided".to_string());
            }
        }
        if let Some(ref description) = self.description {
            if description.trim().is_empty() {
                return Err("description must not be empty if provided".to_string());
            }
        }
        if let Some(ref requester) = self.requester {
            if requester.name.trim().is_empty() {
                return Err("requester.name must not be empty if provided".to_string());
            }
        }
        Ok(())
    }
}

/// Request to close a ticket.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CloseTicketRequest {
    /// Resolution note. Required non-empty.
    pub note: String,
}

/// Request to reopen a closed ticket.
#[derive(Debug, Deserialize, ToSchema)]
pub struct ReopenTicketRequest {
    /// Reason for reopening. Required non-empty.
    pub reason: String,
}

/// Listing filter query parameters.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListTicketsQuery {
    /// Case-insensitive match against ticket number, subject, and owner.
    pub q: Option<String>,
    /// Status filter (any accepted representation).
    pub status: Option<String>,
    /// Kind filter (any accepted representation).
    pub kind: Option<String>,
    /// 1-indexed page, default 1.
    pub page: Option<u32>,
    /// Page size, default 20, clamped to `[1, 100]`.
    pub page_size: Option<u32>,
}

/// One page of listing results.
#[derive(Debug, Serialize, ToSchema)]
pub struct TicketPage {
    pub items: Vec<TicketDto>,
    /// Total tickets matching the filter, across all pages.
    pub total: usize,
    pub page: u32,
    pub page_size: u32,
}

// ── Normalization helpers ───────────────────────────────────────────

fn parse_kind(value: &str) -> Result<TicketKind, AppError> {
    TicketKind::from_any(value)
        .ok_or_else(|| AppError::Validation(format!("unknown kind: {value:?}")))
}

fn parse_origin(value: &str) -> Result<TicketOrigin, AppError> {
    TicketOrigin::from_any(value)
        .ok_or_else(|| AppError::Validation(format!("unknown origin: {value:?}")))
}

fn parse_channel(value: &str) -> Result<TicketChannel, AppError> {
    TicketChannel::from_any(value)
        .ok_or_else(|| AppError::Validation(format!("unknown channel: {value:?}")))
}

fn parse_status(value: &str) -> Result<TicketStatus, AppError> {
    TicketStatus::from_any(value)
        .ok_or_else(|| AppError::Validation(format!("unknown status: {value:?}")))
}

/// Resolve a path key (UUID or ticket number) to the ticket's id.
fn resolve_id(state: &AppState, key: &str) -> Result<Uuid, AppError> {
    Ok(state.tickets.find_by_id_or_number(key)?.id)
}

// ── Router ──────────────────────────────────────────────────────────

/// Build the tickets router with all lifecycle endpoints.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/v1/tickets", get(list_tickets).post(create_ticket))
        .route(
            "/v1/tickets/:key",
            get(get_ticket).patch(update_ticket).delete(delete_ticket),
        )
        .route("/v1/tickets/:key/close", post(close_ticket))
        .route("/v1/tickets/:key/reopen", post(reopen_ticket))
}

// ── Handlers ────────────────────────────────────────────────────────

/// POST /v1/tickets — File a new ticket.
#[utoipa::path(
    post,
    path = "/v1/tickets",
    request_body = CreateTicketRequest,
    responses(
        (status = 201, description = "Ticket filed", body = TicketDto),
        (status = 400, description = "Malformed request body", body = crate::error::ErrorBody),
        (status = 409, description = "Ticket number already exists", body = crate::error::ErrorBody),
        (status = 422, description = "Validation error", body = crate::error::ErrorBody),
    ),
    tag = "tickets"
)]
async fn create_ticket(
    State(state): State<AppState>,
    body: Result<Json<CreateTicketRequest>, JsonRejection>,
) -> Result<(axum::http::StatusCode, Json<TicketDto>), AppError> {
    let req = extract_validated_json(body)?;

    let ticket_number = req
        .ticket_number
        .map(|n| TicketNumber::parse(&n).map_err(|e| AppError::Validation(e.to_string())))
        .transpose()?;

    let new = NewTicket {
        ticket_number,
        kind: parse_kind(&req.kind)?,
        origin: parse_origin(&req.origin)?,
        channel: parse_channel(&req.channel)?,
        requester: req.requester.into(),
        subject: req.subject,
        description: req.description,
        owner: req.owner,
        due_date: req.due_date,
        attachments: req.attachments.into_iter().map(Into::into).collect(),
    };

    let ticket = state.tickets.create(new)?;
    Ok((axum::http::StatusCode::CREATED, Json(ticket.into())))
}

/// GET /v1/tickets — List tickets, newest first.
#[utoipa::path(
    get,
    path = "/v1/tickets",
    params(ListTicketsQuery),
    responses(
        (status = 200, description = "One page of tickets", body = TicketPage),
        (status = 422, description = "Unknown filter value", body = crate::error::ErrorBody),
    ),
    tag = "tickets"
)]
async fn list_tickets(
    State(state): State<AppState>,
    Query(query): Query<ListTicketsQuery>,
) -> Result<Json<TicketPage>, AppError> {
    let filter = ListFilter {
        query: query.q,
        status: query.status.as_deref().map(parse_status).transpose()?,
        kind: query.kind.as_deref().map(parse_kind).transpose()?,
        page: query.page,
        page_size: query.page_size,
    };

    let page = state.tickets.list(&filter);
    Ok(Json(TicketPage {
        items: page.items.into_iter().map(Into::into).collect(),
        total: page.total,
        page: page.page,
        page_size: page.page_size,
    }))
}

/// GET /v1/tickets/:key — Get a ticket by id or by ticket number.
#[utoipa::path(
    get,
    path = "/v1/tickets/{key}",
    params(("key" = String, Path, description = "Ticket UUID or ticket number")),
    responses(
        (status = 200, description = "Ticket found", body = TicketDto),
        (status = 404, description = "Ticket not found", body = crate::error::ErrorBody),
    ),
    tag = "tickets"
)]
async fn get_ticket(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<TicketDto>, AppError> {
    let ticket = state.tickets.find_by_id_or_number(&key)?;
    Ok(Json(ticket.into()))
}

/// PATCH /v1/tickets/:key — Update ticket fields.
#[utoipa::path(
    patch,
    path = "/v1/tickets/{key}",
    params(("key" = String, Path, description = "Ticket UUID or ticket number")),
    request_body = UpdateTicketRequest,
    responses(
        (status = 200, description = "Ticket updated", body = TicketDto),
        (status = 404, description = "Ticket not found", body = crate::error::ErrorBody),
        (status = 422, description = "Validation error or illegal transition", body = crate::error::ErrorBody),
    ),
    tag = "tickets"
)]
async fn update_ticket(
    State(state): State<AppState>,
    Path(key): Path<String>,
    body: Result<Json<UpdateTicketRequest>, JsonRejection>,
) -> Result<Json<TicketDto>, AppError> {
    let req = extract_validated_json(body)?;
    let id = resolve_id(&state, &key)?;

    let patch = TicketPatch {
        kind: req.kind.as_deref().map(parse_kind).transpose()?,
        origin: req.origin.as_deref().map(parse_origin).transpose()?,
        channel: req.channel.as_deref().map(parse_channel).transpose()?,
        requester: req.requester.map(Into::into),
        subject: req.subject,
        description: req.description,
        owner: req.owner,
        due_date: req.due_date,
        attachments: req
            .attachments
            .map(|a| a.into_iter().map(Into::into).collect()),
        status: req.status.as_deref().map(parse_status).transpose()?,
        note: req.note,
    };

    let ticket = state.tickets.update(&id, patch)?;
    Ok(Json(ticket.into()))
}

/// POST /v1/tickets/:key/close — Close a ticket with a resolution note.
#[utoipa::path(
    post,
    path = "/v1/tickets/{key}/close",
    params(("key" = String, Path, description = "Ticket UUID or ticket number")),
    request_body = CloseTicketRequest,
    responses(
        (status = 200, description = "Ticket closed", body = TicketDto),
        (status = 404, description = "Ticket not found", body = crate::error::ErrorBody),
        (status = 422, description = "Missing note or illegal transition", body = crate::error::ErrorBody),
    ),
    tag = "tickets"
)]
async fn close_ticket(
    State(state): State<AppState>,
    Path(key): Path<String>,
    body: Result<Json<CloseTicketRequest>, JsonRejection>,
) -> Result<Json<TicketDto>, AppError> {
    let req = extract_json(body)?;
    let id = resolve_id(&state, &key)?;
    let ticket = state.tickets.close(&id, &req.note)?;
    Ok(Json(ticket.into()))
}

/// POST /v1/tickets/:key/reopen — Reopen a closed ticket.
#[utoipa::path(
    post,
    path = "/v1/tickets/{key}/reopen",
    params(("key" = String, Path, description = "Ticket UUID or ticket number")),
    request_body = ReopenTicketRequest,
    responses(
        (status = 200, description = "Ticket reopened", body = TicketDto),
        (status = 404, description = "Ticket not found", body = crate::error::ErrorBody),
        (status = 409, description = "Ticket is not closed", body = crate::error::ErrorBody),
        (status = 422, description = "Missing reason", body = crate::error::ErrorBody),
    ),
    tag = "tickets"
)]
async fn reopen_ticket(
    State(state): State<AppState>,
    Path(key): Path<String>,
    body: Result<Json<ReopenTicketRequest>, JsonRejection>,
) -> Result<Json<TicketDto>, AppError> {
    let req = extract_json(body)?;
    let id = resolve_id(&state, &key)?;
    let ticket = state.tickets.reopen(&id, &req.reason)?;
    Ok(Json(ticket.into()))
}

/// DELETE /v1/tickets/:key — Delete a ticket.
#[utoipa::path(
    delete,
    path = "/v1/tickets/{key}",
    params(("key" = String, Path, description = "Ticket UUID or ticket number")),
    responses(
        (status = 204, description = "Ticket deleted"),
        (status = 404, description = "Ticket not found", body = crate::error::ErrorBody),
    ),
    tag = "tickets"
)]
async fn delete_ticket(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<axum::http::StatusCode, AppError> {
    let id = resolve_id(&state, &key)?;
    state.tickets.delete(&id)?;
    Ok(axum::http::StatusCode::NO_CONTENT)
}
