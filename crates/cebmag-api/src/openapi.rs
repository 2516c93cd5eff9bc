//! # OpenAPI Specification Assembly
//!
//! Assembles all utoipa-documented routes into a single OpenAPI spec,
//! served at `/openapi.json`.

use axum::routing::get;
use axum::{Json, Router};
use utoipa::OpenApi;

use crate::state::AppState;

/// Assembled OpenAPI spec for the entire API surface.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "CEBMAG PQRS API",
        version = "0.1.0",
        description = "Case-management API for petitions, complaints, claims, and suggestions (PQRS): sequenced filing, guarded lifecycle transitions, and an append-only audit trail.",
        license(name = "MIT")
    ),
    paths(
        crate::routes::tickets::create_ticket,
        crate::routes::tickets::list_tickets,
        crate::routes::tickets::get_ticket,
        crate::routes::tickets::update_ticket,
        crate::routes::tickets::close_ticket,
        crate::routes::tickets::reopen_ticket,
        crate::routes::tickets::delete_ticket,
    ),
    components(schemas(
        // Ticket DTOs
        crate::routes::tickets::TicketDto,
        crate::routes::tickets::TicketPage,
        crate::routes::tickets::RequesterDto,
        crate::routes::tickets::AttachmentDto,
        crate::routes::tickets::HistoryEventDto,
        crate::routes::tickets::CreateTicketRequest,
        crate::routes::tickets::UpdateTicketRequest,
        crate::routes::tickets::CloseTicketRequest,
        crate::routes::tickets::ReopenTicketRequest,
        // Error types
        crate::error::ErrorBody,
        crate::error::ErrorDetail,
    )),
    tags(
        (name = "tickets", description = "PQRS ticket lifecycle API"),
    )
)]
pub struct ApiDoc;

/// Build the OpenAPI router, serving the JSON spec at `/openapi.json`.
pub fn router() -> Router<AppState> {
    Router::new().route("/openapi.json", get(openapi_json))
}

/// GET /openapi.json — Return the generated OpenAPI specification.
async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spec_includes_all_ticket_paths() {
        let spec = ApiDoc::openapi();
        let paths = &spec.paths.paths;
        assert!(paths.contains_key("/v1/tickets"));
        assert!(paths.contains_key("/v1/tickets/{key}"));
        assert!(paths.contains_key("/v1/tickets/{key}/close"));
        assert!(paths.contains_key("/v1/tickets/{key}/reopen"));
    }
}
