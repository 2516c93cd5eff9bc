//! # cebmag-api — Axum HTTP API for the CEBMAG PQRS Core
//!
//! The HTTP boundary of the case-management system. Everything below this
//! crate is HTTP-agnostic: handlers normalize external strings, call
//! [`cebmag_service::TicketService`], and map [`cebmag_service::ServiceError`]
//! onto status codes.
//!
//! ## API Surface
//!
//! | Route                        | Module               | Purpose                    |
//! |------------------------------|----------------------|----------------------------|
//! | `/v1/tickets/*`              | [`routes::tickets`]  | PQRS ticket lifecycle      |
//! | `/openapi.json`              | [`openapi`]          | Generated OpenAPI spec     |
//! | `/health/*`                  | (this module)        | Liveness/readiness probes  |
//!
//! ## Error Mapping
//!
//! | Service error | HTTP |
//! |---------------|------|
//! | Validation    | 422  |
//! | NotFound      | 404  |
//! | Conflict      | 409  |
//! | Store         | 500  |
//!
//! Malformed request bodies are 400 before the service is ever reached.

pub mod error;
pub mod extractors;
pub mod openapi;
pub mod routes;
pub mod state;

use axum::Router;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Assemble the full application router.
///
/// Health probes are mounted outside the traced API router so probe
/// traffic does not flood the request logs.
pub fn app(state: AppState) -> Router {
    let api = Router::new()
        .merge(routes::tickets::router())
        .merge(openapi::router())
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let health = Router::new()
        .route("/health/liveness", axum::routing::get(liveness))
        .route("/health/readiness", axum::routing::get(readiness));

    Router::new().merge(health).merge(api)
}

/// Liveness probe — always returns 200 if the process is running.
async fn liveness() -> &'static str {
    "ok"
}

/// Readiness probe — returns 200 when the application is ready to serve.
/// The store is in-memory, so readiness follows liveness.
async fn readiness() -> &'static str {
    "ready"
}
