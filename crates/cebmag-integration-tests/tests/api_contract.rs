//! # API Contract — Error Surfaces
//!
//! Tests every endpoint's error behavior: validation (422), bad request
//! (400), not found (404), and conflict (409), plus the shape of the
//! structured error body.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::json;
use tower::ServiceExt;
use uuid::Uuid;

use cebmag_api::state::AppState;

fn test_app() -> axum::Router {
    cebmag_api::app(AppState::new())
}

/// Read response body as JSON Value.
async fn body_json(response: axum::http::Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// POST helper with JSON body.
fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

/// PATCH helper with JSON body.
fn patch_json(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("PATCH")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

/// GET helper.
fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

/// DELETE helper.
fn delete(uri: &str) -> Request<Body> {
    Request::builder()
        .method("DELETE")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

fn valid_filing() -> serde_json::Value {
    json!({
        "kind": "Petition",
        "origin": "Beneficiary",
        "channel": "Web",
        "requester": { "name": "Ana Ruiz" },
        "subject": "Certificate request",
        "description": "Needs a coverage certificate"
    })
}

async fn file_ticket(app: &axum::Router) -> serde_json::Value {
    let resp = app
        .clone()
        .oneshot(post_json("/v1/tickets", valid_filing()))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    body_json(resp).await
}

// =========================================================================
// Validation errors (422)
// =========================================================================

#[tokio::test]
async fn create_empty_subject_is_422() {
    let app = test_app();
    let mut body = valid_filing();
    body["subject"] = "".into();
    let resp = app.oneshot(post_json("/v1/tickets", body)).await.unwrap();
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn create_empty_description_is_422() {
    let app = test_app();
    let mut body = valid_filing();
    body["description"] = "   ".into();
    let resp = app.oneshot(post_json("/v1/tickets", body)).await.unwrap();
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn create_blank_requester_name_is_422() {
    let app = test_app();
    let mut body = valid_filing();
    body["requester"]["name"] = " ".into();
    let resp = app.oneshot(post_json("/v1/tickets", body)).await.unwrap();
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn create_unknown_kind_origin_channel_are_422() {
    for (field, value) in [("kind", "Denuncia"), ("origin", "ANONIMO"), ("channel", "Fax")] {
        let app = test_app();
        let mut body = valid_filing();
        body[field] = value.into();
        let resp = app.oneshot(post_json("/v1/tickets", body)).await.unwrap();
        assert_eq!(
            resp.status(),
            StatusCode::UNPROCESSABLE_ENTITY,
            "field {field}"
        );
        let v = body_json(resp).await;
        assert_eq!(v["error"]["code"], "VALIDATION_ERROR");
    }
}

#[tokio::test]
async fn create_malformed_ticket_number_is_422() {
    for bad in ["QP-2026-0001", "PQ-2026-1", "PQ-2026-001"] {
        let app = test_app();
        let mut body = valid_filing();
        body["ticket_number"] = bad.into();
        let resp = app.oneshot(post_json("/v1/tickets", body)).await.unwrap();
        assert_eq!(
            resp.status(),
            StatusCode::UNPROCESSABLE_ENTITY,
            "number {bad}"
        );
    }
}

#[tokio::test]
async fn patch_blank_subject_is_422() {
    let app = test_app();
    let ticket = file_ticket(&app).await;
    let id = ticket["id"].as_str().unwrap();

    let resp = app
        .oneshot(patch_json(
            &format!("/v1/tickets/{id}"),
            json!({ "subject": " " }),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn close_without_note_is_422() {
    let app = test_app();
    let ticket = file_ticket(&app).await;
    let id = ticket["id"].as_str().unwrap();

    let resp = app
        .oneshot(post_json(
            &format!("/v1/tickets/{id}/close"),
            json!({ "note": "" }),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn list_with_unknown_filter_value_is_422() {
    let app = test_app();
    for uri in ["/v1/tickets?status=Wrong", "/v1/tickets?kind=Denuncia"] {
        let resp = app.clone().oneshot(get(uri)).await.unwrap();
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY, "uri {uri}");
    }
}

// =========================================================================
// Bad request (400)
// =========================================================================

#[tokio::test]
async fn create_with_non_json_body_is_400() {
    let app = test_app();
    let request = Request::builder()
        .method("POST")
        .uri("/v1/tickets")
        .header("content-type", "application/json")
        .body(Body::from("subject=Hello"))
        .unwrap();
    let resp = app.oneshot(request).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let v = body_json(resp).await;
    assert_eq!(v["error"]["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn create_missing_required_field_is_400() {
    // "kind" absent entirely: a deserialization failure, not a business
    // rule failure.
    let app = test_app();
    let resp = app
        .oneshot(post_json(
            "/v1/tickets",
            json!({
                "origin": "Beneficiary",
                "channel": "Web",
                "requester": { "name": "Ana Ruiz" },
                "subject": "s",
                "description": "d"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

// =========================================================================
// Not found (404)
// =========================================================================

#[tokio::test]
async fn operations_on_unknown_tickets_are_404() {
    let app = test_app();
    let id = Uuid::new_v4();

    let requests = vec![
        get(&format!("/v1/tickets/{id}")),
        get("/v1/tickets/PQ-2030-0001"),
        patch_json(&format!("/v1/tickets/{id}"), json!({ "owner": "x" })),
        post_json(&format!("/v1/tickets/{id}/close"), json!({ "note": "n" })),
        post_json(&format!("/v1/tickets/{id}/reopen"), json!({ "reason": "r" })),
        delete(&format!("/v1/tickets/{id}")),
    ];

    for request in requests {
        let uri = request.uri().clone();
        let resp = app.clone().oneshot(request).await.unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND, "uri {uri}");
        let v = body_json(resp).await;
        assert_eq!(v["error"]["code"], "NOT_FOUND");
    }
}

// =========================================================================
// Conflict (409)
// =========================================================================

#[tokio::test]
async fn duplicate_explicit_number_is_409() {
    let app = test_app();
    let mut body = valid_filing();
    body["ticket_number"] = "PQ-2026-0100".into();

    let resp = app
        .clone()
        .oneshot(post_json("/v1/tickets", body.clone()))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);

    let resp = app.oneshot(post_json("/v1/tickets", body)).await.unwrap();
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    let v = body_json(resp).await;
    assert_eq!(v["error"]["code"], "CONFLICT");
}

#[tokio::test]
async fn reopen_of_open_ticket_is_409() {
    let app = test_app();
    let ticket = file_ticket(&app).await;
    let id = ticket["id"].as_str().unwrap();

    let resp = app
        .oneshot(post_json(
            &format!("/v1/tickets/{id}/reopen"),
            json!({ "reason": "premature" }),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CONFLICT);
}

// =========================================================================
// Error body shape
// =========================================================================

#[tokio::test]
async fn error_body_carries_code_and_message() {
    let app = test_app();
    let resp = app.oneshot(get("/v1/tickets/PQ-2030-0001")).await.unwrap();
    let v = body_json(resp).await;
    assert!(v["error"]["code"].is_string());
    assert!(v["error"]["message"].is_string());
    assert!(v["error"].get("details").is_none());
}
