//! Relay routes.
//!
//! - `GET  /health`        — liveness check
//! - `POST /linear-update` — verify dispatch output and return the comment to post
//! - `POST /dispatch`      — accepted but not routed anywhere yet
//!
//! Unknown paths and wrong methods on known paths both answer 404 JSON.

use axum::body::Bytes;
use axum::extract::rejection::BytesRejection;
use axum::extract::DefaultBodyLimit;
use axum::response::Json;
use axum::routing::{get, post};
use axum::Router;
use serde::Serialize;
use serde_json::Value;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use verification::verify_and_format_value;

use crate::config::DEFAULT_MAX_BODY_BYTES;
use crate::error::{ApiError, ApiResult};

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinearUpdateResponse {
    pub issue_id: String,
    pub pass: bool,
    pub reason: String,
    pub comment: String,
}

#[derive(Debug, Serialize)]
pub struct DispatchAck {
    pub status: &'static str,
    pub note: &'static str,
}

/// Build the relay router with the default body cap.
pub fn router() -> Router {
    router_with_body_limit(DEFAULT_MAX_BODY_BYTES)
}

/// Build the relay router, rejecting bodies over `max_body_bytes` with 413.
pub fn router_with_body_limit(max_body_bytes: usize) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/linear-update", post(linear_update))
        .route("/dispatch", post(dispatch))
        .fallback(not_found)
        .method_not_allowed_fallback(not_found)
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .layer(TraceLayer::new_for_http())
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

async fn linear_update(
    body: Result<Bytes, BytesRejection>,
) -> ApiResult<Json<LinearUpdateResponse>> {
    let body = body.map_err(|rejection| {
        warn!(status = %rejection.status(), "Rejected /linear-update body");
        ApiError::from(rejection)
    })?;
    let request: Value = serde_json::from_slice(&body).map_err(|e| {
        warn!(error = %e, "Rejected /linear-update with invalid JSON body");
        ApiError::from(e)
    })?;

    let issue_id = request
        .get("issueId")
        .and_then(Value::as_str)
        .filter(|id| !id.is_empty())
        .ok_or(ApiError::MissingField)?;

    let output = request
        .get("output")
        .filter(|v| !v.is_null())
        .ok_or(ApiError::MissingField)?;

    let outcome = verify_and_format_value(issue_id, output);
    info!(
        issue_id,
        pass = outcome.pass,
        summary = %outcome.summary(),
        "Verified dispatch output"
    );

    Ok(Json(LinearUpdateResponse {
        issue_id: issue_id.to_string(),
        pass: outcome.pass,
        reason: outcome.reason,
        comment: outcome.comment,
    }))
}

async fn dispatch() -> Json<DispatchAck> {
    Json(DispatchAck {
        status: "received",
        note: "dispatch routing not yet implemented",
    })
}

async fn not_found() -> ApiError {
    ApiError::NotFound
}
