//! Liveness endpoint.

use axum::{
    Json,
    http::header::CONTENT_TYPE,
    response::{IntoResponse, Response},
};
use serde::Serialize;

/// JSON content type used by the `/api` routes.
pub const JSON_UTF8: &str = "application/json; charset=utf-8";

/// Body of the health response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub ok: bool,
}

/// Liveness health check endpoint.
///
/// Returns `{"ok": true}` if the server is running. Does not check the
/// public root or catalog.
pub async fn health() -> Response {
    ([(CONTENT_TYPE, JSON_UTF8)], Json(HealthResponse { ok: true })).into_response()
}
