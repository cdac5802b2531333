//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /api/health             - Liveness check ({"ok": true})
//! GET  /api/products           - Catalog through the filter/sort pipeline
//!
//! # Everything else
//! *    /*                      - Static file under the public root, falling
//!                                back to index.html for unmatched routes
//! ```

pub mod assets;
pub mod health;
pub mod products;

use axum::{Router, middleware as axum_middleware, routing::get};
use tower_http::trace::{DefaultOnResponse, OnResponse, TraceLayer};
use tracing::Span;

use crate::middleware::{request_id_middleware, security_headers_middleware};
use crate::state::AppState;

/// Create the `/api` routes router.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health))
        .route("/products", get(products::index))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .nest("/api", api_routes())
        .fallback(assets::serve)
}

/// Build the full application: routes, state, and the middleware stack.
///
/// Sentry layers are added by the binary so tests run without a Sentry hub.
pub fn app(state: AppState) -> Router {
    routes()
        .layer(axum_middleware::from_fn(security_headers_middleware))
        .layer(axum_middleware::from_fn(request_id_middleware))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &axum::http::Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        uri = %request.uri(),
                        request_id = tracing::field::Empty,
                        status = tracing::field::Empty,
                        latency_ms = tracing::field::Empty,
                    )
                })
                .on_response(
                    |response: &axum::http::Response<_>,
                     latency: std::time::Duration,
                     span: &Span| {
                        span.record("status", response.status().as_u16());
                        span.record(
                            "latency_ms",
                            u64::try_from(latency.as_millis()).unwrap_or(u64::MAX),
                        );
                        DefaultOnResponse::default().on_response(response, latency, span);
                    },
                ),
        )
        .with_state(state)
}
