//! HTTP API route definitions.

use std::time::Instant;

use axum::{
    extract::{MatchedPath, Request},
    middleware::{self, Next},
    response::Response,
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::metrics;

use super::handlers::{
    control_page, display_page, get_modes, get_state, health, metrics_text, set_mode, status_page,
    AppState,
};

/// Create the API router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Pages
        .route("/", get(display_page))
        .route("/control", get(control_page))
        .route("/status", get(status_page))
        // JSON API
        .route("/api/state", get(get_state))
        .route("/api/modes", get(get_modes))
        .route("/api/mode", post(set_mode))
        // Operations
        .route("/health", get(health))
        .route("/metrics", get(metrics_text))
        .route_layer(middleware::from_fn(track_latency))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn track_latency(request: Request, next: Next) -> Response {
    let start = Instant::now();
    let endpoint = request
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_owned())
        .unwrap_or_else(|| request.uri().path().to_owned());

    let response = next.run(request).await;
    metrics::record_http_latency(start, &endpoint);
    response
}
