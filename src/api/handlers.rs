//! HTTP API handlers.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Json,
};
use metrics_exporter_prometheus::PrometheusHandle;
use serde::Serialize;
use serde_json::{json, Value};
use tracing::warn;

use crate::config::Config;
use crate::error::{ModeError, Result};
use crate::metrics;
use crate::modes::{ModeChange, ModeRegistry, ModeSnapshot, ModeState};
use crate::views::{HandlebarsViews, ViewRenderer, VIEW_CONTROL, VIEW_DISPLAY, VIEW_STATUS};

use super::error::ApiResult;

/// Application state shared with handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Active-mode register and mode table.
    pub modes: Arc<ModeState>,
    /// Page renderer.
    pub views: Arc<dyn ViewRenderer>,
    /// Prometheus handle, present once a recorder is installed.
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    /// Create new app state.
    pub fn new(modes: Arc<ModeState>, views: Arc<dyn ViewRenderer>) -> Self {
        Self {
            modes,
            views,
            metrics: None,
        }
    }

    /// Build state from configuration with the built-in modes and templates.
    pub fn from_config(config: &Config) -> Result<Self> {
        let registry = Arc::new(ModeRegistry::builtin());
        let modes = ModeState::new(registry, &config.default_mode)?;
        let views = HandlebarsViews::new()?;

        Ok(Self::new(Arc::new(modes), Arc::new(views)))
    }

    /// Attach a Prometheus handle for the metrics endpoint.
    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Status: "ok".
    pub status: &'static str,
}

/// Extract the requested mode id from a `POST /api/mode` body.
///
/// The body is read as JSON whatever its content type. An absent,
/// unparseable, non-object or empty body, or one without a `mode` key, is
/// [`ModeError::Missing`]. Non-string values are passed on as their JSON
/// text so they are reported as invalid modes.
pub fn requested_mode(body: &[u8]) -> std::result::Result<String, ModeError> {
    let data = match serde_json::from_slice::<Value>(body) {
        Ok(Value::Object(data)) if !data.is_empty() => data,
        _ => return Err(ModeError::Missing),
    };

    match data.get("mode") {
        Some(Value::String(mode)) => Ok(mode.clone()),
        Some(other) => Ok(other.to_string()),
        None => Err(ModeError::Missing),
    }
}

/// Health check handler - always returns 200.
pub async fn health() -> impl IntoResponse {
    Json(HealthResponse { status: "ok" })
}

/// Display page - the iframe shown on the screen, polling `/api/state`.
pub async fn display_page(State(state): State<AppState>) -> ApiResult<Html<String>> {
    let html = state.views.render(VIEW_DISPLAY, &json!({}))?;
    Ok(Html(html))
}

/// Control page - one button per mode.
pub async fn control_page(State(state): State<AppState>) -> ApiResult<Html<String>> {
    let data = json!({ "modes": state.modes.registry() });
    let html = state.views.render(VIEW_CONTROL, &data)?;
    Ok(Html(html))
}

/// Status page - current mode and the mode table.
pub async fn status_page(State(state): State<AppState>) -> ApiResult<Html<String>> {
    let data = json!({
        "current_mode": state.modes.current_mode()?,
        "modes": state.modes.registry(),
    });
    let html = state.views.render(VIEW_STATUS, &data)?;
    Ok(Html(html))
}

/// Current mode and its URL.
pub async fn get_state(State(state): State<AppState>) -> ApiResult<Json<ModeSnapshot>> {
    Ok(Json(state.modes.snapshot()?))
}

/// Every configured mode, keyed by id.
pub async fn get_modes(State(state): State<AppState>) -> Json<ModeRegistry> {
    Json(state.modes.registry().clone())
}

/// Change the active mode.
pub async fn set_mode(
    State(state): State<AppState>,
    body: Bytes,
) -> ApiResult<Json<ModeChange>> {
    let result = requested_mode(&body).and_then(|mode| state.modes.set_mode(&mode));

    match result {
        Ok(change) => Ok(Json(change)),
        Err(e) => {
            if e == ModeError::Missing {
                warn!("Mode change request without a mode");
            }
            metrics::inc_mode_changes_rejected(e.reason());
            Err(e.into())
        }
    }
}

/// Prometheus text exposition.
pub async fn metrics_text(State(state): State<AppState>) -> Response {
    match &state.metrics {
        Some(handle) => (StatusCode::OK, handle.render()).into_response(),
        None => (
            StatusCode::SERVICE_UNAVAILABLE,
            "metrics recorder not installed",
        )
            .into_response(),
    }
}
