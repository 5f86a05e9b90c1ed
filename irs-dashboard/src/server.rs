//! HTTP shell: serves the page and routes control changes to callbacks.
//!
//! # Endpoints
//!
//! - `GET /` - the dashboard page
//! - `GET /_dash-dependencies` - the callback table as JSON
//! - `POST /_dash-update-component` - run callbacks for a changed control
//! - `GET /health` - liveness check

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use irs_chart::callbacks::{CallbackRegistry, Outputs};
use irs_chart::controls::ControlPanel;
use irs_chart::page::render_page;
use irs_chart::state::ControlValues;
use irs_db::Database;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Shared state handed to every request. Everything in it is read-only.
#[derive(Clone)]
pub struct AppState {
    db: Database,
    registry: Arc<CallbackRegistry>,
    panel: Arc<ControlPanel>,
}

impl AppState {
    /// Derive the control panel from the loaded data and register the
    /// dashboard callbacks.
    pub fn new(db: Database) -> anyhow::Result<Self> {
        let panel = ControlPanel::from_database(&db)?;
        log::info!(
            "Control panel: {} metrics, {} years, {} states",
            panel.parameter.options.len(),
            panel.year.options.len(),
            panel.state.options.len()
        );
        Ok(Self {
            db,
            registry: Arc::new(CallbackRegistry::dashboard()),
            panel: Arc::new(panel),
        })
    }
}

/// Body of `POST /_dash-update-component`.
#[derive(Debug, Deserialize)]
pub struct UpdateRequest {
    /// Control that changed; absent or null on initial page load.
    #[serde(default)]
    pub changed: Option<String>,
    #[serde(default)]
    pub inputs: ControlValues,
}

#[derive(Debug, Serialize)]
pub struct UpdateResponse {
    pub outputs: Outputs,
}

/// Request-time failure, reported to the browser as a 500.
pub struct AppError(anyhow::Error);

impl From<anyhow::Error> for AppError {
    fn from(e: anyhow::Error) -> Self {
        Self(e)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        log::error!("request failed: {:#}", self.0);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(serde_json::json!({ "error": format!("{:#}", self.0) })),
        )
            .into_response()
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/_dash-dependencies", get(dependencies))
        .route("/_dash-update-component", post(update_component))
        .route("/health", get(health))
        .with_state(state)
}

async fn index(State(state): State<AppState>) -> Html<String> {
    Html(render_page(&state.panel))
}

async fn dependencies(State(state): State<AppState>) -> Json<CallbackRegistry> {
    Json(state.registry.as_ref().clone())
}

async fn update_component(
    State(state): State<AppState>,
    Json(req): Json<UpdateRequest>,
) -> Result<Json<UpdateResponse>, AppError> {
    log::debug!("update: changed={:?} inputs={:?}", req.changed, req.inputs);
    let outputs = state
        .registry
        .dispatch(&state.db, req.changed.as_deref(), &req.inputs)?;
    Ok(Json(UpdateResponse { outputs }))
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "irs-dashboard"
    }))
}
