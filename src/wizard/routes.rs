//! REST endpoints that drive wizard sessions from the marketing site.
//!
//! Refused transitions are not errors: they answer 200 with the unchanged
//! snapshot, and the client re-renders from it.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, patch, post},
};
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;
use uuid::Uuid;

use super::choices::OptionCatalog;
use super::model::FormDataPatch;
use super::presentation::WizardSnapshot;
use super::sessions::WizardSessions;
use crate::error::SessionError;

/// Shared state for wizard routes.
#[derive(Clone)]
pub struct WizardRouteState {
    pub sessions: Arc<WizardSessions>,
}

/// A session id plus its current snapshot.
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub id: Uuid,
    #[serde(flatten)]
    pub wizard: WizardSnapshot,
}

#[derive(Debug, Deserialize)]
struct ToggleTool {
    tool: String,
}

/// Errors surfaced to HTTP clients.
#[derive(Debug)]
pub struct ApiError(SessionError);

impl From<SessionError> for ApiError {
    fn from(e: SessionError) -> Self {
        Self(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self.0 {
            SessionError::NotFound { .. } => StatusCode::NOT_FOUND,
        };
        (status, Json(serde_json::json!({ "error": self.0.to_string() }))).into_response()
    }
}

type ApiResult = Result<Json<SessionResponse>, ApiError>;

/// Build the wizard REST routes.
pub fn wizard_routes(state: WizardRouteState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/wizard/options", get(options))
        .route("/api/wizard", post(start_session))
        .route("/api/wizard/{id}", get(get_session).delete(discard_session))
        .route("/api/wizard/{id}/next", post(go_next))
        .route("/api/wizard/{id}/back", post(go_back))
        .route("/api/wizard/{id}/fields", patch(update_fields))
        .route("/api/wizard/{id}/tech-stack", post(toggle_tech_stack))
        .route("/api/wizard/{id}/submit", post(submit))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "service": "lead-wizard"
    }))
}

/// GET /api/wizard/options
async fn options() -> impl IntoResponse {
    Json(OptionCatalog::new())
}

/// POST /api/wizard
async fn start_session(State(state): State<WizardRouteState>) -> impl IntoResponse {
    let (id, controller) = state.sessions.start().await;
    let wizard = controller.snapshot().await;
    (StatusCode::CREATED, Json(SessionResponse { id, wizard }))
}

/// GET /api/wizard/{id}
async fn get_session(State(state): State<WizardRouteState>, Path(id): Path<Uuid>) -> ApiResult {
    respond(&state, id).await
}

/// DELETE /api/wizard/{id}
async fn discard_session(
    State(state): State<WizardRouteState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    state.sessions.discard(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/wizard/{id}/next
async fn go_next(State(state): State<WizardRouteState>, Path(id): Path<Uuid>) -> ApiResult {
    state.sessions.get(id).await?.go_next().await;
    respond(&state, id).await
}

/// POST /api/wizard/{id}/back
async fn go_back(State(state): State<WizardRouteState>, Path(id): Path<Uuid>) -> ApiResult {
    state.sessions.get(id).await?.go_back().await;
    respond(&state, id).await
}

/// PATCH /api/wizard/{id}/fields
async fn update_fields(
    State(state): State<WizardRouteState>,
    Path(id): Path<Uuid>,
    Json(patch): Json<FormDataPatch>,
) -> ApiResult {
    state.sessions.get(id).await?.update_field(patch).await;
    respond(&state, id).await
}

/// POST /api/wizard/{id}/tech-stack
async fn toggle_tech_stack(
    State(state): State<WizardRouteState>,
    Path(id): Path<Uuid>,
    Json(body): Json<ToggleTool>,
) -> ApiResult {
    state
        .sessions
        .get(id)
        .await?
        .toggle_tech_stack_entry(&body.tool)
        .await;
    respond(&state, id).await
}

/// POST /api/wizard/{id}/submit
///
/// Returns immediately with `submitting: true`; poll the session to see
/// it reach the success step.
async fn submit(State(state): State<WizardRouteState>, Path(id): Path<Uuid>) -> ApiResult {
    // The completion task runs detached; dropping its handle is fine.
    let _ = state.sessions.get(id).await?.submit().await;
    respond(&state, id).await
}

async fn respond(state: &WizardRouteState, id: Uuid) -> ApiResult {
    let wizard = state.sessions.get(id).await?.snapshot().await;
    Ok(Json(SessionResponse { id, wizard }))
}
