//! Timed actions, view scopes and the toast feed.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use serde::Serialize;
use uuid::Uuid;

use crate::error::ApiError;
use crate::notify::Notification;
use crate::services::action::{ActionRecord, ROOT_SCOPE};
use crate::state::AppState;

/// `GET /api/actions/{id}`: poll an action's status and progress.
pub async fn get_action(State(state): State<AppState>, Path(id): Path<Uuid>) -> Result<Json<ActionRecord>, ApiError> {
    state.actions.get(id).map(Json).ok_or_else(|| ApiError::missing("action", id))
}

#[derive(Debug, Serialize)]
pub struct ScopeOpened {
    pub scope: Uuid,
}

/// `POST /api/scopes`: a view mounted; send the id back as `x-view-scope`.
pub async fn open_scope(State(state): State<AppState>) -> (StatusCode, Json<ScopeOpened>) {
    let scope = state.actions.open_scope();
    (StatusCode::CREATED, Json(ScopeOpened { scope }))
}

#[derive(Debug, Serialize)]
pub struct ScopeClosed {
    pub scope: Uuid,
    pub cancelled: usize,
}

/// `DELETE /api/scopes/{id}`: a view unmounted; cancel what it left
/// pending. The root scope only closes at shutdown.
pub async fn close_scope(State(state): State<AppState>, Path(id): Path<Uuid>) -> Result<Json<ScopeClosed>, ApiError> {
    if id == ROOT_SCOPE {
        return Err(ApiError::missing("scope", id));
    }
    let cancelled = state.actions.close_scope(id).ok_or_else(|| ApiError::missing("scope", id))?;
    Ok(Json(ScopeClosed { scope: id, cancelled }))
}

/// `GET /api/notifications`: pending toasts, oldest first. Reading drains.
pub async fn notifications(State(state): State<AppState>) -> Json<Vec<Notification>> {
    Json(state.notifier.drain())
}

#[cfg(test)]
#[path = "actions_test.rs"]
mod tests;
