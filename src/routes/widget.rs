//! Chat widget demo routes: conversations, widget settings, and the three
//! modal forms (issue report, human handover, CSAT).

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use serde::Serialize;
use uuid::Uuid;

use crate::error::ApiError;
use crate::routes::{MessageBody, ViewScopeId};
use crate::services::action::ActionRecord;
use crate::services::chat::{Sent, WidgetChat, WidgetSettings};
use crate::services::forms::{self, CsatResponse, HandoverRequest, IssueReport, Submission};
use crate::state::AppState;

// =============================================================================
// CONVERSATIONS
// =============================================================================

/// `POST /api/widget/chats`: open a conversation with the greeting.
pub async fn open_chat(State(state): State<AppState>) -> (StatusCode, Json<WidgetChat>) {
    (StatusCode::CREATED, Json(state.chats.open_chat()))
}

/// `GET /api/widget/chats/{id}`: poll for the bot's reply.
pub async fn get_chat(State(state): State<AppState>, Path(id): Path<Uuid>) -> Result<Json<WidgetChat>, ApiError> {
    state.chats.chat(id).map(Json).ok_or_else(|| ApiError::missing("chat", id))
}

/// `POST /api/widget/chats/{id}/messages`: blank content is a no-op.
pub async fn send_message(
    State(state): State<AppState>,
    scope: ViewScopeId,
    Path(id): Path<Uuid>,
    Json(body): Json<MessageBody>,
) -> Result<Json<Sent<WidgetChat>>, ApiError> {
    state
        .chats
        .send(&state.actions, scope.0, id, &body.content)
        .map(Json)
        .ok_or_else(|| ApiError::missing("chat", id))
}

/// `POST /api/widget/chats/{id}/end`
pub async fn end_chat(State(state): State<AppState>, Path(id): Path<Uuid>) -> Result<Json<WidgetChat>, ApiError> {
    state.chats.end_chat(id).map(Json).ok_or_else(|| ApiError::missing("chat", id))
}

/// `POST /api/widget/chats/{id}/transcript`: pretend to email it.
pub async fn send_transcript(
    State(state): State<AppState>,
    scope: ViewScopeId,
    Path(id): Path<Uuid>,
) -> Result<Json<ActionRecord>, ApiError> {
    let record = state
        .chats
        .send_transcript(&state.actions, scope.0, id)
        .ok_or_else(|| ApiError::missing("chat", id))??;
    Ok(Json(record))
}

// =============================================================================
// SETTINGS
// =============================================================================

/// `GET /api/widget/settings`
pub async fn get_settings(State(state): State<AppState>) -> Json<WidgetSettings> {
    Json(state.chats.settings())
}

/// `PUT /api/widget/settings`: replace and toast "Settings Saved".
pub async fn save_settings(State(state): State<AppState>, Json(settings): Json<WidgetSettings>) -> Json<WidgetSettings> {
    Json(state.chats.save_settings(&state.actions, settings))
}

#[derive(Debug, Serialize)]
pub struct EmbedCode {
    pub bot_id: String,
    pub code: String,
}

/// `GET /api/widget/embed/{bot_id}`: the snippet a site owner would paste.
pub async fn embed_code(State(state): State<AppState>, Path(bot_id): Path<String>) -> Json<EmbedCode> {
    let code = state.chats.settings().embed_code(&bot_id);
    Json(EmbedCode { bot_id, code })
}

// =============================================================================
// MODAL FORMS
// =============================================================================

/// `POST /api/widget/issue-report`: `422` without type and description.
pub async fn report_issue(
    State(state): State<AppState>,
    scope: ViewScopeId,
    Json(report): Json<IssueReport>,
) -> Result<Json<Submission>, ApiError> {
    Ok(Json(forms::report_issue(&state.actions, scope.0, &report)?))
}

/// `POST /api/widget/handover`
pub async fn request_handover(
    State(state): State<AppState>,
    scope: ViewScopeId,
    Json(request): Json<HandoverRequest>,
) -> Result<Json<Submission>, ApiError> {
    Ok(Json(forms::request_handover(&state.actions, scope.0, &request)?))
}

/// `POST /api/widget/csat`
pub async fn rate_chat(
    State(state): State<AppState>,
    scope: ViewScopeId,
    Json(response): Json<CsatResponse>,
) -> Result<Json<Submission>, ApiError> {
    Ok(Json(forms::rate_chat(&state.actions, scope.0, &response)?))
}

#[cfg(test)]
#[path = "widget_test.rs"]
mod tests;
