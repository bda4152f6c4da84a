//! End-user bot app routes: overview, bot list, per-bot issues and
//! conversations, the create-bot wizard and the playground.
//!
//! Issues and conversations are the same mock sets for every existing bot;
//! the bot id only has to exist. The playground and settings pages accept
//! any bot id so a freshly created `new-bot-*` lands on a working page.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::catalog::admin::Metric;
use crate::catalog::analytics::{Analytics, AnalyticsRange};
use crate::catalog::app::{AppBot, BotIssue, Conversation, DomainBinding, IssueCounts, KnowledgeFile};
use crate::error::ApiError;
use crate::filter::{FilterState, Listing};
use crate::routes::{MessageBody, ViewScopeId};
use crate::services::bot_settings::{BotSettings, BotSettingsFlags};
use crate::services::chat::{Playground, PlaygroundFlags, Sent};
use crate::services::wizard::{CreatedBot, DraftPatch, Move, WizardView};
use crate::state::AppState;

fn require_bot<'a>(state: &'a AppState, id: &str) -> Result<&'a AppBot, ApiError> {
    state.catalog.app_bot(id).ok_or_else(|| ApiError::not_found("bot", id))
}

/// `GET /api/app/overview`: dashboard metric cards.
pub async fn overview(State(state): State<AppState>) -> Json<Vec<Metric>> {
    Json(state.catalog.overview_metrics.clone())
}

/// `GET /api/app/bots`: filterable by `search`.
pub async fn list_bots(
    State(state): State<AppState>,
    Query(filter): Query<FilterState>,
) -> Result<Json<Listing<AppBot>>, ApiError> {
    Ok(Json(Listing::from_state(&state.catalog.app_bots, &filter)?))
}

/// `GET /api/app/bots/{id}`
pub async fn get_bot(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<AppBot>, ApiError> {
    require_bot(&state, &id).cloned().map(Json)
}

#[derive(Debug, Serialize)]
pub struct IssueBoard {
    /// Counters over the whole collection, independent of the filter.
    pub counts: IssueCounts,
    #[serde(flatten)]
    pub listing: Listing<BotIssue>,
}

/// `GET /api/app/bots/{id}/issues`: filterable by `search`, `status`,
/// `severity`.
pub async fn bot_issues(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(filter): Query<FilterState>,
) -> Result<Json<IssueBoard>, ApiError> {
    require_bot(&state, &id)?;
    let issues = &state.catalog.bot_issues;
    Ok(Json(IssueBoard { counts: IssueCounts::tally(issues), listing: Listing::from_state(issues, &filter)? }))
}

/// `GET /api/app/bots/{id}/conversations`: filterable by `search`.
pub async fn conversations(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(filter): Query<FilterState>,
) -> Result<Json<Listing<Conversation>>, ApiError> {
    require_bot(&state, &id)?;
    Ok(Json(Listing::from_state(&state.catalog.conversations, &filter)?))
}

// =============================================================================
// ANALYTICS / SETTINGS
// =============================================================================

#[derive(Debug, Default, Deserialize)]
pub struct AnalyticsQuery {
    #[serde(default)]
    pub range: AnalyticsRange,
}

#[derive(Debug, Serialize)]
pub struct AnalyticsReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bot_id: Option<String>,
    pub range: AnalyticsRange,
    pub range_label: &'static str,
    #[serde(flatten)]
    pub analytics: Analytics,
}

fn report(state: &AppState, bot_id: Option<String>, range: AnalyticsRange) -> AnalyticsReport {
    AnalyticsReport { bot_id, range, range_label: range.label(), analytics: state.catalog.analytics.clone() }
}

/// `GET /api/app/analytics?range=24h|7d|30d|90d`: workspace analytics.
pub async fn analytics(State(state): State<AppState>, Query(query): Query<AnalyticsQuery>) -> Json<AnalyticsReport> {
    Json(report(&state, None, query.range))
}

/// `GET /api/app/bots/{id}/analytics?range=`
pub async fn bot_analytics(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<AnalyticsQuery>,
) -> Result<Json<AnalyticsReport>, ApiError> {
    require_bot(&state, &id)?;
    Ok(Json(report(&state, Some(id), query.range)))
}

#[derive(Debug, Serialize)]
pub struct BotSettingsPage {
    #[serde(flatten)]
    pub settings: BotSettings,
    pub knowledge_files: Vec<KnowledgeFile>,
    pub domains: Vec<DomainBinding>,
}

fn settings_page(state: &AppState, settings: BotSettings) -> BotSettingsPage {
    BotSettingsPage {
        settings,
        knowledge_files: state.catalog.knowledge_files.clone(),
        domains: state.catalog.domain_bindings.clone(),
    }
}

/// `GET /api/app/bots/{id}/settings`
pub async fn bot_settings(State(state): State<AppState>, Path(id): Path<String>) -> Json<BotSettingsPage> {
    let settings = state.bot_settings.get(&id);
    Json(settings_page(&state, settings))
}

/// `PATCH /api/app/bots/{id}/settings`: toggle CSAT, handover, auto-resume.
pub async fn bot_settings_flags(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(flags): Json<BotSettingsFlags>,
) -> Json<BotSettingsPage> {
    let settings = state.bot_settings.set_flags(&id, flags);
    Json(settings_page(&state, settings))
}

// =============================================================================
// WIZARD
// =============================================================================

/// `POST /api/app/wizards`: open a wizard on the general step.
pub async fn create_wizard(State(state): State<AppState>) -> (StatusCode, Json<WizardView>) {
    (StatusCode::CREATED, Json(state.wizards.create().await))
}

/// `GET /api/app/wizards/{id}`
pub async fn get_wizard(State(state): State<AppState>, Path(id): Path<Uuid>) -> Result<Json<WizardView>, ApiError> {
    state.wizards.get(id).await.map(Json).ok_or_else(|| ApiError::missing("wizard", id))
}

/// `PATCH /api/app/wizards/{id}`: merge draft fields; never validated.
pub async fn update_wizard(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(patch): Json<DraftPatch>,
) -> Result<Json<WizardView>, ApiError> {
    state.wizards.update(id, patch).await.map(Json).ok_or_else(|| ApiError::missing("wizard", id))
}

#[derive(Debug, Deserialize)]
pub struct StepBody {
    pub direction: Move,
}

/// `POST /api/app/wizards/{id}/step`: `{"direction": "next" | "previous"}`.
pub async fn step_wizard(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<StepBody>,
) -> Result<Json<WizardView>, ApiError> {
    state.wizards.step(id, body.direction).await.map(Json).ok_or_else(|| ApiError::missing("wizard", id))
}

/// `POST /api/app/wizards/{id}/finish`: "Create Bot"; `409` off the widget
/// step.
pub async fn finish_wizard(State(state): State<AppState>, Path(id): Path<Uuid>) -> Result<Json<CreatedBot>, ApiError> {
    let created = state.wizards.finish(id).await.ok_or_else(|| ApiError::missing("wizard", id))??;
    Ok(Json(created))
}

/// `DELETE /api/app/wizards/{id}`
pub async fn discard_wizard(State(state): State<AppState>, Path(id): Path<Uuid>) -> Result<StatusCode, ApiError> {
    if state.wizards.discard(id).await {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::missing("wizard", id))
    }
}

// =============================================================================
// PLAYGROUND
// =============================================================================

/// `GET /api/app/bots/{id}/playground`
pub async fn playground(State(state): State<AppState>, Path(id): Path<String>) -> Json<Playground> {
    Json(state.chats.playground(&id))
}

/// `PATCH /api/app/bots/{id}/playground`: toggle memory, streaming,
/// thinking.
pub async fn playground_flags(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(flags): Json<PlaygroundFlags>,
) -> Json<Playground> {
    Json(state.chats.set_playground_flags(&id, flags))
}

/// `POST /api/app/bots/{id}/playground/messages`
pub async fn playground_send(
    State(state): State<AppState>,
    scope: ViewScopeId,
    Path(id): Path<String>,
    Json(body): Json<MessageBody>,
) -> Json<Sent<Playground>> {
    Json(state.chats.playground_send(&state.actions, scope.0, &id, &body.content))
}

/// `POST /api/app/bots/{id}/playground/clear`
pub async fn playground_clear(State(state): State<AppState>, Path(id): Path<String>) -> Json<Playground> {
    Json(state.chats.clear_playground(&id))
}

/// `GET /api/app/bots/{id}/playground/transcript`: plain-text download.
pub async fn playground_transcript(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    let text = state.chats.playground_transcript(&id);
    let disposition = format!("attachment; filename=\"playground-{id}.txt\"");
    ([(CONTENT_TYPE, "text/plain; charset=utf-8"), (CONTENT_DISPOSITION, disposition.as_str())], text).into_response()
}

#[cfg(test)]
#[path = "app_test.rs"]
mod tests;
