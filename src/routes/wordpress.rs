//! WordPress plugin routes: settings and token check, event logs,
//! troubleshooting diagnostics, widget preview.

use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use serde::{Deserialize, Serialize};

use crate::catalog::wordpress::{CheckSummary, DiagnosticCheck, WidgetEvent};
use crate::error::ApiError;
use crate::filter::{FilterState, Listing};
use crate::routes::ViewScopeId;
use crate::services::action::ActionRecord;
use crate::services::wordpress::{DiagnosticsState, PluginSettings, PreviewDevice, PreviewState, SettingsPatch, SyncState};
use crate::state::AppState;

type Accepted = (StatusCode, Json<ActionRecord>);

fn accepted(record: ActionRecord) -> Accepted {
    (StatusCode::ACCEPTED, Json(record))
}

// =============================================================================
// SETTINGS
// =============================================================================

/// `GET /api/wordpress/settings`
pub async fn get_settings(State(state): State<AppState>) -> Json<PluginSettings> {
    Json(state.wordpress.settings())
}

/// `PATCH /api/wordpress/settings`: a new token resets its status.
pub async fn update_settings(State(state): State<AppState>, Json(patch): Json<SettingsPatch>) -> Json<PluginSettings> {
    Json(state.wordpress.update_settings(patch))
}

/// `POST /api/wordpress/validate`: `422` when no token is set.
pub async fn validate(State(state): State<AppState>, scope: ViewScopeId) -> Result<Accepted, ApiError> {
    Ok(accepted(state.wordpress.validate(&state.actions, scope.0)?))
}

/// `POST /api/wordpress/save`: `422` until the token validates.
pub async fn save(State(state): State<AppState>) -> Result<Json<PluginSettings>, ApiError> {
    Ok(Json(state.wordpress.save(&state.notifier)?))
}

// =============================================================================
// LOGS
// =============================================================================

#[derive(Debug, Serialize)]
pub struct EventLog {
    pub sync: SyncState,
    #[serde(flatten)]
    pub listing: Listing<WidgetEvent>,
}

/// `GET /api/wordpress/logs`: filterable by `search`, `status`.
pub async fn logs(State(state): State<AppState>, Query(filter): Query<FilterState>) -> Result<Json<EventLog>, ApiError> {
    let listing = Listing::from_state(&state.catalog.widget_events, &filter)?;
    Ok(Json(EventLog { sync: state.wordpress.sync_state(), listing }))
}

/// `POST /api/wordpress/logs/sync`
pub async fn sync_logs(State(state): State<AppState>, scope: ViewScopeId) -> Result<Accepted, ApiError> {
    Ok(accepted(state.wordpress.sync_logs(&state.actions, scope.0)?))
}

/// `POST /api/wordpress/logs/export`
pub async fn export_logs(State(state): State<AppState>, scope: ViewScopeId) -> Result<Json<ActionRecord>, ApiError> {
    Ok(Json(state.wordpress.export_logs(&state.actions, scope.0)?))
}

// =============================================================================
// DIAGNOSTICS
// =============================================================================

#[derive(Debug, Serialize)]
pub struct DiagnosticsReport {
    pub checks: Vec<DiagnosticCheck>,
    pub summary: CheckSummary,
    #[serde(flatten)]
    pub state: DiagnosticsState,
    /// Progress of the most recent run, 0..=100.
    pub progress: Option<u8>,
}

/// `GET /api/wordpress/diagnostics`: fixed checks plus run progress.
pub async fn diagnostics(State(state): State<AppState>) -> Json<DiagnosticsReport> {
    let checks = state.catalog.diagnostics.clone();
    let run = state.wordpress.diagnostics_state();
    let progress = run.last_run.and_then(|id| state.actions.get(id)).map(|record| record.progress);
    Json(DiagnosticsReport { summary: CheckSummary::tally(&checks), checks, state: run, progress })
}

/// `POST /api/wordpress/diagnostics`: ten progress steps, then a toast.
pub async fn run_diagnostics(State(state): State<AppState>, scope: ViewScopeId) -> Result<Accepted, ApiError> {
    Ok(accepted(state.wordpress.run_diagnostics(&state.actions, scope.0)?))
}

// =============================================================================
// PREVIEW
// =============================================================================

/// `GET /api/wordpress/preview`
pub async fn preview(State(state): State<AppState>) -> Json<PreviewState> {
    Json(state.wordpress.preview())
}

#[derive(Debug, Deserialize)]
pub struct DeviceBody {
    pub device: PreviewDevice,
}

/// `PUT /api/wordpress/preview`: `{"device": "desktop" | "tablet" | "mobile"}`.
pub async fn set_preview_device(State(state): State<AppState>, Json(body): Json<DeviceBody>) -> Json<PreviewState> {
    Json(state.wordpress.set_preview_device(body.device))
}

/// `POST /api/wordpress/preview/refresh`
pub async fn refresh_preview(State(state): State<AppState>, scope: ViewScopeId) -> Result<Accepted, ApiError> {
    Ok(accepted(state.wordpress.refresh_preview(&state.actions, scope.0)?))
}

#[cfg(test)]
#[path = "wordpress_test.rs"]
mod tests;
