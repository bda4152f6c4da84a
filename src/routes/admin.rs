//! Admin console routes: fleet listings, detail views, billing, logs and the
//! moderation actions.
//!
//! Moderation actions (suspend, activate, resolve) toast after the admin
//! delay but leave the catalog untouched: a suspended bot still lists as
//! active.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use serde::Serialize;
use tracing::info;

use crate::catalog::admin::{
    AdminBot, AdminUser, ConversationLog, ErrorLog, Invoice, Metric, ModelRoute, PlanShare, PlatformIssue,
    PlatformSettings, ProviderKey, StripeEvent, error_rate_band,
};
use crate::error::ApiError;
use crate::filter::{FilterState, Listing};
use crate::notify::Notification;
use crate::routes::ViewScopeId;
use crate::services::action::{ActionKind, ActionRecord, Outcome};
use crate::state::AppState;

type Accepted = (StatusCode, Json<ActionRecord>);

/// Start a moderation action that settles into `toast`.
fn moderate(
    state: &AppState,
    scope: ViewScopeId,
    kind: ActionKind,
    subject: &str,
    toast: Notification,
) -> Result<Accepted, ApiError> {
    info!(action = %kind, subject, "moderation requested");
    let record = state
        .actions
        .start(scope.0, kind, Some(subject.to_owned()), move || Outcome::succeeded(toast))?;
    Ok((StatusCode::ACCEPTED, Json(record)))
}

// =============================================================================
// DASHBOARD / BILLING
// =============================================================================

/// `GET /api/admin/dashboard`: platform metric cards.
pub async fn dashboard(State(state): State<AppState>) -> Json<Vec<Metric>> {
    Json(state.catalog.admin_metrics.clone())
}

#[derive(Debug, Serialize)]
pub struct BillingOverview {
    pub metrics: Vec<Metric>,
    pub plan_shares: Vec<PlanShare>,
    pub stripe_events: Vec<StripeEvent>,
}

/// `GET /api/admin/billing`: revenue cards, plan distribution, Stripe feed.
pub async fn billing(State(state): State<AppState>) -> Json<BillingOverview> {
    let catalog = &state.catalog;
    Json(BillingOverview {
        metrics: catalog.billing_metrics.clone(),
        plan_shares: catalog.plan_shares.clone(),
        stripe_events: catalog.stripe_events.clone(),
    })
}

#[derive(Debug, Serialize)]
pub struct ModelsRouting {
    pub routes: Vec<ModelRoute>,
    pub provider_keys: Vec<ProviderKey>,
}

/// `GET /api/admin/models-routing`: model per plan and masked provider keys.
pub async fn models_routing(State(state): State<AppState>) -> Json<ModelsRouting> {
    Json(ModelsRouting {
        routes: state.catalog.model_routes.clone(),
        provider_keys: state.catalog.provider_keys.clone(),
    })
}

/// `GET /api/admin/settings`
pub async fn platform_settings(State(state): State<AppState>) -> Json<PlatformSettings> {
    Json(state.catalog.platform_settings.clone())
}

/// `GET /api/admin/invoices`: filterable by `search`, `status`, `plan`.
pub async fn list_invoices(
    State(state): State<AppState>,
    Query(filter): Query<FilterState>,
) -> Result<Json<Listing<Invoice>>, ApiError> {
    Ok(Json(Listing::from_state(&state.catalog.invoices, &filter)?))
}

// =============================================================================
// BOTS
// =============================================================================

/// `GET /api/admin/bots`: filterable by `search`, `status`, `plan`.
pub async fn list_bots(
    State(state): State<AppState>,
    Query(filter): Query<FilterState>,
) -> Result<Json<Listing<AdminBot>>, ApiError> {
    Ok(Json(Listing::from_state(&state.catalog.admin_bots, &filter)?))
}

#[derive(Debug, Serialize)]
pub struct AdminBotDetail {
    #[serde(flatten)]
    pub bot: AdminBot,
    pub error_rate_band: &'static str,
}

/// `GET /api/admin/bots/{id}`
pub async fn get_bot(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<AdminBotDetail>, ApiError> {
    let bot = state.catalog.admin_bot(&id).ok_or_else(|| ApiError::not_found("bot", id.as_str()))?;
    Ok(Json(AdminBotDetail { error_rate_band: error_rate_band(&bot.error_rate), bot: bot.clone() }))
}

/// `POST /api/admin/bots/{id}/suspend`
pub async fn suspend_bot(
    State(state): State<AppState>,
    scope: ViewScopeId,
    Path(id): Path<String>,
) -> Result<Accepted, ApiError> {
    let bot = state.catalog.admin_bot(&id).ok_or_else(|| ApiError::not_found("bot", id.as_str()))?;
    let toast = Notification::new("Bot Suspended", format!("{} has been suspended.", bot.name));
    moderate(&state, scope, ActionKind::SuspendBot, &bot.id, toast)
}

/// `POST /api/admin/bots/{id}/activate`
pub async fn activate_bot(
    State(state): State<AppState>,
    scope: ViewScopeId,
    Path(id): Path<String>,
) -> Result<Accepted, ApiError> {
    let bot = state.catalog.admin_bot(&id).ok_or_else(|| ApiError::not_found("bot", id.as_str()))?;
    let toast = Notification::new("Bot Activated", format!("{} is active again.", bot.name));
    moderate(&state, scope, ActionKind::ActivateBot, &bot.id, toast)
}

// =============================================================================
// USERS
// =============================================================================

/// `GET /api/admin/users`: filterable by `search`, `status`, `plan`.
pub async fn list_users(
    State(state): State<AppState>,
    Query(filter): Query<FilterState>,
) -> Result<Json<Listing<AdminUser>>, ApiError> {
    Ok(Json(Listing::from_state(&state.catalog.admin_users, &filter)?))
}

/// `GET /api/admin/users/{id}`
pub async fn get_user(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<AdminUser>, ApiError> {
    state
        .catalog
        .admin_user(&id)
        .cloned()
        .map(Json)
        .ok_or_else(|| ApiError::not_found("user", id))
}

/// `POST /api/admin/users/{id}/suspend`
pub async fn suspend_user(
    State(state): State<AppState>,
    scope: ViewScopeId,
    Path(id): Path<String>,
) -> Result<Accepted, ApiError> {
    let user = state.catalog.admin_user(&id).ok_or_else(|| ApiError::not_found("user", id.as_str()))?;
    let toast = Notification::new("User Suspended", format!("{} has been suspended.", user.name));
    moderate(&state, scope, ActionKind::SuspendUser, &user.id, toast)
}

/// `POST /api/admin/users/{id}/activate`
pub async fn activate_user(
    State(state): State<AppState>,
    scope: ViewScopeId,
    Path(id): Path<String>,
) -> Result<Accepted, ApiError> {
    let user = state.catalog.admin_user(&id).ok_or_else(|| ApiError::not_found("user", id.as_str()))?;
    let toast = Notification::new("User Activated", format!("{} is active again.", user.name));
    moderate(&state, scope, ActionKind::ActivateUser, &user.id, toast)
}

// =============================================================================
// ISSUES
// =============================================================================

/// `GET /api/admin/issues`: filterable by `search`, `status`, `severity`.
pub async fn list_issues(
    State(state): State<AppState>,
    Query(filter): Query<FilterState>,
) -> Result<Json<Listing<PlatformIssue>>, ApiError> {
    Ok(Json(Listing::from_state(&state.catalog.platform_issues, &filter)?))
}

/// `GET /api/admin/issues/{id}`: ids match case-insensitively.
pub async fn get_issue(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<PlatformIssue>, ApiError> {
    state
        .catalog
        .platform_issue(&id)
        .cloned()
        .map(Json)
        .ok_or_else(|| ApiError::not_found("issue", id))
}

/// `POST /api/admin/issues/{id}/resolve`
pub async fn resolve_issue(
    State(state): State<AppState>,
    scope: ViewScopeId,
    Path(id): Path<String>,
) -> Result<Accepted, ApiError> {
    let issue = state.catalog.platform_issue(&id).ok_or_else(|| ApiError::not_found("issue", id.as_str()))?;
    let toast = Notification::new("Issue Resolved", format!("Issue {} has been marked as resolved.", issue.id));
    moderate(&state, scope, ActionKind::ResolveIssue, &issue.id, toast)
}

// =============================================================================
// LOGS
// =============================================================================

/// `GET /api/admin/logs/conversations`: filterable by `search`.
pub async fn conversation_logs(
    State(state): State<AppState>,
    Query(filter): Query<FilterState>,
) -> Result<Json<Listing<ConversationLog>>, ApiError> {
    Ok(Json(Listing::from_state(&state.catalog.conversation_logs, &filter)?))
}

/// `GET /api/admin/logs/errors`: filterable by `search`, `severity`.
pub async fn error_logs(
    State(state): State<AppState>,
    Query(filter): Query<FilterState>,
) -> Result<Json<Listing<ErrorLog>>, ApiError> {
    Ok(Json(Listing::from_state(&state.catalog.error_logs, &filter)?))
}

#[cfg(test)]
#[path = "admin_test.rs"]
mod tests;
