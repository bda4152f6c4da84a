//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every console screen is backed by a JSON endpoint under `/api`. The view
//! table in `site` mirrors the console's page routes so a client can ask
//! which screen a path renders; any path the router does not know answers
//! with a `404` "page not found" body.
//!
//! Timed actions run in the view scope named by the `x-view-scope` header.
//! A client opens a scope when a screen mounts and deletes it on teardown,
//! which cancels whatever that screen still has pending. Requests without
//! the header run in the root scope.

pub mod actions;
pub mod admin;
pub mod app;
pub mod site;
pub mod widget;
pub mod wordpress;

use axum::Router;
use axum::extract::FromRef;
use axum::http::{StatusCode, Uri};
use axum::routing::{get, post};
use serde::Deserialize;
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::error::ApiError;
use crate::services::action::ROOT_SCOPE;
use crate::state::AppState;

/// Header naming the view scope a request's actions belong to.
pub const VIEW_SCOPE_HEADER: &str = "x-view-scope";

/// Full application router.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/routes/resolve", get(site::resolve))
        .route("/api/session", get(site::session))
        // Admin console.
        .route("/api/admin/dashboard", get(admin::dashboard))
        .route("/api/admin/bots", get(admin::list_bots))
        .route("/api/admin/bots/{id}", get(admin::get_bot))
        .route("/api/admin/bots/{id}/suspend", post(admin::suspend_bot))
        .route("/api/admin/bots/{id}/activate", post(admin::activate_bot))
        .route("/api/admin/users", get(admin::list_users))
        .route("/api/admin/users/{id}", get(admin::get_user))
        .route("/api/admin/users/{id}/suspend", post(admin::suspend_user))
        .route("/api/admin/users/{id}/activate", post(admin::activate_user))
        .route("/api/admin/issues", get(admin::list_issues))
        .route("/api/admin/issues/{id}", get(admin::get_issue))
        .route("/api/admin/issues/{id}/resolve", post(admin::resolve_issue))
        .route("/api/admin/invoices", get(admin::list_invoices))
        .route("/api/admin/billing", get(admin::billing))
        .route("/api/admin/logs/conversations", get(admin::conversation_logs))
        .route("/api/admin/logs/errors", get(admin::error_logs))
        .route("/api/admin/models-routing", get(admin::models_routing))
        .route("/api/admin/settings", get(admin::platform_settings))
        // End-user bot app.
        .route("/api/app/overview", get(app::overview))
        .route("/api/app/analytics", get(app::analytics))
        .route("/api/app/bots", get(app::list_bots))
        .route("/api/app/bots/{id}", get(app::get_bot))
        .route("/api/app/bots/{id}/issues", get(app::bot_issues))
        .route("/api/app/bots/{id}/conversations", get(app::conversations))
        .route("/api/app/bots/{id}/analytics", get(app::bot_analytics))
        .route("/api/app/bots/{id}/settings", get(app::bot_settings).patch(app::bot_settings_flags))
        .route("/api/app/bots/{id}/playground", get(app::playground).patch(app::playground_flags))
        .route("/api/app/bots/{id}/playground/messages", post(app::playground_send))
        .route("/api/app/bots/{id}/playground/clear", post(app::playground_clear))
        .route("/api/app/bots/{id}/playground/transcript", get(app::playground_transcript))
        .route("/api/app/wizards", post(app::create_wizard))
        .route(
            "/api/app/wizards/{id}",
            get(app::get_wizard).patch(app::update_wizard).delete(app::discard_wizard),
        )
        .route("/api/app/wizards/{id}/step", post(app::step_wizard))
        .route("/api/app/wizards/{id}/finish", post(app::finish_wizard))
        // Chat widget demo.
        .route("/api/widget/chats", post(widget::open_chat))
        .route("/api/widget/chats/{id}", get(widget::get_chat))
        .route("/api/widget/chats/{id}/messages", post(widget::send_message))
        .route("/api/widget/chats/{id}/end", post(widget::end_chat))
        .route("/api/widget/chats/{id}/transcript", post(widget::send_transcript))
        .route("/api/widget/settings", get(widget::get_settings).put(widget::save_settings))
        .route("/api/widget/embed/{bot_id}", get(widget::embed_code))
        .route("/api/widget/issue-report", post(widget::report_issue))
        .route("/api/widget/handover", post(widget::request_handover))
        .route("/api/widget/csat", post(widget::rate_chat))
        // WordPress plugin.
        .route(
            "/api/wordpress/settings",
            get(wordpress::get_settings).patch(wordpress::update_settings),
        )
        .route("/api/wordpress/validate", post(wordpress::validate))
        .route("/api/wordpress/save", post(wordpress::save))
        .route("/api/wordpress/logs", get(wordpress::logs))
        .route("/api/wordpress/logs/sync", post(wordpress::sync_logs))
        .route("/api/wordpress/logs/export", post(wordpress::export_logs))
        .route(
            "/api/wordpress/diagnostics",
            get(wordpress::diagnostics).post(wordpress::run_diagnostics),
        )
        .route("/api/wordpress/preview", get(wordpress::preview).put(wordpress::set_preview_device))
        .route("/api/wordpress/preview/refresh", post(wordpress::refresh_preview))
        // Timed actions, scopes, toasts.
        .route("/api/actions/{id}", get(actions::get_action))
        .route("/api/scopes", post(actions::open_scope))
        .route("/api/scopes/{id}", axum::routing::delete(actions::close_scope))
        .route("/api/notifications", get(actions::notifications))
        .route("/healthz", get(healthz))
        .fallback(page_not_found)
        .layer(cors)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}

async fn page_not_found(uri: Uri) -> ApiError {
    ApiError::not_found("page", uri.path())
}

/// Body of a chat or playground message.
#[derive(Debug, Deserialize)]
pub struct MessageBody {
    pub content: String,
}

// =============================================================================
// VIEW SCOPE EXTRACTOR
// =============================================================================

/// The view scope named by the `x-view-scope` header, or the root scope.
///
/// Rejects a header that is not a UUID with `400`. Whether the scope is
/// still open is checked when an action starts, not here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewScopeId(pub Uuid);

impl<S> axum::extract::FromRequestParts<S> for ViewScopeId
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut axum::http::request::Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let Some(raw) = parts.headers.get(VIEW_SCOPE_HEADER) else {
            return Ok(Self(ROOT_SCOPE));
        };
        let id = raw
            .to_str()
            .ok()
            .and_then(|s| Uuid::parse_str(s.trim()).ok())
            .ok_or(StatusCode::BAD_REQUEST)?;
        Ok(Self(id))
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================


#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
