//! Static view table and the current session.
//!
//! The console's pages are declared once in `VIEW_ROUTES`. A pattern
//! segment starting with `:` binds one path segment; a trailing `*` matches
//! any remainder, including none. The first matching entry wins.

use std::collections::BTreeMap;

use axum::Json;
use axum::extract::Query;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::session::CurrentSession;

/// One entry of the page table: a path pattern and the view it renders.
#[derive(Debug, Clone, Copy)]
pub struct ViewRoute {
    pub pattern: &'static str,
    pub view: &'static str,
    /// Navigate here instead of rendering.
    pub redirect: Option<&'static str>,
}

const fn view(pattern: &'static str, view: &'static str) -> ViewRoute {
    ViewRoute { pattern, view, redirect: None }
}

pub const VIEW_ROUTES: &[ViewRoute] = &[
    view("/", "home"),
    view("/login", "login"),
    view("/signup", "signup"),
    view("/dashboard", "user_dashboard"),
    view("/pricing", "pricing"),
    view("/product", "product"),
    view("/contact", "contact"),
    // Bot app.
    ViewRoute { pattern: "/app", view: "app_overview", redirect: Some("/app/overview") },
    view("/app/overview", "app_overview"),
    view("/app/bots", "bots_list"),
    view("/app/bots/create", "create_bot"),
    view("/app/bots/:id/settings/*", "bot_settings"),
    view("/app/bots/:id/playground", "bot_playground"),
    view("/app/bots/:id/conversations", "bot_conversations"),
    view("/app/bots/:id/issues", "bot_issues"),
    view("/app/bots/:id/analytics", "bot_analytics"),
    view("/app/analytics", "analytics"),
    view("/app/settings", "app_settings"),
    view("/app/billing", "app_billing"),
    view("/app/help", "help"),
    // Admin console.
    view("/admin", "admin_dashboard"),
    view("/admin/dashboard", "admin_dashboard"),
    view("/admin/users", "admin_users"),
    view("/admin/users/:id", "admin_user_detail"),
    view("/admin/bots", "admin_bots"),
    view("/admin/bots/:id", "admin_bot_detail"),
    view("/admin/billing", "admin_billing"),
    view("/admin/logs", "admin_logs"),
    view("/admin/issues", "admin_issues"),
    view("/admin/models-routing", "admin_models_routing"),
    view("/admin/settings", "admin_settings"),
    // Widget demo and WordPress plugin.
    view("/chat-widget", "chat_widget_demo"),
    view("/chat-widget/settings", "chat_widget_settings"),
    view("/wordpress/*", "wordpress_admin"),
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedView {
    pub path: String,
    pub view: &'static str,
    pub params: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect: Option<&'static str>,
}

/// Match `path` against the table. Query strings and a trailing slash are
/// ignored.
#[must_use]
pub fn resolve_view(path: &str) -> Option<ResolvedView> {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    VIEW_ROUTES.iter().find_map(|route| {
        let params = match_pattern(route.pattern, &segments)?;
        let normalized = format!("/{}", segments.join("/"));
        Some(ResolvedView { path: normalized, view: route.view, params, redirect: route.redirect })
    })
}

fn match_pattern(pattern: &str, segments: &[&str]) -> Option<BTreeMap<String, String>> {
    let mut params = BTreeMap::new();
    let parts: Vec<&str> = pattern.split('/').filter(|s| !s.is_empty()).collect();
    for (i, part) in parts.iter().enumerate() {
        if *part == "*" {
            return Some(params);
        }
        let segment = segments.get(i)?;
        if let Some(name) = part.strip_prefix(':') {
            params.insert(name.to_owned(), (*segment).to_owned());
        } else if part != segment {
            return None;
        }
    }
    (parts.len() == segments.len()).then_some(params)
}

// =============================================================================
// HANDLERS
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct ResolveQuery {
    pub path: String,
}

/// `GET /api/routes/resolve?path=`: which view a console path renders.
pub async fn resolve(Query(query): Query<ResolveQuery>) -> Result<Json<ResolvedView>, ApiError> {
    resolve_view(&query.path)
        .map(Json)
        .ok_or_else(|| ApiError::not_found("page", query.path))
}

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    #[serde(flatten)]
    pub session: CurrentSession,
    pub home_path: &'static str,
}

/// `GET /api/session`: the fixed mock session.
pub async fn session(session: CurrentSession) -> Json<SessionResponse> {
    let home_path = session.home_path();
    Json(SessionResponse { session, home_path })
}

#[cfg(test)]
#[path = "site_test.rs"]
mod tests;
