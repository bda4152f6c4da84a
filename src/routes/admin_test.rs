use std::time::Duration;

use axum::Router;
use axum::http::{Method, StatusCode};
use serde_json::Value;

use crate::routes;
use crate::routes::test_helpers::{empty, send};
use crate::state::AppState;
use crate::state::test_helpers::test_app_state;

fn router() -> (Router, AppState) {
    let state = test_app_state();
    (routes::app(state.clone()), state)
}

fn names(body: &Value) -> Vec<&str> {
    body["items"].as_array().unwrap().iter().map(|b| b["name"].as_str().unwrap()).collect()
}

#[tokio::test]
async fn bots_listing_filters_by_search_and_status() {
    let (app, _) = router();
    let (status, body) = send(&app, empty(Method::GET, "/api/admin/bots?search=faq")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(names(&body), vec!["FAQ Bot"]);
    assert_eq!(body["total"], 4);
    assert_eq!(body["visible"], 1);

    let (_, body) = send(&app, empty(Method::GET, "/api/admin/bots?status=suspended&plan=all")).await;
    assert_eq!(names(&body), vec!["FAQ Bot"]);
}

#[tokio::test]
async fn empty_listing_carries_message() {
    let (app, _) = router();
    let (_, body) = send(&app, empty(Method::GET, "/api/admin/users?search=zzz")).await;
    assert_eq!(body["visible"], 0);
    assert_eq!(body["empty_state"], "No users match your current filters.");
}

#[tokio::test]
async fn unknown_selector_is_bad_request() {
    let (app, _) = router();
    let (status, body) = send(&app, empty(Method::GET, "/api/admin/bots?colour=red")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "E_INVALID_FILTER");
}

#[tokio::test]
async fn bot_detail_includes_error_band() {
    let (app, _) = router();
    let (status, body) = send(&app, empty(Method::GET, "/api/admin/bots/3")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "FAQ Bot");
    assert_eq!(body["error_rate_band"], "degraded");

    let (status, _) = send(&app, empty(Method::GET, "/api/admin/bots/99")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn issues_filter_by_severity_and_lookup_ignores_case() {
    let (app, _) = router();
    let (_, body) = send(&app, empty(Method::GET, "/api/admin/issues?severity=critical")).await;
    assert_eq!(body["visible"], 1);
    assert_eq!(body["items"][0]["id"], "ISS-002");

    let (status, body) = send(&app, empty(Method::GET, "/api/admin/issues/iss-003")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "Billing Sync Error");
}

#[tokio::test]
async fn billing_and_invoices() {
    let (app, _) = router();
    let (_, body) = send(&app, empty(Method::GET, "/api/admin/billing")).await;
    assert!(!body["metrics"].as_array().unwrap().is_empty());
    assert!(!body["plan_shares"].as_array().unwrap().is_empty());

    let (_, body) = send(&app, empty(Method::GET, "/api/admin/invoices?status=failed")).await;
    assert_eq!(body["items"][0]["id"], "inv_003");
}

#[tokio::test]
async fn logs_are_searchable() {
    let (app, _) = router();
    let (status, body) = send(&app, empty(Method::GET, "/api/admin/logs/conversations")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 4);

    let (status, _) = send(&app, empty(Method::GET, "/api/admin/logs/errors?severity=error")).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test(start_paused = true)]
async fn suspend_toasts_but_leaves_bot_active() {
    let (app, state) = router();
    let (status, record) = send(&app, empty(Method::POST, "/api/admin/bots/1/suspend")).await;
    assert_eq!(status, StatusCode::ACCEPTED);
    assert_eq!(record["kind"], "suspend_bot");
    assert_eq!(record["status"], "in_progress");
    assert_eq!(state.notifier.pending(), 0);

    tokio::time::sleep(Duration::from_millis(501)).await;
    let toasts = state.notifier.drain();
    assert_eq!(toasts[0].title, "Bot Suspended");

    let (_, body) = send(&app, empty(Method::GET, "/api/admin/bots/1")).await;
    assert_eq!(body["status"], "Active");
}

#[tokio::test(start_paused = true)]
async fn resolve_issue_toast_names_issue() {
    let (app, state) = router();
    let (status, _) = send(&app, empty(Method::POST, "/api/admin/issues/ISS-001/resolve")).await;
    assert_eq!(status, StatusCode::ACCEPTED);
    tokio::time::sleep(Duration::from_millis(501)).await;
    assert_eq!(state.notifier.drain()[0].description, "Issue ISS-001 has been marked as resolved.");
}

#[tokio::test]
async fn moderating_unknown_user_is_not_found() {
    let (app, state) = router();
    let (status, _) = send(&app, empty(Method::POST, "/api/admin/users/42/activate")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(state.notifier.pending(), 0);
}

#[tokio::test]
async fn models_routing_and_platform_settings() {
    let (app, _) = router();
    let (status, body) = send(&app, empty(Method::GET, "/api/admin/models-routing")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["routes"].as_array().unwrap().len(), 4);
    assert_eq!(body["routes"][2]["model"], "GPT-4 Turbo");
    assert_eq!(body["routes"][2]["rate_limit"], "Unlimited");
    assert!(body["provider_keys"][0]["masked_key"].as_str().unwrap().starts_with("sk-***"));

    let (_, body) = send(&app, empty(Method::GET, "/api/admin/settings")).await;
    assert_eq!(body["security"]["require_admin_2fa"], true);
    assert_eq!(body["system"]["max_concurrent_users"], 10_000);
    assert_eq!(body["cache"]["ttl_seconds"], 3600);
}
