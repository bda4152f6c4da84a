use axum::http::Method;

use super::test_helpers::{empty, scoped, send};
use super::*;
use crate::state::test_helpers::test_app_state;

#[tokio::test]
async fn healthz_is_ok() {
    let app = app(test_app_state());
    let (status, _) = send(&app, empty(Method::GET, "/healthz")).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn unknown_path_is_page_not_found() {
    let app = app(test_app_state());
    let (status, body) = send(&app, empty(Method::GET, "/nope/at/all")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "E_NOT_FOUND");
    assert_eq!(body["message"], "page not found: /nope/at/all");
}

#[tokio::test]
async fn malformed_scope_header_is_bad_request() {
    let app = app(test_app_state());
    let mut request = empty(Method::POST, "/api/wordpress/logs/sync");
    request.headers_mut().insert(VIEW_SCOPE_HEADER, "not-a-uuid".parse().unwrap());
    let (status, _) = send(&app, request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn closed_scope_header_is_not_found() {
    let state = test_app_state();
    let scope = state.actions.open_scope();
    state.actions.close_scope(scope);
    let app = app(state);
    let (status, body) = send(&app, scoped(empty(Method::POST, "/api/wordpress/logs/sync"), scope)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "E_SCOPE_CLOSED");
}

#[tokio::test]
async fn cors_allows_any_origin() {
    let app = app(test_app_state());
    let mut request = empty(Method::GET, "/healthz");
    request.headers_mut().insert("origin", "https://shop.example.com".parse().unwrap());
    let response = tower::ServiceExt::oneshot(app, request).await.unwrap();
    assert_eq!(response.headers()["access-control-allow-origin"], "*");
}
