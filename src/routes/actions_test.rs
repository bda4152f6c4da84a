use std::time::Duration;

use axum::http::{Method, StatusCode};

use crate::routes;
use crate::routes::test_helpers::{empty, scoped, send};
use crate::services::action::ROOT_SCOPE;
use crate::state::test_helpers::test_app_state;

#[tokio::test(start_paused = true)]
async fn action_status_is_pollable() {
    let app = routes::app(test_app_state());
    let (_, record) = send(&app, empty(Method::POST, "/api/admin/users/1/suspend")).await;
    let uri = format!("/api/actions/{}", record["id"].as_str().unwrap());

    let (_, polled) = send(&app, empty(Method::GET, &uri)).await;
    assert_eq!(polled["status"], "in_progress");
    tokio::time::sleep(Duration::from_millis(501)).await;
    let (_, polled) = send(&app, empty(Method::GET, &uri)).await;
    assert_eq!(polled["status"], "succeeded");
    assert_eq!(polled["progress"], 100);

    let (status, _) = send(&app, empty(Method::GET, &format!("/api/actions/{}", uuid::Uuid::new_v4()))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test(start_paused = true)]
async fn closing_scope_cancels_its_actions() {
    let app = routes::app(test_app_state());
    let (status, opened) = send(&app, empty(Method::POST, "/api/scopes")).await;
    assert_eq!(status, StatusCode::CREATED);
    let scope: uuid::Uuid = opened["scope"].as_str().unwrap().parse().unwrap();

    let (_, record) = send(&app, scoped(empty(Method::POST, "/api/wordpress/logs/sync"), scope)).await;
    assert_eq!(record["scope"], scope.to_string());

    let (_, closed) = send(&app, empty(Method::DELETE, &format!("/api/scopes/{scope}"))).await;
    assert_eq!(closed["cancelled"], 1);

    tokio::time::sleep(Duration::from_millis(2500)).await;
    let uri = format!("/api/actions/{}", record["id"].as_str().unwrap());
    let (_, polled) = send(&app, empty(Method::GET, &uri)).await;
    assert_eq!(polled["status"], "cancelled");
    let (_, toasts) = send(&app, empty(Method::GET, "/api/notifications")).await;
    assert!(toasts.as_array().unwrap().is_empty());

    let (status, _) = send(&app, empty(Method::DELETE, &format!("/api/scopes/{scope}"))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn root_scope_cannot_be_closed() {
    let app = routes::app(test_app_state());
    let (status, _) = send(&app, empty(Method::DELETE, &format!("/api/scopes/{ROOT_SCOPE}"))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn notifications_drain_on_read() {
    let app = routes::app(test_app_state());
    send(&app, empty(Method::POST, "/api/wordpress/logs/export")).await;

    let (_, toasts) = send(&app, empty(Method::GET, "/api/notifications")).await;
    assert_eq!(toasts[0]["title"], "Export Started");
    assert_eq!(toasts[0]["variant"], "default");
    let (_, toasts) = send(&app, empty(Method::GET, "/api/notifications")).await;
    assert!(toasts.as_array().unwrap().is_empty());
}
