use std::time::Duration;

use super::*;
use crate::config::ActionDelays;
use crate::notify::{Notifier, Variant};
use crate::services::action::{ActionStatus, ROOT_SCOPE};

fn runner() -> ActionRunner {
    ActionRunner::new(Notifier::new(), ActionDelays::default())
}

fn report(issue_type: &str, description: &str) -> IssueReport {
    IssueReport { issue_type: issue_type.into(), description: description.into(), email: String::new() }
}

#[test]
fn issue_report_requires_type_and_description() {
    let runner = runner();
    let err = report_issue(&runner, ROOT_SCOPE, &report("", "  ")).unwrap_err();
    match err {
        FormError::MissingFields(fields) => assert_eq!(fields, vec!["issue_type", "description"]),
        other => panic!("unexpected error: {other}"),
    }
    let toast = &runner.notifier().drain()[0];
    assert_eq!(toast.title, "Missing Information");
    assert_eq!(toast.variant, Variant::Destructive);
}

#[test]
fn missing_fields_message() {
    let err = FormError::MissingFields(vec!["description"]);
    assert_eq!(err.to_string(), "missing required fields: description");
}

#[tokio::test(start_paused = true)]
async fn issue_report_toasts_then_closes_after_delay() {
    let runner = runner();
    let submission = report_issue(&runner, ROOT_SCOPE, &report("bug", "Widget froze")).unwrap();
    assert_eq!(submission.form, FormKind::IssueReport);
    assert_eq!(submission.close.status, ActionStatus::InProgress);
    assert_eq!(runner.notifier().drain()[0].title, "Issue Reported");

    tokio::time::sleep(Duration::from_millis(1999)).await;
    assert_eq!(runner.get(submission.close.id).unwrap().status, ActionStatus::InProgress);
    tokio::time::sleep(Duration::from_millis(2)).await;
    assert_eq!(runner.get(submission.close.id).unwrap().status, ActionStatus::Succeeded);
    assert_eq!(runner.notifier().pending(), 0);
}

#[tokio::test]
async fn handover_always_succeeds() {
    let runner = runner();
    let submission = request_handover(&runner, ROOT_SCOPE, &HandoverRequest::default()).unwrap();
    assert_eq!(submission.form, FormKind::Handover);
    assert_eq!(runner.notifier().drain()[0].title, "Request Sent");
}

#[tokio::test]
async fn csat_clamps_rating() {
    let runner = runner();
    let submission =
        rate_chat(&runner, ROOT_SCOPE, &CsatResponse { rating: 9, ..CsatResponse::default() }).unwrap();
    assert_eq!(submission.rating, Some(5));
    assert_eq!(runner.notifier().drain()[0].title, "Thank You!");
}

#[test]
fn quick_rating_shortcut() {
    assert_eq!(CsatResponse { positive: Some(true), ..CsatResponse::default() }.effective_rating(), 5);
    assert_eq!(CsatResponse { positive: Some(false), rating: 4, ..CsatResponse::default() }.effective_rating(), 1);
    assert_eq!(CsatResponse::default().effective_rating(), 0);
}

#[tokio::test]
async fn closed_scope_rejects_without_toast() {
    let runner = runner();
    let scope = runner.open_scope();
    runner.close_scope(scope);
    let err = request_handover(&runner, scope, &HandoverRequest::default()).unwrap_err();
    assert!(matches!(err, FormError::Action(_)));
    assert_eq!(runner.notifier().pending(), 0);
}
