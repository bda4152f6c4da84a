//! Chat-widget modal forms: issue report, human handover, CSAT rating.
//!
//! Every submission toasts right away and schedules a `CloseModal` action
//! that settles after the modal-close delay. The issue report is the only
//! form with required fields.

use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::notify::Notification;
use crate::services::action::{ActionError, ActionKind, ActionRecord, ActionRunner, Outcome};

pub const MAX_RATING: u8 = 5;

#[derive(Debug, thiserror::Error)]
pub enum FormError {
    #[error("missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),
    #[error(transparent)]
    Action(#[from] ActionError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FormKind {
    IssueReport,
    Handover,
    Csat,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct IssueReport {
    pub issue_type: String,
    pub description: String,
    pub email: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct HandoverRequest {
    pub reason: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CsatResponse {
    pub rating: u8,
    /// Thumbs up/down shortcut: up rates 5, down rates 1.
    pub positive: Option<bool>,
    pub feedback: String,
}

impl CsatResponse {
    #[must_use]
    pub fn effective_rating(&self) -> u8 {
        match self.positive {
            Some(true) => MAX_RATING,
            Some(false) => 1,
            None => self.rating.min(MAX_RATING),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Submission {
    pub id: Uuid,
    pub form: FormKind,
    /// Settles when the modal closes itself.
    pub close: ActionRecord,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<u8>,
}

/// # Errors
///
/// `MissingFields` when `issue_type` or `description` is blank; a
/// destructive toast is pushed as well.
pub fn report_issue(runner: &ActionRunner, scope: Uuid, report: &IssueReport) -> Result<Submission, FormError> {
    let missing: Vec<&'static str> = [("issue_type", &report.issue_type), ("description", &report.description)]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
        .collect();
    if !missing.is_empty() {
        runner
            .notifier()
            .push(Notification::destructive("Missing Information", "Please fill in all required fields."));
        return Err(FormError::MissingFields(missing));
    }

    info!(issue_type = %report.issue_type, "issue reported");
    submit(
        runner,
        scope,
        FormKind::IssueReport,
        Notification::new("Issue Reported", "Thank you! We'll investigate this right away."),
        None,
    )
}

/// # Errors
///
/// Returns `Action` when `scope` is closed.
pub fn request_handover(runner: &ActionRunner, scope: Uuid, request: &HandoverRequest) -> Result<Submission, FormError> {
    info!(has_reason = !request.reason.trim().is_empty(), "handover requested");
    submit(runner, scope, FormKind::Handover, Notification::new("Request Sent", "An agent will be with you shortly."), None)
}

/// # Errors
///
/// Returns `Action` when `scope` is closed.
pub fn rate_chat(runner: &ActionRunner, scope: Uuid, response: &CsatResponse) -> Result<Submission, FormError> {
    let rating = response.effective_rating();
    info!(rating, "csat submitted");
    submit(
        runner,
        scope,
        FormKind::Csat,
        Notification::new("Thank You!", "Your feedback helps us improve our service."),
        Some(rating),
    )
}

fn submit(
    runner: &ActionRunner,
    scope: Uuid,
    form: FormKind,
    toast: Notification,
    rating: Option<u8>,
) -> Result<Submission, FormError> {
    if !runner.scope_is_open(scope) {
        return Err(ActionError::ScopeClosed(scope).into());
    }
    runner.notifier().push(toast);
    let close = runner.start(scope, ActionKind::CloseModal, None, Outcome::silent)?;
    Ok(Submission { id: Uuid::new_v4(), form, close, rating })
}

#[cfg(test)]
#[path = "forms_test.rs"]
mod tests;
