//! API error taxonomy.
//!
//! DESIGN
//! ======
//! Almost nothing in the console can fail: simulated actions always settle.
//! The errors that remain are lookups of unknown ids or closed scopes,
//! malformed filter queries, local form refusals and wizard misuse. Each
//! maps to one HTTP status and a stable `E_*` code in the JSON body.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use uuid::Uuid;

use crate::filter::FilterError;
use crate::services::action::ActionError;
use crate::services::forms::FormError;
use crate::services::wizard::WizardError;
use crate::services::wordpress::WordPressError;

/// Stable machine-readable code for an error.
pub trait ErrorCode: std::fmt::Display {
    fn error_code(&self) -> &'static str;
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },
    #[error(transparent)]
    Action(#[from] ActionError),
    #[error(transparent)]
    Filter(#[from] FilterError),
    #[error(transparent)]
    Form(#[from] FormError),
    #[error(transparent)]
    WordPress(#[from] WordPressError),
    #[error(transparent)]
    Wizard(#[from] WizardError),
}

impl ApiError {
    #[must_use]
    pub fn not_found(kind: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound { kind, id: id.into() }
    }

    #[must_use]
    pub fn missing(kind: &'static str, id: Uuid) -> Self {
        Self::NotFound { kind, id: id.to_string() }
    }

    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::NotFound { .. }
            | Self::Action(_)
            | Self::Form(FormError::Action(_))
            | Self::WordPress(WordPressError::Action(_)) => StatusCode::NOT_FOUND,
            Self::Filter(_) => StatusCode::BAD_REQUEST,
            Self::Form(_) | Self::WordPress(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Wizard(_) => StatusCode::CONFLICT,
        }
    }
}

impl ErrorCode for ApiError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "E_NOT_FOUND",
            Self::Action(_) | Self::Form(FormError::Action(_)) | Self::WordPress(WordPressError::Action(_)) => {
                "E_SCOPE_CLOSED"
            }
            Self::Filter(_) => "E_INVALID_FILTER",
            Self::Form(_) | Self::WordPress(_) => "E_VALIDATION",
            Self::Wizard(_) => "E_WIZARD_STEP",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        tracing::debug!(error = %self, code = self.error_code(), "request rejected");
        let body = serde_json::json!({ "code": self.error_code(), "message": self.to_string() });
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
#[path = "error_test.rs"]
mod tests;
