//! WordPress plugin records: the widget event log and the diagnostic checks.

use serde::Serialize;

use crate::filter::{Field, Record};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EventStatus {
    Success,
    Warning,
    Error,
    Info,
}

impl EventStatus {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Warning => "warning",
            Self::Error => "error",
            Self::Info => "info",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct WidgetEvent {
    pub id: String,
    pub timestamp: String,
    pub event: String,
    pub status: EventStatus,
    pub message: String,
    pub details: String,
}

impl Record for WidgetEvent {
    const NOUN: &'static str = "events";
    const SEARCH_FIELDS: &'static [Field<Self>] = &[|e| e.event.as_str(), |e| e.message.as_str()];
    const CATEGORIES: &'static [(&'static str, Field<Self>)] = &[("status", |e| e.status.as_str())];
}

pub(super) fn widget_events() -> Vec<WidgetEvent> {
    let event = |id: &str, timestamp: &str, event: &str, status, message: &str, details: &str| WidgetEvent {
        id: id.into(),
        timestamp: timestamp.into(),
        event: event.into(),
        status,
        message: message.into(),
        details: details.into(),
    };
    vec![
        event("1", "2024-01-15 14:32:18", "Chat Session Started", EventStatus::Success, "New visitor started chat session", "User: Anonymous, IP: 192.168.1.1"),
        event("2", "2024-01-15 14:31:45", "API Response", EventStatus::Success, "AI response generated successfully", "Response time: 1.2s, Tokens: 45"),
        event("3", "2024-01-15 14:30:12", "Human Handover", EventStatus::Warning, "User requested human agent", "Reason: Complex billing question"),
        event("4", "2024-01-15 14:28:33", "API Error", EventStatus::Error, "Failed to connect to ChatBot API", "Error: Timeout after 30s, Retry count: 3"),
        event("5", "2024-01-15 14:25:17", "Widget Loaded", EventStatus::Info, "Chat widget initialized successfully", "Load time: 0.8s, Cache hit: true"),
        event("6", "2024-01-15 14:22:44", "Issue Report", EventStatus::Info, "User reported an issue", "Type: Bug report, Category: UI Problem"),
    ]
}

// =============================================================================
// DIAGNOSTICS
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckStatus {
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, Serialize)]
pub struct DiagnosticCheck {
    pub id: String,
    pub name: String,
    pub description: String,
    pub status: CheckStatus,
    pub message: String,
    pub action: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CheckSummary {
    pub success: usize,
    pub warning: usize,
    pub error: usize,
}

impl CheckSummary {
    #[must_use]
    pub fn tally(checks: &[DiagnosticCheck]) -> Self {
        let count = |status| checks.iter().filter(|c| c.status == status).count();
        Self { success: count(CheckStatus::Success), warning: count(CheckStatus::Warning), error: count(CheckStatus::Error) }
    }
}

pub(super) fn diagnostic_checks() -> Vec<DiagnosticCheck> {
    let check = |id: &str, name: &str, description: &str, status, message: &str, action: Option<&str>| DiagnosticCheck {
        id: id.into(),
        name: name.into(),
        description: description.into(),
        status,
        message: message.into(),
        action: action.map(Into::into),
    };
    vec![
        check("token", "API Token Validation", "Verify authentication token is valid and active", CheckStatus::Success, "Token is valid and properly configured", None),
        check("domain", "Domain Binding Check", "Ensure domain is properly bound to your account", CheckStatus::Success, "Domain binding is correctly configured", None),
        check("connectivity", "API Connectivity", "Test connection to ChatBot API servers", CheckStatus::Success, "Connection established successfully", None),
        check(
            "permissions",
            "WordPress Permissions",
            "Check if plugin has necessary WordPress permissions",
            CheckStatus::Warning,
            "Some permissions are restricted",
            Some("Update plugin permissions in WordPress settings"),
        ),
        check(
            "quota",
            "Usage Quota Check",
            "Verify API usage limits and remaining quota",
            CheckStatus::Error,
            "Approaching monthly usage limit (92% used)",
            Some("Consider upgrading your plan or optimizing usage"),
        ),
        check("cache", "Cache Performance", "Check if caching is working optimally", CheckStatus::Success, "Cache hit rate: 87% - performing well", None),
    ]
}
