//! Admin console records: platform bots, users, issues, logs and billing.

use serde::Serialize;

use crate::filter::{Field, Record};

// =============================================================================
// ENUMS
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Plan {
    Free,
    Pro,
    Team,
    Enterprise,
}

impl Plan {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Free => "Free",
            Self::Pro => "Pro",
            Self::Team => "Team",
            Self::Enterprise => "Enterprise",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AccountStatus {
    Active,
    Suspended,
}

impl AccountStatus {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Suspended => "Suspended",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Severity {
    Info,
    Low,
    Medium,
    Warning,
    High,
    Error,
    Critical,
}

impl Severity {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Info => "Info",
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::Warning => "Warning",
            Self::High => "High",
            Self::Error => "Error",
            Self::Critical => "Critical",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum IssueStatus {
    Open,
    #[serde(rename = "In Progress")]
    InProgress,
    Resolved,
}

impl IssueStatus {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Open => "Open",
            Self::InProgress => "In Progress",
            Self::Resolved => "Resolved",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum InvoiceStatus {
    Paid,
    Pending,
    Failed,
}

impl InvoiceStatus {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Paid => "Paid",
            Self::Pending => "Pending",
            Self::Failed => "Failed",
        }
    }
}

// =============================================================================
// BOTS
// =============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct AdminBot {
    pub id: String,
    pub name: String,
    pub owner: String,
    pub plan: Plan,
    pub status: AccountStatus,
    pub conversations: u32,
    pub last_used: String,
    pub created_date: String,
    pub error_rate: String,
}

impl Record for AdminBot {
    const NOUN: &'static str = "bots";
    const SEARCH_FIELDS: &'static [Field<Self>] = &[|b| b.name.as_str(), |b| b.owner.as_str()];
    const CATEGORIES: &'static [(&'static str, Field<Self>)] =
        &[("status", |b| b.status.as_str()), ("plan", |b| b.plan.as_str())];
}

/// Badge bucket for an error rate string such as `"2.1%"`.
#[must_use]
pub fn error_rate_band(error_rate: &str) -> &'static str {
    let rate = error_rate.trim_end_matches('%').trim().parse::<f64>().unwrap_or(0.0);
    if rate < 1.0 {
        "healthy"
    } else if rate < 5.0 {
        "degraded"
    } else {
        "failing"
    }
}

#[allow(clippy::too_many_arguments)]
fn admin_bot(
    id: &str,
    name: &str,
    owner: &str,
    plan: Plan,
    status: AccountStatus,
    conversations: u32,
    last_used: &str,
    created_date: &str,
    error_rate: &str,
) -> AdminBot {
    AdminBot {
        id: id.into(),
        name: name.into(),
        owner: owner.into(),
        plan,
        status,
        conversations,
        last_used: last_used.into(),
        created_date: created_date.into(),
        error_rate: error_rate.into(),
    }
}

pub(super) fn admin_bots() -> Vec<AdminBot> {
    use AccountStatus::{Active, Suspended};
    vec![
        admin_bot("1", "Customer Support AI", "john@company.com", Plan::Pro, Active, 1456, "2 hours ago", "2024-01-15", "0.2%"),
        admin_bot("2", "Sales Assistant", "sarah@startup.io", Plan::Enterprise, Active, 3241, "30 min ago", "2023-12-20", "0.1%"),
        admin_bot("3", "FAQ Bot", "mike@freelance.com", Plan::Free, Suspended, 234, "5 days ago", "2024-02-01", "2.1%"),
        admin_bot("4", "Product Recommender", "emily@agency.com", Plan::Pro, Active, 892, "1 hour ago", "2024-01-10", "0.3%"),
    ]
}

// =============================================================================
// USERS
// =============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct AdminUser {
    pub id: String,
    pub name: String,
    pub email: String,
    pub plan: Plan,
    pub status: AccountStatus,
    pub last_active: String,
    pub messages_used: String,
    pub bots_count: u32,
    pub joined_date: String,
}

impl Record for AdminUser {
    const NOUN: &'static str = "users";
    const SEARCH_FIELDS: &'static [Field<Self>] = &[|u| u.name.as_str(), |u| u.email.as_str()];
    const CATEGORIES: &'static [(&'static str, Field<Self>)] =
        &[("status", |u| u.status.as_str()), ("plan", |u| u.plan.as_str())];
}

pub(super) fn admin_users() -> Vec<AdminUser> {
    let user = |id: &str, name: &str, email: &str, plan, status, last_active: &str, used: &str, bots, joined: &str| {
        AdminUser {
            id: id.into(),
            name: name.into(),
            email: email.into(),
            plan,
            status,
            last_active: last_active.into(),
            messages_used: used.into(),
            bots_count: bots,
            joined_date: joined.into(),
        }
    };
    vec![
        user("1", "John Smith", "john@company.com", Plan::Pro, AccountStatus::Active, "2 hours ago", "1,234 / 10,000", 5, "2024-01-15"),
        user("2", "Sarah Johnson", "sarah@startup.io", Plan::Enterprise, AccountStatus::Active, "1 day ago", "8,456 / 50,000", 12, "2023-12-01"),
        user("3", "Mike Wilson", "mike@freelance.com", Plan::Free, AccountStatus::Suspended, "5 days ago", "150 / 1,000", 2, "2024-02-20"),
        user("4", "Emily Chen", "emily@agency.com", Plan::Pro, AccountStatus::Active, "30 min ago", "3,421 / 10,000", 8, "2024-01-08"),
    ]
}

// =============================================================================
// ISSUES
// =============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct PlatformIssue {
    pub id: String,
    pub title: String,
    pub description: String,
    pub category: String,
    pub severity: Severity,
    pub status: IssueStatus,
    pub assignee: String,
    pub reporter: String,
    pub created_date: String,
    pub updated_date: String,
    pub affected_users: u32,
}

impl Record for PlatformIssue {
    const NOUN: &'static str = "issues";
    const SEARCH_FIELDS: &'static [Field<Self>] = &[|i| i.title.as_str(), |i| i.description.as_str(), |i| i.id.as_str()];
    const CATEGORIES: &'static [(&'static str, Field<Self>)] =
        &[("status", |i| i.status.as_str()), ("severity", |i| i.severity.as_str())];
}

pub(super) fn platform_issues() -> Vec<PlatformIssue> {
    let issue = |id: &str,
                 title: &str,
                 description: &str,
                 category: &str,
                 severity,
                 status,
                 people: (&str, &str),
                 dates: (&str, &str),
                 affected_users| PlatformIssue {
        id: id.into(),
        title: title.into(),
        description: description.into(),
        category: category.into(),
        severity,
        status,
        assignee: people.0.into(),
        reporter: people.1.into(),
        created_date: dates.0.into(),
        updated_date: dates.1.into(),
        affected_users,
    };
    vec![
        issue(
            "ISS-001",
            "API Timeout in EU Region",
            "Multiple users reporting slow response times in European servers",
            "Infrastructure",
            Severity::High,
            IssueStatus::Open,
            ("John Smith", "sarah@company.com"),
            ("2024-01-20 09:30", "2024-01-20 14:15"),
            45,
        ),
        issue(
            "ISS-002",
            "Bot Training Data Corruption",
            "Customer Support AI returning incorrect responses after recent update",
            "Bot Management",
            Severity::Critical,
            IssueStatus::InProgress,
            ("Emily Chen", "mike@startup.io"),
            ("2024-01-19 16:45", "2024-01-20 10:20"),
            12,
        ),
        issue(
            "ISS-003",
            "Billing Sync Error",
            "Stripe webhook failures causing subscription status mismatch",
            "Billing",
            Severity::Medium,
            IssueStatus::Resolved,
            ("Alex Johnson", "billing@techcorp.com"),
            ("2024-01-18 11:20", "2024-01-19 15:30"),
            8,
        ),
        issue(
            "ISS-004",
            "User Dashboard Load Errors",
            "Dashboard failing to load for users with large bot collections",
            "UI/UX",
            Severity::Low,
            IssueStatus::Open,
            ("Sarah Wilson", "user@agency.com"),
            ("2024-01-17 14:10", "2024-01-18 09:45"),
            3,
        ),
    ]
}

// =============================================================================
// LOGS
// =============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct ConversationLog {
    pub id: String,
    pub bot: String,
    pub user: String,
    pub start_time: String,
    pub end_time: Option<String>,
    pub messages: u32,
    pub duration: String,
    pub rating: Option<u8>,
    pub resolved: bool,
}

impl Record for ConversationLog {
    const NOUN: &'static str = "conversations";
    const SEARCH_FIELDS: &'static [Field<Self>] = &[|l| l.bot.as_str(), |l| l.user.as_str(), |l| l.id.as_str()];
}

#[derive(Debug, Clone, Serialize)]
pub struct ErrorLog {
    pub timestamp: String,
    pub bot: String,
    pub error: String,
    pub message: String,
    pub severity: Severity,
    pub user: String,
    pub conversation: Option<String>,
}

impl Record for ErrorLog {
    const NOUN: &'static str = "errors";
    const SEARCH_FIELDS: &'static [Field<Self>] = &[|l| l.bot.as_str(), |l| l.error.as_str(), |l| l.message.as_str()];
    const CATEGORIES: &'static [(&'static str, Field<Self>)] = &[("severity", |l| l.severity.as_str())];
}

pub(super) fn conversation_logs() -> Vec<ConversationLog> {
    let log = |id: &str, bot: &str, user: &str, start: &str, end: Option<&str>, messages, duration: &str, rating| {
        ConversationLog {
            id: id.into(),
            bot: bot.into(),
            user: user.into(),
            start_time: start.into(),
            end_time: end.map(Into::into),
            messages,
            duration: duration.into(),
            rating,
            resolved: end.is_some(),
        }
    };
    vec![
        log("conv_001", "Customer Support AI", "john@example.com", "2024-01-20 14:30:15", Some("2024-01-20 14:45:22"), 12, "15m 7s", Some(5)),
        log("conv_002", "Sales Assistant", "sarah@company.com", "2024-01-20 13:15:42", Some("2024-01-20 13:28:18"), 8, "12m 36s", Some(4)),
        log("conv_003", "FAQ Bot", "mike@startup.io", "2024-01-20 11:45:33", None, 3, "Ongoing", None),
        log("conv_004", "Product Recommender", "emily@agency.com", "2024-01-20 09:30:11", Some("2024-01-20 09:42:05"), 15, "11m 54s", Some(3)),
    ]
}

pub(super) fn error_logs() -> Vec<ErrorLog> {
    let log = |timestamp: &str, bot: &str, error: &str, message: &str, severity, user: &str, conversation: Option<&str>| {
        ErrorLog {
            timestamp: timestamp.into(),
            bot: bot.into(),
            error: error.into(),
            message: message.into(),
            severity,
            user: user.into(),
            conversation: conversation.map(Into::into),
        }
    };
    vec![
        log(
            "2024-01-20 14:25:33",
            "Customer Support AI",
            "API Timeout",
            "OpenAI API request timed out after 30 seconds",
            Severity::Warning,
            "john@example.com",
            Some("conv_001"),
        ),
        log(
            "2024-01-20 13:42:17",
            "Sales Assistant",
            "Rate Limit Exceeded",
            "API rate limit exceeded, using fallback response",
            Severity::Info,
            "sarah@company.com",
            Some("conv_002"),
        ),
        log(
            "2024-01-20 11:15:55",
            "FAQ Bot",
            "Parse Error",
            "Failed to parse user input with special characters: '@#$%'",
            Severity::Error,
            "mike@startup.io",
            Some("conv_003"),
        ),
        log(
            "2024-01-20 08:30:22",
            "Product Recommender",
            "Database Connection",
            "Temporary database connection failure, retrying...",
            Severity::Warning,
            "emily@agency.com",
            None,
        ),
    ]
}

// =============================================================================
// BILLING
// =============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct Invoice {
    pub id: String,
    pub customer: String,
    pub email: String,
    pub amount: String,
    pub plan: Plan,
    pub status: InvoiceStatus,
    pub date: String,
}

impl Record for Invoice {
    const NOUN: &'static str = "invoices";
    const SEARCH_FIELDS: &'static [Field<Self>] = &[|i| i.customer.as_str(), |i| i.email.as_str(), |i| i.id.as_str()];
    const CATEGORIES: &'static [(&'static str, Field<Self>)] =
        &[("status", |i| i.status.as_str()), ("plan", |i| i.plan.as_str())];
}

#[derive(Debug, Clone, Serialize)]
pub struct StripeEvent {
    pub event: String,
    pub customer: String,
    pub amount: String,
    pub timestamp: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct PlanShare {
    pub plan: Plan,
    pub users: u32,
    pub revenue: String,
    pub percentage: String,
}

/// A headline metric card: `{ title, value, change }`.
#[derive(Debug, Clone, Serialize)]
pub struct Metric {
    pub title: String,
    pub value: String,
    pub change: String,
}

impl Metric {
    pub(super) fn new(title: &str, value: &str, change: &str) -> Self {
        Self { title: title.into(), value: value.into(), change: change.into() }
    }
}

pub(super) fn invoices() -> Vec<Invoice> {
    let invoice = |id: &str, customer: &str, email: &str, amount: &str, plan, status, date: &str| Invoice {
        id: id.into(),
        customer: customer.into(),
        email: email.into(),
        amount: amount.into(),
        plan,
        status,
        date: date.into(),
    };
    vec![
        invoice("inv_001", "TechCorp Inc.", "billing@techcorp.com", "$1,200", Plan::Enterprise, InvoiceStatus::Paid, "2024-01-20"),
        invoice("inv_002", "StartupXYZ", "finance@startupxyz.com", "$200", Plan::Pro, InvoiceStatus::Paid, "2024-01-19"),
        invoice("inv_003", "FreelancePro", "john@freelancepro.com", "$20", Plan::Pro, InvoiceStatus::Failed, "2024-01-18"),
        invoice("inv_004", "AgencyPlus", "accounts@agencyplus.com", "$600", Plan::Team, InvoiceStatus::Pending, "2024-01-17"),
    ]
}

pub(super) fn stripe_events() -> Vec<StripeEvent> {
    let event = |event: &str, customer: &str, amount: &str, timestamp: &str| StripeEvent {
        event: event.into(),
        customer: customer.into(),
        amount: amount.into(),
        timestamp: timestamp.into(),
    };
    vec![
        event("customer.subscription.created", "cus_123456", "$20.00", "2024-01-20 14:30"),
        event("invoice.payment_succeeded", "cus_789012", "$1,200.00", "2024-01-20 13:15"),
        event("invoice.payment_failed", "cus_345678", "$20.00", "2024-01-20 11:45"),
        event("customer.subscription.updated", "cus_901234", "$200.00", "2024-01-20 09:30"),
    ]
}

pub(super) fn plan_shares() -> Vec<PlanShare> {
    let share = |plan, users, revenue: &str, percentage: &str| PlanShare {
        plan,
        users,
        revenue: revenue.into(),
        percentage: percentage.into(),
    };
    vec![
        share(Plan::Free, 1456, "$0", "51.2%"),
        share(Plan::Pro, 891, "$17,820", "31.3%"),
        share(Plan::Enterprise, 234, "$23,400", "8.2%"),
        share(Plan::Team, 266, "$7,980", "9.3%"),
    ]
}

pub(super) fn billing_metrics() -> Vec<Metric> {
    vec![
        Metric::new("Monthly Revenue", "$45,678", "+15.3%"),
        Metric::new("Active Subscriptions", "2,847", "+12.5%"),
        Metric::new("Average Revenue Per User", "$16.04", "+2.1%"),
        Metric::new("Churn Rate", "2.3%", "-0.8%"),
    ]
}

// =============================================================================
// MODELS ROUTING / PLATFORM SETTINGS
// =============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct ModelRoute {
    pub plan: Plan,
    pub model: String,
    pub rate_limit: String,
    pub enabled: bool,
}

/// Provider key as the page shows it: always masked.
#[derive(Debug, Clone, Serialize)]
pub struct ProviderKey {
    pub provider: String,
    pub masked_key: String,
}

pub(super) fn model_routes() -> Vec<ModelRoute> {
    let route = |plan, model: &str, rate_limit: &str| ModelRoute {
        plan,
        model: model.into(),
        rate_limit: rate_limit.into(),
        enabled: true,
    };
    vec![
        route(Plan::Free, "GPT-3.5 Turbo", "100/hour"),
        route(Plan::Pro, "GPT-4", "1000/hour"),
        route(Plan::Enterprise, "GPT-4 Turbo", "Unlimited"),
        route(Plan::Team, "GPT-4", "500/hour"),
    ]
}

pub(super) fn provider_keys() -> Vec<ProviderKey> {
    ["OpenAI", "Anthropic"]
        .into_iter()
        .map(|provider| ProviderKey { provider: provider.into(), masked_key: "sk-***************************".into() })
        .collect()
}

#[derive(Debug, Clone, Serialize)]
pub struct SecuritySettings {
    pub jwt_secret: String,
    pub require_admin_2fa: bool,
    pub ip_whitelisting: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct SystemSettings {
    pub max_concurrent_users: u32,
    pub session_timeout_minutes: u32,
    pub maintenance_mode: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct CacheSettings {
    pub ttl_seconds: u32,
    pub response_caching: bool,
}

/// Admin settings tabs. Display only; the page's buttons do nothing.
#[derive(Debug, Clone, Serialize)]
pub struct PlatformSettings {
    pub security: SecuritySettings,
    pub system: SystemSettings,
    pub cache: CacheSettings,
}

pub(super) fn platform_settings() -> PlatformSettings {
    PlatformSettings {
        security: SecuritySettings {
            jwt_secret: "***************************".into(),
            require_admin_2fa: true,
            ip_whitelisting: false,
        },
        system: SystemSettings { max_concurrent_users: 10_000, session_timeout_minutes: 60, maintenance_mode: false },
        cache: CacheSettings { ttl_seconds: 3600, response_caching: true },
    }
}
