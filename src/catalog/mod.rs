//! Mock catalog: every record the console displays.
//!
//! DESIGN
//! ======
//! The console has no backing store. `Catalog::seeded()` builds the literal
//! records once at startup and `AppState` shares them behind an `Arc`;
//! nothing ever mutates them, so a restart is the only "reset" and the
//! filter layer can hand out borrowed slices freely.
//!
//! There is no referential integrity between collections: owners, assignees
//! and bot names are plain strings.

pub mod admin;
pub mod analytics;
pub mod app;
pub mod wordpress;

use admin::{
    AdminBot, AdminUser, ConversationLog, ErrorLog, Invoice, Metric, ModelRoute, PlanShare, PlatformIssue, PlatformSettings,
    ProviderKey, StripeEvent,
};
use analytics::Analytics;
use app::{AppBot, BotIssue, Conversation, DomainBinding, KnowledgeFile};
use wordpress::{DiagnosticCheck, WidgetEvent};

#[derive(Debug, Clone)]
pub struct Catalog {
    pub admin_bots: Vec<AdminBot>,
    pub admin_users: Vec<AdminUser>,
    pub platform_issues: Vec<PlatformIssue>,
    pub conversation_logs: Vec<ConversationLog>,
    pub error_logs: Vec<ErrorLog>,
    pub invoices: Vec<Invoice>,
    pub stripe_events: Vec<StripeEvent>,
    pub plan_shares: Vec<PlanShare>,
    pub billing_metrics: Vec<Metric>,
    pub admin_metrics: Vec<Metric>,
    pub overview_metrics: Vec<Metric>,
    pub model_routes: Vec<ModelRoute>,
    pub provider_keys: Vec<ProviderKey>,
    pub platform_settings: PlatformSettings,
    pub app_bots: Vec<AppBot>,
    pub bot_issues: Vec<BotIssue>,
    pub conversations: Vec<Conversation>,
    pub analytics: Analytics,
    pub knowledge_files: Vec<KnowledgeFile>,
    pub domain_bindings: Vec<DomainBinding>,
    pub widget_events: Vec<WidgetEvent>,
    pub diagnostics: Vec<DiagnosticCheck>,
}

impl Catalog {
    #[must_use]
    pub fn seeded() -> Self {
        Self {
            admin_bots: admin::admin_bots(),
            admin_users: admin::admin_users(),
            platform_issues: admin::platform_issues(),
            conversation_logs: admin::conversation_logs(),
            error_logs: admin::error_logs(),
            invoices: admin::invoices(),
            stripe_events: admin::stripe_events(),
            plan_shares: admin::plan_shares(),
            billing_metrics: admin::billing_metrics(),
            admin_metrics: vec![
                Metric::new("Active Users", "2,847", "+12.5%"),
                Metric::new("Active Bots", "1,234", "+8.2%"),
                Metric::new("Messages Today", "45,632", "+23.1%"),
                Metric::new("Revenue (MTD)", "$12,456", "+15.3%"),
                Metric::new("System Health", "99.8%", "Stable"),
                Metric::new("Active Issues", "3", "-2 from yesterday"),
            ],
            overview_metrics: vec![
                Metric::new("Active Bots", "12", "+2 this month"),
                Metric::new("Conversations Today", "1,247", "+12% from yesterday"),
                Metric::new("Active Users", "8,429", "+5% this week"),
                Metric::new("Avg Response Time", "1.2s", "-0.3s improvement"),
            ],
            model_routes: admin::model_routes(),
            provider_keys: admin::provider_keys(),
            platform_settings: admin::platform_settings(),
            app_bots: app::app_bots(),
            bot_issues: app::bot_issues(),
            conversations: app::conversations(),
            analytics: analytics::analytics(),
            knowledge_files: app::knowledge_files(),
            domain_bindings: app::domain_bindings(),
            widget_events: wordpress::widget_events(),
            diagnostics: wordpress::diagnostic_checks(),
        }
    }

    #[must_use]
    pub fn admin_bot(&self, id: &str) -> Option<&AdminBot> {
        self.admin_bots.iter().find(|b| b.id == id)
    }

    #[must_use]
    pub fn admin_user(&self, id: &str) -> Option<&AdminUser> {
        self.admin_users.iter().find(|u| u.id == id)
    }

    #[must_use]
    pub fn platform_issue(&self, id: &str) -> Option<&PlatformIssue> {
        self.platform_issues.iter().find(|i| i.id.eq_ignore_ascii_case(id))
    }

    #[must_use]
    pub fn app_bot(&self, id: &str) -> Option<&AppBot> {
        self.app_bots.iter().find(|b| b.id == id)
    }
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
