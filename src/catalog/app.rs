//! End-user app records: the signed-in user's bots, their issues and
//! conversation transcripts.

use serde::Serialize;

use crate::filter::{Field, Record};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum BotStatus {
    Active,
    Paused,
}

impl BotStatus {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Paused => "paused",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum TicketStatus {
    Open,
    InProgress,
    Resolved,
}

impl TicketStatus {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::InProgress => "in-progress",
            Self::Resolved => "resolved",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum TicketSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl TicketSeverity {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ConversationStatus {
    Completed,
    Escalated,
    Abandoned,
}

impl ConversationStatus {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Completed => "completed",
            Self::Escalated => "escalated",
            Self::Abandoned => "abandoned",
        }
    }
}

// =============================================================================
// BOTS
// =============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct AppBot {
    pub id: String,
    pub name: String,
    pub status: BotStatus,
    pub conversations: u32,
    pub last_active: String,
    pub knowledge_base: u32,
    pub avatar: String,
    pub domain: String,
}

impl Record for AppBot {
    const NOUN: &'static str = "bots";
    const SEARCH_FIELDS: &'static [Field<Self>] = &[|b| b.name.as_str()];
    const CATEGORIES: &'static [(&'static str, Field<Self>)] = &[("status", |b| b.status.as_str())];
}

pub(super) fn app_bots() -> Vec<AppBot> {
    let bot = |id: &str, name: &str, status, conversations, last_active: &str, knowledge_base, avatar: &str, domain: &str| {
        AppBot {
            id: id.into(),
            name: name.into(),
            status,
            conversations,
            last_active: last_active.into(),
            knowledge_base,
            avatar: avatar.into(),
            domain: domain.into(),
        }
    };
    vec![
        bot("1", "Customer Support Bot", BotStatus::Active, 1247, "2 minutes ago", 23, "🤖", "yoursite.com"),
        bot("2", "Sales Assistant", BotStatus::Paused, 892, "1 hour ago", 15, "💼", "shop.yoursite.com"),
        bot("3", "FAQ Helper", BotStatus::Active, 534, "5 minutes ago", 8, "❓", "help.yoursite.com"),
    ]
}

// =============================================================================
// ISSUES
// =============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct BotIssue {
    pub id: String,
    pub title: String,
    pub category: String,
    pub severity: TicketSeverity,
    pub status: TicketStatus,
    pub reported_by: String,
    pub assignee: Option<String>,
    pub created_at: String,
    pub description: String,
}

impl Record for BotIssue {
    const NOUN: &'static str = "issues";
    const SEARCH_FIELDS: &'static [Field<Self>] = &[|i| i.title.as_str(), |i| i.id.as_str()];
    const CATEGORIES: &'static [(&'static str, Field<Self>)] =
        &[("status", |i| i.status.as_str()), ("severity", |i| i.severity.as_str())];
}

/// Summary counters shown above the issue table. Computed over the whole
/// collection, not the filtered view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct IssueCounts {
    pub open: usize,
    pub in_progress: usize,
    pub resolved: usize,
    pub critical: usize,
}

impl IssueCounts {
    #[must_use]
    pub fn tally(issues: &[BotIssue]) -> Self {
        let mut counts = Self::default();
        for issue in issues {
            match issue.status {
                TicketStatus::Open => counts.open += 1,
                TicketStatus::InProgress => counts.in_progress += 1,
                TicketStatus::Resolved => counts.resolved += 1,
            }
            if issue.severity == TicketSeverity::Critical {
                counts.critical += 1;
            }
        }
        counts
    }
}

pub(super) fn bot_issues() -> Vec<BotIssue> {
    let issue = |id: &str,
                 title: &str,
                 category: &str,
                 severity,
                 status,
                 reported_by: &str,
                 assignee: Option<&str>,
                 created_at: &str,
                 description: &str| BotIssue {
        id: id.into(),
        title: title.into(),
        category: category.into(),
        severity,
        status,
        reported_by: reported_by.into(),
        assignee: assignee.map(Into::into),
        created_at: created_at.into(),
        description: description.into(),
    };
    vec![
        issue(
            "ISS-001",
            "Bot not understanding return policy questions",
            "knowledge",
            TicketSeverity::High,
            TicketStatus::Open,
            "john@example.com",
            Some("Sarah Johnson"),
            "2024-01-15 10:30:00",
            "Multiple users report that the bot gives incorrect information about return policies",
        ),
        issue(
            "ISS-002",
            "Widget not loading on mobile",
            "technical",
            TicketSeverity::Critical,
            TicketStatus::InProgress,
            "Anonymous User #1234",
            Some("Mike Chen"),
            "2024-01-15 09:15:00",
            "Chat widget fails to load on iOS Safari browsers",
        ),
        issue(
            "ISS-003",
            "Slow response times during peak hours",
            "performance",
            TicketSeverity::Medium,
            TicketStatus::Resolved,
            "support@company.com",
            Some("Alex Rodriguez"),
            "2024-01-14 16:45:00",
            "Bot responses take longer than 5 seconds during high traffic periods",
        ),
        issue(
            "ISS-004",
            "Inappropriate response to customer complaint",
            "content",
            TicketSeverity::High,
            TicketStatus::Open,
            "maria@example.com",
            None,
            "2024-01-14 14:20:00",
            "Bot provided insensitive response to customer complaint about damaged product",
        ),
    ]
}

// =============================================================================
// CONVERSATIONS
// =============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct TranscriptLine {
    pub role: String,
    pub content: String,
    pub timestamp: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Conversation {
    pub id: String,
    pub visitor: String,
    pub start_time: String,
    pub duration: String,
    pub messages: u32,
    pub status: ConversationStatus,
    pub satisfaction: Option<u8>,
    pub location: String,
    pub transcript: Vec<TranscriptLine>,
}

impl Record for Conversation {
    const NOUN: &'static str = "conversations";
    const SEARCH_FIELDS: &'static [Field<Self>] = &[|c| c.visitor.as_str(), |c| c.location.as_str(), |c| c.id.as_str()];
    const CATEGORIES: &'static [(&'static str, Field<Self>)] = &[("status", |c| c.status.as_str())];
}

fn transcript(lines: &[(&str, &str, &str)]) -> Vec<TranscriptLine> {
    lines
        .iter()
        .map(|(role, content, timestamp)| TranscriptLine {
            role: (*role).into(),
            content: (*content).into(),
            timestamp: (*timestamp).into(),
        })
        .collect()
}

pub(super) fn conversations() -> Vec<Conversation> {
    vec![
        Conversation {
            id: "1".into(),
            visitor: "Anonymous User #1234".into(),
            start_time: "2024-01-15 10:30:00".into(),
            duration: "5m 30s".into(),
            messages: 12,
            status: ConversationStatus::Completed,
            satisfaction: Some(4),
            location: "United States".into(),
            transcript: transcript(&[
                ("user", "Hi, I need help with my order", "10:30:00"),
                ("bot", "I'd be happy to help you with your order! Could you please provide your order number?", "10:30:05"),
                ("user", "It's #12345", "10:30:30"),
                ("bot", "Thank you! I found your order. It was shipped yesterday and should arrive tomorrow.", "10:30:35"),
            ]),
        },
        Conversation {
            id: "2".into(),
            visitor: "john@example.com".into(),
            start_time: "2024-01-15 09:15:00".into(),
            duration: "8m 45s".into(),
            messages: 18,
            status: ConversationStatus::Escalated,
            satisfaction: None,
            location: "Canada".into(),
            transcript: transcript(&[
                ("user", "I want to return a product", "09:15:00"),
                ("bot", "I can help you with returns. What product would you like to return?", "09:15:05"),
                ("user", "The blue sweater I ordered last week", "09:15:20"),
                (
                    "bot",
                    "I found your order. You can return it within 30 days. Would you like me to generate a return label?",
                    "09:15:25",
                ),
            ]),
        },
        Conversation {
            id: "3".into(),
            visitor: "Anonymous User #5678".into(),
            start_time: "2024-01-15 08:45:00".into(),
            duration: "2m 15s".into(),
            messages: 6,
            status: ConversationStatus::Abandoned,
            satisfaction: None,
            location: "United Kingdom".into(),
            transcript: transcript(&[
                ("user", "Hello", "08:45:00"),
                ("bot", "Hi! How can I help you today?", "08:45:02"),
                ("user", "What are your hours?", "08:45:30"),
                ("bot", "We're open Monday-Friday 9AM-5PM EST. Is there anything else I can help you with?", "08:45:32"),
            ]),
        },
    ]
}

// =============================================================================
// BOT SETTINGS
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum KnowledgeStatus {
    Processed,
    Processing,
}

#[derive(Debug, Clone, Serialize)]
pub struct KnowledgeFile {
    pub id: u32,
    pub name: String,
    pub size: String,
    pub uploaded: String,
    pub status: KnowledgeStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DomainStatus {
    Verified,
    Pending,
}

#[derive(Debug, Clone, Serialize)]
pub struct DomainBinding {
    pub domain: String,
    pub status: DomainStatus,
    pub added: String,
}

pub(super) fn knowledge_files() -> Vec<KnowledgeFile> {
    let file = |id, name: &str, size: &str, uploaded: &str, status| KnowledgeFile {
        id,
        name: name.into(),
        size: size.into(),
        uploaded: uploaded.into(),
        status,
    };
    vec![
        file(1, "product_catalog.pdf", "2.3 MB", "2024-01-15", KnowledgeStatus::Processed),
        file(2, "faq_support.docx", "856 KB", "2024-01-14", KnowledgeStatus::Processing),
        file(3, "company_policies.txt", "124 KB", "2024-01-10", KnowledgeStatus::Processed),
        file(4, "pricing_info.csv", "45 KB", "2024-01-08", KnowledgeStatus::Processed),
    ]
}

pub(super) fn domain_bindings() -> Vec<DomainBinding> {
    vec![
        DomainBinding { domain: "yoursite.com".into(), status: DomainStatus::Verified, added: "2024-01-15".into() },
        DomainBinding { domain: "blog.yoursite.com".into(), status: DomainStatus::Pending, added: "2024-01-16".into() },
    ]
}
