//! Bot analytics: headline cards and the four chart series.
//!
//! The same week of data backs every bot and every range; the range is
//! echoed back so the client can label its selector.

use serde::{Deserialize, Serialize};

use super::admin::Metric;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnalyticsRange {
    #[serde(rename = "24h")]
    Day,
    #[default]
    #[serde(rename = "7d")]
    Week,
    #[serde(rename = "30d")]
    Month,
    #[serde(rename = "90d")]
    Quarter,
}

impl AnalyticsRange {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Day => "Last 24h",
            Self::Week => "Last 7 days",
            Self::Month => "Last 30 days",
            Self::Quarter => "Last 90 days",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DailyVolume {
    pub date: String,
    pub conversations: u32,
    pub messages: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct RatingShare {
    pub rating: String,
    pub count: u32,
    pub percentage: u8,
}

#[derive(Debug, Clone, Serialize)]
pub struct LanguageShare {
    pub name: String,
    pub value: u8,
    pub color: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct TopQuestion {
    pub question: String,
    pub count: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct Analytics {
    pub metrics: Vec<Metric>,
    pub conversations: Vec<DailyVolume>,
    pub satisfaction: Vec<RatingShare>,
    pub languages: Vec<LanguageShare>,
    pub top_questions: Vec<TopQuestion>,
}

pub(super) fn analytics() -> Analytics {
    let day = |date: &str, conversations, messages| DailyVolume { date: date.into(), conversations, messages };
    let rating = |rating: &str, count, percentage| RatingShare { rating: rating.into(), count, percentage };
    let language = |name: &str, value, color: &str| LanguageShare { name: name.into(), value, color: color.into() };
    let question = |question: &str, count| TopQuestion { question: question.into(), count };

    Analytics {
        metrics: vec![
            Metric::new("Total Conversations", "1,247", "+15.3%"),
            Metric::new("Unique Visitors", "934", "+8.7%"),
            Metric::new("Avg Response Time", "2.3s", "+0.2s"),
            Metric::new("Satisfaction Score", "4.6", "+0.3"),
        ],
        conversations: vec![
            day("Jan 01", 45, 234),
            day("Jan 02", 52, 287),
            day("Jan 03", 48, 251),
            day("Jan 04", 61, 334),
            day("Jan 05", 55, 298),
            day("Jan 06", 67, 378),
            day("Jan 07", 59, 321),
        ],
        satisfaction: vec![
            rating("5 Stars", 45, 35),
            rating("4 Stars", 38, 30),
            rating("3 Stars", 25, 20),
            rating("2 Stars", 13, 10),
            rating("1 Star", 6, 5),
        ],
        languages: vec![
            language("English", 68, "#6366f1"),
            language("Spanish", 18, "#8b5cf6"),
            language("French", 8, "#06b6d4"),
            language("German", 4, "#10b981"),
            language("Other", 2, "#f59e0b"),
        ],
        top_questions: vec![
            question("What are your business hours?", 145),
            question("How do I return a product?", 132),
            question("What payment methods do you accept?", 98),
            question("How can I track my order?", 87),
            question("Do you offer international shipping?", 76),
        ],
    }
}
