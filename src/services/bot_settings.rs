//! Per-bot settings page.
//!
//! Most fields are the page's fixed defaults. Only the CSAT survey, human
//! handover and auto-resume switches hold state, and only in memory. Like
//! the playground, any bot id works, reading never stores anything, and
//! the store forgets the oldest bot past `MAX_BOT_SETTINGS`.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::services::bounded::BoundedMap;

pub const MAX_BOT_SETTINGS: usize = 64;

#[derive(Debug, Clone, Serialize)]
pub struct BotSettings {
    pub bot_id: String,
    pub name: String,
    pub language: String,
    pub tone: String,
    pub welcome_message: String,
    pub fallback_response: String,
    pub max_messages_per_session: u32,
    pub csat_enabled: bool,
    pub handover_enabled: bool,
    pub handover_message: String,
    pub auto_resume: bool,
    pub resume_after_minutes: u32,
    pub resume_message: String,
    pub conversation_retention: String,
    pub api_key: String,
}

impl BotSettings {
    fn new(bot_id: &str) -> Self {
        Self {
            bot_id: bot_id.to_owned(),
            name: "Customer Support Bot".into(),
            language: "en".into(),
            tone: "professional".into(),
            welcome_message: "Hello! I'm here to help you with any questions you might have. How can I assist you today?"
                .into(),
            fallback_response: "I'm sorry, I didn't quite understand that. Could you please rephrase your question or try asking something else?".into(),
            max_messages_per_session: 50,
            csat_enabled: true,
            handover_enabled: false,
            handover_message:
                "I'm connecting you with a human agent who can better assist you. Please wait a moment...".into(),
            auto_resume: true,
            resume_after_minutes: 10,
            resume_message:
                "I'm back to help you! Our agent is currently busy, but I can continue assisting you.".into(),
            conversation_retention: "90-days".into(),
            api_key: "sk_live_***************************".into(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct BotSettingsFlags {
    pub csat_enabled: Option<bool>,
    pub handover_enabled: Option<bool>,
    pub auto_resume: Option<bool>,
}

#[derive(Clone)]
pub struct BotSettingsStore {
    bots: Arc<Mutex<BoundedMap<String, BotSettings>>>,
}

impl Default for BotSettingsStore {
    fn default() -> Self {
        Self { bots: Arc::new(Mutex::new(BoundedMap::new(MAX_BOT_SETTINGS))) }
    }
}

impl BotSettingsStore {
    fn lock(&self) -> MutexGuard<'_, BoundedMap<String, BotSettings>> {
        self.bots.lock().unwrap_or_else(PoisonError::into_inner)
    }

    #[must_use]
    pub fn get(&self, bot_id: &str) -> BotSettings {
        self.lock().get(bot_id).cloned().unwrap_or_else(|| BotSettings::new(bot_id))
    }

    pub fn set_flags(&self, bot_id: &str, flags: BotSettingsFlags) -> BotSettings {
        let mut bots = self.lock();
        let settings = bots.get_or_insert_with(bot_id.to_owned(), || BotSettings::new(bot_id));
        if let Some(v) = flags.csat_enabled {
            settings.csat_enabled = v;
        }
        if let Some(v) = flags.handover_enabled {
            settings.handover_enabled = v;
        }
        if let Some(v) = flags.auto_resume {
            settings.auto_resume = v;
        }
        debug!(
            bot = bot_id,
            csat = settings.csat_enabled,
            handover = settings.handover_enabled,
            auto_resume = settings.auto_resume,
            "bot settings updated"
        );
        settings.clone()
    }
}

#[cfg(test)]
#[path = "bot_settings_test.rs"]
mod tests;
