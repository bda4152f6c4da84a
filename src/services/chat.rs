//! Chat widget demo, bot playground and widget settings.
//!
//! DESIGN
//! ======
//! Neither conversation talks to a model. Sending a message appends it,
//! raises the typing flag and starts a `GenerateReply` action; when the
//! timer fires the completion appends a canned reply (a random pick for
//! the widget, a fixed line for the playground) and clears the flag. If the
//! view scope closes first, the reply's cancel hook clears the flag instead.
//! An ended widget chat takes no further messages.
//!
//! Conversation state sits behind `std::sync::Mutex` because completion
//! closures run synchronously on the timer task. Both stores are capped;
//! the oldest conversation is forgotten first. Reading a playground that
//! was never touched returns the seeded conversation without storing it.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::clock;
use crate::notify::Notification;
use crate::services::action::{ActionError, ActionKind, ActionRecord, ActionRunner, Outcome, Schedule};
use crate::services::bounded::BoundedMap;

pub const WIDGET_GREETING: &str =
    "Hi there! 👋 I'm here to help you with any questions. How can I assist you today?";

pub const CANNED_REPLIES: [&str; 4] = [
    "That's a great question! Let me help you with that. Based on what you've asked, here are a few things to consider...",
    "I understand what you're looking for. Here's what I can tell you about that topic...",
    "Thanks for reaching out! I'd be happy to help you solve this. Let me walk you through the solution...",
    "That's something I can definitely assist with. Here's the information you need...",
];

pub const MAX_CHATS: usize = 256;

pub const MAX_PLAYGROUNDS: usize = 64;

const PLAYGROUND_GREETING: &str = "Hello! I'm your customer support bot. How can I help you today?";
const PLAYGROUND_REPLY: &str = "I understand your concern. Let me help you with that right away. Based on your query, here's what I can suggest...";
const PLAYGROUND_REPLY_THINKING: &str =
    "User provided additional context. Analyzing the query and providing relevant solution.";

// =============================================================================
// MESSAGES
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Bot,
}

impl Sender {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::User => "USER",
            Self::Bot => "BOT",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatMessage {
    pub id: u32,
    pub sender: Sender,
    pub content: String,
    pub timestamp: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thinking: Option<String>,
}

impl ChatMessage {
    fn new(id: usize, sender: Sender, content: impl Into<String>) -> Self {
        Self {
            id: u32::try_from(id).unwrap_or(u32::MAX),
            sender,
            content: content.into(),
            timestamp: clock::timestamp(),
            thinking: None,
        }
    }

    fn thinking(mut self, thinking: &str) -> Self {
        self.thinking = Some(thinking.to_owned());
        self
    }
}

/// `TYPE: message` blocks separated by a blank line.
#[must_use]
pub fn transcript(messages: &[ChatMessage]) -> String {
    messages
        .iter()
        .map(|m| format!("{}: {}", m.sender.label(), m.content))
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn pick_reply() -> &'static str {
    let idx = rand::rng().random_range(0..CANNED_REPLIES.len());
    CANNED_REPLIES[idx]
}

// =============================================================================
// WIDGET CHAT
// =============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct WidgetChat {
    pub id: Uuid,
    pub messages: Vec<ChatMessage>,
    pub typing: bool,
    pub ended: bool,
    /// Set when the chat ends; the client shows the CSAT prompt.
    pub csat_requested: bool,
}

impl WidgetChat {
    fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            messages: vec![ChatMessage::new(1, Sender::Bot, WIDGET_GREETING)],
            typing: false,
            ended: false,
            csat_requested: false,
        }
    }

    fn push(&mut self, sender: Sender, content: &str) {
        let next = self.messages.len() + 1;
        self.messages.push(ChatMessage::new(next, sender, content));
    }
}

/// Result of sending a message: the conversation after the user's message
/// landed, plus the pending reply action when one was started.
#[derive(Debug, Clone, Serialize)]
pub struct Sent<T> {
    pub conversation: T,
    pub reply: Option<ActionRecord>,
}

// =============================================================================
// PLAYGROUND
// =============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct Playground {
    pub bot_id: String,
    pub messages: Vec<ChatMessage>,
    pub session_memory: bool,
    pub streaming: bool,
    pub show_thinking: bool,
    pub typing: bool,
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct PlaygroundFlags {
    pub session_memory: Option<bool>,
    pub streaming: Option<bool>,
    pub show_thinking: Option<bool>,
}

impl Playground {
    fn new(bot_id: &str) -> Self {
        let messages = vec![
            ChatMessage::new(1, Sender::Bot, PLAYGROUND_GREETING)
                .thinking("User just connected. Showing friendly greeting and offering help."),
            ChatMessage::new(2, Sender::User, "I'm having trouble with my recent order"),
            ChatMessage::new(
                3,
                Sender::Bot,
                "I'd be happy to help you with your order! To better assist you, could you please provide your order number or the email address associated with your account?",
            )
            .thinking("User mentioned order issue. Need to gather order details to provide specific help. Asking for order number or email to identify the order."),
        ];
        Self { bot_id: bot_id.to_owned(), messages, session_memory: true, streaming: true, show_thinking: false, typing: false }
    }

    fn clear(&mut self) {
        self.messages =
            vec![ChatMessage::new(1, Sender::Bot, PLAYGROUND_GREETING).thinking("Conversation reset. Showing fresh greeting.")];
        self.typing = false;
    }

    fn reply_delay(&self, runner: &ActionRunner) -> Duration {
        let delays = runner.delays();
        if self.streaming { delays.chat_reply } else { delays.playground_fast }
    }

    /// Copy for the client; reasoning is hidden unless `show_thinking`.
    #[must_use]
    pub fn view(&self) -> Self {
        let mut view = self.clone();
        if !view.show_thinking {
            for message in &mut view.messages {
                message.thinking = None;
            }
        }
        view
    }
}

// =============================================================================
// WIDGET SETTINGS
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WidgetSettings {
    pub api_key: String,
    pub welcome_message: String,
    pub bot_name: String,
    pub primary_color: String,
    pub position: String,
    pub enable_handover: bool,
    pub enable_issue_report: bool,
    pub enable_csat: bool,
}

impl Default for WidgetSettings {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            welcome_message: "Hi there! 👋 How can I help you today?".into(),
            bot_name: "AI Assistant".into(),
            primary_color: "#6366f1".into(),
            position: "bottom-right".into(),
            enable_handover: true,
            enable_issue_report: true,
            enable_csat: true,
        }
    }
}

impl WidgetSettings {
    /// Embed snippet shown for copy/paste. Documentation only; nothing
    /// serves `embed.js`.
    #[must_use]
    pub fn embed_code(&self, bot_id: &str) -> String {
        let api_key = if self.api_key.is_empty() { "your-api-key" } else { &self.api_key };
        format!(
            r#"<!-- Chatbot Widget -->
<script>
  window.chatbotConfig = {{
    apiKey: "{api_key}",
    botName: "{}",
    welcomeMessage: "{}",
    primaryColor: "{}",
    position: "{}",
    features: {{
      handover: {},
      issueReport: {},
      csat: {}
    }}
  }};
</script>
<script src="https://widget.yourapp.com/embed.js" data-bot-id="{bot_id}"></script>"#,
            self.bot_name,
            self.welcome_message,
            self.primary_color,
            self.position,
            self.enable_handover,
            self.enable_issue_report,
            self.enable_csat,
        )
    }
}

// =============================================================================
// SERVICE
// =============================================================================

#[derive(Clone)]
pub struct ChatService {
    chats: Arc<Mutex<BoundedMap<Uuid, WidgetChat>>>,
    playgrounds: Arc<Mutex<BoundedMap<String, Playground>>>,
    settings: Arc<Mutex<WidgetSettings>>,
}

impl Default for ChatService {
    fn default() -> Self {
        Self {
            chats: Arc::new(Mutex::new(BoundedMap::new(MAX_CHATS))),
            playgrounds: Arc::new(Mutex::new(BoundedMap::new(MAX_PLAYGROUNDS))),
            settings: Arc::new(Mutex::new(WidgetSettings::default())),
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl ChatService {
    // -------------------------------------------------------------------------
    // Widget chat
    // -------------------------------------------------------------------------

    #[must_use]
    pub fn open_chat(&self) -> WidgetChat {
        let chat = WidgetChat::new();
        let evicted = lock(&self.chats).insert(chat.id, chat.clone());
        for (old, _) in evicted {
            debug!(chat = %old, "oldest widget chat forgotten");
        }
        debug!(chat = %chat.id, "widget chat opened");
        chat
    }

    #[must_use]
    pub fn chat(&self, id: Uuid) -> Option<WidgetChat> {
        lock(&self.chats).get(&id).cloned()
    }

    /// Append the visitor's message and schedule a canned reply. A blank
    /// message, or any message to an ended chat, changes nothing. `None` if
    /// the chat does not exist.
    pub fn send(&self, runner: &ActionRunner, scope: Uuid, id: Uuid, content: &str) -> Option<Sent<WidgetChat>> {
        let content = content.trim();
        let conversation = {
            let mut chats = lock(&self.chats);
            let chat = chats.get_mut(&id)?;
            if content.is_empty() || chat.ended {
                return Some(Sent { conversation: chat.clone(), reply: None });
            }
            chat.push(Sender::User, content);
            chat.typing = true;
            chat.clone()
        };

        let chats = Arc::clone(&self.chats);
        let service = self.clone();
        let schedule = ActionKind::GenerateReply.schedule(runner.delays());
        let reply = runner.start_guarded(
            scope,
            ActionKind::GenerateReply,
            Some(id.to_string()),
            schedule,
            move || {
                if let Some(chat) = lock(&chats).get_mut(&id) {
                    chat.push(Sender::Bot, pick_reply());
                    chat.typing = false;
                }
                Outcome::silent()
            },
            move || service.stop_typing(id),
        );
        let reply = match reply {
            Ok(record) => Some(record),
            Err(e) => {
                debug!(error = %e, chat = %id, "reply not scheduled");
                self.stop_typing(id);
                None
            }
        };
        Some(Sent { conversation, reply })
    }

    fn stop_typing(&self, id: Uuid) {
        if let Some(chat) = lock(&self.chats).get_mut(&id) {
            chat.typing = false;
        }
    }

    /// End the chat and ask for a rating.
    pub fn end_chat(&self, id: Uuid) -> Option<WidgetChat> {
        let mut chats = lock(&self.chats);
        let chat = chats.get_mut(&id)?;
        chat.ended = true;
        chat.csat_requested = true;
        Some(chat.clone())
    }

    /// Pretend to email the transcript. `None` if the chat does not exist.
    pub fn send_transcript(
        &self,
        runner: &ActionRunner,
        scope: Uuid,
        id: Uuid,
    ) -> Option<Result<ActionRecord, ActionError>> {
        if !lock(&self.chats).contains_key(&id) {
            return None;
        }
        Some(runner.start(scope, ActionKind::SendTranscript, Some(id.to_string()), || {
            Outcome::succeeded(Notification::new(
                "Transcript Sent",
                "Chat transcript has been sent to your email address.",
            ))
        }))
    }

    // -------------------------------------------------------------------------
    // Playground
    // -------------------------------------------------------------------------

    /// The playground for `bot_id`; the seeded conversation if it was never
    /// touched.
    #[must_use]
    pub fn playground(&self, bot_id: &str) -> Playground {
        lock(&self.playgrounds).get(bot_id).map_or_else(|| Playground::new(bot_id).view(), Playground::view)
    }

    fn stop_playground_typing(&self, bot_id: &str) {
        if let Some(playground) = lock(&self.playgrounds).get_mut(bot_id) {
            playground.typing = false;
        }
    }

    pub fn playground_send(&self, runner: &ActionRunner, scope: Uuid, bot_id: &str, content: &str) -> Sent<Playground> {
        let content = content.trim();
        let (conversation, delay) = {
            let mut playgrounds = lock(&self.playgrounds);
            let playground = playgrounds.get_or_insert_with(bot_id.to_owned(), || Playground::new(bot_id));
            if content.is_empty() {
                return Sent { conversation: playground.view(), reply: None };
            }
            let next = playground.messages.len() + 1;
            playground.messages.push(ChatMessage::new(next, Sender::User, content));
            playground.typing = true;
            (playground.view(), playground.reply_delay(runner))
        };

        let playgrounds = Arc::clone(&self.playgrounds);
        let service = self.clone();
        let (key, hook_key) = (bot_id.to_owned(), bot_id.to_owned());
        let reply = runner.start_guarded(
            scope,
            ActionKind::GenerateReply,
            Some(bot_id.to_owned()),
            Schedule::Once(delay),
            move || {
                if let Some(playground) = lock(&playgrounds).get_mut(&key) {
                    let next = playground.messages.len() + 1;
                    playground
                        .messages
                        .push(ChatMessage::new(next, Sender::Bot, PLAYGROUND_REPLY).thinking(PLAYGROUND_REPLY_THINKING));
                    playground.typing = false;
                }
                Outcome::silent()
            },
            move || service.stop_playground_typing(&hook_key),
        );
        let reply = match reply {
            Ok(record) => Some(record),
            Err(e) => {
                debug!(error = %e, bot = bot_id, "playground reply not scheduled");
                self.stop_playground_typing(bot_id);
                None
            }
        };
        Sent { conversation, reply }
    }

    pub fn set_playground_flags(&self, bot_id: &str, flags: PlaygroundFlags) -> Playground {
        let mut playgrounds = lock(&self.playgrounds);
        let playground = playgrounds.get_or_insert_with(bot_id.to_owned(), || Playground::new(bot_id));
        if let Some(v) = flags.session_memory {
            playground.session_memory = v;
        }
        if let Some(v) = flags.streaming {
            playground.streaming = v;
        }
        if let Some(v) = flags.show_thinking {
            playground.show_thinking = v;
        }
        playground.view()
    }

    pub fn clear_playground(&self, bot_id: &str) -> Playground {
        let mut playgrounds = lock(&self.playgrounds);
        let playground = playgrounds.get_or_insert_with(bot_id.to_owned(), || Playground::new(bot_id));
        playground.clear();
        playground.view()
    }

    #[must_use]
    pub fn playground_transcript(&self, bot_id: &str) -> String {
        match lock(&self.playgrounds).get(bot_id) {
            Some(playground) => transcript(&playground.messages),
            None => transcript(&Playground::new(bot_id).messages),
        }
    }

    // -------------------------------------------------------------------------
    // Settings
    // -------------------------------------------------------------------------

    #[must_use]
    pub fn settings(&self) -> WidgetSettings {
        lock(&self.settings).clone()
    }

    /// Replace the widget settings and toast, as the settings page's save
    /// button does.
    pub fn save_settings(&self, runner: &ActionRunner, settings: WidgetSettings) -> WidgetSettings {
        *lock(&self.settings) = settings.clone();
        runner
            .notifier()
            .push(Notification::new("Settings Saved", "Your widget configuration has been updated."));
        settings
    }
}

#[cfg(test)]
#[path = "chat_test.rs"]
mod tests;
