use super::*;
use crate::config::ActionDelays;
use crate::notify::Notifier;
use crate::services::action::{ActionStatus, ROOT_SCOPE};

fn setup() -> (ChatService, ActionRunner) {
    (ChatService::default(), ActionRunner::new(Notifier::new(), ActionDelays::default()))
}

async fn advance(ms: u64) {
    tokio::time::sleep(Duration::from_millis(ms)).await;
}

// =============================================================================
// WIDGET CHAT
// =============================================================================

#[test]
fn new_chat_has_greeting() {
    let (chats, _) = setup();
    let chat = chats.open_chat();
    assert_eq!(chat.messages.len(), 1);
    assert_eq!(chat.messages[0].sender, Sender::Bot);
    assert_eq!(chat.messages[0].content, WIDGET_GREETING);
    assert!(!chat.typing);
}

#[tokio::test(start_paused = true)]
async fn blank_message_is_noop() {
    let (chats, runner) = setup();
    let chat = chats.open_chat();
    let sent = chats.send(&runner, ROOT_SCOPE, chat.id, "   ").unwrap();
    assert!(sent.reply.is_none());
    assert_eq!(sent.conversation.messages.len(), 1);
    assert!(!sent.conversation.typing);
}

#[tokio::test(start_paused = true)]
async fn reply_arrives_after_delay() {
    let (chats, runner) = setup();
    let chat = chats.open_chat();
    let sent = chats.send(&runner, ROOT_SCOPE, chat.id, "  where is my order?  ").unwrap();
    assert!(sent.conversation.typing);
    assert_eq!(sent.conversation.messages[1].content, "where is my order?");
    assert_eq!(sent.conversation.messages[1].sender, Sender::User);

    advance(1499).await;
    assert_eq!(chats.chat(chat.id).unwrap().messages.len(), 2);

    advance(2).await;
    let chat = chats.chat(chat.id).unwrap();
    assert_eq!(chat.messages.len(), 3);
    assert!(!chat.typing);
    assert_eq!(chat.messages[2].sender, Sender::Bot);
    assert!(CANNED_REPLIES.contains(&chat.messages[2].content.as_str()));
    assert_eq!(runner.get(sent.reply.unwrap().id).unwrap().status, ActionStatus::Succeeded);
}

#[tokio::test(start_paused = true)]
async fn closed_view_gets_no_late_reply() {
    let (chats, runner) = setup();
    let chat = chats.open_chat();
    let scope = runner.open_scope();
    chats.send(&runner, scope, chat.id, "hello").unwrap();
    advance(100).await;
    assert_eq!(runner.close_scope(scope), Some(1));
    assert!(!chats.chat(chat.id).unwrap().typing);

    advance(3000).await;
    let chat = chats.chat(chat.id).unwrap();
    assert_eq!(chat.messages.len(), 2);
    assert!(!chat.typing);
}

#[tokio::test]
async fn send_on_closed_scope_clears_typing() {
    let (chats, runner) = setup();
    let chat = chats.open_chat();
    let scope = runner.open_scope();
    runner.close_scope(scope);
    let sent = chats.send(&runner, scope, chat.id, "hello").unwrap();
    assert!(sent.reply.is_none());
    assert!(!chats.chat(chat.id).unwrap().typing);
}

#[test]
fn unknown_chat_is_none() {
    let (chats, runner) = setup();
    assert!(chats.send(&runner, ROOT_SCOPE, Uuid::new_v4(), "hi").is_none());
    assert!(chats.end_chat(Uuid::new_v4()).is_none());
}

#[test]
fn ending_chat_requests_csat() {
    let (chats, _) = setup();
    let chat = chats.open_chat();
    let ended = chats.end_chat(chat.id).unwrap();
    assert!(ended.ended);
    assert!(ended.csat_requested);
}

#[tokio::test(start_paused = true)]
async fn ended_chat_ignores_messages() {
    let (chats, runner) = setup();
    let chat = chats.open_chat();
    chats.end_chat(chat.id).unwrap();
    let sent = chats.send(&runner, ROOT_SCOPE, chat.id, "anyone there?").unwrap();
    assert!(sent.reply.is_none());
    assert_eq!(sent.conversation.messages.len(), 1);
    assert!(!sent.conversation.typing);

    advance(3000).await;
    assert_eq!(chats.chat(chat.id).unwrap().messages.len(), 1);
}

#[test]
fn oldest_chat_is_forgotten_past_limit() {
    let (chats, _) = setup();
    let first = chats.open_chat();
    for _ in 0..MAX_CHATS {
        chats.open_chat();
    }
    assert!(chats.chat(first.id).is_none());
    assert_eq!(lock(&chats.chats).len(), MAX_CHATS);
}

#[tokio::test]
async fn transcript_toast_is_immediate() {
    let (chats, runner) = setup();
    let chat = chats.open_chat();
    let action = chats.send_transcript(&runner, ROOT_SCOPE, chat.id).unwrap().unwrap();
    assert_eq!(action.status, ActionStatus::Succeeded);
    assert_eq!(runner.notifier().drain()[0].title, "Transcript Sent");
}

// =============================================================================
// PLAYGROUND
// =============================================================================

#[test]
fn playground_starts_scripted() {
    let (chats, _) = setup();
    let pg = chats.playground("1");
    assert_eq!(pg.messages.len(), 3);
    assert!(pg.session_memory);
    assert!(pg.streaming);
    assert!(!pg.show_thinking);
    assert!(pg.messages.iter().all(|m| m.thinking.is_none()));
}

#[test]
fn reading_playground_stores_nothing() {
    let (chats, _) = setup();
    let _ = chats.playground("any-bot");
    let _ = chats.playground_transcript("any-bot");
    assert!(lock(&chats.playgrounds).is_empty());
}

#[test]
fn playgrounds_are_capped() {
    let (chats, _) = setup();
    for i in 0..=MAX_PLAYGROUNDS {
        chats.clear_playground(&format!("bot-{i}"));
    }
    let playgrounds = lock(&chats.playgrounds);
    assert_eq!(playgrounds.len(), MAX_PLAYGROUNDS);
    assert!(!playgrounds.contains_key("bot-0"));
}

#[tokio::test(start_paused = true)]
async fn closed_view_stops_playground_typing() {
    let (chats, runner) = setup();
    let scope = runner.open_scope();
    let sent = chats.playground_send(&runner, scope, "1", "refund please");
    assert!(sent.conversation.typing);

    advance(100).await;
    runner.close_scope(scope);
    advance(3000).await;
    let pg = chats.playground("1");
    assert!(!pg.typing);
    assert_eq!(pg.messages.len(), 4);
}

#[test]
fn show_thinking_reveals_reasoning() {
    let (chats, _) = setup();
    let pg = chats.set_playground_flags("1", PlaygroundFlags { show_thinking: Some(true), ..PlaygroundFlags::default() });
    assert!(pg.messages[0].thinking.is_some());
    assert!(pg.messages[1].thinking.is_none());
}

#[tokio::test(start_paused = true)]
async fn streaming_reply_takes_longer() {
    let (chats, runner) = setup();
    chats.playground_send(&runner, ROOT_SCOPE, "1", "refund please");
    advance(501).await;
    assert_eq!(chats.playground("1").messages.len(), 4);
    advance(1000).await;
    assert_eq!(chats.playground("1").messages.len(), 5);

    chats.set_playground_flags("2", PlaygroundFlags { streaming: Some(false), ..PlaygroundFlags::default() });
    chats.playground_send(&runner, ROOT_SCOPE, "2", "refund please");
    advance(501).await;
    let pg = chats.playground("2");
    assert_eq!(pg.messages.len(), 5);
    assert!(!pg.typing);
}

#[test]
fn playground_blank_is_noop() {
    let (chats, runner) = setup();
    let sent = chats.playground_send(&runner, ROOT_SCOPE, "1", "");
    assert!(sent.reply.is_none());
    assert_eq!(sent.conversation.messages.len(), 3);
}

#[test]
fn clear_resets_to_greeting() {
    let (chats, _) = setup();
    let pg = chats.clear_playground("1");
    assert_eq!(pg.messages.len(), 1);
    assert_eq!(pg.messages[0].sender, Sender::Bot);
}

#[test]
fn transcript_format() {
    let (chats, _) = setup();
    chats.clear_playground("7");
    assert_eq!(
        chats.playground_transcript("7"),
        "BOT: Hello! I'm your customer support bot. How can I help you today?"
    );

    let text = chats.playground_transcript("8");
    let blocks: Vec<&str> = text.split("\n\n").collect();
    assert_eq!(blocks.len(), 3);
    assert!(blocks[1].starts_with("USER: "));
}

// =============================================================================
// SETTINGS
// =============================================================================

#[test]
fn settings_defaults() {
    let (chats, _) = setup();
    let settings = chats.settings();
    assert_eq!(settings.bot_name, "AI Assistant");
    assert_eq!(settings.primary_color, "#6366f1");
    assert_eq!(settings.position, "bottom-right");
    assert!(settings.enable_handover && settings.enable_issue_report && settings.enable_csat);
}

#[test]
fn save_settings_toasts() {
    let (chats, runner) = setup();
    let saved = chats.save_settings(&runner, WidgetSettings { bot_name: "Helper".into(), ..WidgetSettings::default() });
    assert_eq!(saved.bot_name, "Helper");
    assert_eq!(chats.settings().bot_name, "Helper");
    assert_eq!(runner.notifier().drain()[0].title, "Settings Saved");
}

#[test]
fn embed_code_carries_bot_id_and_placeholder_key() {
    let code = WidgetSettings::default().embed_code("bot-42");
    assert!(code.contains(r#"data-bot-id="bot-42""#));
    assert!(code.contains(r#"apiKey: "your-api-key""#));
    assert!(code.contains("handover: true"));
}
