use std::time::Duration;

use super::*;
use crate::config::ActionDelays;
use crate::notify::Variant;
use crate::services::action::{ActionStatus, ROOT_SCOPE};

fn setup() -> (WordPressPlugin, ActionRunner) {
    (WordPressPlugin::default(), ActionRunner::new(Notifier::new(), ActionDelays::default()))
}

async fn advance(ms: u64) {
    tokio::time::sleep(Duration::from_millis(ms)).await;
}

fn with_token(plugin: &WordPressPlugin, token: &str) {
    plugin.update_settings(SettingsPatch { auth_token: Some(token.into()), ..SettingsPatch::default() });
}

// =============================================================================
// SETTINGS
// =============================================================================

#[test]
fn settings_defaults() {
    let (plugin, _) = setup();
    let settings = plugin.settings();
    assert!(settings.local_cache);
    assert!(!settings.offline_fallback);
    assert_eq!(settings.token_status, TokenStatus::Idle);
}

#[test]
fn validate_without_token_toasts_and_starts_nothing() {
    let (plugin, runner) = setup();
    let err = plugin.validate(&runner, ROOT_SCOPE).unwrap_err();
    assert!(matches!(err, WordPressError::MissingToken));
    assert!(!plugin.settings().validating);

    let toasts = runner.notifier().drain();
    assert_eq!(toasts.len(), 1);
    assert_eq!(toasts[0].title, "Missing Token");
    assert_eq!(toasts[0].variant, Variant::Destructive);
}

#[tokio::test(start_paused = true)]
async fn long_token_validates_after_delay() {
    let (plugin, runner) = setup();
    with_token(&plugin, "cb_live_abcdefghij");
    let action = plugin.validate(&runner, ROOT_SCOPE).unwrap();
    assert!(plugin.settings().validating);

    advance(1499).await;
    assert_eq!(plugin.settings().token_status, TokenStatus::Idle);

    advance(2).await;
    let settings = plugin.settings();
    assert_eq!(settings.token_status, TokenStatus::Valid);
    assert!(!settings.validating);
    assert_eq!(runner.get(action.id).unwrap().status, ActionStatus::Succeeded);
    assert_eq!(runner.notifier().drain()[0].title, "Token Valid!");
}

#[tokio::test(start_paused = true)]
async fn ten_char_token_is_invalid() {
    let (plugin, runner) = setup();
    with_token(&plugin, "0123456789");
    let action = plugin.validate(&runner, ROOT_SCOPE).unwrap();

    advance(1501).await;
    assert_eq!(plugin.settings().token_status, TokenStatus::Invalid);
    assert_eq!(runner.get(action.id).unwrap().status, ActionStatus::Failed);
    let toast = &runner.notifier().drain()[0];
    assert_eq!(toast.title, "Token Invalid");
    assert_eq!(toast.variant, Variant::Destructive);
}

#[tokio::test(start_paused = true)]
async fn changing_token_resets_status() {
    let (plugin, runner) = setup();
    with_token(&plugin, "cb_live_abcdefghij");
    plugin.validate(&runner, ROOT_SCOPE).unwrap();
    advance(1501).await;
    assert_eq!(plugin.settings().token_status, TokenStatus::Valid);

    with_token(&plugin, "cb_live_other_token");
    assert_eq!(plugin.settings().token_status, TokenStatus::Idle);
}

#[tokio::test(start_paused = true)]
async fn token_edited_mid_validation_keeps_new_status() {
    let (plugin, runner) = setup();
    with_token(&plugin, "cb_live_abcdefghij");
    let action = plugin.validate(&runner, ROOT_SCOPE).unwrap();

    advance(500).await;
    with_token(&plugin, "short");
    assert!(!plugin.settings().validating);

    advance(1001).await;
    let settings = plugin.settings();
    assert_eq!(settings.token_status, TokenStatus::Idle);
    assert!(!settings.validating);
    assert_eq!(runner.get(action.id).unwrap().status, ActionStatus::Cancelled);
    assert_eq!(runner.notifier().pending(), 0);
}

#[tokio::test(start_paused = true)]
async fn closing_scope_mid_validation_clears_flag() {
    let (plugin, runner) = setup();
    with_token(&plugin, "cb_live_abcdefghij");
    let scope = runner.open_scope();
    plugin.validate(&runner, scope).unwrap();

    advance(100).await;
    assert_eq!(runner.close_scope(scope), Some(1));
    advance(5000).await;
    let settings = plugin.settings();
    assert!(!settings.validating);
    assert_eq!(settings.token_status, TokenStatus::Idle);
}

#[test]
fn save_requires_valid_token() {
    let (plugin, runner) = setup();
    let err = plugin.save(runner.notifier()).unwrap_err();
    assert!(matches!(err, WordPressError::NotValidated));
    assert_eq!(runner.notifier().drain()[0].title, "Validate First");
}

#[tokio::test(start_paused = true)]
async fn save_after_validation() {
    let (plugin, runner) = setup();
    with_token(&plugin, "cb_live_abcdefghij");
    plugin.update_settings(SettingsPatch { domain: Some("shop.example.com".into()), ..SettingsPatch::default() });
    plugin.validate(&runner, ROOT_SCOPE).unwrap();
    advance(1501).await;
    runner.notifier().drain();

    let saved = plugin.save(runner.notifier()).unwrap();
    assert_eq!(saved.domain, "shop.example.com");
    assert_eq!(runner.notifier().drain()[0].title, "Settings Saved");
}

// =============================================================================
// LOGS
// =============================================================================

#[tokio::test(start_paused = true)]
async fn sync_sets_flag_then_stamps_last_sync_once() {
    let (plugin, runner) = setup();
    assert_eq!(plugin.sync_state().last_sync, INITIAL_LAST_SYNC);

    plugin.sync_logs(&runner, ROOT_SCOPE).unwrap();
    assert!(plugin.sync_state().syncing);

    advance(1999).await;
    let mid = plugin.sync_state();
    assert!(mid.syncing);
    assert_eq!(mid.last_sync, INITIAL_LAST_SYNC);

    advance(2).await;
    let done = plugin.sync_state();
    assert!(!done.syncing);
    assert_ne!(done.last_sync, INITIAL_LAST_SYNC);

    advance(5000).await;
    let toasts = runner.notifier().drain();
    assert_eq!(toasts.len(), 1);
    assert_eq!(toasts[0].title, "Sync Complete");
}

#[tokio::test(start_paused = true)]
async fn closing_scope_mid_sync_clears_flag() {
    let (plugin, runner) = setup();
    let scope = runner.open_scope();
    let action = plugin.sync_logs(&runner, scope).unwrap();

    advance(100).await;
    assert_eq!(runner.close_scope(scope), Some(1));
    advance(5000).await;
    let state = plugin.sync_state();
    assert!(!state.syncing);
    assert_eq!(state.last_sync, INITIAL_LAST_SYNC);
    assert_eq!(runner.get(action.id).unwrap().status, ActionStatus::Cancelled);
    assert_eq!(runner.notifier().pending(), 0);
}

#[tokio::test]
async fn sync_on_closed_scope_leaves_flag_clear() {
    let (plugin, runner) = setup();
    let scope = runner.open_scope();
    runner.close_scope(scope);
    assert!(matches!(plugin.sync_logs(&runner, scope), Err(WordPressError::Action(_))));
    assert!(!plugin.sync_state().syncing);
}

#[tokio::test]
async fn export_toasts_immediately() {
    let (plugin, runner) = setup();
    let action = plugin.export_logs(&runner, ROOT_SCOPE).unwrap();
    assert_eq!(action.status, ActionStatus::Succeeded);
    assert_eq!(runner.notifier().drain()[0].title, "Export Started");
}

// =============================================================================
// DIAGNOSTICS / PREVIEW
// =============================================================================

#[tokio::test(start_paused = true)]
async fn diagnostics_run_to_completion() {
    let (plugin, runner) = setup();
    let action = plugin.run_diagnostics(&runner, ROOT_SCOPE).unwrap();
    let state = plugin.diagnostics_state();
    assert!(state.running);
    assert_eq!(state.last_run, Some(action.id));

    advance(1001).await;
    assert_eq!(runner.get(action.id).unwrap().progress, 50);

    advance(1000).await;
    assert!(!plugin.diagnostics_state().running);
    assert_eq!(runner.get(action.id).unwrap().progress, 100);
    assert_eq!(runner.notifier().drain()[0].title, "Diagnostics Complete");
}

#[tokio::test(start_paused = true)]
async fn closing_scope_mid_diagnostics_clears_flag() {
    let (plugin, runner) = setup();
    let scope = runner.open_scope();
    plugin.run_diagnostics(&runner, scope).unwrap();

    advance(500).await;
    runner.close_scope(scope);
    advance(5000).await;
    assert!(!plugin.diagnostics_state().running);
    assert_eq!(runner.notifier().pending(), 0);
}

#[tokio::test(start_paused = true)]
async fn closing_scope_mid_refresh_clears_flag() {
    let (plugin, runner) = setup();
    let scope = runner.open_scope();
    plugin.refresh_preview(&runner, scope).unwrap();

    advance(100).await;
    runner.close_scope(scope);
    assert!(!plugin.preview().refreshing);
}

#[tokio::test(start_paused = true)]
async fn preview_refresh_clears_after_delay() {
    let (plugin, runner) = setup();
    plugin.refresh_preview(&runner, ROOT_SCOPE).unwrap();
    assert!(plugin.preview().refreshing);
    advance(1001).await;
    assert!(!plugin.preview().refreshing);
    assert_eq!(runner.notifier().pending(), 0);
}

#[test]
fn preview_device_switch() {
    let (plugin, _) = setup();
    assert_eq!(plugin.preview().device, PreviewDevice::Desktop);
    assert_eq!(plugin.set_preview_device(PreviewDevice::Mobile).device, PreviewDevice::Mobile);
}
