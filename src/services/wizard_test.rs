use super::*;

#[test]
fn exactly_three_steps_in_order() {
    assert_eq!(WizardStep::ALL.len(), 3);
    assert_eq!(WizardStep::General.next(), WizardStep::Knowledge);
    assert_eq!(WizardStep::Knowledge.next(), WizardStep::Widget);
}

#[test]
fn previous_is_noop_at_general() {
    let mut wizard = Wizard::new();
    wizard.previous();
    assert_eq!(wizard.step, WizardStep::General);
}

#[test]
fn next_is_noop_at_widget() {
    let mut wizard = Wizard::new();
    for _ in 0..5 {
        wizard.next();
    }
    assert_eq!(wizard.step, WizardStep::Widget);
}

#[test]
fn walk_forward_and_back() {
    let mut wizard = Wizard::new();
    wizard.next();
    wizard.next();
    wizard.previous();
    assert_eq!(wizard.step, WizardStep::Knowledge);
}

#[test]
fn progress_per_step() {
    let mut wizard = Wizard::new();
    assert!((wizard.progress() - 100.0 / 3.0).abs() < 1e-9);
    wizard.next();
    assert!((wizard.progress() - 200.0 / 3.0).abs() < 1e-9);
    wizard.next();
    assert!((wizard.progress() - 100.0).abs() < 1e-9);
}

#[test]
fn finish_only_from_widget() {
    let mut wizard = Wizard::new();
    for step in [WizardStep::General, WizardStep::Knowledge] {
        assert_eq!(wizard.step, step);
        let err = wizard.finish().unwrap_err();
        assert!(matches!(err, WizardError::NotOnFinalStep { current } if current == step));
        wizard.next();
    }

    let created = wizard.finish().unwrap();
    assert!(created.bot_id.starts_with("new-bot-"));
    assert!(created.bot_id["new-bot-".len()..].parse::<i64>().is_ok());
    assert_eq!(created.redirect, format!("/app/bots/{}/playground", created.bot_id));
}

#[test]
fn finish_needs_no_draft_fields() {
    let mut wizard = Wizard::new();
    wizard.next();
    wizard.next();
    assert!(wizard.draft.name.is_empty());
    assert!(wizard.finish().is_ok());
}

#[test]
fn draft_defaults() {
    let draft = BotDraft::default();
    assert_eq!(draft.tone, "friendly");
    assert_eq!(draft.language, "en");
    assert_eq!(draft.theme, "modern");
    assert_eq!(draft.position, "bottom-right");
    assert!(draft.enable_csat);
}

#[test]
fn patch_sets_present_fields_and_appends_files() {
    let mut draft = BotDraft::default();
    let patch: DraftPatch = serde_json::from_value(serde_json::json!({
        "name": "Support Bot",
        "files": ["faq.pdf"],
        "enable_csat": false
    }))
    .unwrap();
    draft.apply(patch);
    draft.apply(DraftPatch { files: vec!["pricing.docx".into()], ..DraftPatch::default() });

    assert_eq!(draft.name, "Support Bot");
    assert_eq!(draft.tone, "friendly");
    assert_eq!(draft.files, vec!["faq.pdf", "pricing.docx"]);
    assert!(!draft.enable_csat);
}

#[test]
fn view_flags() {
    let mut wizard = Wizard::new();
    let view = wizard.view();
    assert!(!view.can_go_back);
    assert!(!view.can_finish);
    assert_eq!(view.step_title, "General");

    wizard.next();
    wizard.next();
    let view = wizard.view();
    assert!(view.can_go_back);
    assert!(view.can_finish);
    assert_eq!(view.step_index, 2);
}

#[tokio::test]
async fn store_lifecycle() {
    let store = WizardStore::default();
    let view = store.create().await;

    assert!(matches!(store.finish(view.id).await, Some(Err(_))));
    store.step(view.id, Move::Next).await.unwrap();
    store.step(view.id, Move::Next).await.unwrap();

    let created = store.finish(view.id).await.unwrap().unwrap();
    assert!(created.redirect.ends_with("/playground"));
    assert!(store.get(view.id).await.is_none());
    assert!(store.finish(view.id).await.is_none());
}

#[tokio::test]
async fn store_discard() {
    let store = WizardStore::default();
    let view = store.create().await;
    assert!(store.discard(view.id).await);
    assert!(!store.discard(view.id).await);
}

#[tokio::test]
async fn abandoned_wizards_are_capped() {
    let store = WizardStore::default();
    let first = store.create().await;
    let mut last = first.id;
    for _ in 0..MAX_OPEN_WIZARDS {
        last = store.create().await.id;
    }
    assert!(store.get(first.id).await.is_none());
    assert!(store.get(last).await.is_some());
    assert_eq!(store.wizards.read().await.len(), MAX_OPEN_WIZARDS);
}
