//! Bot-creation wizard: three linear steps, no validation, no persistence.
//!
//! DESIGN
//! ======
//! A wizard is a cursor over `general → knowledge → widget` plus a draft.
//! `next`/`previous` move one step and are no-ops at either end. Finishing
//! is only legal from the last step; it mints a timestamp-derived bot id,
//! drops the wizard and returns the playground redirect. The draft is never
//! stored anywhere. Abandoned wizards are never closed by the client, so
//! the store keeps at most `MAX_OPEN_WIZARDS` and forgets the oldest.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::info;
use uuid::Uuid;

use crate::clock;
use crate::services::bounded::BoundedMap;

pub const MAX_OPEN_WIZARDS: usize = 128;

// =============================================================================
// STEPS
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WizardStep {
    General,
    Knowledge,
    Widget,
}

impl WizardStep {
    pub const ALL: [Self; 3] = [Self::General, Self::Knowledge, Self::Widget];

    #[must_use]
    pub fn index(self) -> usize {
        match self {
            Self::General => 0,
            Self::Knowledge => 1,
            Self::Widget => 2,
        }
    }

    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Self::General => "General",
            Self::Knowledge => "Knowledge",
            Self::Widget => "Widget",
        }
    }

    /// Next step, or `self` at the end.
    #[must_use]
    pub fn next(self) -> Self {
        Self::ALL.get(self.index() + 1).copied().unwrap_or(self)
    }

    /// Previous step, or `self` at the start.
    #[must_use]
    pub fn previous(self) -> Self {
        self.index().checked_sub(1).map_or(self, |i| Self::ALL[i])
    }

    #[must_use]
    pub fn is_final(self) -> bool {
        self == Self::Widget
    }
}

impl fmt::Display for WizardStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::General => "general",
            Self::Knowledge => "knowledge",
            Self::Widget => "widget",
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum WizardError {
    #[error("a bot can only be created from the widget step (currently on {current})")]
    NotOnFinalStep { current: WizardStep },
}

// =============================================================================
// DRAFT
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BotDraft {
    pub name: String,
    pub description: String,
    pub tone: String,
    pub language: String,
    pub fallback_message: String,
    pub files: Vec<String>,
    pub urls: String,
    pub theme: String,
    pub position: String,
    pub welcome_message: String,
    pub proactive_message: String,
    pub enable_csat: bool,
}

impl Default for BotDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            tone: "friendly".into(),
            language: "en".into(),
            fallback_message: String::new(),
            files: Vec::new(),
            urls: String::new(),
            theme: "modern".into(),
            position: "bottom-right".into(),
            welcome_message: String::new(),
            proactive_message: String::new(),
            enable_csat: true,
        }
    }
}

/// Partial draft update; absent fields are left alone. Uploaded file names
/// are appended, matching repeated uploads on the knowledge step.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DraftPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub tone: Option<String>,
    pub language: Option<String>,
    pub fallback_message: Option<String>,
    pub files: Vec<String>,
    pub urls: Option<String>,
    pub theme: Option<String>,
    pub position: Option<String>,
    pub welcome_message: Option<String>,
    pub proactive_message: Option<String>,
    pub enable_csat: Option<bool>,
}

impl BotDraft {
    pub fn apply(&mut self, patch: DraftPatch) {
        let DraftPatch {
            name,
            description,
            tone,
            language,
            fallback_message,
            files,
            urls,
            theme,
            position,
            welcome_message,
            proactive_message,
            enable_csat,
        } = patch;
        for (slot, value) in [
            (&mut self.name, name),
            (&mut self.description, description),
            (&mut self.tone, tone),
            (&mut self.language, language),
            (&mut self.fallback_message, fallback_message),
            (&mut self.urls, urls),
            (&mut self.theme, theme),
            (&mut self.position, position),
            (&mut self.welcome_message, welcome_message),
            (&mut self.proactive_message, proactive_message),
        ] {
            if let Some(value) = value {
                *slot = value;
            }
        }
        self.files.extend(files);
        if let Some(enable_csat) = enable_csat {
            self.enable_csat = enable_csat;
        }
    }
}

// =============================================================================
// WIZARD
// =============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct Wizard {
    pub id: Uuid,
    pub step: WizardStep,
    pub draft: BotDraft,
}

/// Wizard as the client renders it.
#[derive(Debug, Clone, Serialize)]
pub struct WizardView {
    pub id: Uuid,
    pub step: WizardStep,
    pub step_title: &'static str,
    pub step_index: usize,
    pub step_count: usize,
    pub progress: f64,
    pub can_go_back: bool,
    pub can_finish: bool,
    pub draft: BotDraft,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreatedBot {
    pub bot_id: String,
    pub redirect: String,
}

impl Default for Wizard {
    fn default() -> Self {
        Self::new()
    }
}

impl Wizard {
    #[must_use]
    pub fn new() -> Self {
        Self { id: Uuid::new_v4(), step: WizardStep::General, draft: BotDraft::default() }
    }

    pub fn next(&mut self) {
        self.step = self.step.next();
    }

    pub fn previous(&mut self) {
        self.step = self.step.previous();
    }

    /// Percentage through the wizard, counting the current step as done.
    #[must_use]
    pub fn progress(&self) -> f64 {
        let done = u32::try_from(self.step.index() + 1).unwrap_or(0);
        let total = u32::try_from(WizardStep::ALL.len()).unwrap_or(1);
        f64::from(done) / f64::from(total) * 100.0
    }

    /// # Errors
    ///
    /// Returns `NotOnFinalStep` unless the wizard is on the widget step.
    pub fn finish(&self) -> Result<CreatedBot, WizardError> {
        if !self.step.is_final() {
            return Err(WizardError::NotOnFinalStep { current: self.step });
        }
        let bot_id = format!("new-bot-{}", clock::now_ms());
        let redirect = format!("/app/bots/{bot_id}/playground");
        Ok(CreatedBot { bot_id, redirect })
    }

    #[must_use]
    pub fn view(&self) -> WizardView {
        WizardView {
            id: self.id,
            step: self.step,
            step_title: self.step.title(),
            step_index: self.step.index(),
            step_count: WizardStep::ALL.len(),
            progress: self.progress(),
            can_go_back: self.step != WizardStep::General,
            can_finish: self.step.is_final(),
            draft: self.draft.clone(),
        }
    }
}

// =============================================================================
// STORE
// =============================================================================

/// Open wizards, keyed by id.
#[derive(Clone)]
pub struct WizardStore {
    wizards: Arc<RwLock<BoundedMap<Uuid, Wizard>>>,
}

impl Default for WizardStore {
    fn default() -> Self {
        Self { wizards: Arc::new(RwLock::new(BoundedMap::new(MAX_OPEN_WIZARDS))) }
    }
}

/// Step movement requested by the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Move {
    Next,
    Previous,
}

impl WizardStore {
    pub async fn create(&self) -> WizardView {
        let wizard = Wizard::new();
        let view = wizard.view();
        let evicted = self.wizards.write().await.insert(wizard.id, wizard);
        for (old, _) in evicted {
            info!(wizard = %old, "oldest wizard dropped");
        }
        info!(wizard = %view.id, "wizard opened");
        view
    }

    pub async fn get(&self, id: Uuid) -> Option<WizardView> {
        self.wizards.read().await.get(&id).map(Wizard::view)
    }

    pub async fn update(&self, id: Uuid, patch: DraftPatch) -> Option<WizardView> {
        let mut wizards = self.wizards.write().await;
        let wizard = wizards.get_mut(&id)?;
        wizard.draft.apply(patch);
        Some(wizard.view())
    }

    pub async fn step(&self, id: Uuid, direction: Move) -> Option<WizardView> {
        let mut wizards = self.wizards.write().await;
        let wizard = wizards.get_mut(&id)?;
        match direction {
            Move::Next => wizard.next(),
            Move::Previous => wizard.previous(),
        }
        Some(wizard.view())
    }

    /// Finish and forget the wizard. `None` if it does not exist.
    pub async fn finish(&self, id: Uuid) -> Option<Result<CreatedBot, WizardError>> {
        let mut wizards = self.wizards.write().await;
        let created = match wizards.get(&id)?.finish() {
            Ok(created) => created,
            Err(e) => return Some(Err(e)),
        };
        wizards.remove(&id);
        info!(wizard = %id, bot = %created.bot_id, "bot created");
        Some(Ok(created))
    }

    pub async fn discard(&self, id: Uuid) -> bool {
        self.wizards.write().await.remove(&id).is_some()
    }
}

#[cfg(test)]
#[path = "wizard_test.rs"]
mod tests;
