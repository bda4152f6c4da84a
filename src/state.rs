//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor.
//! It holds the immutable mock catalog, the fixed session, and the
//! in-memory services. Every field is cheap to clone: the catalog and
//! session sit behind `Arc`, the services share their state internally.

use std::sync::Arc;

use crate::catalog::Catalog;
use crate::config::AppConfig;
use crate::notify::Notifier;
use crate::services::action::ActionRunner;
use crate::services::bot_settings::BotSettingsStore;
use crate::services::chat::ChatService;
use crate::services::wizard::WizardStore;
use crate::services::wordpress::WordPressPlugin;
use crate::session::CurrentSession;

/// Shared application state, injected into Axum handlers via State extractor.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<Catalog>,
    pub session: Arc<CurrentSession>,
    pub notifier: Notifier,
    pub actions: ActionRunner,
    pub wizards: WizardStore,
    pub chats: ChatService,
    pub bot_settings: BotSettingsStore,
    pub wordpress: WordPressPlugin,
}

impl AppState {
    #[must_use]
    pub fn new(config: &AppConfig) -> Self {
        let notifier = Notifier::new();
        Self {
            catalog: Arc::new(Catalog::seeded()),
            session: Arc::new(config.session.clone()),
            actions: ActionRunner::new(notifier.clone(), config.delays),
            notifier,
            wizards: WizardStore::default(),
            chats: ChatService::default(),
            bot_settings: BotSettingsStore::default(),
            wordpress: WordPressPlugin::default(),
        }
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================

#[cfg(test)]
pub mod test_helpers {
    use super::*;

    /// `AppState` with default delays and the demo session.
    #[must_use]
    pub fn test_app_state() -> AppState {
        AppState::new(&AppConfig::default())
    }

    /// `AppState` with a custom session.
    #[must_use]
    pub fn test_app_state_with_session(session: CurrentSession) -> AppState {
        AppState::new(&AppConfig { session, ..AppConfig::default() })
    }
}
