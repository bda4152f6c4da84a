//! WordPress plugin surface: settings, token check, log sync, diagnostics,
//! preview.
//!
//! DESIGN
//! ======
//! The plugin never reaches a real site. Token validation is a length check
//! decided after the validate delay; sync stamps `last_sync` after the sync
//! delay; diagnostics re-report the same six fixed checks after ten progress
//! steps. Each long-running operation raises a busy flag that its completion
//! clears, or that the action's cancel hook clears when its view scope
//! closes first. A validation whose token was edited mid-flight leaves the
//! new token's status alone.
//!
//! ERROR HANDLING
//! ==============
//! The two local refusals (no token, save before validate) push the same
//! destructive toast the settings page shows and return an error; no timer
//! is started for either.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use crate::clock;
use crate::notify::{Notification, Notifier};
use crate::services::action::{ActionError, ActionKind, ActionRecord, ActionRunner, Outcome};

/// Tokens strictly longer than this validate.
pub const MIN_TOKEN_LEN: usize = 10;

pub const INITIAL_LAST_SYNC: &str = "2024-01-15 14:32:18";

#[derive(Debug, thiserror::Error)]
pub enum WordPressError {
    #[error("authentication token is required")]
    MissingToken,
    #[error("token must be validated before saving")]
    NotValidated,
    #[error(transparent)]
    Action(#[from] ActionError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenStatus {
    Idle,
    Valid,
    Invalid,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PreviewDevice {
    Desktop,
    Tablet,
    Mobile,
}

// =============================================================================
// STATE
// =============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct PluginSettings {
    pub auth_token: String,
    pub domain: String,
    pub local_cache: bool,
    pub offline_fallback: bool,
    pub token_status: TokenStatus,
    pub validating: bool,
}

impl Default for PluginSettings {
    fn default() -> Self {
        Self {
            auth_token: String::new(),
            domain: String::new(),
            local_cache: true,
            offline_fallback: false,
            token_status: TokenStatus::Idle,
            validating: false,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SettingsPatch {
    pub auth_token: Option<String>,
    pub domain: Option<String>,
    pub local_cache: Option<bool>,
    pub offline_fallback: Option<bool>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SyncState {
    pub last_sync: String,
    pub syncing: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct DiagnosticsState {
    pub running: bool,
    /// Most recent diagnostics run, for progress polling.
    pub last_run: Option<Uuid>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PreviewState {
    pub device: PreviewDevice,
    pub refreshing: bool,
}

#[derive(Debug)]
struct Plugin {
    settings: PluginSettings,
    sync: SyncState,
    diagnostics: DiagnosticsState,
    preview: PreviewState,
}

impl Default for Plugin {
    fn default() -> Self {
        Self {
            settings: PluginSettings::default(),
            sync: SyncState { last_sync: INITIAL_LAST_SYNC.into(), syncing: false },
            diagnostics: DiagnosticsState { running: false, last_run: None },
            preview: PreviewState { device: PreviewDevice::Desktop, refreshing: false },
        }
    }
}

// =============================================================================
// SERVICE
// =============================================================================

#[derive(Clone, Default)]
pub struct WordPressPlugin {
    state: Arc<Mutex<Plugin>>,
}

fn lock(state: &Mutex<Plugin>) -> MutexGuard<'_, Plugin> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

impl WordPressPlugin {
    #[must_use]
    pub fn settings(&self) -> PluginSettings {
        lock(&self.state).settings.clone()
    }

    /// Changing the token resets its status to idle and abandons any
    /// validation in flight.
    pub fn update_settings(&self, patch: SettingsPatch) -> PluginSettings {
        let mut plugin = lock(&self.state);
        let settings = &mut plugin.settings;
        if let Some(token) = patch.auth_token {
            if token != settings.auth_token {
                settings.token_status = TokenStatus::Idle;
                settings.validating = false;
            }
            settings.auth_token = token;
        }
        if let Some(domain) = patch.domain {
            settings.domain = domain;
        }
        if let Some(v) = patch.local_cache {
            settings.local_cache = v;
        }
        if let Some(v) = patch.offline_fallback {
            settings.offline_fallback = v;
        }
        settings.clone()
    }

    /// Check the current token after the validate delay.
    ///
    /// # Errors
    ///
    /// `MissingToken` (with a destructive toast) when no token is set;
    /// `Action` when `scope` is closed.
    pub fn validate(&self, runner: &ActionRunner, scope: Uuid) -> Result<ActionRecord, WordPressError> {
        let token = {
            let mut plugin = lock(&self.state);
            if plugin.settings.auth_token.is_empty() {
                drop(plugin);
                runner.notifier().push(Notification::destructive(
                    "Missing Token",
                    "Please enter your authentication token first.",
                ));
                return Err(WordPressError::MissingToken);
            }
            plugin.settings.validating = true;
            plugin.settings.auth_token.clone()
        };

        let state = Arc::clone(&self.state);
        let cleared = Arc::clone(&self.state);
        let checked = token.clone();
        let schedule = ActionKind::ValidateToken.schedule(runner.delays());
        let started = runner.start_guarded(
            scope,
            ActionKind::ValidateToken,
            None,
            schedule,
            move || {
                let valid = token.chars().count() > MIN_TOKEN_LEN;
                {
                    let mut plugin = lock(&state);
                    if plugin.settings.auth_token != token {
                        debug!("token changed while validating");
                        return Outcome::superseded();
                    }
                    plugin.settings.validating = false;
                    plugin.settings.token_status = if valid { TokenStatus::Valid } else { TokenStatus::Invalid };
                }
                info!(valid, "token validated");
                if valid {
                    Outcome::succeeded(Notification::new("Token Valid!", "Your authentication token is working correctly."))
                } else {
                    Outcome::failed(Notification::destructive("Token Invalid", "Please check your token and try again."))
                }
            },
            move || {
                let mut plugin = lock(&cleared);
                if plugin.settings.auth_token == checked {
                    plugin.settings.validating = false;
                }
            },
        );
        started.map_err(|e| {
            lock(&self.state).settings.validating = false;
            e.into()
        })
    }

    /// # Errors
    ///
    /// `NotValidated` (with a destructive toast) unless the token status is
    /// valid.
    pub fn save(&self, notifier: &Notifier) -> Result<PluginSettings, WordPressError> {
        let settings = self.settings();
        if settings.token_status != TokenStatus::Valid {
            notifier.push(Notification::destructive("Validate First", "Please validate your token before saving."));
            return Err(WordPressError::NotValidated);
        }
        notifier.push(Notification::new(
            "Settings Saved",
            "Your chatbot configuration has been updated successfully.",
        ));
        Ok(settings)
    }

    // -------------------------------------------------------------------------
    // Logs
    // -------------------------------------------------------------------------

    #[must_use]
    pub fn sync_state(&self) -> SyncState {
        lock(&self.state).sync.clone()
    }

    /// # Errors
    ///
    /// Returns `Action` when `scope` is closed.
    pub fn sync_logs(&self, runner: &ActionRunner, scope: Uuid) -> Result<ActionRecord, WordPressError> {
        lock(&self.state).sync.syncing = true;
        let state = Arc::clone(&self.state);
        let cleared = Arc::clone(&self.state);
        let schedule = ActionKind::SyncLogs.schedule(runner.delays());
        let started = runner.start_guarded(
            scope,
            ActionKind::SyncLogs,
            None,
            schedule,
            move || {
                let mut plugin = lock(&state);
                plugin.sync.syncing = false;
                plugin.sync.last_sync = clock::display_timestamp();
                Outcome::succeeded(Notification::new("Sync Complete", "Event logs have been synchronized successfully."))
            },
            move || {
                lock(&cleared).sync.syncing = false;
            },
        );
        started.map_err(|e| {
            lock(&self.state).sync.syncing = false;
            e.into()
        })
    }

    /// # Errors
    ///
    /// Returns `Action` when `scope` is closed.
    pub fn export_logs(&self, runner: &ActionRunner, scope: Uuid) -> Result<ActionRecord, WordPressError> {
        let record = runner.start(scope, ActionKind::ExportLogs, None, || {
            Outcome::succeeded(Notification::new("Export Started", "Your logs are being prepared for download."))
        })?;
        Ok(record)
    }

    // -------------------------------------------------------------------------
    // Diagnostics
    // -------------------------------------------------------------------------

    #[must_use]
    pub fn diagnostics_state(&self) -> DiagnosticsState {
        lock(&self.state).diagnostics.clone()
    }

    /// # Errors
    ///
    /// Returns `Action` when `scope` is closed.
    pub fn run_diagnostics(&self, runner: &ActionRunner, scope: Uuid) -> Result<ActionRecord, WordPressError> {
        lock(&self.state).diagnostics.running = true;
        let state = Arc::clone(&self.state);
        let cleared = Arc::clone(&self.state);
        let schedule = ActionKind::RunDiagnostics.schedule(runner.delays());
        let started = runner.start_guarded(
            scope,
            ActionKind::RunDiagnostics,
            None,
            schedule,
            move || {
                lock(&state).diagnostics.running = false;
                Outcome::succeeded(Notification::new("Diagnostics Complete", "System check completed successfully."))
            },
            move || {
                lock(&cleared).diagnostics.running = false;
            },
        );
        let mut plugin = lock(&self.state);
        match started {
            Ok(record) => {
                plugin.diagnostics.last_run = Some(record.id);
                Ok(record)
            }
            Err(e) => {
                plugin.diagnostics.running = false;
                Err(e.into())
            }
        }
    }

    // -------------------------------------------------------------------------
    // Preview
    // -------------------------------------------------------------------------

    #[must_use]
    pub fn preview(&self) -> PreviewState {
        lock(&self.state).preview.clone()
    }

    pub fn set_preview_device(&self, device: PreviewDevice) -> PreviewState {
        let mut plugin = lock(&self.state);
        plugin.preview.device = device;
        plugin.preview.clone()
    }

    /// # Errors
    ///
    /// Returns `Action` when `scope` is closed.
    pub fn refresh_preview(&self, runner: &ActionRunner, scope: Uuid) -> Result<ActionRecord, WordPressError> {
        lock(&self.state).preview.refreshing = true;
        let state = Arc::clone(&self.state);
        let cleared = Arc::clone(&self.state);
        let schedule = ActionKind::RefreshPreview.schedule(runner.delays());
        let started = runner.start_guarded(
            scope,
            ActionKind::RefreshPreview,
            None,
            schedule,
            move || {
                lock(&state).preview.refreshing = false;
                Outcome::silent()
            },
            move || {
                lock(&cleared).preview.refreshing = false;
            },
        );
        started.map_err(|e| {
            lock(&self.state).preview.refreshing = false;
            e.into()
        })
    }
}

#[cfg(test)]
#[path = "wordpress_test.rs"]
mod tests;
