//! Runtime configuration parsed from environment variables.
//!
//! Every value has a default, so an empty environment boots the console
//! with the delays the demo UI uses. A `.env` file is loaded by `main`
//! before `AppConfig::from_env` runs.

use std::time::Duration;

use crate::session::{CurrentSession, Role};

pub const DEFAULT_PORT: u16 = 3000;

pub const DEFAULT_ADMIN_ACTION_MS: u64 = 500;
pub const DEFAULT_SYNC_MS: u64 = 2000;
pub const DEFAULT_VALIDATE_MS: u64 = 1500;
pub const DEFAULT_PREVIEW_REFRESH_MS: u64 = 1000;
pub const DEFAULT_DIAGNOSTIC_STEP_MS: u64 = 200;
pub const DEFAULT_CHAT_REPLY_MS: u64 = 1500;
pub const DEFAULT_PLAYGROUND_FAST_MS: u64 = 500;
pub const DEFAULT_MODAL_CLOSE_MS: u64 = 2000;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: '{value}'")]
    Invalid { key: String, value: String },
}

/// Fixed delays that stand in for network latency.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionDelays {
    pub admin_action: Duration,
    pub sync: Duration,
    pub validate: Duration,
    pub preview_refresh: Duration,
    pub diagnostic_step: Duration,
    pub chat_reply: Duration,
    pub playground_fast: Duration,
    pub modal_close: Duration,
}

impl Default for ActionDelays {
    fn default() -> Self {
        Self {
            admin_action: Duration::from_millis(DEFAULT_ADMIN_ACTION_MS),
            sync: Duration::from_millis(DEFAULT_SYNC_MS),
            validate: Duration::from_millis(DEFAULT_VALIDATE_MS),
            preview_refresh: Duration::from_millis(DEFAULT_PREVIEW_REFRESH_MS),
            diagnostic_step: Duration::from_millis(DEFAULT_DIAGNOSTIC_STEP_MS),
            chat_reply: Duration::from_millis(DEFAULT_CHAT_REPLY_MS),
            playground_fast: Duration::from_millis(DEFAULT_PLAYGROUND_FAST_MS),
            modal_close: Duration::from_millis(DEFAULT_MODAL_CLOSE_MS),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub port: u16,
    pub delays: ActionDelays,
    pub session: CurrentSession,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self { port: DEFAULT_PORT, delays: ActionDelays::default(), session: CurrentSession::demo() }
    }
}

impl AppConfig {
    /// Build config from environment variables.
    ///
    /// Optional:
    /// - `PORT`: listen port (default 3000)
    /// - `ACTION_DELAY_ADMIN_MS`, `ACTION_DELAY_SYNC_MS`, `ACTION_DELAY_VALIDATE_MS`,
    ///   `ACTION_DELAY_PREVIEW_MS`, `ACTION_DELAY_DIAGNOSTIC_STEP_MS`,
    ///   `ACTION_DELAY_CHAT_REPLY_MS`, `ACTION_DELAY_PLAYGROUND_FAST_MS`,
    ///   `ACTION_DELAY_MODAL_CLOSE_MS`
    /// - `MOCK_SESSION_NAME`, `MOCK_SESSION_EMAIL`
    /// - `MOCK_SESSION_ROLE`: `user` (default), `admin` or `anonymous`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` when a value is present but malformed.
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = ActionDelays::default();
        let delays = ActionDelays {
            admin_action: env_millis("ACTION_DELAY_ADMIN_MS", defaults.admin_action)?,
            sync: env_millis("ACTION_DELAY_SYNC_MS", defaults.sync)?,
            validate: env_millis("ACTION_DELAY_VALIDATE_MS", defaults.validate)?,
            preview_refresh: env_millis("ACTION_DELAY_PREVIEW_MS", defaults.preview_refresh)?,
            diagnostic_step: env_millis("ACTION_DELAY_DIAGNOSTIC_STEP_MS", defaults.diagnostic_step)?,
            chat_reply: env_millis("ACTION_DELAY_CHAT_REPLY_MS", defaults.chat_reply)?,
            playground_fast: env_millis("ACTION_DELAY_PLAYGROUND_FAST_MS", defaults.playground_fast)?,
            modal_close: env_millis("ACTION_DELAY_MODAL_CLOSE_MS", defaults.modal_close)?,
        };

        let demo = CurrentSession::demo();
        let role = parse_role(std::env::var("MOCK_SESSION_ROLE").ok().as_deref())?;
        let session = match role {
            None => CurrentSession::anonymous(),
            Some(role) => CurrentSession::signed_in(
                std::env::var("MOCK_SESSION_NAME").unwrap_or(demo.name),
                std::env::var("MOCK_SESSION_EMAIL").unwrap_or(demo.email),
                role,
            ),
        };

        Ok(Self { port: env_parse("PORT", DEFAULT_PORT)?, delays, session })
    }
}

fn env_parse<T>(key: &str, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|_| ConfigError::Invalid { key: key.to_owned(), value: raw }),
        Err(_) => Ok(default),
    }
}

fn env_millis(key: &str, default: Duration) -> Result<Duration, ConfigError> {
    let default_ms = u64::try_from(default.as_millis()).unwrap_or(u64::MAX);
    env_parse(key, default_ms).map(Duration::from_millis)
}

/// `None` means no one is signed in.
fn parse_role(raw: Option<&str>) -> Result<Option<Role>, ConfigError> {
    match raw.map(str::trim).unwrap_or("user") {
        "user" => Ok(Some(Role::User)),
        "admin" => Ok(Some(Role::Admin)),
        "anonymous" => Ok(None),
        other => Err(ConfigError::Invalid { key: "MOCK_SESSION_ROLE".into(), value: other.to_owned() }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
