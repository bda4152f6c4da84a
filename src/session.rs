//! Current session, injected read-only into handlers.
//!
//! There is no real authentication: the session is a fixed value chosen at
//! startup from config. Handlers that need to know who is looking take a
//! `CurrentSession` parameter; nothing mutates it after boot.

use std::convert::Infallible;

use axum::extract::FromRef;
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    User,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CurrentSession {
    pub name: String,
    pub email: String,
    pub role: Role,
    pub logged_in: bool,
}

impl CurrentSession {
    /// The signed-in demo user.
    #[must_use]
    pub fn demo() -> Self {
        Self::signed_in("Demo User", "demo@example.com", Role::User)
    }

    #[must_use]
    pub fn signed_in(name: impl Into<String>, email: impl Into<String>, role: Role) -> Self {
        Self { name: name.into(), email: email.into(), role, logged_in: true }
    }

    #[must_use]
    pub fn anonymous() -> Self {
        Self { name: String::new(), email: String::new(), role: Role::User, logged_in: false }
    }

    /// Where the "Dashboard" link points for this session.
    #[must_use]
    pub fn home_path(&self) -> &'static str {
        match (self.logged_in, self.role) {
            (false, _) => "/login",
            (true, Role::Admin) => "/admin",
            (true, Role::User) => "/dashboard",
        }
    }
}

impl<S> axum::extract::FromRequestParts<S> for CurrentSession
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(_parts: &mut axum::http::request::Parts, state: &S) -> Result<Self, Self::Rejection> {
        Ok(AppState::from_ref(state).session.as_ref().clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn home_path_by_role() {
        assert_eq!(CurrentSession::demo().home_path(), "/dashboard");
        assert_eq!(CurrentSession::signed_in("A", "a@x.io", Role::Admin).home_path(), "/admin");
        assert_eq!(CurrentSession::anonymous().home_path(), "/login");
    }

    #[test]
    fn serializes_role_lowercase() {
        let json = serde_json::to_value(CurrentSession::demo()).unwrap();
        assert_eq!(json["role"], "user");
        assert_eq!(json["logged_in"], true);
    }
}
