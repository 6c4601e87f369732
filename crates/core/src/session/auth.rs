//! Session state and its stored snapshot.

use cadastro_shared::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Signed-in user as returned by the login call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Display name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Avatar URL.
    pub image: String,
}

/// What is kept in session storage between page loads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredSession {
    /// Signed-in user.
    pub user: User,
    /// Bearer token sent with product requests.
    pub token: String,
}

/// Current authentication state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthState {
    user: Option<User>,
    token: Option<String>,
    is_authenticated: bool,
}

impl From<StoredSession> for AuthState {
    fn from(stored: StoredSession) -> Self {
        Self {
            user: Some(stored.user),
            token: Some(stored.token),
            is_authenticated: true,
        }
    }
}

impl AuthState {
    /// Rebuilds the state from the stored snapshot, if any.
    ///
    /// A snapshot that cannot be decoded is discarded and the user starts
    /// signed out.
    #[must_use]
    pub fn restore(stored: Option<&str>) -> Self {
        let Some(json) = stored else {
            return Self::default();
        };

        match serde_json::from_str::<StoredSession>(json) {
            Ok(session) => session.into(),
            Err(err) => {
                warn!(error = %err, "discarding undecodable session snapshot");
                Self::default()
            }
        }
    }

    /// Signs a user in.
    pub fn login(&mut self, user: User, token: String) {
        self.user = Some(user);
        self.token = Some(token);
        self.is_authenticated = true;
    }

    /// Signs the user out.
    pub fn logout(&mut self) {
        *self = Self::default();
    }

    /// Returns true if a user is signed in.
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.is_authenticated
    }

    /// Signed-in user.
    #[must_use]
    pub const fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    /// Session token.
    #[must_use]
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// `Authorization` header value for product requests.
    #[must_use]
    pub fn bearer(&self) -> Option<String> {
        self.token().map(|token| format!("Bearer {token}"))
    }

    /// JSON to keep in session storage; `None` means the entry should be
    /// removed.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Serialization`] if the snapshot cannot be
    /// serialized.
    pub fn snapshot(&self) -> AppResult<Option<String>> {
        match (&self.user, &self.token) {
            (Some(user), Some(token)) if self.is_authenticated => {
                let stored = StoredSession {
                    user: user.clone(),
                    token: token.clone(),
                };
                serde_json::to_string(&stored)
                    .map(Some)
                    .map_err(|err| AppError::Serialization(err.to_string()))
            }
            _ => Ok(None),
        }
    }
}
