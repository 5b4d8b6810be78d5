//! Application session state.
//!
//! The state starts `Uninitialized` and only leaves it through [`AppState::hydrate`],
//! which reads the session cookie. Nothing moves it back, so route guards can
//! hold off rendering until storage has been read exactly once.

use chrono::Utc;
use expapp_shared::AppError;
use thiserror::Error;
use tracing::{debug, info};

use super::password::{PasswordError, verify_password};
use crate::models::{SessionRecord, User};
use crate::store::{CookieJar, CookieStore, StoreError};

/// Who the application believes is logged in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum AuthState {
    /// Storage has not been read yet.
    #[default]
    Uninitialized,
    /// A session record exists for a known user.
    Authenticated(User),
    /// No usable session record.
    Anonymous,
}

/// Errors from login and logout.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Unknown email or wrong password.
    #[error("invalid email or password")]
    InvalidCredentials,

    /// The session cookie could not be written or removed.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// A stored password hash is malformed.
    #[error(transparent)]
    Password(#[from] PasswordError),
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidCredentials => Self::Unauthorized(err.to_string()),
            AuthError::Store(e) => e.into(),
            AuthError::Password(e) => Self::Internal(e.to_string()),
        }
    }
}

/// Application state passed explicitly to guards and pages.
#[derive(Debug, Default)]
pub struct AppState {
    auth: AuthState,
}

impl AppState {
    /// Creates an uninitialized state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current authentication state.
    #[must_use]
    pub const fn auth(&self) -> &AuthState {
        &self.auth
    }

    /// Returns true once storage has been read.
    #[must_use]
    pub fn is_initialized(&self) -> bool {
        !matches!(self.auth, AuthState::Uninitialized)
    }

    /// Returns true if a user is logged in.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        matches!(self.auth, AuthState::Authenticated(_))
    }

    /// The logged-in user.
    #[must_use]
    pub fn current_user(&self) -> Option<&User> {
        match &self.auth {
            AuthState::Authenticated(user) => Some(user),
            _ => None,
        }
    }

    /// Reads the session cookie and resolves it against the users collection.
    ///
    /// A session pointing at a user that no longer exists hydrates as anonymous.
    pub fn hydrate<J: CookieJar>(&mut self, store: &CookieStore<J>) -> &AuthState {
        self.auth = match store.session() {
            Some(session) => match store.users().into_iter().find(|u| u.id == session.user_id) {
                Some(user) => AuthState::Authenticated(user),
                None => {
                    debug!(user_id = %session.user_id, "Session refers to unknown user");
                    AuthState::Anonymous
                }
            },
            None => AuthState::Anonymous,
        };
        debug!(authenticated = self.is_authenticated(), "Hydrated app state");
        &self.auth
    }

    /// Checks credentials against the users collection and opens a session.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` for an unknown email or wrong
    /// password, or a store error if the session cookie cannot be written.
    pub fn login<J: CookieJar>(
        &mut self,
        store: &mut CookieStore<J>,
        email: &str,
        password: &str,
    ) -> Result<User, AuthError> {
        let user = store
            .users()
            .into_iter()
            .find(|u| u.has_email(email))
            .ok_or(AuthError::InvalidCredentials)?;

        if !verify_password(password, &user.password_hash)? {
            return Err(AuthError::InvalidCredentials);
        }

        store.set_session(&SessionRecord::open(user.id, Utc::now()))?;
        info!(user_id = %user.id, role = %user.role, "User logged in");
        self.auth = AuthState::Authenticated(user.clone());
        Ok(user)
    }

    /// Removes the session record.
    pub fn logout<J: CookieJar>(&mut self, store: &mut CookieStore<J>) -> Result<(), AuthError> {
        store.clear_session()?;
        if let Some(user) = self.current_user() {
            info!(user_id = %user.id, "User logged out");
        }
        self.auth = AuthState::Anonymous;
        Ok(())
    }
}
