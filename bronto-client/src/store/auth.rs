//! Session lifecycle: register, login, logout.

use crate::client::ApiClient;
use crate::error::BrontoResult;
use crate::model::User;

/// Where the client stands with the remote identity service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthState {
    Anonymous,
    Authenticating,
    Authenticated(User),
}

/// Owns the current user identity and the session token lifecycle.
///
/// A reloaded client may find a token already in the durable slot; the
/// token is trusted speculatively, but no user identity is derived from it
/// until the user authenticates again (see `has_session_token`).
pub struct AuthStore {
    api: ApiClient,
    state: AuthState,
    error: Option<String>,
}

impl AuthStore {
    pub fn new(api: ApiClient) -> Self {
        AuthStore {
            api,
            state: AuthState::Anonymous,
            error: None,
        }
    }

    pub fn state(&self) -> &AuthState {
        &self.state
    }

    pub fn user(&self) -> Option<&User> {
        match &self.state {
            AuthState::Authenticated(user) => Some(user),
            _ => None,
        }
    }

    pub fn user_id(&self) -> Option<&str> {
        self.user().map(|u| u.id.as_str())
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self.state, AuthState::Authenticated(_))
    }

    /// True when the durable slot holds a token (for example after a
    /// restart), whether or not a user identity is known.
    pub fn has_session_token(&self) -> bool {
        self.api.session().load().is_some()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    /// Create an account, then a session for it. On success the token is
    /// in the durable slot and the store is `Authenticated`.
    pub async fn register(&mut self, username: &str, password: &str) -> BrontoResult<User> {
        self.error = None;
        self.state = AuthState::Authenticating;

        match self.establish(username, password, true).await {
            Ok(user) => {
                self.state = AuthState::Authenticated(user.clone());
                Ok(user)
            }
            Err(e) => {
                self.state = AuthState::Anonymous;
                self.error = Some(e.display_message("Registration failed"));
                Err(e)
            }
        }
    }

    /// Authenticate an existing account; otherwise identical to `register`.
    pub async fn login(&mut self, username: &str, password: &str) -> BrontoResult<User> {
        self.error = None;
        self.state = AuthState::Authenticating;

        match self.establish(username, password, false).await {
            Ok(user) => {
                self.state = AuthState::Authenticated(user.clone());
                Ok(user)
            }
            Err(e) => {
                self.state = AuthState::Anonymous;
                self.error = Some(e.display_message("Login failed"));
                Err(e)
            }
        }
    }

    async fn establish(&self, username: &str, password: &str, register: bool) -> BrontoResult<User> {
        let response = if register {
            self.api.register(username, password).await?
        } else {
            self.api.authenticate(username, password).await?
        };

        let session = self.api.create_session(&response.user).await?;
        self.api.session().save(&session.session)?;

        // The API only returns the user id; the username is what we sent.
        Ok(User {
            id: response.user,
            username: username.to_string(),
        })
    }

    /// Drop the session. The remote delete is best-effort: whatever the
    /// network does, the in-memory identity and the durable token are gone
    /// when this returns.
    pub async fn logout(&mut self) -> BrontoResult<()> {
        if let Some(token) = self.api.session().load() {
            if let Err(e) = self.api.delete_session(&token).await {
                tracing::warn!("remote session delete failed, clearing locally anyway: {e}");
            }
        }

        self.state = AuthState::Anonymous;
        self.error = None;
        self.api.session().clear()
    }
}
