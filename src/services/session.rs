//! Session context: the current user and bearer token
//!
//! The token and the user profile are persisted through a [`KeyValueStore`]
//! so that a session survives restarts. [`SessionContext::restore`] is the
//! start-up reconciliation step: it reloads the token and re-fetches the
//! profile it belongs to.

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::{
    api::LibraryApi,
    error::AppResult,
    models::User,
    services::storage::{KeyValueStore, TOKEN_KEY, USER_KEY},
};

/// In-memory view of the session
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    pub user: Option<User>,
    pub token: Option<String>,
}

impl Session {
    /// A session exists once the user profile is known
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some() && self.token.is_some()
    }

    /// User and token together, when both are present
    pub fn credentials(&self) -> Option<(&User, &str)> {
        match (&self.user, &self.token) {
            (Some(user), Some(token)) => Some((user, token.as_str())),
            _ => None,
        }
    }
}

/// Outcome of start-up reconciliation
#[derive(Debug, Clone, PartialEq)]
pub enum Restored {
    /// No token was persisted
    Anonymous,
    /// The persisted token is valid; the profile was re-fetched
    Authenticated(User),
    /// The service refused the persisted token; it was discarded
    Rejected,
}

pub struct SessionContext {
    state: RwLock<Session>,
    store: Arc<dyn KeyValueStore>,
}

impl SessionContext {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            state: RwLock::new(Session::default()),
            store,
        }
    }

    /// Copy of the current session
    pub async fn snapshot(&self) -> Session {
        self.state.read().await.clone()
    }

    pub async fn user(&self) -> Option<User> {
        self.state.read().await.user.clone()
    }

    pub async fn token(&self) -> Option<String> {
        self.state.read().await.token.clone()
    }

    pub async fn is_authenticated(&self) -> bool {
        self.state.read().await.is_authenticated()
    }

    /// Start a session for `user`, persisting the token and profile.
    ///
    /// The in-memory session is set even if persisting fails; the failure
    /// is logged and the session simply won't survive a restart.
    pub async fn login(&self, user: User, token: String) {
        if let Err(e) = self.persist(&user, &token) {
            tracing::warn!("Could not persist session: {}", e);
        }

        tracing::info!("Session started for user {}", user.id);
        let mut state = self.state.write().await;
        state.user = Some(user);
        state.token = Some(token);
    }

    /// End the session, clearing memory and storage
    pub async fn logout(&self) -> AppResult<()> {
        {
            let mut state = self.state.write().await;
            *state = Session::default();
        }

        // Both keys are attempted; the first failure is reported.
        let token = self.store.remove(TOKEN_KEY);
        let user = self.store.remove(USER_KEY);
        token.and(user)?;
        tracing::info!("Session cleared");
        Ok(())
    }

    /// Reload the persisted token and re-fetch its profile.
    ///
    /// A token the service rejects (401/403) is discarded. Any other failure
    /// keeps the token in memory and storage, leaves the user unset, and is
    /// returned to the caller.
    pub async fn restore(&self, api: &dyn LibraryApi) -> AppResult<Restored> {
        let Some(token) = self.store.get(TOKEN_KEY)? else {
            tracing::debug!("No persisted session");
            return Ok(Restored::Anonymous);
        };

        match api.current_user(&token).await {
            Ok(user) => {
                self.login(user.clone(), token).await;
                Ok(Restored::Authenticated(user))
            }
            Err(e) if e.is_unauthorized() => {
                tracing::info!("Persisted token rejected by the service, discarding it");
                self.logout().await?;
                Ok(Restored::Rejected)
            }
            Err(e) => {
                self.state.write().await.token = Some(token);
                Err(e)
            }
        }
    }

    fn persist(&self, user: &User, token: &str) -> AppResult<()> {
        self.store.set(TOKEN_KEY, token)?;
        self.store.set(USER_KEY, &serde_json::to_string(user)?)?;
        Ok(())
    }
}
