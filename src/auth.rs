//! Auth-session state shared by every view of the client.
//!
//! SYSTEM CONTEXT
//! ==============
//! Views decide what is reachable from `is_logged_in` and attach the token to
//! authorized calls. The context is passed explicitly; it is only written by
//! `login` and `logout`. Subscribers are woken on every change.
//!
//! The session lives in memory only and does not survive a restart.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use std::sync::Arc;

use tokio::sync::watch;

/// Identity and bearer token of the current user.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AuthSession {
    pub user_id: Option<String>,
    pub token: Option<String>,
}

impl AuthSession {
    #[must_use]
    pub fn is_logged_in(&self) -> bool {
        self.token.is_some()
    }
}

/// Cloneable handle to the shared session.
#[derive(Clone, Debug)]
pub struct AuthContext {
    tx: Arc<watch::Sender<AuthSession>>,
}

impl Default for AuthContext {
    fn default() -> Self {
        Self::new()
    }
}

impl AuthContext {
    #[must_use]
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(AuthSession::default());
        Self { tx: Arc::new(tx) }
    }

    pub fn login(&self, user_id: impl Into<String>, token: impl Into<String>) {
        let user_id = user_id.into();
        tracing::info!(%user_id, "logged in");
        self.tx.send_replace(AuthSession { user_id: Some(user_id), token: Some(token.into()) });
    }

    pub fn logout(&self) {
        let previous = self.tx.send_replace(AuthSession::default());
        if let Some(user_id) = previous.user_id {
            tracing::info!(%user_id, "logged out");
        }
    }

    #[must_use]
    pub fn session(&self) -> AuthSession {
        self.tx.borrow().clone()
    }

    #[must_use]
    pub fn is_logged_in(&self) -> bool {
        self.tx.borrow().is_logged_in()
    }

    #[must_use]
    pub fn user_id(&self) -> Option<String> {
        self.tx.borrow().user_id.clone()
    }

    #[must_use]
    pub fn token(&self) -> Option<String> {
        self.tx.borrow().token.clone()
    }

    /// Receiver that observes every subsequent login/logout.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<AuthSession> {
        self.tx.subscribe()
    }
}
