//! Auth Port - passwordless e-mail-link login against the hosted backend
//!
//! The flow has three legs:
//! 1. `request_login_link` asks the backend to e-mail a one-time link that
//!    redirects back into the admin view.
//! 2. The user follows the link; the backend redirects with the session
//!    tokens in the URL fragment.
//! 3. `complete_login` turns that redirect URL into a verified session.
//!
//! Session changes are broadcast to every [`AuthSubscription`]; dropping a
//! subscription unsubscribes it.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use super::{ApiError, AuthError};

/// The signed-in user as reported by the auth API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
}

/// A live auth session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthSession {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_at: DateTime<Utc>,
    pub user: AuthUser,
}

impl AuthSession {
    /// Whether the access token expires within `margin_secs` of `now`.
    pub fn expires_within(&self, now: DateTime<Utc>, margin_secs: i64) -> bool {
        self.expires_at.signed_duration_since(now).num_seconds() <= margin_secs
    }
}

/// Session-change notification
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthChange {
    SignedIn(AuthSession),
    TokenRefreshed(AuthSession),
    SignedOut,
}

impl AuthChange {
    /// The session after this change, if any.
    pub fn session(&self) -> Option<&AuthSession> {
        match self {
            AuthChange::SignedIn(s) | AuthChange::TokenRefreshed(s) => Some(s),
            AuthChange::SignedOut => None,
        }
    }
}

/// Receiving end of the session-change channel.
///
/// Held for the lifetime of a view; dropping it unsubscribes.
pub struct AuthSubscription {
    receiver: broadcast::Receiver<AuthChange>,
}

impl AuthSubscription {
    pub fn new(receiver: broadcast::Receiver<AuthChange>) -> Self {
        Self { receiver }
    }

    /// Wait for the next change. Returns `None` once the sender is gone.
    ///
    /// Lagged notifications are skipped; only the latest state matters.
    pub async fn recv(&mut self) -> Option<AuthChange> {
        loop {
            match self.receiver.recv().await {
                Ok(change) => return Some(change),
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    tracing::debug!(skipped, "Auth subscription lagged");
                }
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }

    /// Take a pending change without waiting.
    pub fn try_recv(&mut self) -> Option<AuthChange> {
        loop {
            match self.receiver.try_recv() {
                Ok(change) => return Some(change),
                Err(broadcast::error::TryRecvError::Lagged(_)) => continue,
                Err(_) => return None,
            }
        }
    }

    /// Explicit unsubscribe; equivalent to dropping.
    pub fn unsubscribe(self) {}
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AuthPort: Send + Sync {
    /// The current session, refreshed first if it is about to expire.
    async fn current_session(&self) -> Result<Option<AuthSession>, AuthError>;

    /// Subscribe to session changes.
    fn subscribe(&self) -> AuthSubscription;

    /// Ask the backend to e-mail a one-time login link redirecting to `redirect_to`.
    async fn request_login_link(&self, email: &str, redirect_to: &str) -> Result<(), ApiError>;

    /// Complete the e-mail-link flow from the URL the link redirected to.
    async fn complete_login(&self, redirect_url: &str) -> Result<AuthSession, AuthError>;

    /// End the session locally and on the backend.
    async fn sign_out(&self) -> Result<(), AuthError>;
}
