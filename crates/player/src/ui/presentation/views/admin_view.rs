//! Admin view - sign in, then list, create and publish lore
//!
//! Session changes arrive on an [`AuthSubscription`] held from `mount` to
//! `teardown`. Any change that carries a session marks the view
//! authenticated and reloads the list; a sign-out empties it.

use std::sync::Arc;

use lorebook_domain::{LoreId, Visibility};

use crate::application::services::{AuthService, LoreAdminService};
use crate::ports::outbound::{AuthChange, AuthSession, AuthSubscription};
use crate::ui::presentation::state::{AdminMessage, AdminState, AuthStatus};
use crate::ui::presentation::Services;

const LINK_SENT: &str = "Check your email for the login link.";
const LORE_CREATED: &str = "Lore created.";

pub struct AdminView {
    auth: Arc<AuthService>,
    lore: Arc<LoreAdminService>,
    state: AdminState,
    subscription: Option<AuthSubscription>,
}

impl AdminView {
    pub fn new(services: &Services) -> Self {
        Self {
            auth: services.auth.clone(),
            lore: services.lore_admin.clone(),
            state: AdminState::new(),
            subscription: None,
        }
    }

    pub fn state(&self) -> &AdminState {
        &self.state
    }

    /// Form and e-mail fields are edited in place by the front end.
    pub fn state_mut(&mut self) -> &mut AdminState {
        &mut self.state
    }

    /// Subscribe to session changes and check the current session once.
    pub async fn mount(&mut self) {
        self.subscription = Some(self.auth.subscribe());

        match self.auth.current_session().await {
            Ok(Some(session)) => self.become_authenticated(&session).await,
            Ok(None) => self.state.auth = AuthStatus::Unauthenticated,
            Err(e) => {
                tracing::warn!("Session check failed: {}", e);
                self.state.set_message(AdminMessage::error(&e));
            }
        }
    }

    /// Drop the subscription. The view stops reacting to session changes.
    pub fn teardown(&mut self) {
        if let Some(subscription) = self.subscription.take() {
            subscription.unsubscribe();
        }
    }

    /// Wait for the next session change; pends forever when not mounted.
    pub async fn next_auth_change(&mut self) -> Option<AuthChange> {
        match self.subscription.as_mut() {
            Some(subscription) => subscription.recv().await,
            None => std::future::pending().await,
        }
    }

    pub async fn handle_auth_change(&mut self, change: AuthChange) {
        match change.session() {
            Some(session) => {
                let session = session.clone();
                self.become_authenticated(&session).await;
            }
            None => {
                tracing::info!("Admin view signed out");
                self.state.sign_out();
            }
        }
    }

    /// Apply changes already queued on the subscription.
    pub async fn process_pending_auth_changes(&mut self) {
        while let Some(change) = self.subscription.as_mut().and_then(|s| s.try_recv()) {
            self.handle_auth_change(change).await;
        }
    }

    async fn become_authenticated(&mut self, session: &AuthSession) {
        self.state.auth = AuthStatus::Authenticated {
            email: session.user.email.clone(),
        };
        self.refresh().await;
    }

    pub async fn request_login_link(&mut self) {
        self.state.clear_message();
        let email = self.state.email.clone();
        let message = match self.auth.request_login_link(&email).await {
            Ok(()) => AdminMessage::new(LINK_SENT),
            Err(e) => AdminMessage::error(&e),
        };
        self.state.set_message(message);
    }

    /// Finish the e-mail-link flow from the URL the link opened.
    pub async fn complete_login(&mut self, redirect_url: &str) {
        self.state.clear_message();
        match self.auth.complete_login(redirect_url).await {
            Ok(_) => self.process_pending_auth_changes().await,
            Err(e) => self.state.set_message(AdminMessage::error(&e)),
        }
    }

    pub async fn sign_out(&mut self) {
        match self.auth.sign_out().await {
            Ok(()) => {
                self.state.clear_message();
                self.process_pending_auth_changes().await;
                // Already signed out locally even without a notification
                self.state.sign_out();
            }
            Err(e) => self.state.set_message(AdminMessage::error(&e)),
        }
    }

    /// Reload the full list. Failure leaves the previous list in place.
    pub async fn refresh(&mut self) {
        match self.lore.list().await {
            Ok(entries) => self.state.entries = entries,
            Err(e) => {
                tracing::warn!("Lore list failed: {}", e);
                self.state.set_message(AdminMessage::error(&e));
            }
        }
    }

    /// Create from the current form. A blank title never reaches the backend.
    pub async fn create(&mut self) {
        self.state.saving = true;
        self.state.clear_message();

        let entry = match self.state.form.to_new_entry() {
            Ok(entry) => entry,
            Err(e) => {
                self.state.set_message(AdminMessage::new(e.to_string()));
                self.state.saving = false;
                return;
            }
        };

        let result = self.lore.create(&entry).await;
        self.state.saving = false;
        if let Err(e) = result {
            self.state
                .set_message(AdminMessage::new(format!("Create failed: {}", e)));
            return;
        }

        self.state.form.reset();
        self.refresh().await;
        self.state.set_message(AdminMessage::new(LORE_CREATED));
    }

    /// Flip one entry's visibility, then reload. Last write wins.
    pub async fn toggle_visibility(&mut self, id: &LoreId, current: Visibility) {
        match self.lore.toggle_visibility(id, current).await {
            Ok(_) => self.refresh().await,
            Err(e) => self
                .state
                .set_message(AdminMessage::new(format!("Update failed: {}", e))),
        }
    }
}

impl Drop for AdminView {
    fn drop(&mut self) {
        self.teardown();
    }
}
