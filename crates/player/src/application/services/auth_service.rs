//! Auth Service - e-mail-link login for the admin view

use std::sync::Arc;

use lorebook_domain::DomainError;

use crate::application::ServiceError;
use crate::ports::outbound::{AuthPort, AuthSession, AuthSubscription};

/// Login, logout and session queries for the admin view
#[derive(Clone)]
pub struct AuthService {
    auth: Arc<dyn AuthPort>,
    redirect_to: String,
}

impl AuthService {
    /// `redirect_to` is where the e-mailed link sends the user back to.
    pub fn new(auth: Arc<dyn AuthPort>, redirect_to: impl Into<String>) -> Self {
        Self {
            auth,
            redirect_to: redirect_to.into(),
        }
    }

    pub async fn current_session(&self) -> Result<Option<AuthSession>, ServiceError> {
        Ok(self.auth.current_session().await?)
    }

    pub fn subscribe(&self) -> AuthSubscription {
        self.auth.subscribe()
    }

    /// Ask the backend to e-mail a login link. No retry.
    pub async fn request_login_link(&self, email: &str) -> Result<(), ServiceError> {
        let email = email.trim();
        if email.is_empty() {
            return Err(DomainError::validation("Email is required.").into());
        }
        self.auth
            .request_login_link(email, &self.redirect_to)
            .await?;
        Ok(())
    }

    pub async fn complete_login(&self, redirect_url: &str) -> Result<AuthSession, ServiceError> {
        Ok(self.auth.complete_login(redirect_url).await?)
    }

    pub async fn sign_out(&self) -> Result<(), ServiceError> {
        Ok(self.auth.sign_out().await?)
    }
}
