//! Service bundle for the presentation layer
//!
//! Views receive their application services through this bundle and never
//! see the backend adapter type.

use std::sync::Arc;

use crate::application::services::{AuthService, LoreAdminService, PlayerLoreService};
use crate::ports::outbound::{AuthPort, LoreStorePort};

#[derive(Clone)]
pub struct Services {
    pub auth: Arc<AuthService>,
    pub lore_admin: Arc<LoreAdminService>,
    pub player_lore: Arc<PlayerLoreService>,
}

impl Services {
    /// Build every service over the given ports.
    ///
    /// `redirect_to` is the admin view URL the login link returns to.
    pub fn new(
        store: Arc<dyn LoreStorePort>,
        auth: Arc<dyn AuthPort>,
        redirect_to: impl Into<String>,
    ) -> Self {
        Self {
            auth: Arc::new(AuthService::new(auth, redirect_to)),
            lore_admin: Arc::new(LoreAdminService::new(store.clone())),
            player_lore: Arc::new(PlayerLoreService::new(store)),
        }
    }
}
