//! Player Lore Service - one-shot load of the unlocked public lore

use std::sync::Arc;

use lorebook_domain::LoreEntry;

use crate::application::ServiceError;
use crate::ports::outbound::LoreStorePort;

#[derive(Clone)]
pub struct PlayerLoreService {
    store: Arc<dyn LoreStorePort>,
}

impl PlayerLoreService {
    pub fn new(store: Arc<dyn LoreStorePort>) -> Self {
        Self { store }
    }

    /// Public entries unlocked at the current session, newest first.
    ///
    /// A missing site state row counts as session 0.
    pub async fn load(&self) -> Result<Vec<LoreEntry>, ServiceError> {
        let state = self.store.site_state().await?.unwrap_or_default();
        tracing::debug!(current_session = state.current_session, "Read site state");

        let entries = self.store.list_unlocked(state.current_session).await?;
        // Rows above the threshold or without one never reach the player
        let entries: Vec<LoreEntry> = entries
            .into_iter()
            .filter(|entry| state.unlocks(entry))
            .collect();

        tracing::info!(
            count = entries.len(),
            current_session = state.current_session,
            "Loaded unlocked lore"
        );
        Ok(entries)
    }
}
