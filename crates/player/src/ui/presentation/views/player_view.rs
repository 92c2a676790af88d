//! Player view - load once, then filter in memory

use std::sync::Arc;

use crate::application::services::PlayerLoreService;
use crate::application::ServiceError;
use crate::ui::presentation::state::PlayerState;

pub struct PlayerView {
    service: Option<Arc<PlayerLoreService>>,
    state: PlayerState,
    loaded: bool,
}

impl PlayerView {
    /// `None` when no backend client exists; loading then fails.
    pub fn new(service: Option<Arc<PlayerLoreService>>) -> Self {
        Self {
            service,
            state: PlayerState::new(),
            loaded: false,
        }
    }

    pub fn state(&self) -> &PlayerState {
        &self.state
    }

    /// Filter inputs; changing them never refetches.
    pub fn state_mut(&mut self) -> &mut PlayerState {
        &mut self.state
    }

    /// Initial load. Runs at most once; any failure is terminal.
    pub async fn load(&mut self) {
        if self.loaded {
            return;
        }
        self.loaded = true;

        let Some(service) = self.service.clone() else {
            self.state.set_failed(ServiceError::Unavailable.to_string());
            return;
        };

        match service.load().await {
            Ok(entries) => self.state.set_loaded(entries),
            Err(e) => {
                tracing::warn!("Player lore load failed: {}", e);
                self.state.set_failed(e.to_string());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::outbound::{ApiError, MockLoreStorePort};
    use crate::ui::presentation::state::LoadState;
    use lorebook_domain::{LoreEntry, SiteState};

    fn service(store: MockLoreStorePort) -> Option<Arc<PlayerLoreService>> {
        Some(Arc::new(PlayerLoreService::new(Arc::new(store))))
    }

    #[tokio::test]
    async fn missing_client_is_terminal_error() {
        let mut view = PlayerView::new(None);
        view.load().await;
        assert_eq!(
            view.state().load_state(),
            &LoadState::Failed("Backend client unavailable".into())
        );
    }

    #[tokio::test]
    async fn site_state_failure_is_terminal() {
        let mut store = MockLoreStorePort::new();
        store
            .expect_site_state()
            .returning(|| Err(ApiError::backend(500, "relation \"site_state\" does not exist")));
        store.expect_list_unlocked().never();

        let mut view = PlayerView::new(service(store));
        view.load().await;
        assert_eq!(
            view.state().load_state(),
            &LoadState::Failed("relation \"site_state\" does not exist".into())
        );
    }

    #[tokio::test]
    async fn filtering_never_refetches() {
        let mut store = MockLoreStorePort::new();
        store
            .expect_site_state()
            .times(1)
            .returning(|| Ok(Some(SiteState::new(2))));
        store.expect_list_unlocked().times(1).returning(|_| {
            Ok(vec![
                LoreEntry::new("1", "Old Ruins")
                    .with_kind("location")
                    .with_unlock_session(1),
                LoreEntry::new("2", "Dragon King")
                    .with_kind("npc")
                    .with_tags(["Relic"])
                    .with_unlock_session(2),
            ])
        });

        let mut view = PlayerView::new(service(store));
        view.load().await;
        view.load().await;

        view.state_mut().set_kind("npc");
        view.state_mut().select_tag("relic");
        view.state_mut().set_search("king");
        assert_eq!(view.state().visible().len(), 1);

        view.state_mut().clear_filters();
        assert_eq!(view.state().visible().len(), 2);
    }
}
