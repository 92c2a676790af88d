//! Lore Admin Service - list, create and publish lore entries

use std::sync::Arc;

use lorebook_domain::{LoreId, LoreSummary, NewLoreEntry, Visibility};

use crate::application::ServiceError;
use crate::ports::outbound::LoreStorePort;

/// Admin-side lore management
#[derive(Clone)]
pub struct LoreAdminService {
    store: Arc<dyn LoreStorePort>,
}

impl LoreAdminService {
    pub fn new(store: Arc<dyn LoreStorePort>) -> Self {
        Self { store }
    }

    /// Every entry, newest first. No pagination.
    pub async fn list(&self) -> Result<Vec<LoreSummary>, ServiceError> {
        let entries = self.store.list_summaries().await?;
        tracing::debug!(count = entries.len(), "Loaded lore summaries");
        Ok(entries)
    }

    pub async fn create(&self, entry: &NewLoreEntry) -> Result<(), ServiceError> {
        self.store.insert(entry).await?;
        tracing::info!(title = %entry.title, visibility = %entry.visibility, "Lore created");
        Ok(())
    }

    /// Flip `current` and write it back. Returns the visibility written.
    ///
    /// The write is unconditional: whatever the row holds now is
    /// overwritten.
    pub async fn toggle_visibility(
        &self,
        id: &LoreId,
        current: Visibility,
    ) -> Result<Visibility, ServiceError> {
        let next = current.toggled();
        self.store.set_visibility(id, next).await?;
        tracing::info!(%id, visibility = %next, "Lore visibility changed");
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::outbound::{ApiError, MockLoreStorePort};
    use lorebook_domain::LoreTitle;

    #[tokio::test]
    async fn toggle_writes_flipped_visibility() {
        let mut store = MockLoreStorePort::new();
        store
            .expect_set_visibility()
            .withf(|id, v| id.as_str() == "7" && *v == Visibility::Private)
            .times(1)
            .returning(|_, _| Ok(()));

        let service = LoreAdminService::new(Arc::new(store));
        let written = service
            .toggle_visibility(&LoreId::new("7"), Visibility::Public)
            .await
            .unwrap();
        assert_eq!(written, Visibility::Private);
    }

    #[tokio::test]
    async fn create_forwards_payload() {
        let mut store = MockLoreStorePort::new();
        store
            .expect_insert()
            .withf(|e| e.title.as_str() == "Old Ruins" && e.visibility == Visibility::Private)
            .times(1)
            .returning(|_| Ok(()));

        let service = LoreAdminService::new(Arc::new(store));
        let entry = NewLoreEntry::new(LoreTitle::new("Old Ruins").unwrap(), Visibility::Private);
        service.create(&entry).await.unwrap();
    }

    #[tokio::test]
    async fn list_failure_is_an_api_error() {
        let mut store = MockLoreStorePort::new();
        store
            .expect_list_summaries()
            .returning(|| Err(ApiError::Request("connection refused".into())));

        let service = LoreAdminService::new(Arc::new(store));
        assert_eq!(
            service.list().await.unwrap_err(),
            ServiceError::Api(ApiError::Request("connection refused".into()))
        );
    }
}
