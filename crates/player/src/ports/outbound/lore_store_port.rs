//! Lore Store Port - table access on the hosted backend
//!
//! One method per query the views issue. Every list is unbounded: the
//! backend returns all matching rows in `created_at` descending order.

use async_trait::async_trait;
use lorebook_domain::{LoreEntry, LoreId, LoreSummary, NewLoreEntry, SiteState, Visibility};

use super::ApiError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoreStorePort: Send + Sync {
    /// `id, title, visibility` of every entry, newest first.
    async fn list_summaries(&self) -> Result<Vec<LoreSummary>, ApiError>;

    /// Insert one row.
    async fn insert(&self, entry: &NewLoreEntry) -> Result<(), ApiError>;

    /// Overwrite the visibility of one row. Last write wins.
    async fn set_visibility(&self, id: &LoreId, visibility: Visibility) -> Result<(), ApiError>;

    /// The singleton site state row, if present.
    async fn site_state(&self) -> Result<Option<SiteState>, ApiError>;

    /// Public entries with `unlock_session <= current_session`, newest first.
    async fn list_unlocked(&self, current_session: i64) -> Result<Vec<LoreEntry>, ApiError>;
}
