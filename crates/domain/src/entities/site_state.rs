//! Site state - the singleton row holding the campaign's session counter

use serde::{Deserialize, Deserializer, Serialize};

use super::LoreEntry;

/// Global campaign state, read-only for this application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SiteState {
    /// Sessions played so far. A missing row or null column reads as 0.
    #[serde(default, deserialize_with = "null_as_zero")]
    pub current_session: i64,
}

fn null_as_zero<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    Ok(Option::<i64>::deserialize(deserializer)?.unwrap_or(0))
}

impl SiteState {
    pub fn new(current_session: i64) -> Self {
        Self { current_session }
    }

    /// Whether `entry` is unlocked at this session.
    ///
    /// Entries without an unlock session never pass, matching the backend's
    /// `unlock_session <= n` filter on a null column.
    pub fn unlocks(&self, entry: &LoreEntry) -> bool {
        entry
            .unlock_session
            .is_some_and(|unlock| unlock <= self.current_session)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unlocks_at_or_below_current_session() {
        let state = SiteState::new(2);
        let unlocked: Vec<i64> = [1, 2, 3]
            .into_iter()
            .filter(|n| state.unlocks(&LoreEntry::new(n.to_string(), "x").with_unlock_session(*n)))
            .collect();
        assert_eq!(unlocked, vec![1, 2]);
    }

    #[test]
    fn null_unlock_session_stays_locked() {
        assert!(!SiteState::new(100).unlocks(&LoreEntry::new("a", "x")));
    }

    #[test]
    fn null_current_session_reads_as_zero() {
        let state: SiteState = serde_json::from_str("{}").unwrap();
        assert_eq!(state.current_session, 0);
        let state: SiteState = serde_json::from_str(r#"{"current_session":null}"#).unwrap();
        assert_eq!(state.current_session, 0);
    }
}
