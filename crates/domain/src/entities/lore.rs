//! Lore entity - game-world narrative content with visibility and unlock gating
//!
//! Rows live in the backend's `lore` table. The backend assigns `id` and
//! `created_at`; this crate never mutates an entry in place. Three shapes
//! exist because each view selects a different projection:
//! - [`LoreSummary`] - the admin list row (`id, title, visibility`)
//! - [`LoreEntry`] - the player row (everything except `body`, usually)
//! - [`NewLoreEntry`] - the insert payload

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::ids::LoreId;
use crate::value_objects::LoreTitle;

/// Kind assumed for entries stored without one.
pub const DEFAULT_KIND: &str = "misc";

/// Whether players may ever see an entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    /// Player-eligible once unlocked
    #[default]
    Public,
    /// Admin-only
    Private,
}

impl Visibility {
    /// The other visibility (`public` <-> `private`).
    pub fn toggled(self) -> Self {
        match self {
            Visibility::Public => Visibility::Private,
            Visibility::Private => Visibility::Public,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Visibility::Public => "public",
            Visibility::Private => "private",
        }
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Visibility {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "public" => Ok(Visibility::Public),
            "private" => Ok(Visibility::Private),
            other => Err(DomainError::parse(format!(
                "unknown visibility '{other}' (expected public or private)"
            ))),
        }
    }
}

/// Admin list row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoreSummary {
    pub id: LoreId,
    pub title: String,
    pub visibility: Visibility,
}

/// A lore entry as read by the player view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoreEntry {
    pub id: LoreId,
    pub title: String,
    #[serde(default)]
    pub summary: Option<String>,
    /// Admin-only; the player projection never selects it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    #[serde(default)]
    pub unlock_session: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl LoreEntry {
    pub fn new(id: impl Into<LoreId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            summary: None,
            body: None,
            kind: None,
            tags: None,
            unlock_session: None,
            created_at: None,
        }
    }

    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }

    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = Some(tags.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_unlock_session(mut self, session: i64) -> Self {
        self.unlock_session = Some(session);
        self
    }

    /// Kind used for filtering and the kind vocabulary: the stored kind, or
    /// [`DEFAULT_KIND`] when none is stored.
    pub fn effective_kind(&self) -> &str {
        self.kind.as_deref().unwrap_or(DEFAULT_KIND)
    }

    /// Tags as a slice; absent tags are an empty list.
    pub fn tags(&self) -> &[String] {
        self.tags.as_deref().unwrap_or(&[])
    }

    /// Whether any tag equals `tag`, ignoring case.
    pub fn has_tag(&self, tag: &str) -> bool {
        let wanted = tag.to_lowercase();
        self.tags().iter().any(|t| t.to_lowercase() == wanted)
    }

    /// Lower-cased `"{title} {summary} {tags...}"` used by free-text search.
    pub fn search_haystack(&self) -> String {
        format!(
            "{} {} {}",
            self.title,
            self.summary.as_deref().unwrap_or(""),
            self.tags().join(" ")
        )
        .to_lowercase()
    }
}

/// Insert payload for a new lore entry
///
/// Optional extras are left out of the payload when unset so the backend's
/// column defaults apply.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewLoreEntry {
    pub title: LoreTitle,
    pub summary: String,
    pub body: String,
    pub visibility: Visibility,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unlock_session: Option<i64>,
}

impl NewLoreEntry {
    pub fn new(title: LoreTitle, visibility: Visibility) -> Self {
        Self {
            title,
            summary: String::new(),
            body: String::new(),
            visibility,
            kind: None,
            tags: None,
            unlock_session: None,
        }
    }

    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = summary.into();
        self
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = Some(tags);
        self
    }

    pub fn with_unlock_session(mut self, session: i64) -> Self {
        self.unlock_session = Some(session);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn visibility_round_trips_lowercase() {
        assert_eq!(serde_json::to_string(&Visibility::Private).unwrap(), "\"private\"");
        let v: Visibility = serde_json::from_str("\"public\"").unwrap();
        assert_eq!(v, Visibility::Public);
        assert_eq!(Visibility::Public.toggled(), Visibility::Private);
        assert_eq!(Visibility::Private.toggled(), Visibility::Public);
    }

    #[test]
    fn visibility_parses_user_input() {
        assert_eq!("PRIVATE".parse::<Visibility>().unwrap(), Visibility::Private);
        assert!("hidden".parse::<Visibility>().is_err());
    }

    #[test]
    fn player_row_with_nulls_deserializes() {
        let row = serde_json::json!({
            "id": "a1",
            "title": "Old Ruins",
            "summary": null,
            "kind": null,
            "tags": null,
            "unlock_session": 0
        });
        let entry: LoreEntry = serde_json::from_value(row).unwrap();
        assert_eq!(entry.effective_kind(), "misc");
        assert!(entry.tags().is_empty());
        assert_eq!(entry.unlock_session, Some(0));
    }

    #[test]
    fn haystack_joins_title_summary_and_tags() {
        let entry = LoreEntry::new("a1", "Dragon King")
            .with_summary("Rules the Ash Peaks")
            .with_tags(["Boss", "npc"]);
        assert_eq!(entry.search_haystack(), "dragon king rules the ash peaks boss npc");
    }

    #[test]
    fn new_entry_payload_omits_unset_extras() {
        let payload = NewLoreEntry::new(LoreTitle::new("Old Ruins").unwrap(), Visibility::Public)
            .with_summary("Crumbling walls");
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "title": "Old Ruins",
                "summary": "Crumbling walls",
                "body": "",
                "visibility": "public"
            })
        );
    }
}
