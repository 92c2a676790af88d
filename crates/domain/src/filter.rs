//! Player-side lore filtering
//!
//! The player view loads its base set once and narrows it in memory. Three
//! independent predicates compose conjunctively:
//!
//! 1. kind - exact, case-sensitive match on [`LoreEntry::effective_kind`]
//!    unless the selection is [`ALL_KINDS`]
//! 2. tag - case-insensitive membership in the entry's tags
//! 3. search - case-insensitive substring of the title/summary/tags haystack
//!
//! Nothing here talks to the backend; filtering is a pure projection.

use std::collections::BTreeSet;

use crate::entities::LoreEntry;

/// Sentinel kind selection meaning "no kind filter".
pub const ALL_KINDS: &str = "all";

/// Selected kind filter
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum KindFilter {
    #[default]
    All,
    Only(String),
}

impl KindFilter {
    /// Build from a vocabulary value; `"all"` maps to [`KindFilter::All`].
    pub fn from_selection(value: impl Into<String>) -> Self {
        let value = value.into();
        if value == ALL_KINDS {
            KindFilter::All
        } else {
            KindFilter::Only(value)
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            KindFilter::All => ALL_KINDS,
            KindFilter::Only(kind) => kind,
        }
    }

    fn matches(&self, entry: &LoreEntry) -> bool {
        match self {
            KindFilter::All => true,
            KindFilter::Only(kind) => entry.effective_kind() == kind,
        }
    }
}

/// Current filter inputs of the player view
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LoreFilter {
    /// Raw search text as typed; trimmed when matching
    pub search: String,
    pub kind: KindFilter,
    /// Active tag chip, if any
    pub tag: Option<String>,
}

impl LoreFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// True when no predicate narrows the base set.
    pub fn is_empty(&self) -> bool {
        self.search.trim().is_empty() && self.kind == KindFilter::All && self.tag.is_none()
    }

    /// Reset search text, kind and tag in one step.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Whether `entry` passes all three predicates.
    pub fn matches(&self, entry: &LoreEntry) -> bool {
        if !self.kind.matches(entry) {
            return false;
        }

        if let Some(tag) = self.tag.as_deref().filter(|t| !t.is_empty()) {
            if !entry.has_tag(tag) {
                return false;
            }
        }

        let needle = self.search.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }
        entry.search_haystack().contains(&needle)
    }

    /// Entries of `base` that pass, in base-set order.
    pub fn apply<'a>(&self, base: &'a [LoreEntry]) -> Vec<&'a LoreEntry> {
        base.iter().filter(|entry| self.matches(entry)).collect()
    }
}

/// Selectable kinds for a base set: `"all"` followed by every distinct
/// effective kind, sorted.
pub fn kind_vocabulary(base: &[LoreEntry]) -> Vec<String> {
    let kinds: BTreeSet<&str> = base.iter().map(LoreEntry::effective_kind).collect();
    std::iter::once(ALL_KINDS)
        .chain(kinds)
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    impl LoreFilter {
        fn with_search(mut self, search: impl Into<String>) -> Self {
            self.search = search.into();
            self
        }

        fn with_kind(mut self, kind: impl Into<String>) -> Self {
            self.kind = KindFilter::from_selection(kind);
            self
        }

        fn with_tag(mut self, tag: impl Into<String>) -> Self {
            self.tag = Some(tag.into());
            self
        }
    }

    fn titles(entries: &[&LoreEntry]) -> Vec<String> {
        entries.iter().map(|e| e.title.clone()).collect()
    }

    fn ruins_and_king() -> Vec<LoreEntry> {
        vec![
            LoreEntry::new("1", "Old Ruins")
                .with_kind("location")
                .with_tags(["relic", "ancient"]),
            LoreEntry::new("2", "Dragon King")
                .with_kind("npc")
                .with_tags(["boss"]),
        ]
    }

    #[test]
    fn kind_then_search_then_contradictory_kind() {
        let base = ruins_and_king();
        let mut filter = LoreFilter::new().with_kind("npc");
        assert_eq!(titles(&filter.apply(&base)), vec!["Dragon King"]);

        filter.search = "king".into();
        assert_eq!(titles(&filter.apply(&base)), vec!["Dragon King"]);

        filter.kind = KindFilter::from_selection("location");
        assert!(filter.apply(&base).is_empty());

        filter.search.clear();
        assert_eq!(titles(&filter.apply(&base)), vec!["Old Ruins"]);
    }

    #[test]
    fn absent_kind_filters_as_misc() {
        let base = vec![
            LoreEntry::new("1", "Loose Note"),
            LoreEntry::new("2", "Tavern").with_kind("location"),
        ];
        let filter = LoreFilter::new().with_kind("misc");
        assert_eq!(titles(&filter.apply(&base)), vec!["Loose Note"]);
    }

    #[test]
    fn kind_match_is_case_sensitive() {
        let base = vec![LoreEntry::new("1", "Tavern").with_kind("Location")];
        assert!(LoreFilter::new().with_kind("location").apply(&base).is_empty());
    }

    #[test]
    fn search_is_case_insensitive_substring() {
        let base = vec![LoreEntry::new("1", "Dragon")];
        assert_eq!(
            titles(&LoreFilter::new().with_search("drag").apply(&base)),
            vec!["Dragon"]
        );
        assert_eq!(
            titles(&LoreFilter::new().with_search("  RAGO ").apply(&base)),
            vec!["Dragon"]
        );
    }

    #[test]
    fn search_covers_summary_and_tags() {
        let base = vec![
            LoreEntry::new("1", "A").with_summary("The bell tolls underwater"),
            LoreEntry::new("2", "B").with_tags(["sunken"]),
            LoreEntry::new("3", "C"),
        ];
        assert_eq!(titles(&LoreFilter::new().with_search("bell").apply(&base)), vec!["A"]);
        assert_eq!(titles(&LoreFilter::new().with_search("SUNK").apply(&base)), vec!["B"]);
    }

    #[test]
    fn tag_chip_matches_case_insensitively() {
        let base = ruins_and_king();
        let filter = LoreFilter::new().with_tag("Relic");
        assert_eq!(titles(&filter.apply(&base)), vec!["Old Ruins"]);
    }

    #[test]
    fn tag_is_whole_value_not_substring() {
        let base = ruins_and_king();
        assert!(LoreFilter::new().with_tag("rel").apply(&base).is_empty());
    }

    #[test]
    fn predicates_compose_as_intersection() {
        let base = vec![
            LoreEntry::new("1", "Ash Dragon").with_kind("npc").with_tags(["boss"]),
            LoreEntry::new("2", "Frost Dragon").with_kind("npc").with_tags(["minion"]),
            LoreEntry::new("3", "Dragon Lair").with_kind("location").with_tags(["boss"]),
            LoreEntry::new("4", "Goblin").with_kind("npc").with_tags(["boss"]),
        ];
        let filter = LoreFilter::new()
            .with_kind("npc")
            .with_tag("BOSS")
            .with_search("dragon");

        let expected: Vec<&LoreEntry> = base
            .iter()
            .filter(|e| LoreFilter::new().with_kind("npc").matches(e))
            .filter(|e| LoreFilter::new().with_tag("BOSS").matches(e))
            .filter(|e| LoreFilter::new().with_search("dragon").matches(e))
            .collect();

        assert_eq!(filter.apply(&base), expected);
        assert_eq!(titles(&filter.apply(&base)), vec!["Ash Dragon"]);
    }

    #[test]
    fn clear_restores_full_base_set() {
        let base = ruins_and_king();
        let mut filter = LoreFilter::new()
            .with_kind("location")
            .with_tag("boss")
            .with_search("zzz");
        assert!(filter.apply(&base).is_empty());

        filter.clear();
        assert!(filter.is_empty());
        assert_eq!(filter.apply(&base).len(), base.len());
        assert_eq!(filter.kind.as_str(), "all");
    }

    #[test]
    fn whitespace_search_does_not_narrow() {
        let base = ruins_and_king();
        let filter = LoreFilter::new().with_search("   ");
        assert!(filter.is_empty());
        assert_eq!(filter.apply(&base).len(), 2);
    }

    #[test]
    fn vocabulary_is_all_plus_sorted_distinct_kinds() {
        let base = vec![
            LoreEntry::new("1", "a").with_kind("npc"),
            LoreEntry::new("2", "b"),
            LoreEntry::new("3", "c").with_kind("location"),
            LoreEntry::new("4", "d").with_kind("npc"),
        ];
        assert_eq!(kind_vocabulary(&base), vec!["all", "location", "misc", "npc"]);
        assert_eq!(kind_vocabulary(&[]), vec!["all"]);
    }
}
