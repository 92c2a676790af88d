//! Player view state: the loaded base set and the filter inputs over it

use lorebook_domain::{kind_vocabulary, KindFilter, LoreEntry, LoreFilter};

/// Progress of the one-time initial load
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadState {
    #[default]
    Loading,
    /// Terminal; the view shows only the error
    Failed(String),
    Ready,
}

/// Player view state
#[derive(Debug, Clone, Default)]
pub struct PlayerState {
    load: LoadState,
    base: Vec<LoreEntry>,
    /// `"all"` + distinct effective kinds; computed once per base set
    kinds: Vec<String>,
    filter: LoreFilter,
}

impl PlayerState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load_state(&self) -> &LoadState {
        &self.load
    }

    pub fn is_ready(&self) -> bool {
        self.load == LoadState::Ready
    }

    pub fn set_loaded(&mut self, entries: Vec<LoreEntry>) {
        self.kinds = kind_vocabulary(&entries);
        self.base = entries;
        self.load = LoadState::Ready;
    }

    pub fn set_failed(&mut self, message: impl Into<String>) {
        self.base.clear();
        self.kinds.clear();
        self.load = LoadState::Failed(message.into());
    }

    pub fn kinds(&self) -> &[String] {
        &self.kinds
    }

    pub fn filter(&self) -> &LoreFilter {
        &self.filter
    }

    /// Base set narrowed by the current filter, in load order.
    pub fn visible(&self) -> Vec<&LoreEntry> {
        self.filter.apply(&self.base)
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.filter.search = search.into();
    }

    /// Select a kind from the vocabulary (`"all"` clears it).
    pub fn set_kind(&mut self, selection: impl Into<String>) {
        self.filter.kind = KindFilter::from_selection(selection);
    }

    /// Replace the active tag filter (tag chip).
    pub fn select_tag(&mut self, tag: impl Into<String>) {
        self.filter.tag = Some(tag.into());
    }

    pub fn clear_tag(&mut self) {
        self.filter.tag = None;
    }

    /// Reset search, kind and tag together.
    pub fn clear_filters(&mut self) {
        self.filter.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loaded() -> PlayerState {
        let mut state = PlayerState::new();
        state.set_loaded(vec![
            LoreEntry::new("1", "Old Ruins")
                .with_kind("location")
                .with_tags(["ancient"]),
            LoreEntry::new("2", "Dragon King")
                .with_kind("npc")
                .with_summary("Rules the north")
                .with_tags(["Relic"]),
            LoreEntry::new("3", "Rumor Mill"),
        ]);
        state
    }

    fn titles(state: &PlayerState) -> Vec<&str> {
        state.visible().iter().map(|e| e.title.as_str()).collect()
    }

    #[test]
    fn starts_loading_and_vocabulary_is_cached() {
        assert_eq!(PlayerState::new().load_state(), &LoadState::Loading);

        let state = loaded();
        assert!(state.is_ready());
        assert_eq!(state.kinds(), ["all", "location", "misc", "npc"]);
    }

    #[test]
    fn filters_compose_and_clear() {
        let mut state = loaded();
        state.set_search("drag");
        assert_eq!(titles(&state), ["Dragon King"]);

        state.set_search("");
        state.set_kind("misc");
        assert_eq!(titles(&state), ["Rumor Mill"]);

        state.set_kind("all");
        state.select_tag("relic");
        assert_eq!(titles(&state), ["Dragon King"]);

        state.select_tag("ANCIENT");
        assert_eq!(titles(&state), ["Old Ruins"]);
        state.clear_tag();
        assert_eq!(state.visible().len(), 3);

        state.set_search("nothing like this");
        state.set_kind("npc");
        assert!(state.visible().is_empty());
        state.clear_filters();
        assert_eq!(titles(&state), ["Old Ruins", "Dragon King", "Rumor Mill"]);
    }

    #[test]
    fn failure_is_terminal_state() {
        let mut state = PlayerState::new();
        state.set_failed("Backend client unavailable");
        assert_eq!(
            state.load_state(),
            &LoadState::Failed("Backend client unavailable".into())
        );
        assert!(state.visible().is_empty());
    }
}
