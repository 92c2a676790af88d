//! Domain entities

mod lore;
mod site_state;

pub use lore::{LoreEntry, LoreSummary, NewLoreEntry, Visibility, DEFAULT_KIND};
pub use site_state::SiteState;
