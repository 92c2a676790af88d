//! Lorebook domain.
//!
//! Entities and value objects for the lore database, plus the in-memory
//! filter pipeline the player view runs over its loaded base set. Nothing in
//! this crate performs I/O.

pub mod entities;
pub mod error;
pub mod filter;
pub mod ids;
pub mod value_objects;

pub use entities::{LoreEntry, LoreSummary, NewLoreEntry, SiteState, Visibility, DEFAULT_KIND};
pub use error::DomainError;
pub use filter::{kind_vocabulary, KindFilter, LoreFilter, ALL_KINDS};
pub use ids::LoreId;
pub use value_objects::LoreTitle;
