//! Value objects - validated by construction

mod names;

pub use names::LoreTitle;
