//! View controllers
//!
//! A view owns its state, calls application services and applies their
//! results. Rendering lives with the front end.

pub mod admin_view;
pub mod player_view;

pub use admin_view::AdminView;
pub use player_view::PlayerView;
