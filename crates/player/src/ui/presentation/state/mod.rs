//! View state
//!
//! Plain data owned by a single view. Mutations happen only through the
//! view's event loop, so nothing here is shared or locked.

pub mod admin_state;
pub mod player_state;

pub use admin_state::{AdminMessage, AdminState, AuthStatus, LoreForm};
pub use player_state::{LoadState, PlayerState};
