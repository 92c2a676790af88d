//! Application services
//!
//! Use cases for the admin and player views. Services depend on port
//! traits, not on the concrete backend client.

pub mod auth_service;
pub mod lore_admin_service;
pub mod player_lore_service;

pub use auth_service::AuthService;
pub use lore_admin_service::LoreAdminService;
pub use player_lore_service::PlayerLoreService;
