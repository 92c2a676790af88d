//! Outbound ports - Interfaces for external services
//!
//! These ports define the contracts that infrastructure adapters must implement,
//! allowing application services to interact with the hosted backend without
//! depending on concrete implementations.

mod auth_port;
mod clock_port;
mod error;
mod lore_store_port;
mod session_storage_port;

pub use auth_port::{AuthChange, AuthPort, AuthSession, AuthSubscription, AuthUser};
pub use clock_port::ClockPort;
pub use error::{ApiError, AuthError};
pub use lore_store_port::LoreStorePort;
pub use session_storage_port::SessionStoragePort;

// =============================================================================
// Test-Only Mocks (only available during test builds)
// =============================================================================
#[cfg(test)]
pub use auth_port::MockAuthPort;
#[cfg(test)]
pub use lore_store_port::MockLoreStorePort;
