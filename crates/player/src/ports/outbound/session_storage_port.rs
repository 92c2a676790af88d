//! Session persistence abstraction (file-based on desktop, in-memory for tests)

use super::{AuthError, AuthSession};

pub trait SessionStoragePort: Send + Sync {
    /// Load the persisted session, if any
    fn load(&self) -> Result<Option<AuthSession>, AuthError>;

    /// Persist `session`, replacing any previous one
    fn save(&self, session: &AuthSession) -> Result<(), AuthError>;

    /// Forget the persisted session
    fn clear(&self) -> Result<(), AuthError>;
}
