//! Session storage implementations
//!
//! The signed-in session survives restarts in a JSON file at:
//! - Linux: ~/.config/lorebook/session.json
//! - macOS: ~/Library/Application Support/io.lorebook.lorebook/session.json
//! - Windows: C:\Users\<User>\AppData\Roaming\lorebook\lorebook\config\session.json

use std::fs;
use std::path::PathBuf;
#[cfg(test)]
use std::sync::RwLock;

use directories::ProjectDirs;

use crate::ports::outbound::{AuthError, AuthSession, SessionStoragePort};

const SESSION_FILE_NAME: &str = "session.json";

/// File-backed session storage
pub struct FileSessionStorage {
    path: PathBuf,
}

impl FileSessionStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Storage at `path` if given, else in the platform config directory.
    pub fn at_or_default(path: Option<PathBuf>) -> Self {
        match path {
            Some(path) => Self::new(path),
            None => Self::new(Self::default_path()),
        }
    }

    /// Platform-specific session file location
    pub fn default_path() -> PathBuf {
        if let Some(dirs) = ProjectDirs::from("io", "lorebook", "lorebook") {
            dirs.config_dir().join(SESSION_FILE_NAME)
        } else {
            // Fallback to current directory if project dirs unavailable
            PathBuf::from("lorebook_session.json")
        }
    }
}

impl SessionStoragePort for FileSessionStorage {
    fn load(&self) -> Result<Option<AuthSession>, AuthError> {
        if !self.path.exists() {
            return Ok(None);
        }

        let data = fs::read_to_string(&self.path)
            .map_err(|e| AuthError::Storage(format!("read {:?}: {}", self.path, e)))?;

        // A corrupt file is treated as signed out rather than a hard failure
        match serde_json::from_str::<AuthSession>(&data) {
            Ok(session) => Ok(Some(session)),
            Err(e) => {
                tracing::warn!("Failed to parse session file {:?}: {}", self.path, e);
                Ok(None)
            }
        }
    }

    fn save(&self, session: &AuthSession) -> Result<(), AuthError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .map_err(|e| AuthError::Storage(format!("create {:?}: {}", parent, e)))?;
            }
        }

        let data = serde_json::to_string_pretty(session)
            .map_err(|e| AuthError::Storage(e.to_string()))?;
        fs::write(&self.path, data)
            .map_err(|e| AuthError::Storage(format!("write {:?}: {}", self.path, e)))?;

        tracing::debug!("Session persisted to {:?}", self.path);
        Ok(())
    }

    fn clear(&self) -> Result<(), AuthError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AuthError::Storage(format!(
                "remove {:?}: {}",
                self.path, e
            ))),
        }
    }
}

/// In-memory session storage for testing.
#[cfg(test)]
#[derive(Default)]
pub struct MemorySessionStorage {
    session: RwLock<Option<AuthSession>>,
}

#[cfg(test)]
impl MemorySessionStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
impl SessionStoragePort for MemorySessionStorage {
    fn load(&self) -> Result<Option<AuthSession>, AuthError> {
        self.session
            .read()
            .map(|guard| guard.clone())
            .map_err(|e| AuthError::Storage(e.to_string()))
    }

    fn save(&self, session: &AuthSession) -> Result<(), AuthError> {
        let mut guard = self
            .session
            .write()
            .map_err(|e| AuthError::Storage(e.to_string()))?;
        *guard = Some(session.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), AuthError> {
        let mut guard = self
            .session
            .write()
            .map_err(|e| AuthError::Storage(e.to_string()))?;
        *guard = None;
        Ok(())
    }
}
