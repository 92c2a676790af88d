//! Validated title newtype for lore entries
//!
//! A title is valid when it has at least one non-whitespace character.
//! The text itself is stored exactly as typed.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::DomainError;

/// A validated lore title (not blank)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LoreTitle(String);

impl LoreTitle {
    /// Create a new validated title.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if the title is empty after trimming.
    pub fn new(title: impl Into<String>) -> Result<Self, DomainError> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(DomainError::validation("Title is required."));
        }
        Ok(Self(title))
    }

    /// Returns the title as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LoreTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for LoreTitle {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<LoreTitle> for String {
    fn from(title: LoreTitle) -> String {
        title.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_whitespace_only() {
        let err = LoreTitle::new("   \t ").unwrap_err();
        assert_eq!(err.to_string(), "Title is required.");
    }

    #[test]
    fn keeps_title_as_typed() {
        let title = LoreTitle::new("  The Sunken Bell ").unwrap();
        assert_eq!(title.as_str(), "  The Sunken Bell ");
    }

    #[test]
    fn long_titles_are_accepted() {
        let title = LoreTitle::new("x".repeat(500)).unwrap();
        assert_eq!(title.as_str().len(), 500);
    }
}
