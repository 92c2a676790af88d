//! Error types for port operations.
//!
//! `Display` renders the backend's human-readable message as-is, because the
//! views show it inline (`"Error: <message>"`).

/// Failures talking to the hosted backend's data or auth API.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// Request could not be sent or no response arrived
    #[error("{0}")]
    Request(String),

    /// Backend answered with a non-success status
    #[error("{message}")]
    Backend { status: u16, message: String },

    /// Response body did not have the expected shape
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Request body could not be encoded
    #[error("Failed to serialize request: {0}")]
    SerializeError(String),
}

impl ApiError {
    pub fn backend(status: u16, message: impl Into<String>) -> Self {
        Self::Backend {
            status,
            message: message.into(),
        }
    }
}

/// Failures in the e-mail-link auth flow and session handling.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    /// Redirect URL carried no session tokens
    #[error("No login tokens found in the redirect URL")]
    MissingTokens,

    /// Redirect URL could not be parsed or reported an auth error
    #[error("Invalid redirect URL: {0}")]
    InvalidRedirect(String),

    /// Session file could not be read or written
    #[error("Could not persist session: {0}")]
    Storage(String),

    #[error(transparent)]
    Api(#[from] ApiError),
}
