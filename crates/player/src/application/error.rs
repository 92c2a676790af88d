//! Service layer error types
//!
//! `Display` is the plain message the views show inline, so a validation
//! failure reads exactly like its domain message and backend failures read
//! like the backend's own message.

use lorebook_domain::DomainError;

use crate::ports::outbound::{ApiError, AuthError};

/// Errors that can occur in service operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceError {
    /// Input rejected before any request was sent
    Validation(DomainError),
    /// Backend request failed
    Api(ApiError),
    /// Login flow or session handling failed
    Auth(AuthError),
    /// No backend client in this process
    Unavailable,
}

impl std::fmt::Display for ServiceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ServiceError::Validation(e) => write!(f, "{}", e),
            ServiceError::Api(e) => write!(f, "{}", e),
            ServiceError::Auth(e) => write!(f, "{}", e),
            ServiceError::Unavailable => write!(f, "Backend client unavailable"),
        }
    }
}

impl std::error::Error for ServiceError {}

impl From<DomainError> for ServiceError {
    fn from(e: DomainError) -> Self {
        ServiceError::Validation(e)
    }
}

impl From<ApiError> for ServiceError {
    fn from(e: ApiError) -> Self {
        ServiceError::Api(e)
    }
}

impl From<AuthError> for ServiceError {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::Api(api) => ServiceError::Api(api),
            other => ServiceError::Auth(other),
        }
    }
}
