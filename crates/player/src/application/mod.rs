//! Application layer - Use cases and orchestration

pub mod error;
pub mod services;

pub use error::ServiceError;
