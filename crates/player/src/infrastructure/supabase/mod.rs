//! Hosted backend adapter
//!
//! One [`SupabaseClient`] implements both the table port and the auth port;
//! the table API is PostgREST (`/rest/v1`) and auth is GoTrue (`/auth/v1`).

mod auth;
mod client;
mod query;

pub use client::SupabaseClient;
