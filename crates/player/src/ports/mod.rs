//! Player port definitions.
//!
//! Ports are the only abstractions in this crate: the hosted backend (data
//! and auth), session persistence, and the clock. Everything else is
//! concrete types.

pub mod outbound;
