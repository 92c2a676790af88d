//! Lorebook client crate.
//!
//! Admin and player views over a hosted backend, with the backend adapter,
//! application services and a terminal front end.

pub mod application;
pub mod config;
pub mod infrastructure;
pub mod ports;
pub mod ui;

pub use ui::presentation;
