//! Presentation layer - view state and view controllers

pub mod services;
pub mod state;
pub mod views;

pub use services::Services;
