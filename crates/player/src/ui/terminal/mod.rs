//! Terminal front end
//!
//! Line-oriented shells over the presentation views. Input is any async
//! line source (stdin in the binary, byte slices in tests); output is any
//! writer. Logs go to stderr so stdout carries only view output.

pub mod admin_shell;
pub mod commands;
pub mod player_shell;
pub mod render;

pub use admin_shell::run_admin;
pub use player_shell::run_player;
