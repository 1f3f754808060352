// Slash commands
pub mod close;
pub mod config;
pub mod setup;
