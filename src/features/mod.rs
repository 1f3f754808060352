// Interaction-driven features
pub mod actions;
pub mod config_menu;
pub mod interactions;
pub mod tickets;
