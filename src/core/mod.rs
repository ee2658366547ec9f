pub mod config;
pub mod events;
pub mod lot;
pub mod state;
