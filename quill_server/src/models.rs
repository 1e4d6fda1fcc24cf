pub mod client;
pub mod config;
pub mod health;
pub mod prompts;
pub mod state;
