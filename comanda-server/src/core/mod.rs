//! Core module: server configuration and state
//!
//! # Module structure
//!
//! - [`Config`] - Server configuration
//! - [`ServerState`] - Shared service state
//! - [`Server`] - HTTP server

pub mod config;
pub mod server;
pub mod state;

pub use config::Config;
pub use server::Server;
pub use state::ServerState;
