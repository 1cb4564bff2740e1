//! Terminal client for the Roomcast relay.
//!
//! Keeps its own list of joined rooms (the server never reports one) and sends
//! chat lines to a single active room.

pub mod command;
pub mod error;
pub mod runner;
pub mod session;

// Re-export entry points
pub use runner::run_client;
