//! Room-based WebSocket relay server.
//!
//! Clients join any number of named rooms and broadcast text to the other
//! members of a room. The registry of connections and their rooms lives in
//! `infrastructure::repository`; the broadcast logic lives in `usecase`.

pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod ui;
pub mod usecase;

// Re-export entry points
pub use config::ServerConfig;
pub use error::ServerError;
pub use ui::run;
