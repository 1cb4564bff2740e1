//! WebSocket relay server: HTTP/WebSocket surface and process lifecycle.

mod handler;
mod runner;
mod signal;
pub mod state;

pub use runner::{build_router, run, serve};
pub use signal::shutdown_signal;
