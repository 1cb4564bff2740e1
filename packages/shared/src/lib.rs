//! Shared utilities for Roomcast server and client.

pub mod logger;
pub mod time;
