//! Client error definitions.

use thiserror::Error;

/// Errors that end the client
#[derive(Debug, Error)]
pub enum ClientError {
    /// WebSocket handshake or transport failure
    #[error("WebSocket error: {0}")]
    WebSocket(#[from] tokio_tungstenite::tungstenite::Error),

    /// Envelope could not be serialized
    #[error("failed to encode envelope: {0}")]
    Encode(#[from] serde_json::Error),

    /// Line editor failure
    #[error("readline error: {0}")]
    Readline(#[from] rustyline::error::ReadlineError),
}

/// A user action rejected locally, before anything is sent
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("room name cannot be blank")]
    BlankRoom,

    #[error("not in room '{0}'; use /join {0} first")]
    NotJoined(String),

    #[error("no active room; use /create or /join first")]
    NoActiveRoom,
}
