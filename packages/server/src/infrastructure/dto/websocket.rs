//! WebSocket message DTOs for the relay.
//!
//! Client → server frames are JSON envelopes:
//!
//! ```json
//! {"type":"join","payload":{"roomId":"r1"}}
//! {"type":"chat","payload":{"roomId":"r1","message":"hi"}}
//! ```
//!
//! Server → client frames carry the bare chat text, with no envelope.

use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::{Map, Value};
use thiserror::Error;

/// Payload of a `join` envelope
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinPayload {
    pub room_id: String,
}

/// Payload of a `chat` envelope
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatPayload {
    pub room_id: String,
    pub message: String,
}

/// Envelope as written by clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "payload", rename_all = "lowercase")]
pub enum ClientEnvelope {
    Join(JoinPayload),
    Chat(ChatPayload),
}

impl ClientEnvelope {
    pub fn join(room_id: impl Into<String>) -> Self {
        Self::Join(JoinPayload {
            room_id: room_id.into(),
        })
    }

    pub fn chat(room_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Chat(ChatPayload {
            room_id: room_id.into(),
            message: message.into(),
        })
    }

    /// Serialize to the JSON text sent over the socket
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Decoded inbound frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inbound {
    Join(JoinPayload),
    Chat(ChatPayload),
    /// Well-formed envelope whose `type` is neither `join` nor `chat`
    Unrecognized(String),
}

/// Inbound frame that could not be decoded
#[derive(Debug, Error)]
pub enum EnvelopeError {
    #[error("malformed envelope: {0}")]
    Malformed(#[from] serde_json::Error),
}

impl Inbound {
    /// Decode one text frame.
    ///
    /// The frame and its `payload` must be JSON objects. The `type` field
    /// picks the payload schema; an absent or unknown `type` yields
    /// `Unrecognized` instead of an error.
    pub fn decode(text: &str) -> Result<Self, EnvelopeError> {
        let mut envelope: Map<String, Value> = serde_json::from_str(text)?;
        let kind: Option<String> =
            serde_json::from_value(envelope.remove("type").unwrap_or_default())?;
        let inbound = match kind.as_deref() {
            Some("join") => Self::Join(decode_payload(envelope.remove("payload"))?),
            Some("chat") => Self::Chat(decode_payload(envelope.remove("payload"))?),
            other => Self::Unrecognized(other.unwrap_or_default().to_string()),
        };
        Ok(inbound)
    }
}

fn decode_payload<T: DeserializeOwned>(payload: Option<Value>) -> Result<T, EnvelopeError> {
    let payload: Map<String, Value> = serde_json::from_value(payload.unwrap_or_default())?;
    Ok(serde_json::from_value(Value::Object(payload))?)
}
