//! Domain layer for the relay.
//!
//! This module contains the connection/room model and the registry interface,
//! independent of the wire format and of the storage behind the registry.

pub mod entity;
pub mod factory;
pub mod repository;
pub mod value_object;

pub use entity::{Connection, JoinOutcome, Outbox, Recipient, Recipients, RoomMember, RoomSummary};
pub use factory::ConnectionIdFactory;
pub use repository::ConnectionRepository;
#[cfg(test)]
pub use repository::MockConnectionRepository;
pub use value_object::{ConnectionId, MessageContent, RoomId, Timestamp};
