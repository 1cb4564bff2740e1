//! Repository trait for the connection registry.
//!
//! The domain layer owns the interface; `infrastructure::repository` provides
//! the implementation (dependency inversion).

use async_trait::async_trait;

use super::{
    ConnectionId, JoinOutcome, Outbox, Recipients, RoomId, RoomMember, RoomSummary, Timestamp,
    entity::Connection,
};

/// Registry of live connections and their room memberships.
///
/// Every method is atomic on its own. No method holds state across calls,
/// so callers never need multi-call transactions.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ConnectionRepository: Send + Sync {
    /// Register a connection with no rooms.
    ///
    /// Registering an id that is already present keeps the existing entry.
    async fn register(&self, id: ConnectionId, outbox: Outbox, connected_at: Timestamp);

    /// Add `room_id` to the connection's rooms.
    async fn join(&self, id: ConnectionId, room_id: RoomId) -> JoinOutcome;

    /// Remove the connection and all of its memberships.
    ///
    /// Returns the removed entry, or `None` if it was already gone.
    async fn deregister(&self, id: ConnectionId) -> Option<Connection>;

    /// Snapshot of every member of `room_id` except `excluding`.
    async fn members_of(&self, room_id: &RoomId, excluding: ConnectionId) -> Recipients;

    /// Rooms that currently have at least one member, sorted by id.
    async fn list_rooms(&self) -> Vec<RoomSummary>;

    /// Members of `room_id`, oldest connection first.
    async fn room_members(&self, room_id: &RoomId) -> Vec<RoomMember>;

    async fn count_connections(&self) -> usize;
}
