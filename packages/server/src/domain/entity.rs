//! Core domain models for the relay.

use std::collections::HashSet;

use serde::Serialize;
use tokio::sync::mpsc;

use super::value_object::{ConnectionId, RoomId, Timestamp};

/// Sending half of a connection's bounded outbound queue.
///
/// Whatever is pushed here is written to the connection's socket, in order.
pub type Outbox = mpsc::Sender<String>;

/// A live connection and the rooms it has joined
#[derive(Debug, Clone)]
pub struct Connection {
    /// Connection identity
    pub id: ConnectionId,
    /// Queue feeding this connection's socket writer
    pub outbox: Outbox,
    /// Joined rooms (set semantics)
    pub rooms: HashSet<RoomId>,
    /// Timestamp when the connection was registered
    pub connected_at: Timestamp,
}

impl Connection {
    /// Create a connection that has not joined any room yet
    pub fn new(id: ConnectionId, outbox: Outbox, connected_at: Timestamp) -> Self {
        Self {
            id,
            outbox,
            rooms: HashSet::new(),
            connected_at,
        }
    }

    /// Add a room to the membership set.
    ///
    /// Returns `false` if the connection was already a member.
    pub fn join(&mut self, room_id: RoomId) -> bool {
        self.rooms.insert(room_id)
    }

    /// Check membership of a room
    pub fn is_member(&self, room_id: &RoomId) -> bool {
        self.rooms.contains(room_id)
    }
}

/// Result of a join request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinOutcome {
    /// The room was added to the membership set
    Joined,
    /// The connection was already a member; nothing changed
    AlreadyMember,
    /// The connection is not registered (it may have just closed)
    NotRegistered,
}

/// One target of a fan-out
#[derive(Debug, Clone)]
pub struct Recipient {
    pub id: ConnectionId,
    pub outbox: Outbox,
}

/// Snapshot of the members of a room at query time.
///
/// Consumed once; later registry changes are not reflected.
#[derive(Debug)]
pub struct Recipients {
    inner: std::vec::IntoIter<Recipient>,
}

impl Recipients {
    pub fn new(recipients: Vec<Recipient>) -> Self {
        Self {
            inner: recipients.into_iter(),
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new())
    }
}

impl Iterator for Recipients {
    type Item = Recipient;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for Recipients {}

/// A room as seen from the outside: derived from memberships
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoomSummary {
    pub room_id: RoomId,
    pub member_count: usize,
}

/// A member of a room
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoomMember {
    pub connection_id: ConnectionId,
    pub connected_at: Timestamp,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::factory::ConnectionIdFactory;

    fn create_connection() -> Connection {
        let (outbox, _rx) = mpsc::channel(1);
        Connection::new(ConnectionIdFactory::generate(), outbox, Timestamp::new(1000))
    }

    #[test]
    fn test_connection_new_has_no_rooms() {
        // テスト項目: 新しい Connection はどのルームにも参加していない
        // when (操作):
        let connection = create_connection();

        // then (期待する結果):
        assert!(connection.rooms.is_empty());
        assert_eq!(connection.connected_at, Timestamp::new(1000));
    }

    #[test]
    fn test_connection_join_is_idempotent() {
        // テスト項目: 同じルームに 2 回参加しても参加ルームは 1 つのまま
        // given (前提条件):
        let mut connection = create_connection();

        // when (操作):
        let first = connection.join(RoomId::new("r1"));
        let second = connection.join(RoomId::new("r1"));

        // then (期待する結果):
        assert!(first);
        assert!(!second);
        assert_eq!(connection.rooms.len(), 1);
        assert!(connection.is_member(&RoomId::new("r1")));
    }

    #[test]
    fn test_connection_multiple_rooms() {
        // テスト項目: 複数のルームに参加できる
        // given (前提条件):
        let mut connection = create_connection();

        // when (操作):
        connection.join(RoomId::new("a"));
        connection.join(RoomId::new("b"));

        // then (期待する結果):
        assert_eq!(connection.rooms.len(), 2);
        assert!(connection.is_member(&RoomId::new("a")));
        assert!(connection.is_member(&RoomId::new("b")));
        assert!(!connection.is_member(&RoomId::new("c")));
    }

    #[test]
    fn test_recipients_is_exact_size() {
        // テスト項目: Recipients は件数を保持したまま一度だけ走査できる
        // given (前提条件):
        let a = create_connection();
        let b = create_connection();
        let mut recipients = Recipients::new(vec![
            Recipient {
                id: a.id,
                outbox: a.outbox.clone(),
            },
            Recipient {
                id: b.id,
                outbox: b.outbox.clone(),
            },
        ]);

        // when (操作):
        let first = recipients.next();

        // then (期待する結果):
        assert_eq!(first.map(|r| r.id), Some(a.id));
        assert_eq!(recipients.len(), 1);
        assert_eq!(recipients.next().map(|r| r.id), Some(b.id));
        assert!(recipients.next().is_none());
        assert_eq!(Recipients::empty().len(), 0);
    }
}
