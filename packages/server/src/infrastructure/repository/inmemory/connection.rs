//! InMemory Connection Repository 実装
//!
//! ドメイン層が定義する ConnectionRepository trait の具体的な実装。
//! HashMap をインメモリ DB として使用します。
//!
//! ## 排他制御
//!
//! 全ての操作は Mutex を 1 回だけ取得し、操作単位でアトミックです。
//! `members_of` はロック中に送信先のスナップショットを作成し、
//! 実際の送信はロック解放後に呼び出し側で行います。
//! そのため、遅い受信者がレジストリ全体をブロックすることはありません。

use std::collections::{BTreeMap, HashMap, hash_map::Entry};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{
    Connection, ConnectionId, ConnectionRepository, JoinOutcome, Outbox, Recipient, Recipients,
    RoomId, RoomMember, RoomSummary, Timestamp,
};

/// インメモリ Connection Repository 実装
///
/// 接続 ID → 接続情報（送信キューと参加ルームの集合）のマップを保持します。
/// ルームは独立したエンティティを持たず、参加している接続の集合としてのみ存在します。
#[derive(Default)]
pub struct InMemoryConnectionRepository {
    connections: Mutex<HashMap<ConnectionId, Connection>>,
}

impl InMemoryConnectionRepository {
    /// 新しい InMemoryConnectionRepository を作成
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ConnectionRepository for InMemoryConnectionRepository {
    async fn register(&self, id: ConnectionId, outbox: Outbox, connected_at: Timestamp) {
        let mut connections = self.connections.lock().await;
        match connections.entry(id) {
            Entry::Occupied(_) => {
                tracing::debug!(connection_id = %id, "Connection already registered");
            }
            Entry::Vacant(entry) => {
                entry.insert(Connection::new(id, outbox, connected_at));
            }
        }
    }

    async fn join(&self, id: ConnectionId, room_id: RoomId) -> JoinOutcome {
        let mut connections = self.connections.lock().await;
        match connections.get_mut(&id) {
            Some(connection) => {
                if connection.join(room_id) {
                    JoinOutcome::Joined
                } else {
                    JoinOutcome::AlreadyMember
                }
            }
            None => JoinOutcome::NotRegistered,
        }
    }

    async fn deregister(&self, id: ConnectionId) -> Option<Connection> {
        let mut connections = self.connections.lock().await;
        connections.remove(&id)
    }

    async fn members_of(&self, room_id: &RoomId, excluding: ConnectionId) -> Recipients {
        let connections = self.connections.lock().await;
        let recipients = connections
            .values()
            .filter(|connection| connection.id != excluding && connection.is_member(room_id))
            .map(|connection| Recipient {
                id: connection.id,
                outbox: connection.outbox.clone(),
            })
            .collect();
        Recipients::new(recipients)
    }

    async fn list_rooms(&self) -> Vec<RoomSummary> {
        let connections = self.connections.lock().await;
        let mut counts: BTreeMap<&RoomId, usize> = BTreeMap::new();
        for room_id in connections.values().flat_map(|connection| connection.rooms.iter()) {
            *counts.entry(room_id).or_default() += 1;
        }
        counts
            .into_iter()
            .map(|(room_id, member_count)| RoomSummary {
                room_id: room_id.clone(),
                member_count,
            })
            .collect()
    }

    async fn room_members(&self, room_id: &RoomId) -> Vec<RoomMember> {
        let connections = self.connections.lock().await;
        let mut members: Vec<RoomMember> = connections
            .values()
            .filter(|connection| connection.is_member(room_id))
            .map(|connection| RoomMember {
                connection_id: connection.id,
                connected_at: connection.connected_at,
            })
            .collect();
        members.sort_by_key(|member| (member.connected_at, member.connection_id.as_uuid()));
        members
    }

    async fn count_connections(&self) -> usize {
        let connections = self.connections.lock().await;
        connections.len()
    }
}
