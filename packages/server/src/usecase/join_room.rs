//! UseCase: ルーム参加処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - JoinRoomUseCase::execute() メソッド
//!
//! ### なぜこのテストが必要か
//! - 参加は集合として扱われる（冪等）ことを保証
//! - 切断処理と競合した参加要求が安全に無視されることを保証
//!
//! ### どのような状況を想定しているか
//! - 正常系：新しいルームへの参加
//! - エッジケース：同じルームへの重複参加、空文字列のルーム ID
//! - 異常系：未登録の接続からの参加要求（何もしない）

use std::sync::Arc;

use crate::domain::{ConnectionId, ConnectionRepository, JoinOutcome, RoomId};

/// ルーム参加のユースケース
///
/// 参加者への応答はありません（クライアントが参加ルームを自分で管理します）。
pub struct JoinRoomUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn ConnectionRepository>,
}

impl JoinRoomUseCase {
    /// 新しい JoinRoomUseCase を作成
    pub fn new(repository: Arc<dyn ConnectionRepository>) -> Self {
        Self { repository }
    }

    /// ルーム参加を実行
    ///
    /// # Arguments
    ///
    /// * `connection_id` - 参加する接続の ID
    /// * `room_id` - 参加するルームの ID（形式は問わない）
    pub async fn execute(&self, connection_id: ConnectionId, room_id: RoomId) -> JoinOutcome {
        let outcome = self.repository.join(connection_id, room_id.clone()).await;
        match outcome {
            JoinOutcome::Joined => {
                tracing::info!(connection_id = %connection_id, room_id = %room_id, "Joined room");
            }
            JoinOutcome::AlreadyMember => {
                tracing::debug!(connection_id = %connection_id, room_id = %room_id, "Already a member");
            }
            JoinOutcome::NotRegistered => {
                tracing::debug!(connection_id = %connection_id, room_id = %room_id, "Join from unregistered connection ignored");
            }
        }
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{ConnectionIdFactory, MockConnectionRepository, RoomSummary, Timestamp},
        infrastructure::repository::InMemoryConnectionRepository,
    };
    use tokio::sync::mpsc;

    async fn create_registered(
        repository: &InMemoryConnectionRepository,
    ) -> (ConnectionId, mpsc::Receiver<String>) {
        let id = ConnectionIdFactory::generate();
        let (outbox, rx) = mpsc::channel(4);
        repository.register(id, outbox, Timestamp::new(0)).await;
        (id, rx)
    }

    #[tokio::test]
    async fn test_join_room_success() {
        // テスト項目: 登録済みの接続はルームに参加できる
        // given (前提条件):
        let repository = Arc::new(InMemoryConnectionRepository::new());
        let usecase = JoinRoomUseCase::new(repository.clone());
        let (id, _rx) = create_registered(&repository).await;

        // when (操作):
        let outcome = usecase.execute(id, RoomId::new("r1")).await;

        // then (期待する結果):
        assert_eq!(outcome, JoinOutcome::Joined);
        let members = repository.room_members(&RoomId::new("r1")).await;
        assert_eq!(members.len(), 1);
        assert_eq!(members[0].connection_id, id);
    }

    #[tokio::test]
    async fn test_join_room_twice_equals_once() {
        // テスト項目: 同じルームに 2 回参加しても 1 回参加した状態と同じ
        // given (前提条件):
        let repository = Arc::new(InMemoryConnectionRepository::new());
        let usecase = JoinRoomUseCase::new(repository.clone());
        let (id, _rx) = create_registered(&repository).await;

        // when (操作):
        usecase.execute(id, RoomId::new("r1")).await;
        let second = usecase.execute(id, RoomId::new("r1")).await;

        // then (期待する結果):
        assert_eq!(second, JoinOutcome::AlreadyMember);
        assert_eq!(
            repository.list_rooms().await,
            vec![RoomSummary {
                room_id: RoomId::new("r1"),
                member_count: 1
            }]
        );
    }

    #[tokio::test]
    async fn test_join_room_empty_id_is_accepted() {
        // テスト項目: 空文字列のルーム ID も有効な ID として扱われる
        // given (前提条件):
        let repository = Arc::new(InMemoryConnectionRepository::new());
        let usecase = JoinRoomUseCase::new(repository.clone());
        let (id, _rx) = create_registered(&repository).await;

        // when (操作):
        let outcome = usecase.execute(id, RoomId::new("")).await;

        // then (期待する結果):
        assert_eq!(outcome, JoinOutcome::Joined);
        assert_eq!(repository.room_members(&RoomId::new("")).await.len(), 1);
    }

    #[tokio::test]
    async fn test_join_room_unregistered_is_noop() {
        // テスト項目: 未登録の接続からの参加要求は何もしない（エラーにならない）
        // given (前提条件):
        let ghost = ConnectionIdFactory::generate();
        let mut repository = MockConnectionRepository::new();
        repository
            .expect_join()
            .withf(move |id, room| *id == ghost && room.as_str() == "r1")
            .times(1)
            .return_const(JoinOutcome::NotRegistered);
        let usecase = JoinRoomUseCase::new(Arc::new(repository));

        // when (操作):
        let outcome = usecase.execute(ghost, RoomId::new("r1")).await;

        // then (期待する結果):
        assert_eq!(outcome, JoinOutcome::NotRegistered);
    }
}
