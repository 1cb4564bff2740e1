//! UseCase: 接続登録処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - RegisterConnectionUseCase::execute() メソッド
//! - 新しい接続が参加ルームなしでレジストリに登録されること
//!
//! ### どのような状況を想定しているか
//! - 正常系：新規接続の登録
//! - エッジケース：同じ ID の再登録（既存の参加情報は保持）

use std::sync::Arc;

use roomcast_shared::time::get_jst_timestamp;

use crate::domain::{ConnectionId, ConnectionRepository, Outbox, Timestamp};

/// 接続登録のユースケース（Connecting → Active）
pub struct RegisterConnectionUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn ConnectionRepository>,
}

impl RegisterConnectionUseCase {
    /// 新しい RegisterConnectionUseCase を作成
    pub fn new(repository: Arc<dyn ConnectionRepository>) -> Self {
        Self { repository }
    }

    /// 接続登録を実行
    ///
    /// # Arguments
    ///
    /// * `connection_id` - 接続の ID
    /// * `outbox` - この接続へのメッセージ送信キュー
    ///
    /// # Returns
    ///
    /// 登録時刻
    pub async fn execute(&self, connection_id: ConnectionId, outbox: Outbox) -> Timestamp {
        let connected_at = Timestamp::new(get_jst_timestamp());
        self.repository
            .register(connection_id, outbox, connected_at)
            .await;
        connected_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{ConnectionIdFactory, MockConnectionRepository, RoomId},
        infrastructure::repository::InMemoryConnectionRepository,
    };
    use tokio::sync::mpsc;

    #[tokio::test]
    async fn test_register_connection_calls_repository() {
        // テスト項目: execute は Repository の register を 1 回だけ呼び出す
        // given (前提条件):
        let connection_id = ConnectionIdFactory::generate();
        let mut repository = MockConnectionRepository::new();
        repository
            .expect_register()
            .withf(move |id, _, _| *id == connection_id)
            .times(1)
            .return_const(());
        let usecase = RegisterConnectionUseCase::new(Arc::new(repository));
        let (outbox, _rx) = mpsc::channel(1);

        // when (操作):
        let connected_at = usecase.execute(connection_id, outbox).await;

        // then (期待する結果):
        assert!(connected_at.value() > 0);
    }

    #[tokio::test]
    async fn test_register_connection_has_no_rooms() {
        // テスト項目: 登録直後の接続はどのルームにも属さない
        // given (前提条件):
        let repository = Arc::new(InMemoryConnectionRepository::new());
        let usecase = RegisterConnectionUseCase::new(repository.clone());
        let connection_id = ConnectionIdFactory::generate();
        let (outbox, _rx) = mpsc::channel(1);

        // when (操作):
        usecase.execute(connection_id, outbox).await;

        // then (期待する結果):
        assert_eq!(repository.count_connections().await, 1);
        assert!(repository.list_rooms().await.is_empty());
        assert!(
            repository
                .room_members(&RoomId::new("anything"))
                .await
                .is_empty()
        );
    }
}
