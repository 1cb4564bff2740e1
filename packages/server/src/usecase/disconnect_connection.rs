//! UseCase: 接続切断処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - DisconnectConnectionUseCase::execute() メソッド
//! - 切断した接続の参加情報が全て破棄されること
//!
//! ### どのような状況を想定しているか
//! - 正常系：複数ルームに参加している接続の切断
//! - エッジケース：同じ接続の 2 回目の切断（何もしない）

use std::sync::Arc;

use crate::domain::{ConnectionId, ConnectionRepository, RoomId};

/// 接続切断のユースケース（Active → Closed）
pub struct DisconnectConnectionUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn ConnectionRepository>,
}

impl DisconnectConnectionUseCase {
    /// 新しい DisconnectConnectionUseCase を作成
    pub fn new(repository: Arc<dyn ConnectionRepository>) -> Self {
        Self { repository }
    }

    /// 接続切断を実行
    ///
    /// # Returns
    ///
    /// * `Some(rooms)` - 切断前に参加していたルーム（ID 順）
    /// * `None` - 既に切断済み
    pub async fn execute(&self, connection_id: ConnectionId) -> Option<Vec<RoomId>> {
        let connection = self.repository.deregister(connection_id).await?;
        let mut rooms: Vec<RoomId> = connection.rooms.into_iter().collect();
        rooms.sort();
        Some(rooms)
    }

    /// 残りの接続数を取得
    pub async fn count_remaining_connections(&self) -> usize {
        self.repository.count_connections().await
    }
}
