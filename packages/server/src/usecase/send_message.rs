//! UseCase: メッセージ送信（ファンアウト）処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - SendMessageUseCase::execute() メソッド
//! - 宛先の選定（送信者除外、ルームのスコープ）と送信キューへの配送
//!
//! ### なぜこのテストが必要か
//! - 送信者自身にメッセージが返らないことを保証
//! - 別のルームへの混線がないことを保証
//! - 遅い受信者が送信者をブロックしないことを保証
//!
//! ### どのような状況を想定しているか
//! - 正常系：2 人以上のルームへの送信
//! - エッジケース：メンバーのいないルームへの送信（何もしない）
//! - 異常系：送信キューが満杯、または閉じている宛先

use std::sync::Arc;

use tokio::sync::mpsc::error::TrySendError;

use crate::domain::{ConnectionId, ConnectionRepository, MessageContent, Recipient, RoomId};

use super::error::DeliveryError;

/// 1 回のファンアウトの結果
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeliveryReport {
    /// 送信キューに積めた宛先の数
    pub delivered: usize,
    /// 満杯または閉じていて配送できなかった宛先の数
    pub dropped: usize,
}

/// メッセージ送信のユースケース
pub struct SendMessageUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn ConnectionRepository>,
}

impl SendMessageUseCase {
    /// 新しい SendMessageUseCase を作成
    pub fn new(repository: Arc<dyn ConnectionRepository>) -> Self {
        Self { repository }
    }

    /// メッセージ送信を実行
    ///
    /// ルームの送信者以外の全メンバーに、メッセージ本文のみを配送します。
    /// 配送は非ブロッキングで、満杯の宛先にはこのメッセージを届けません。
    ///
    /// # Arguments
    ///
    /// * `sender` - 送信した接続の ID（宛先から除外）
    /// * `room_id` - 宛先のルーム
    /// * `content` - メッセージ本文
    pub async fn execute(
        &self,
        sender: ConnectionId,
        room_id: RoomId,
        content: MessageContent,
    ) -> DeliveryReport {
        let recipients = self.repository.members_of(&room_id, sender).await;
        let mut report = DeliveryReport::default();

        for recipient in recipients {
            match deliver(&recipient, &content) {
                Ok(()) => report.delivered += 1,
                Err(e) => {
                    tracing::warn!(room_id = %room_id, "{}", e);
                    report.dropped += 1;
                }
            }
        }

        tracing::debug!(
            sender = %sender,
            room_id = %room_id,
            delivered = report.delivered,
            dropped = report.dropped,
            "Fan-out completed"
        );
        report
    }
}

/// 宛先の送信キューにメッセージを積む（待たない）
fn deliver(recipient: &Recipient, content: &MessageContent) -> Result<(), DeliveryError> {
    recipient
        .outbox
        .try_send(content.as_str().to_string())
        .map_err(|e| match e {
            TrySendError::Full(_) => DeliveryError::OutboxFull(recipient.id),
            TrySendError::Closed(_) => DeliveryError::OutboxClosed(recipient.id),
        })
}
