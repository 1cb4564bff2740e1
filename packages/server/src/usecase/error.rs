//! UseCase 層のエラー定義

use thiserror::Error;

use crate::domain::ConnectionId;

/// 宛先 1 件への配送失敗
///
/// 配送保証はないため、これらは呼び出し元でログに記録されるだけで、
/// 送信者には通知されません。
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryError {
    /// 送信キューが満杯（受信側が遅い）
    #[error("outbox of connection {0} is full; message dropped")]
    OutboxFull(ConnectionId),

    /// 送信キューが閉じている（接続が終了処理中）
    #[error("outbox of connection {0} is closed")]
    OutboxClosed(ConnectionId),
}
