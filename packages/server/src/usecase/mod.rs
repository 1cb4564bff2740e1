//! UseCase 層
//!
//! ブロードキャストエンジンのビジネスロジックを実装するレイヤー。
//! UI 層から呼び出され、Domain 層の ConnectionRepository を操作します。

pub mod disconnect_connection;
pub mod error;
pub mod join_room;
pub mod register_connection;
pub mod send_message;

pub use disconnect_connection::DisconnectConnectionUseCase;
pub use error::DeliveryError;
pub use join_room::JoinRoomUseCase;
pub use register_connection::RegisterConnectionUseCase;
pub use send_message::{DeliveryReport, SendMessageUseCase};
