//! UseCase 層
//!
//! 1 つのクライアントイベントに対応する処理を 1 つの UseCase として実装します。
//! 参加済みの Room を変更する UseCase は、Room のロックを保持したまま配信まで行います。

pub mod append_action;
pub mod clear_room;
pub mod connect_client;
pub mod disconnect_client;
pub mod error;
pub mod get_room_detail;
pub mod get_rooms;
pub mod history;
pub mod join_room;
pub mod relay;
mod room_access;

#[cfg(test)]
mod test_support;

pub use append_action::AppendActionUseCase;
pub use clear_room::ClearRoomUseCase;
pub use connect_client::ConnectClientUseCase;
pub use disconnect_client::DisconnectClientUseCase;
pub use error::{GetRoomDetailError, JoinRoomError, RoomOperationError};
pub use get_room_detail::GetRoomDetailUseCase;
pub use get_rooms::GetRoomsUseCase;
pub use history::HistoryUseCase;
pub use join_room::JoinRoomUseCase;
pub use relay::RelayUseCase;
