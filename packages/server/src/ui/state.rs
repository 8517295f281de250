//! Shared application state.

use std::sync::Arc;

use crate::{
    domain::{MessagePusher, RoomRepository},
    usecase::{
        AppendActionUseCase, ClearRoomUseCase, ConnectClientUseCase, DisconnectClientUseCase,
        GetRoomDetailUseCase, GetRoomsUseCase, HistoryUseCase, JoinRoomUseCase, RelayUseCase,
    },
};

/// Shared application state
///
/// ハンドラーは UseCase のみに依存し、Repository / MessagePusher には直接触れない。
pub struct AppState {
    /// ConnectClientUseCase（接続登録のユースケース）
    pub connect_client_usecase: Arc<ConnectClientUseCase>,
    /// DisconnectClientUseCase（退出・切断のユースケース）
    pub disconnect_client_usecase: Arc<DisconnectClientUseCase>,
    /// JoinRoomUseCase（Room 参加のユースケース）
    pub join_room_usecase: Arc<JoinRoomUseCase>,
    /// AppendActionUseCase（stroke / shape / text 追加のユースケース）
    pub append_action_usecase: Arc<AppendActionUseCase>,
    /// RelayUseCase（draw / cursor 中継のユースケース）
    pub relay_usecase: Arc<RelayUseCase>,
    /// ClearRoomUseCase（クリアのユースケース）
    pub clear_room_usecase: Arc<ClearRoomUseCase>,
    /// HistoryUseCase（undo / redo のユースケース）
    pub history_usecase: Arc<HistoryUseCase>,
    /// GetRoomsUseCase（Room 一覧取得のユースケース）
    pub get_rooms_usecase: Arc<GetRoomsUseCase>,
    /// GetRoomDetailUseCase（Room 詳細取得のユースケース）
    pub get_room_detail_usecase: Arc<GetRoomDetailUseCase>,
}

impl AppState {
    /// Repository と MessagePusher から全 UseCase を組み立てる
    pub fn new(
        repository: Arc<dyn RoomRepository>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            connect_client_usecase: Arc::new(ConnectClientUseCase::new(message_pusher.clone())),
            disconnect_client_usecase: Arc::new(DisconnectClientUseCase::new(
                repository.clone(),
                message_pusher.clone(),
            )),
            join_room_usecase: Arc::new(JoinRoomUseCase::new(
                repository.clone(),
                message_pusher.clone(),
            )),
            append_action_usecase: Arc::new(AppendActionUseCase::new(
                repository.clone(),
                message_pusher.clone(),
            )),
            relay_usecase: Arc::new(RelayUseCase::new(repository.clone(), message_pusher.clone())),
            clear_room_usecase: Arc::new(ClearRoomUseCase::new(
                repository.clone(),
                message_pusher.clone(),
            )),
            history_usecase: Arc::new(HistoryUseCase::new(repository.clone(), message_pusher)),
            get_rooms_usecase: Arc::new(GetRoomsUseCase::new(repository.clone())),
            get_room_detail_usecase: Arc::new(GetRoomDetailUseCase::new(repository)),
        }
    }
}
