//! UseCase 層のエラー定義

use thiserror::Error;

use crate::domain::{MessagePushError, RepositoryError, RoomError};

/// Room への参加処理のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JoinRoomError {
    /// Room 数の上限など、Room を用意できなかった
    #[error(transparent)]
    Repository(#[from] RepositoryError),

    /// 参加人数の上限
    #[error(transparent)]
    Rejected(#[from] RoomError),

    #[error("Failed to send snapshot: {0}")]
    PushFailed(#[from] MessagePushError),
}

/// 参加済みの Room に対する操作（描画・クリア・undo / redo・カーソル）のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RoomOperationError {
    #[error("Room '{0}' not found")]
    RoomNotFound(String),

    #[error("Connection is not a member of room '{0}'")]
    NotAMember(String),

    /// 履歴の上限など、Room が変更を拒否した
    #[error(transparent)]
    Rejected(#[from] RoomError),

    #[error("Broadcast failed: {0}")]
    BroadcastFailed(#[from] MessagePushError),
}

/// Room 詳細取得のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GetRoomDetailError {
    #[error("Room not found")]
    RoomNotFound,
}
