//! ドメイン層のエラー定義

use thiserror::Error;

use super::value_object::{BRUSH_SIZE_MAX, COLOR_MAX_LEN, ROOM_ID_MAX_LEN, TEXT_MAX_CHARS};

/// 値オブジェクトの生成に失敗した場合のエラー
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValueObjectError {
    #[error("Room ID must not be empty")]
    EmptyRoomId,

    #[error("Room ID is too long ({0} characters, max {max})", max = ROOM_ID_MAX_LEN)]
    RoomIdTooLong(usize),

    #[error("Room ID contains an invalid character: {0:?}")]
    InvalidRoomIdCharacter(char),

    #[error("Connection ID must not be empty")]
    EmptyConnectionId,

    #[error("Coordinate '{0}' must be a finite number")]
    NonFiniteCoordinate(&'static str),

    #[error("Length '{0}' must be a finite, non-negative number")]
    InvalidLength(&'static str),

    #[error("Color must not be empty")]
    EmptyColor,

    #[error("Color is too long ({0} bytes, max {max})", max = COLOR_MAX_LEN)]
    ColorTooLong(usize),

    #[error("Color contains control characters")]
    InvalidColorCharacter,

    #[error("Brush size must be within (0, {max}], got {0}", max = BRUSH_SIZE_MAX)]
    InvalidBrushSize(f64),

    #[error("Text must not be empty")]
    EmptyText,

    #[error("Text is too long ({0} characters, max {max})", max = TEXT_MAX_CHARS)]
    TextTooLong(usize),

    #[error("Stroke must contain at least one point")]
    EmptyStroke,
}

/// Room 集約の操作に失敗した場合のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RoomError {
    #[error("Room is full ({0} members)")]
    MemberCapacityExceeded(usize),

    #[error("Room history is full ({0} actions)")]
    HistoryCapacityExceeded(usize),
}

/// Repository 操作のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    #[error("Room limit reached ({0} rooms)")]
    RoomCapacityExceeded(usize),

    #[error("Room '{0}' not found")]
    RoomNotFound(String),
}

/// MessagePusher 操作のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MessagePushError {
    #[error("Client '{0}' not found")]
    ClientNotFound(String),

    #[error("Failed to push message: {0}")]
    PushFailed(String),

    #[error("Failed to encode event: {0}")]
    EncodeFailed(String),
}
