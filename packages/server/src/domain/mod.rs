//! ドメイン層
//!
//! Room の履歴モデルと、UseCase 層が依存するインターフェース
//! （`RoomRepository`, `MessagePusher`）を定義します。

pub mod entity;
pub mod error;
pub mod event;
pub mod factory;
pub mod message_pusher;
pub mod repository;
pub mod room;
pub mod value_object;

pub use entity::{
    Action, Composite, LiveSegment, Shape, ShapeGeometry, ShapeKind, Stroke, StrokeTool,
    TextLabel,
};
pub use error::{MessagePushError, RepositoryError, RoomError, ValueObjectError};
pub use event::RoomEvent;
pub use factory::{ConnectionIdFactory, RoomIdFactory};
pub use message_pusher::{MessagePusher, PusherChannel};
pub use repository::{RoomRepository, SharedRoom};
pub use room::{Room, RoomLimits};
pub use value_object::{BrushSize, Color, ConnectionId, Point, RoomId, TextContent, Timestamp};

#[cfg(test)]
pub use message_pusher::MockMessagePusher;
