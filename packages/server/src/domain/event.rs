//! Room のメンバーへ通知するイベント
//!
//! ワイヤーフォーマットへの変換は Infrastructure 層（MessagePusher 実装）が担当します。

use super::{
    entity::{Action, LiveSegment},
    value_object::{ConnectionId, Point},
};

#[derive(Debug, Clone, PartialEq)]
pub enum RoomEvent {
    /// join 直後の履歴スナップショット（送信者のみ）
    Init(Vec<Action>),
    /// 描画中のプレビュー線分
    Draw(LiveSegment),
    /// 履歴に追加された Action
    Appended(Action),
    Clear,
    /// undo / redo 後の履歴スナップショット（送信者を含む全員）
    Rebuild(Vec<Action>),
    Cursor {
        connection_id: ConnectionId,
        position: Point,
    },
    CursorLeft {
        connection_id: ConnectionId,
    },
}

impl RoomEvent {
    /// ログ出力用のイベント名
    pub fn name(&self) -> &'static str {
        match self {
            RoomEvent::Init(_) => "init",
            RoomEvent::Draw(_) => "draw",
            RoomEvent::Appended(action) => action.kind(),
            RoomEvent::Clear => "clear",
            RoomEvent::Rebuild(_) => "rebuild",
            RoomEvent::Cursor { .. } => "cursor",
            RoomEvent::CursorLeft { .. } => "cursor-left",
        }
    }
}
