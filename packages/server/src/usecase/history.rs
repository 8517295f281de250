//! UseCase: undo / redo
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - HistoryUseCase::undo() / HistoryUseCase::redo() メソッド
//!
//! ### なぜこのテストが必要か
//! - 状態が変わった場合のみ、全メンバー（送信者を含む）に rebuild を送る
//! - 空の履歴への undo、空の redo スタックへの redo は何も送らない
//!
//! ### どのような状況を想定しているか
//! - 正常系：undo → redo の往復
//! - エッジケース：空の履歴、空の redo スタック

use std::sync::Arc;

use crate::domain::{Action, ConnectionId, MessagePusher, Room, RoomEvent, RoomId, RoomRepository};

use super::{error::RoomOperationError, room_access::lock_member_room};

/// undo / redo のユースケース
pub struct HistoryUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn RoomRepository>,
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
}

impl HistoryUseCase {
    /// 新しい HistoryUseCase を作成
    pub fn new(
        repository: Arc<dyn RoomRepository>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
        }
    }

    /// 最後の Action を取り消す
    ///
    /// # Returns
    ///
    /// * `Ok(Some(actions))` - 取り消し後の履歴（rebuild として全員に送信済み）
    /// * `Ok(None)` - 履歴が空だったため何もしていない
    pub async fn undo(
        &self,
        connection_id: &ConnectionId,
        room_id: &RoomId,
    ) -> Result<Option<Vec<Action>>, RoomOperationError> {
        self.apply(connection_id, room_id, "undo", Room::undo).await
    }

    /// 最後に取り消した Action をやり直す
    pub async fn redo(
        &self,
        connection_id: &ConnectionId,
        room_id: &RoomId,
    ) -> Result<Option<Vec<Action>>, RoomOperationError> {
        self.apply(connection_id, room_id, "redo", Room::redo).await
    }

    async fn apply(
        &self,
        connection_id: &ConnectionId,
        room_id: &RoomId,
        operation: &'static str,
        step: fn(&mut Room) -> Option<Vec<Action>>,
    ) -> Result<Option<Vec<Action>>, RoomOperationError> {
        let mut room = lock_member_room(self.repository.as_ref(), connection_id, room_id).await?;

        let Some(snapshot) = step(&mut room) else {
            tracing::debug!("Nothing to {} in room '{}'", operation, room_id);
            return Ok(None);
        };

        self.message_pusher
            .broadcast(room.members.clone(), &RoomEvent::Rebuild(snapshot.clone()))
            .await?;

        tracing::debug!(
            "{} in room '{}' by '{}' ({} actions, {} redoable)",
            operation,
            room_id,
            connection_id,
            room.actions.len(),
            room.redo.len()
        );

        Ok(Some(snapshot))
    }
}
