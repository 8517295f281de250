//! UseCase: 履歴に残らないイベント（描画中の線分・カーソル位置）の中継
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - RelayUseCase::draw() / RelayUseCase::cursor() メソッド
//!
//! ### なぜこのテストが必要か
//! - 線分とカーソルは履歴を変更せず、送信者以外にそのまま届く必要がある
//! - カーソルには送信者の接続 ID が付与される
//!
//! ### どのような状況を想定しているか
//! - 正常系：3 人の Room での中継
//! - 異常系：未参加の接続からの中継

use std::sync::Arc;

use crate::domain::{
    ConnectionId, LiveSegment, MessagePusher, Point, RoomEvent, RoomId, RoomRepository,
};

use super::{error::RoomOperationError, room_access::lock_member_room};

/// 一時的なイベント中継のユースケース
pub struct RelayUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn RoomRepository>,
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
}

impl RelayUseCase {
    /// 新しい RelayUseCase を作成
    pub fn new(
        repository: Arc<dyn RoomRepository>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
        }
    }

    /// 描画中の線分を送信者以外のメンバーへ中継する
    pub async fn draw(
        &self,
        connection_id: &ConnectionId,
        room_id: &RoomId,
        segment: LiveSegment,
    ) -> Result<Vec<ConnectionId>, RoomOperationError> {
        self.relay(connection_id, room_id, RoomEvent::Draw(segment))
            .await
    }

    /// カーソル位置を送信者の ID 付きで中継する
    pub async fn cursor(
        &self,
        connection_id: &ConnectionId,
        room_id: &RoomId,
        position: Point,
    ) -> Result<Vec<ConnectionId>, RoomOperationError> {
        let event = RoomEvent::Cursor {
            connection_id: connection_id.clone(),
            position,
        };
        self.relay(connection_id, room_id, event).await
    }

    async fn relay(
        &self,
        connection_id: &ConnectionId,
        room_id: &RoomId,
        event: RoomEvent,
    ) -> Result<Vec<ConnectionId>, RoomOperationError> {
        let room = lock_member_room(self.repository.as_ref(), connection_id, room_id).await?;

        let targets = room.members_except(connection_id);
        self.message_pusher
            .broadcast(targets.clone(), &event)
            .await?;

        Ok(targets)
    }
}
