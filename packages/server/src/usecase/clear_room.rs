//! UseCase: Room のクリア処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - ClearRoomUseCase::execute() メソッド
//!
//! ### なぜこのテストが必要か
//! - クリアは履歴と redo スタックの両方を破棄する
//! - clear は送信者を含む全メンバーに届く
//!
//! ### どのような状況を想定しているか
//! - 正常系：履歴のある Room のクリア
//! - 異常系：未参加の接続からのクリア

use std::sync::Arc;

use crate::domain::{ConnectionId, MessagePusher, RoomEvent, RoomId, RoomRepository};

use super::{error::RoomOperationError, room_access::lock_member_room};

/// Room クリアのユースケース
pub struct ClearRoomUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn RoomRepository>,
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
}

impl ClearRoomUseCase {
    /// 新しい ClearRoomUseCase を作成
    pub fn new(
        repository: Arc<dyn RoomRepository>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
        }
    }

    /// 履歴と redo スタックを空にし、全メンバー（送信者を含む）へ通知する
    pub async fn execute(
        &self,
        connection_id: &ConnectionId,
        room_id: &RoomId,
    ) -> Result<Vec<ConnectionId>, RoomOperationError> {
        let mut room = lock_member_room(self.repository.as_ref(), connection_id, room_id).await?;

        room.clear();

        let targets = room.members.clone();
        self.message_pusher
            .broadcast(targets.clone(), &RoomEvent::Clear)
            .await?;

        tracing::info!("Room '{}' cleared by '{}'", room_id, connection_id);

        Ok(targets)
    }
}
