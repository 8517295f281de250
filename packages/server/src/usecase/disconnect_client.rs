//! UseCase: Room からの退出と切断処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - DisconnectClientUseCase::leave_room() / execute() メソッド
//!
//! ### なぜこのテストが必要か
//! - 退出した接続のカーソルを他のメンバーの画面から消す必要がある（cursor-left）
//! - 切断後の接続に配信が続かないこと
//! - 履歴は退出・切断の影響を受けない
//!
//! ### どのような状況を想定しているか
//! - 正常系：2 人の Room から 1 人が切断
//! - エッジケース：Room に参加する前の切断、最後のメンバーの切断

use std::sync::Arc;

use crate::domain::{ConnectionId, MessagePusher, RoomEvent, RoomId, RoomRepository};

/// 退出・切断のユースケース
pub struct DisconnectClientUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn RoomRepository>,
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
}

impl DisconnectClientUseCase {
    /// 新しい DisconnectClientUseCase を作成
    pub fn new(
        repository: Arc<dyn RoomRepository>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
        }
    }

    /// Room から退出し、残りのメンバーへ cursor-left を通知する
    ///
    /// # Returns
    ///
    /// 通知先（メンバーでなかった場合は空）
    pub async fn leave_room(
        &self,
        connection_id: &ConnectionId,
        room_id: &RoomId,
    ) -> Vec<ConnectionId> {
        let Some(room) = self.repository.find(room_id).await else {
            return Vec::new();
        };
        let mut room = room.lock().await;

        if !room.leave(connection_id) {
            return Vec::new();
        }

        let targets = room.members.clone();
        let event = RoomEvent::CursorLeft {
            connection_id: connection_id.clone(),
        };
        if let Err(e) = self.message_pusher.broadcast(targets.clone(), &event).await {
            tracing::warn!("Failed to broadcast cursor-left for '{}': {}", connection_id, e);
        }

        tracing::info!(
            "Connection '{}' left room '{}' ({} members remain)",
            connection_id,
            room_id,
            targets.len()
        );

        targets
    }

    /// 接続の切断処理（参加中の Room からの退出と送信チャンネルの登録解除）
    pub async fn execute(&self, connection_id: &ConnectionId, room_id: Option<&RoomId>) {
        if let Some(room_id) = room_id {
            self.leave_room(connection_id, room_id).await;
        }
        self.message_pusher.unregister_client(connection_id).await;

        tracing::info!("Connection '{}' disconnected", connection_id);
    }
}
