//! UseCase: 確定した Action（stroke / shape / text）の追加処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - AppendActionUseCase::execute() メソッド
//! - 履歴への追加と、送信者以外のメンバーへのブロードキャスト
//!
//! ### なぜこのテストが必要か
//! - 送信者は楽観的に描画済みのため、送信者には送り返さない
//! - 追加は redo スタックを破棄する
//!
//! ### どのような状況を想定しているか
//! - 正常系：2 人の Room でのストローク追加
//! - 異常系：未参加の接続、履歴の上限

use std::sync::Arc;

use crate::domain::{Action, ConnectionId, MessagePusher, RoomEvent, RoomId, RoomRepository};

use super::{error::RoomOperationError, room_access::lock_member_room};

/// Action 追加のユースケース
pub struct AppendActionUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn RoomRepository>,
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
}

impl AppendActionUseCase {
    /// 新しい AppendActionUseCase を作成
    pub fn new(
        repository: Arc<dyn RoomRepository>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
        }
    }

    /// Action を履歴に追加し、送信者以外のメンバーへ配信する
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<ConnectionId>)` - 配信先
    /// * `Err(RoomOperationError)` - 未参加、または Room が追加を拒否した
    pub async fn execute(
        &self,
        connection_id: &ConnectionId,
        room_id: &RoomId,
        action: Action,
    ) -> Result<Vec<ConnectionId>, RoomOperationError> {
        let mut room = lock_member_room(self.repository.as_ref(), connection_id, room_id).await?;

        let kind = action.kind();
        room.append(action.clone())?;

        let targets = room.members_except(connection_id);
        self.message_pusher
            .broadcast(targets.clone(), &RoomEvent::Appended(action))
            .await?;

        tracing::debug!(
            "Appended {} to room '{}' ({} actions), relayed to {} peers",
            kind,
            room_id,
            room.actions.len(),
            targets.len()
        );

        Ok(targets)
    }
}
