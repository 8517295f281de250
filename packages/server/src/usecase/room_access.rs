//! 参加済みの Room を取り出す共通処理

use tokio::sync::OwnedMutexGuard;

use crate::domain::{ConnectionId, Room, RoomId, RoomRepository};

use super::error::RoomOperationError;

/// Room のロックを取得し、接続がメンバーであることを確認する
///
/// 返したガードを保持している間、この Room への他の変更は待たされる。
pub(super) async fn lock_member_room(
    repository: &dyn RoomRepository,
    connection_id: &ConnectionId,
    room_id: &RoomId,
) -> Result<OwnedMutexGuard<Room>, RoomOperationError> {
    let room = repository
        .find(room_id)
        .await
        .ok_or_else(|| RoomOperationError::RoomNotFound(room_id.to_string()))?;
    let room = room.lock_owned().await;

    if !room.is_member(connection_id) {
        return Err(RoomOperationError::NotAMember(room_id.to_string()));
    }

    Ok(room)
}
