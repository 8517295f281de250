//! UseCase: Room 詳細の取得

use std::sync::Arc;

use crate::domain::{Room, RoomId, RoomRepository};

use super::error::GetRoomDetailError;

/// Room 詳細取得のユースケース
pub struct GetRoomDetailUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn RoomRepository>,
}

impl GetRoomDetailUseCase {
    /// 新しい GetRoomDetailUseCase を作成
    pub fn new(repository: Arc<dyn RoomRepository>) -> Self {
        Self { repository }
    }

    /// Room のスナップショットを返す
    ///
    /// 不正な形式の ID は存在しない Room として扱う。
    pub async fn execute(&self, room_id: String) -> Result<Room, GetRoomDetailError> {
        let room_id = RoomId::new(room_id).map_err(|_| GetRoomDetailError::RoomNotFound)?;
        let room = self
            .repository
            .find(&room_id)
            .await
            .ok_or(GetRoomDetailError::RoomNotFound)?;
        let snapshot = room.lock().await.clone();
        Ok(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usecase::test_support::*;

    #[tokio::test]
    async fn test_get_room_detail_returns_snapshot() {
        // テスト項目: 既存の Room のメンバーと履歴が取得できる
        // given (前提条件):
        let repository = create_test_repository();
        add_member(&repository, "abc123", "a").await;
        {
            let room = repository.find(&room_id("abc123")).await.unwrap();
            room.lock().await.append(red_stroke()).unwrap();
        }
        let usecase = GetRoomDetailUseCase::new(repository);

        // when (操作):
        let room = usecase.execute("abc123".to_string()).await.unwrap();

        // then (期待する結果):
        assert_eq!(room.members, vec![connection("a")]);
        assert_eq!(room.actions, vec![red_stroke()]);
    }

    #[tokio::test]
    async fn test_get_room_detail_not_found() {
        // テスト項目: 存在しない Room や不正な ID は RoomNotFound になる
        // given (前提条件):
        let usecase = GetRoomDetailUseCase::new(create_test_repository());

        // when (操作):
        let missing = usecase.execute("abc123".to_string()).await;
        let invalid = usecase.execute("bad id!".to_string()).await;

        // then (期待する結果):
        assert_eq!(missing, Err(GetRoomDetailError::RoomNotFound));
        assert_eq!(invalid, Err(GetRoomDetailError::RoomNotFound));
    }
}
