//! UseCase: Room 一覧の取得

use std::sync::Arc;

use crate::domain::{Room, RoomRepository};

/// Room 一覧取得のユースケース
pub struct GetRoomsUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn RoomRepository>,
}

impl GetRoomsUseCase {
    /// 新しい GetRoomsUseCase を作成
    pub fn new(repository: Arc<dyn RoomRepository>) -> Self {
        Self { repository }
    }

    /// 全 Room のスナップショットを ID 順で返す
    pub async fn execute(&self) -> Vec<Room> {
        self.repository.list().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usecase::test_support::*;

    #[tokio::test]
    async fn test_get_rooms_sorted_by_id() {
        // テスト項目: Room 一覧が ID 順で返る
        // given (前提条件):
        let repository = create_test_repository();
        add_member(&repository, "zeta", "a").await;
        add_member(&repository, "alpha", "b").await;
        let usecase = GetRoomsUseCase::new(repository);

        // when (操作):
        let rooms = usecase.execute().await;

        // then (期待する結果):
        let ids: Vec<&str> = rooms.iter().map(|room| room.id.as_str()).collect();
        assert_eq!(ids, vec!["alpha", "zeta"]);
    }

    #[tokio::test]
    async fn test_get_rooms_empty() {
        // テスト項目: Room が 1 つもない場合は空の一覧が返る
        // given (前提条件):
        let usecase = GetRoomsUseCase::new(create_test_repository());

        // when (操作):
        let rooms = usecase.execute().await;

        // then (期待する結果):
        assert!(rooms.is_empty());
    }
}
