//! InMemory Room Repository 実装
//!
//! ドメイン層が定義する RoomRepository trait の具体的な実装。
//! RoomId → Room のマップをプロセス内に保持します（永続化はしない）。
//!
//! ## ロックの構造
//!
//! ```text
//! rooms: Mutex<HashMap<RoomId, Arc<Mutex<Room>>>>
//!        └ マップ全体のロック（Room の検索・作成の間だけ保持）
//!                                   └ Room ごとのロック（UseCase が変更〜通知の間保持）
//! ```
//!
//! マップのロックを保持したまま Room のロックを待つことはしない。

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use codraw_shared::time::{Clock, SystemClock};
use tokio::sync::Mutex;

use crate::domain::{
    RepositoryError, Room, RoomId, RoomLimits, RoomRepository, SharedRoom, Timestamp,
};

/// インメモリ Room Repository 実装
pub struct InMemoryRoomRepository {
    rooms: Mutex<HashMap<RoomId, SharedRoom>>,
    /// 新しく作成する Room に適用する上限
    limits: RoomLimits,
    /// 同時に保持できる Room 数
    max_rooms: usize,
    clock: Arc<dyn Clock>,
}

impl InMemoryRoomRepository {
    /// 新しい InMemoryRoomRepository を作成
    pub fn new(limits: RoomLimits, max_rooms: usize) -> Self {
        Self::with_clock(limits, max_rooms, Arc::new(SystemClock))
    }

    /// Room の作成時刻に使う Clock を指定して作成
    pub fn with_clock(limits: RoomLimits, max_rooms: usize, clock: Arc<dyn Clock>) -> Self {
        Self {
            rooms: Mutex::new(HashMap::new()),
            limits,
            max_rooms,
            clock,
        }
    }
}

impl Default for InMemoryRoomRepository {
    fn default() -> Self {
        Self::new(RoomLimits::default(), 1_000)
    }
}

#[async_trait]
impl RoomRepository for InMemoryRoomRepository {
    async fn get_or_create(&self, room_id: &RoomId) -> Result<SharedRoom, RepositoryError> {
        let mut rooms = self.rooms.lock().await;

        if let Some(room) = rooms.get(room_id) {
            return Ok(room.clone());
        }

        if rooms.len() >= self.max_rooms {
            // 上限に達した場合のみ、誰も参加していない Room を 1 つ捨てて空きを作る
            let idle = rooms
                .iter()
                .find(|(_, room)| is_idle(room))
                .map(|(id, _)| id.clone());
            match idle {
                Some(idle) => {
                    rooms.remove(&idle);
                    tracing::info!("Room '{}' evicted to make room for '{}'", idle, room_id);
                }
                None => return Err(RepositoryError::RoomCapacityExceeded(self.max_rooms)),
            }
        }

        let room = Arc::new(Mutex::new(Room::with_limits(
            room_id.clone(),
            Timestamp::new(self.clock.now_millis()),
            self.limits,
        )));
        rooms.insert(room_id.clone(), room.clone());
        tracing::info!("Room '{}' created ({} rooms)", room_id, rooms.len());

        Ok(room)
    }

    async fn find(&self, room_id: &RoomId) -> Option<SharedRoom> {
        let rooms = self.rooms.lock().await;
        rooms.get(room_id).cloned()
    }

    async fn list(&self) -> Vec<Room> {
        let handles: Vec<SharedRoom> = {
            let rooms = self.rooms.lock().await;
            rooms.values().cloned().collect()
        };

        let mut snapshots = Vec::with_capacity(handles.len());
        for handle in handles {
            snapshots.push(handle.lock().await.clone());
        }
        snapshots.sort_by(|a, b| a.id.cmp(&b.id));
        snapshots
    }

    async fn count(&self) -> usize {
        let rooms = self.rooms.lock().await;
        rooms.len()
    }
}

/// メンバーがおらず、マップ以外から参照されていない Room
///
/// マップのロック中は新しい参照が増えないため、`strong_count == 1` なら
/// 取得済みのハンドルから参加されることはない。
fn is_idle(room: &SharedRoom) -> bool {
    Arc::strong_count(room) == 1
        && room
            .try_lock()
            .is_ok_and(|room| room.members.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ConnectionId;
    use codraw_shared::time::FixedClock;

    // ========================================
    // テスト作業記録
    // ========================================
    // 【何をテストするか】
    // - InMemoryRoomRepository の Room 作成・取得・一覧
    // - Room 数の上限
    //
    // 【なぜこのテストが必要か】
    // - Room は最初の join で遅延作成され、上限に達するまでは保持される
    // - 同じ RoomId に対しては常に同じ Room（同じロック）が返る必要がある
    //
    // 【どのようなシナリオをテストするか】
    // 1. 未知の RoomId で空の Room が作成される
    // 2. 同じ RoomId では同じ Room が返る
    // 3. Room 数の上限では空の Room を追い出し、全 Room に参加者がいればエラー
    // 4. 一覧は ID 順
    // ========================================

    fn room_id(id: &str) -> RoomId {
        RoomId::new(id.to_string()).unwrap()
    }

    fn create_test_repository(max_rooms: usize) -> InMemoryRoomRepository {
        InMemoryRoomRepository::with_clock(
            RoomLimits::default(),
            max_rooms,
            Arc::new(FixedClock::new(1_000)),
        )
    }

    #[tokio::test]
    async fn test_get_or_create_creates_empty_room() {
        // テスト項目: 未知の RoomId に対して空の Room が作成される
        // given (前提条件):
        let repo = create_test_repository(10);

        // when (操作):
        let room = repo.get_or_create(&room_id("abc123")).await.unwrap();

        // then (期待する結果):
        let room = room.lock().await;
        assert_eq!(room.id.as_str(), "abc123");
        assert_eq!(room.created_at, Timestamp::new(1_000));
        assert!(room.actions.is_empty());
        assert!(room.redo.is_empty());
        assert_eq!(repo.count().await, 1);
    }

    #[tokio::test]
    async fn test_get_or_create_returns_same_room() {
        // テスト項目: 同じ RoomId では同じ Room インスタンスが返る
        // given (前提条件):
        let repo = create_test_repository(10);
        let first = repo.get_or_create(&room_id("abc123")).await.unwrap();

        // when (操作):
        let second = repo.get_or_create(&room_id("abc123")).await.unwrap();

        // then (期待する結果):
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(repo.count().await, 1);
    }

    #[tokio::test]
    async fn test_get_or_create_rejects_when_every_room_is_in_use() {
        // テスト項目: 全 Room に参加者がいる状態で上限を超える作成はエラーになるが、既存の Room は取得できる
        // given (前提条件):
        let repo = create_test_repository(1);
        let first = repo.get_or_create(&room_id("first")).await.unwrap();
        first
            .lock()
            .await
            .join(ConnectionId::new("alice".to_string()).unwrap())
            .unwrap();
        drop(first);

        // when (操作):
        let result = repo.get_or_create(&room_id("second")).await;
        let existing = repo.get_or_create(&room_id("first")).await;

        // then (期待する結果):
        assert!(matches!(result, Err(RepositoryError::RoomCapacityExceeded(1))));
        assert!(existing.is_ok());
    }

    #[tokio::test]
    async fn test_get_or_create_evicts_empty_room_at_limit() {
        // テスト項目: 上限に達していても、参加者のいない Room があれば追い出して新しい Room を作る
        // given (前提条件):
        let repo = create_test_repository(1);
        repo.get_or_create(&room_id("first")).await.unwrap();

        // when (操作):
        let result = repo.get_or_create(&room_id("second")).await;

        // then (期待する結果):
        assert!(result.is_ok());
        assert_eq!(repo.count().await, 1);
        assert!(repo.find(&room_id("first")).await.is_none());
    }

    #[tokio::test]
    async fn test_room_held_by_a_caller_is_not_evicted() {
        // テスト項目: 取得済みのハンドルがある Room は、メンバーがいなくても追い出されない
        // given (前提条件):
        let repo = create_test_repository(1);
        let held = repo.get_or_create(&room_id("first")).await.unwrap();

        // when (操作):
        let result = repo.get_or_create(&room_id("second")).await;

        // then (期待する結果):
        assert!(matches!(result, Err(RepositoryError::RoomCapacityExceeded(1))));
        assert!(held.lock().await.members.is_empty());
        assert!(repo.find(&room_id("first")).await.is_some());
    }

    #[tokio::test]
    async fn test_find_does_not_create() {
        // テスト項目: find は Room を作成しない
        // given (前提条件):
        let repo = create_test_repository(10);

        // when (操作):
        let result = repo.find(&room_id("missing")).await;

        // then (期待する結果):
        assert!(result.is_none());
        assert_eq!(repo.count().await, 0);
    }

    #[tokio::test]
    async fn test_list_returns_snapshots_sorted_by_id() {
        // テスト項目: 一覧は ID 順のスナップショットで返る
        // given (前提条件):
        let repo = create_test_repository(10);
        repo.get_or_create(&room_id("zeta")).await.unwrap();
        repo.get_or_create(&room_id("alpha")).await.unwrap();

        // when (操作):
        let rooms = repo.list().await;

        // then (期待する結果):
        let ids: Vec<&str> = rooms.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["alpha", "zeta"]);
    }
}
