//! Repository trait 定義
//!
//! ドメイン層が必要とするデータアクセスのインターフェースを定義します。
//! 具体的な実装は Infrastructure 層が提供します（依存性の逆転）。

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::{RepositoryError, Room, RoomId};

/// Room ごとのロック
///
/// 同じ Room への変更とそのブロードキャストはこのロックの内側で行う。
/// 受信順 = 適用順 = ブロードキャスト順が Room 単位で保証され、
/// 別の Room の処理は並行して進む。
pub type SharedRoom = Arc<Mutex<Room>>;

/// Room Repository trait
///
/// UseCase 層はこの trait に依存し、Infrastructure 層の具体的な実装には依存しない。
#[async_trait]
pub trait RoomRepository: Send + Sync {
    /// Room を取得する。存在しなければ空の Room を作成する
    async fn get_or_create(&self, room_id: &RoomId) -> Result<SharedRoom, RepositoryError>;

    /// 既存の Room を取得する
    async fn find(&self, room_id: &RoomId) -> Option<SharedRoom>;

    /// 全 Room のスナップショット（ID 順）
    async fn list(&self) -> Vec<Room>;

    /// Room 数
    async fn count(&self) -> usize;
}
