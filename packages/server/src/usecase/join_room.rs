//! UseCase: Room への参加処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - JoinRoomUseCase::execute() メソッド
//! - Room の遅延作成、メンバー登録、履歴スナップショット（init）の送信
//!
//! ### なぜこのテストが必要か
//! - 新しい接続は常に完全な履歴を元の順序で受け取る必要がある
//! - init は送信者のみに送られ、他のメンバーには何も通知されない
//!
//! ### どのような状況を想定しているか
//! - 正常系：空の Room への参加、履歴のある Room への参加
//! - 異常系：参加人数の上限、Room 数の上限、init の送信失敗（メンバー登録を取り消す）

use std::sync::Arc;

use crate::domain::{Action, ConnectionId, MessagePusher, RoomEvent, RoomId, RoomRepository};

use super::error::JoinRoomError;

/// Room 参加のユースケース
pub struct JoinRoomUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn RoomRepository>,
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
}

impl JoinRoomUseCase {
    /// 新しい JoinRoomUseCase を作成
    pub fn new(
        repository: Arc<dyn RoomRepository>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
        }
    }

    /// Room への参加を実行
    ///
    /// Room が存在しなければ空の履歴で作成する。参加後、現在の履歴を
    /// `init` として送信者にだけ送る。スナップショットの取得と送信は Room の
    /// ロック内で行うため、以後のブロードキャストは必ず init の後に届く。
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<Action>)` - 送信したスナップショット
    /// * `Err(JoinRoomError)` - 参加失敗
    pub async fn execute(
        &self,
        connection_id: &ConnectionId,
        room_id: &RoomId,
    ) -> Result<Vec<Action>, JoinRoomError> {
        let room = self.repository.get_or_create(room_id).await?;
        let mut room = room.lock().await;

        let was_member = room.is_member(connection_id);
        let snapshot = room.join(connection_id.clone())?;
        if let Err(e) = self
            .message_pusher
            .push_to(connection_id, &RoomEvent::Init(snapshot.clone()))
            .await
        {
            // init を受け取れない接続はメンバーに残さない
            if !was_member {
                room.leave(connection_id);
            }
            return Err(e.into());
        }

        tracing::info!(
            "Connection '{}' joined room '{}' ({} actions, {} members)",
            connection_id,
            room_id,
            snapshot.len(),
            room.members.len()
        );

        Ok(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{MessagePushError, MockMessagePusher, RepositoryError, RoomError, RoomLimits},
        infrastructure::{
            dto::websocket::{ActionDto, ServerEvent},
            repository::InMemoryRoomRepository,
        },
        usecase::test_support::*,
    };

    #[tokio::test]
    async fn test_join_creates_room_and_sends_empty_init() {
        // テスト項目: 未知の Room に参加すると空の Room が作成され、空の init が届く
        // given (前提条件):
        let repository = create_test_repository();
        let pusher = create_test_message_pusher();
        let mut rx = register(&pusher, "alice").await;
        let usecase = JoinRoomUseCase::new(repository.clone(), pusher);

        // when (操作):
        let result = usecase
            .execute(&connection("alice"), &room_id("abc123"))
            .await;

        // then (期待する結果):
        assert_eq!(result, Ok(vec![]));
        assert_eq!(drain(&mut rx), vec![ServerEvent::Init(vec![])]);
        let room = repository.find(&room_id("abc123")).await.unwrap();
        assert_eq!(room.lock().await.members, vec![connection("alice")]);
    }

    #[tokio::test]
    async fn test_join_sends_full_history_in_order_to_sender_only() {
        // テスト項目: 参加者には履歴全体が元の順序で届き、既存メンバーには何も届かない
        // given (前提条件):
        let repository = create_test_repository();
        let pusher = create_test_message_pusher();
        let mut rx_alice = register(&pusher, "alice").await;
        let mut rx_bob = register(&pusher, "bob").await;
        add_member(&repository, "abc123", "alice").await;
        {
            let room = repository.find(&room_id("abc123")).await.unwrap();
            let mut room = room.lock().await;
            room.append(red_stroke()).unwrap();
            room.append(text_action("hello")).unwrap();
        }
        let usecase = JoinRoomUseCase::new(repository.clone(), pusher);

        // when (操作):
        let snapshot = usecase
            .execute(&connection("bob"), &room_id("abc123"))
            .await
            .unwrap();

        // then (期待する結果):
        assert_eq!(snapshot, vec![red_stroke(), text_action("hello")]);
        assert_eq!(
            drain(&mut rx_bob),
            vec![ServerEvent::Init(vec![
                ActionDto::from(&red_stroke()),
                ActionDto::from(&text_action("hello")),
            ])]
        );
        assert!(drain(&mut rx_alice).is_empty());
    }

    #[tokio::test]
    async fn test_join_rejected_when_room_full() {
        // テスト項目: 参加人数の上限を超えると参加できず、init も送られない
        // given (前提条件):
        let repository = Arc::new(InMemoryRoomRepository::new(
            RoomLimits {
                max_actions: 100,
                max_members: 1,
            },
            10,
        ));
        let pusher = create_test_message_pusher();
        let mut rx_bob = register(&pusher, "bob").await;
        add_member(&repository, "abc123", "alice").await;
        let usecase = JoinRoomUseCase::new(repository.clone(), pusher);

        // when (操作):
        let result = usecase
            .execute(&connection("bob"), &room_id("abc123"))
            .await;

        // then (期待する結果):
        assert_eq!(
            result,
            Err(JoinRoomError::Rejected(RoomError::MemberCapacityExceeded(1)))
        );
        assert!(drain(&mut rx_bob).is_empty());
    }

    #[tokio::test]
    async fn test_join_rejected_when_too_many_rooms() {
        // テスト項目: Room 数の上限に達していると新しい Room には参加できない
        // given (前提条件):
        let repository = Arc::new(InMemoryRoomRepository::new(RoomLimits::default(), 1));
        add_member(&repository, "first", "alice").await;
        let mut pusher = MockMessagePusher::new();
        pusher.expect_push_to().never();
        let usecase = JoinRoomUseCase::new(repository, Arc::new(pusher));

        // when (操作):
        let result = usecase
            .execute(&connection("bob"), &room_id("second"))
            .await;

        // then (期待する結果):
        assert_eq!(
            result,
            Err(JoinRoomError::Repository(RepositoryError::RoomCapacityExceeded(1)))
        );
    }

    #[tokio::test]
    async fn test_rejoin_resends_init() {
        // テスト項目: 同じ Room に再度 join すると init が再送され、メンバーは重複しない
        // given (前提条件):
        let repository = create_test_repository();
        let mut pusher = MockMessagePusher::new();
        pusher
            .expect_push_to()
            .withf(|id, event| id.as_str() == "alice" && matches!(event, RoomEvent::Init(_)))
            .times(2)
            .returning(|_, _| Ok(()));
        let usecase = JoinRoomUseCase::new(repository.clone(), Arc::new(pusher));

        // when (操作):
        usecase
            .execute(&connection("alice"), &room_id("abc123"))
            .await
            .unwrap();
        usecase
            .execute(&connection("alice"), &room_id("abc123"))
            .await
            .unwrap();

        // then (期待する結果):
        let room = repository.find(&room_id("abc123")).await.unwrap();
        assert_eq!(room.lock().await.members.len(), 1);
    }

    #[tokio::test]
    async fn test_join_is_rolled_back_when_init_cannot_be_sent() {
        // テスト項目: init の送信に失敗した場合、参加はなかったことになる
        // given (前提条件):
        let repository = create_test_repository();
        let pusher = create_test_message_pusher();
        let rx = register(&pusher, "alice").await;
        drop(rx);
        let usecase = JoinRoomUseCase::new(repository.clone(), pusher);

        // when (操作):
        let result = usecase
            .execute(&connection("alice"), &room_id("abc123"))
            .await;

        // then (期待する結果):
        assert!(matches!(result, Err(JoinRoomError::PushFailed(MessagePushError::PushFailed(_)))));
        let room = repository.find(&room_id("abc123")).await.unwrap();
        assert!(room.lock().await.members.is_empty());
    }

    #[tokio::test]
    async fn test_failed_rejoin_keeps_existing_membership() {
        // テスト項目: 参加済みの接続の再 join で init の送信に失敗しても、既存のメンバー登録は残る
        // given (前提条件):
        let repository = create_test_repository();
        add_member(&repository, "abc123", "alice").await;
        let mut pusher = MockMessagePusher::new();
        pusher
            .expect_push_to()
            .times(1)
            .returning(|id, _| Err(MessagePushError::ClientNotFound(id.to_string())));
        let usecase = JoinRoomUseCase::new(repository.clone(), Arc::new(pusher));

        // when (操作):
        let result = usecase
            .execute(&connection("alice"), &room_id("abc123"))
            .await;

        // then (期待する結果):
        assert!(result.is_err());
        let room = repository.find(&room_id("abc123")).await.unwrap();
        assert_eq!(room.lock().await.members, vec![connection("alice")]);
    }
}
