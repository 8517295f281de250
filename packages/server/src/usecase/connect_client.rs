//! UseCase: WebSocket 接続の登録
//!
//! 接続直後はどの Room にも属さない。Room への参加は `join` イベントで行う。

use std::sync::Arc;

use crate::domain::{ConnectionId, ConnectionIdFactory, MessagePusher, PusherChannel};

/// 接続登録のユースケース
pub struct ConnectClientUseCase {
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
}

impl ConnectClientUseCase {
    /// 新しい ConnectClientUseCase を作成
    pub fn new(message_pusher: Arc<dyn MessagePusher>) -> Self {
        Self { message_pusher }
    }

    /// 接続 ID を採番し、送信チャンネルを登録する
    pub async fn execute(&self, sender: PusherChannel) -> ConnectionId {
        let connection_id = ConnectionIdFactory::generate();
        self.message_pusher
            .register_client(connection_id.clone(), sender)
            .await;

        tracing::info!("Connection '{}' registered", connection_id);

        connection_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usecase::test_support::create_test_message_pusher;
    use tokio::sync::mpsc;

    #[tokio::test]
    async fn test_connect_assigns_unique_ids() {
        // テスト項目: 接続ごとに異なる ID が採番され、送信チャンネルが登録される
        // given (前提条件):
        let pusher = create_test_message_pusher();
        let usecase = ConnectClientUseCase::new(pusher.clone());
        let (tx1, _rx1) = mpsc::unbounded_channel();
        let (tx2, _rx2) = mpsc::unbounded_channel();

        // when (操作):
        let first = usecase.execute(tx1).await;
        let second = usecase.execute(tx2).await;

        // then (期待する結果):
        assert_ne!(first, second);
        assert_eq!(pusher.client_count().await, 2);
    }
}
