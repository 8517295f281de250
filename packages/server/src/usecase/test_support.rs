//! UseCase テスト用の共通ヘルパー

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::{
    domain::{
        Action, BrushSize, Color, ConnectionId, MessagePusher, Point, RoomId, RoomLimits,
        RoomRepository, Stroke, StrokeTool, TextContent, TextLabel,
    },
    infrastructure::{
        dto::websocket::ServerEvent, message_pusher::WebSocketMessagePusher,
        repository::InMemoryRoomRepository,
    },
};

pub fn create_test_repository() -> Arc<InMemoryRoomRepository> {
    Arc::new(InMemoryRoomRepository::new(RoomLimits::default(), 10))
}

pub fn create_test_message_pusher() -> Arc<WebSocketMessagePusher> {
    Arc::new(WebSocketMessagePusher::new())
}

pub fn connection(id: &str) -> ConnectionId {
    ConnectionId::new(id.to_string()).unwrap()
}

pub fn room_id(id: &str) -> RoomId {
    RoomId::new(id.to_string()).unwrap()
}

pub fn text_action(text: &str) -> Action {
    Action::Text(TextLabel {
        position: Point::new(10.0, 20.0).unwrap(),
        text: TextContent::new(text.to_string()).unwrap(),
        color: Color::new("#000000".to_string()).unwrap(),
        size: BrushSize::new(2.0).unwrap(),
    })
}

pub fn red_stroke() -> Action {
    Action::Stroke(
        Stroke::new(
            StrokeTool::Pen,
            Color::new("#ff0000".to_string()).unwrap(),
            BrushSize::new(4.0).unwrap(),
            vec![
                Point::new(0.0, 0.0).unwrap(),
                Point::new(5.0, 5.0).unwrap(),
                Point::new(10.0, 0.0).unwrap(),
            ],
        )
        .unwrap(),
    )
}

/// 接続を MessagePusher に登録し、受信側を返す
pub async fn register(
    pusher: &WebSocketMessagePusher,
    id: &str,
) -> mpsc::UnboundedReceiver<String> {
    let (tx, rx) = mpsc::unbounded_channel();
    pusher.register_client(connection(id), tx).await;
    rx
}

/// Room を作成し、接続をメンバーとして追加する（通知は送らない）
pub async fn add_member(repository: &InMemoryRoomRepository, room: &str, id: &str) {
    let shared = repository.get_or_create(&room_id(room)).await.unwrap();
    shared.lock().await.join(connection(id)).unwrap();
}

/// 受信済みのフレームをすべて取り出してデコード
pub fn drain(rx: &mut mpsc::UnboundedReceiver<String>) -> Vec<ServerEvent> {
    let mut events = Vec::new();
    while let Ok(frame) = rx.try_recv() {
        events.push(serde_json::from_str(&frame).unwrap());
    }
    events
}
