//! WebSocket connection handlers.
//!
//! 1 つの接続は高々 1 つの Room に参加する。`join` より前に届いたイベントは破棄する。

use std::sync::Arc;

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::{
    sink::SinkExt,
    stream::{SplitSink, SplitStream, StreamExt},
};
use tokio::{sync::mpsc, task::JoinHandle};

use crate::{
    domain::{
        Action, ConnectionId, LiveSegment, Point, RoomId, Shape, Stroke, TextLabel,
        ValueObjectError,
    },
    infrastructure::dto::websocket::ClientEvent,
    ui::state::AppState,
    usecase::RoomOperationError,
};

/// 接続ごとの状態
struct Session {
    connection_id: ConnectionId,
    /// 参加中の Room
    room: Option<RoomId>,
}

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Spawns a task that receives encoded frames from the rx channel and pushes them to the
/// WebSocket sender.
///
/// The task ends when the channel closes or the socket write fails.
fn pusher_loop(
    mut rx: mpsc::UnboundedReceiver<String>,
    mut sender: SplitSink<WebSocket, Message>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(frame) = rx.recv().await {
            if sender.send(Message::Text(frame.into())).await.is_err() {
                break;
            }
        }
    })
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let (sender, mut receiver) = socket.split();

    let (tx, rx) = mpsc::unbounded_channel();
    let connection_id = state.connect_client_usecase.execute(tx).await;
    let mut session = Session {
        connection_id,
        room: None,
    };

    let mut send_task = pusher_loop(rx, sender);
    receive_loop(&mut receiver, &mut send_task, &state, &mut session).await;
    send_task.abort();

    state
        .disconnect_client_usecase
        .execute(&session.connection_id, session.room.as_ref())
        .await;
}

/// Reads frames until the socket closes or the send task ends.
///
/// Only the wait for the next frame races the send task. A dispatched event always
/// runs to completion so a room is never left mutated without its broadcast.
async fn receive_loop(
    receiver: &mut SplitStream<WebSocket>,
    send_task: &mut JoinHandle<()>,
    state: &AppState,
    session: &mut Session,
) {
    loop {
        let msg = tokio::select! {
            msg = receiver.next() => msg,
            _ = &mut *send_task => {
                tracing::debug!("Send task for '{}' finished", session.connection_id);
                break;
            }
        };

        let msg = match msg {
            Some(Ok(msg)) => msg,
            Some(Err(e)) => {
                tracing::warn!("WebSocket error on '{}': {}", session.connection_id, e);
                break;
            }
            None => break,
        };

        match msg {
            Message::Text(text) => dispatch(state, session, text.as_str()).await,
            Message::Close(_) => {
                tracing::info!("Connection '{}' requested close", session.connection_id);
                break;
            }
            Message::Binary(_) => {
                tracing::debug!("Ignoring binary frame from '{}'", session.connection_id);
            }
            // Ping/pong is handled automatically by the WebSocket protocol
            _ => {}
        }
    }
}

/// 受信したテキストフレームを対応する UseCase へ振り分ける
async fn dispatch(state: &AppState, session: &mut Session, text: &str) {
    let event = match serde_json::from_str::<ClientEvent>(text) {
        Ok(event) => event,
        Err(e) => {
            tracing::warn!(
                "Dropping malformed frame from '{}': {}",
                session.connection_id,
                e
            );
            return;
        }
    };

    if let ClientEvent::Join(room) = event {
        join(state, session, room).await;
        return;
    }

    let Some(room_id) = session.room.clone() else {
        tracing::debug!(
            "Dropping '{}' from '{}' before join",
            event.name(),
            session.connection_id
        );
        return;
    };
    let connection_id = &session.connection_id;
    let name = event.name();

    let result = match event {
        ClientEvent::Join(_) => return,
        ClientEvent::Draw(segment) => match LiveSegment::try_from(segment) {
            Ok(segment) => state
                .relay_usecase
                .draw(connection_id, &room_id, segment)
                .await
                .map(|_| ()),
            Err(e) => return drop_invalid(connection_id, name, e),
        },
        ClientEvent::Stroke(stroke) => {
            let action = Stroke::try_from(stroke).map(Action::from);
            append(state, connection_id, &room_id, name, action).await
        }
        ClientEvent::Shape(shape) => {
            let action = Shape::try_from(shape).map(Action::from);
            append(state, connection_id, &room_id, name, action).await
        }
        ClientEvent::Text(text) => {
            let action = TextLabel::try_from(text).map(Action::from);
            append(state, connection_id, &room_id, name, action).await
        }
        ClientEvent::Clear => state
            .clear_room_usecase
            .execute(connection_id, &room_id)
            .await
            .map(|_| ()),
        ClientEvent::Undo => state
            .history_usecase
            .undo(connection_id, &room_id)
            .await
            .map(|_| ()),
        ClientEvent::Redo => state
            .history_usecase
            .redo(connection_id, &room_id)
            .await
            .map(|_| ()),
        ClientEvent::Cursor(cursor) => match Point::new(cursor.x, cursor.y) {
            Ok(position) => state
                .relay_usecase
                .cursor(connection_id, &room_id, position)
                .await
                .map(|_| ()),
            Err(e) => return drop_invalid(connection_id, name, e),
        },
    };

    if let Err(e) = result {
        tracing::warn!(
            "Rejected '{}' from '{}' in room '{}': {}",
            name,
            connection_id,
            room_id,
            e
        );
    }
}

async fn join(state: &AppState, session: &mut Session, room: String) {
    let room_id = match RoomId::new(room) {
        Ok(room_id) => room_id,
        Err(e) => return drop_invalid(&session.connection_id, "join", e),
    };

    if let Some(previous) = session.room.take() {
        if previous != room_id {
            state
                .disconnect_client_usecase
                .leave_room(&session.connection_id, &previous)
                .await;
        }
    }

    match state
        .join_room_usecase
        .execute(&session.connection_id, &room_id)
        .await
    {
        Ok(_) => session.room = Some(room_id),
        Err(e) => tracing::warn!(
            "Connection '{}' failed to join room '{}': {}",
            session.connection_id,
            room_id,
            e
        ),
    }
}

async fn append(
    state: &AppState,
    connection_id: &ConnectionId,
    room_id: &RoomId,
    name: &str,
    action: Result<Action, ValueObjectError>,
) -> Result<(), RoomOperationError> {
    match action {
        Ok(action) => state
            .append_action_usecase
            .execute(connection_id, room_id, action)
            .await
            .map(|_| ()),
        Err(e) => {
            drop_invalid(connection_id, name, e);
            Ok(())
        }
    }
}

fn drop_invalid(connection_id: &ConnectionId, name: &str, error: ValueObjectError) {
    tracing::warn!(
        "Dropping invalid '{}' from '{}': {}",
        name,
        connection_id,
        error
    );
}
