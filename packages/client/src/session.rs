//! WebSocket client session management.

use std::io::Write;

use codraw_server::infrastructure::dto::websocket::ClientEvent;
use codraw_shared::time::{get_timestamp, timestamp_to_clock_time};
use futures_util::{Sink, SinkExt, StreamExt};
use tokio::sync::mpsc;
use tokio_tungstenite::{connect_async, tungstenite::protocol::Message};

use crate::{
    command::Command,
    config::ClientConfig,
    error::ClientError,
    formatter::{format_connected, format_share_link},
    whiteboard::Whiteboard,
};

/// Redisplay the prompt after printing output
pub fn redisplay_prompt(config: &ClientConfig) {
    print!("{}> ", config.room);
    std::io::stdout().flush().ok();
}

/// Run one connection to the server
///
/// Returns `Ok` when the user quits or input ends, and `ConnectionError` when the socket is lost.
/// `config.room` follows `join` commands so a reconnect rejoins the current room.
pub async fn run_client_session(
    config: &mut ClientConfig,
    input_rx: &mut mpsc::UnboundedReceiver<String>,
) -> Result<(), ClientError> {
    let (ws_stream, _response) = connect_async(config.url.as_str())
        .await
        .map_err(|e| ClientError::ConnectionError(e.to_string()))?;

    tracing::info!("Connected to {}", config.url);
    print!(
        "{}",
        format_connected(&config.room, &format_share_link(&config.url, &config.room))
    );

    let (mut write, mut read) = ws_stream.split();
    let mut board = Whiteboard::new(config.room.clone(), config.brush.clone());

    send(&mut write, &ClientEvent::Join(config.room.to_string())).await?;
    redisplay_prompt(config);

    loop {
        tokio::select! {
            message = read.next() => {
                match message {
                    Some(Ok(Message::Text(text))) => {
                        board.apply_frame(text.as_str());
                        print_output(&mut board, config);
                    }
                    Some(Ok(Message::Close(_))) | None => {
                        tracing::info!("Server closed the connection");
                        return Err(ClientError::ConnectionError("Connection lost".to_string()));
                    }
                    Some(Err(e)) => {
                        tracing::warn!("WebSocket read error: {}", e);
                        return Err(ClientError::ConnectionError(e.to_string()));
                    }
                    Some(Ok(_)) => {}
                }
            }
            line = input_rx.recv() => {
                let Some(line) = line else {
                    return Ok(());
                };
                let command = match Command::parse(&line) {
                    Ok(command) => command,
                    Err(e) => {
                        println!("{}", e);
                        redisplay_prompt(config);
                        continue;
                    }
                };

                let outcome = board.execute(command);
                if outcome.quit {
                    write.send(Message::Close(None)).await.ok();
                    return Ok(());
                }
                if let Some(room) = outcome.joined {
                    config.room = room;
                }
                for event in &outcome.events {
                    send(&mut write, event).await?;
                }
                print_output(&mut board, config);
            }
        }
    }
}

async fn send<S>(write: &mut S, event: &ClientEvent) -> Result<(), ClientError>
where
    S: Sink<Message> + Unpin,
    S::Error: std::fmt::Display,
{
    let json = match serde_json::to_string(event) {
        Ok(json) => json,
        Err(e) => {
            tracing::error!("Failed to serialize '{}': {}", event.name(), e);
            return Ok(());
        }
    };

    write.send(Message::Text(json.into())).await.map_err(|e| {
        tracing::warn!("Failed to send '{}': {}", event.name(), e);
        ClientError::ConnectionError(e.to_string())
    })
}

fn print_output(board: &mut Whiteboard, config: &ClientConfig) {
    let lines = board.take_output();
    if lines.is_empty() {
        redisplay_prompt(config);
        return;
    }

    let time = timestamp_to_clock_time(get_timestamp());
    println!();
    for line in lines {
        println!("[{}] {}", time, line);
    }
    redisplay_prompt(config);
}
