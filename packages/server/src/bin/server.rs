//! Collaborative whiteboard server.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin codraw-server
//! cargo run --bin codraw-server -- --host 0.0.0.0 --port 3000
//! PORT=8080 cargo run --bin codraw-server
//! ```

use std::sync::Arc;

use clap::Parser;
use codraw_server::{
    domain::RoomLimits,
    infrastructure::{message_pusher::WebSocketMessagePusher, repository::InMemoryRoomRepository},
    ui::{AppState, Server},
};
use codraw_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "codraw-server")]
#[command(about = "Collaborative whiteboard server", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, env = "HOST", default_value = "127.0.0.1")]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, env = "PORT", default_value = "3000")]
    port: u16,

    /// Maximum number of actions kept in one room's history
    #[arg(long, default_value = "10000")]
    max_actions_per_room: usize,

    /// Maximum number of connections joined to one room
    #[arg(long, default_value = "64")]
    max_members_per_room: usize,

    /// Maximum number of rooms kept in memory
    #[arg(long, default_value = "1000")]
    max_rooms: usize,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "debug");

    let args = Args::parse();

    // 1. Create Repository (in-memory, rooms are created on first join)
    let limits = RoomLimits {
        max_actions: args.max_actions_per_room,
        max_members: args.max_members_per_room,
    };
    let repository = Arc::new(InMemoryRoomRepository::new(limits, args.max_rooms));
    tracing::info!(
        "Room limits: {} actions, {} members, {} rooms",
        limits.max_actions,
        limits.max_members,
        args.max_rooms
    );

    // 2. Create MessagePusher (WebSocket implementation)
    let message_pusher = Arc::new(WebSocketMessagePusher::new());

    // 3. Create UseCases
    let state = AppState::new(repository, message_pusher);

    // 4. Create and run the server
    let server = Server::new(state);
    if let Err(e) = server.run(args.host, args.port).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
