//! Terminal client for the collaborative whiteboard.
//!
//! Joins a room, mirrors its drawing history and turns typed pointer commands into
//! drawing events. Automatically reconnects on disconnection (max 5 attempts with
//! 5 second interval) and rejoins the current room.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin codraw-client -- --room abc123
//! cargo run --bin codraw-client -- -u ws://127.0.0.1:3000/ws --color '#ff0000' --size 6
//! ```

use clap::Parser;

use codraw_client::{ClientConfig, input::Brush, run_client};
use codraw_server::domain::{BrushSize, Color, RoomId, RoomIdFactory};
use codraw_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "codraw-client")]
#[command(about = "Terminal client for the collaborative whiteboard", long_about = None)]
struct Args {
    /// WebSocket server URL
    #[arg(short = 'u', long, default_value = "ws://127.0.0.1:3000/ws")]
    url: String,

    /// Room to join (a new room code is generated when omitted)
    #[arg(short = 'r', long)]
    room: Option<String>,

    /// Initial brush color
    #[arg(short = 'c', long, default_value = "#000000")]
    color: String,

    /// Initial brush size
    #[arg(short = 's', long, default_value_t = 4.0)]
    size: f64,
}

#[tokio::main]
async fn main() {
    setup_logger(env!("CARGO_BIN_NAME"), "info");

    let args = Args::parse();

    let room = match args.room {
        Some(room) => match RoomId::new(room) {
            Ok(room) => room,
            Err(e) => {
                tracing::error!("Invalid room: {}", e);
                std::process::exit(1);
            }
        },
        None => RoomIdFactory::generate(),
    };
    let brush = match (Color::new(args.color), BrushSize::new(args.size)) {
        (Ok(color), Ok(size)) => Brush { color, size },
        (Err(e), _) | (_, Err(e)) => {
            tracing::error!("Invalid brush: {}", e);
            std::process::exit(1);
        }
    };

    let config = ClientConfig {
        url: args.url,
        room,
        brush,
    };

    if let Err(e) = run_client(config).await {
        tracing::error!("Client error: {}", e);
        std::process::exit(1);
    }
}
