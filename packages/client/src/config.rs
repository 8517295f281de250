//! Client configuration.

use codraw_server::domain::RoomId;

use crate::input::Brush;

/// Connection settings shared by every reconnect attempt
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// WebSocket server URL
    pub url: String,
    /// Room to join; updated when the user switches rooms
    pub room: RoomId,
    /// Initial brush
    pub brush: Brush,
}
