//! Error types for the whiteboard client.

use thiserror::Error;

/// Client-specific errors
#[derive(Debug, Error)]
pub enum ClientError {
    /// Connection error
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// Terminal input that could not be parsed
    #[error("Invalid command: {0}")]
    InvalidCommand(String),

    #[error("Invalid room id '{0}'")]
    InvalidRoomId(String),
}
