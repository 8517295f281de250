//! HTTP API response DTOs.

use serde::{Deserialize, Serialize};

use super::websocket::ActionDto;

/// Room summary for list endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomSummaryDto {
    pub id: String,
    /// Number of connected members
    pub members: usize,
    /// Number of actions in the history
    pub actions: usize,
    /// Number of actions waiting on the redo stack
    pub redo: usize,
    pub created_at: String,
}

/// Room detail for detail endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomDetailDto {
    pub id: String,
    pub members: Vec<String>,
    pub created_at: String,
    pub actions: Vec<ActionDto>,
    pub redo: usize,
}
