//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::{
    domain::Room,
    infrastructure::dto::{
        http::{RoomDetailDto, RoomSummaryDto},
        websocket::ActionDto,
    },
    ui::state::AppState,
    usecase::GetRoomDetailError,
};
use codraw_shared::time::timestamp_to_rfc3339;

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Get list of rooms
pub async fn get_rooms(State(state): State<Arc<AppState>>) -> Json<Vec<RoomSummaryDto>> {
    let rooms = state.get_rooms_usecase.execute().await;

    // Domain Model から DTO への変換
    let summaries = rooms.iter().map(room_summary).collect();

    Json(summaries)
}

/// Get room detail by ID
pub async fn get_room_detail(
    State(state): State<Arc<AppState>>,
    Path(room_id): Path<String>,
) -> Result<Json<RoomDetailDto>, StatusCode> {
    match state.get_room_detail_usecase.execute(room_id).await {
        Ok(room) => {
            // Domain Model から DTO への変換
            let detail = RoomDetailDto {
                id: room.id.as_str().to_string(),
                members: room
                    .members
                    .iter()
                    .map(|id| id.as_str().to_string())
                    .collect(),
                created_at: timestamp_to_rfc3339(room.created_at.value()),
                actions: room.actions.iter().map(ActionDto::from).collect(),
                redo: room.redo.len(),
            };
            Ok(Json(detail))
        }
        Err(GetRoomDetailError::RoomNotFound) => Err(StatusCode::NOT_FOUND),
    }
}

fn room_summary(room: &Room) -> RoomSummaryDto {
    RoomSummaryDto {
        id: room.id.as_str().to_string(),
        members: room.members.len(),
        actions: room.actions.len(),
        redo: room.redo.len(),
        created_at: timestamp_to_rfc3339(room.created_at.value()),
    }
}
