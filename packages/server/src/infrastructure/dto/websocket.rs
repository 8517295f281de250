//! WebSocket message DTOs.
//!
//! Every frame is a JSON text message of the form
//! `{"event": "<name>", "data": <payload>}`; `data` is omitted for events
//! without a payload (`clear`, `undo`, `redo`).

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointDto {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrokeToolDto {
    Pen,
    Eraser,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CompositeDto {
    #[default]
    SourceOver,
    DestinationOut,
}

/// Grouped freehand stroke
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrokeDto {
    pub tool: StrokeToolDto,
    pub color: String,
    pub size: f64,
    pub points: Vec<PointDto>,
}

/// Shape geometry, tagged by the shape tool name
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "tool", rename_all = "lowercase")]
pub enum ShapeGeometryDto {
    Rect { x: f64, y: f64, w: f64, h: f64 },
    Circle { cx: f64, cy: f64, r: f64 },
    Line { x1: f64, y1: f64, x2: f64, y2: f64 },
}

/// Shape (`{"tool":"rect","color":..,"size":..,"x":..,"y":..,"w":..,"h":..}`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeDto {
    pub color: String,
    pub size: f64,
    #[serde(flatten)]
    pub geometry: ShapeGeometryDto,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextDto {
    pub x: f64,
    pub y: f64,
    pub text: String,
    pub color: String,
    pub size: f64,
}

/// Live segment of an in-progress stroke
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentDto {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    pub color: String,
    pub size: f64,
    #[serde(default)]
    pub composite: CompositeDto,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CursorDto {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CursorPositionDto {
    pub id: String,
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CursorLeftDto {
    pub id: String,
}

/// History entry as sent in `init` / `rebuild` snapshots
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "lowercase")]
pub enum ActionDto {
    Stroke(StrokeDto),
    Shape(ShapeDto),
    Text(TextDto),
}

/// Client → server events
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "kebab-case")]
pub enum ClientEvent {
    Join(String),
    Draw(SegmentDto),
    Stroke(StrokeDto),
    Shape(ShapeDto),
    Text(TextDto),
    Clear,
    Undo,
    Redo,
    Cursor(CursorDto),
}

impl ClientEvent {
    pub fn name(&self) -> &'static str {
        match self {
            ClientEvent::Join(_) => "join",
            ClientEvent::Draw(_) => "draw",
            ClientEvent::Stroke(_) => "stroke",
            ClientEvent::Shape(_) => "shape",
            ClientEvent::Text(_) => "text",
            ClientEvent::Clear => "clear",
            ClientEvent::Undo => "undo",
            ClientEvent::Redo => "redo",
            ClientEvent::Cursor(_) => "cursor",
        }
    }
}

/// Server → client events
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "kebab-case")]
pub enum ServerEvent {
    Init(Vec<ActionDto>),
    Draw(SegmentDto),
    Stroke(StrokeDto),
    Shape(ShapeDto),
    Text(TextDto),
    Clear,
    Rebuild(Vec<ActionDto>),
    Cursor(CursorPositionDto),
    CursorLeft(CursorLeftDto),
}

impl ServerEvent {
    pub fn name(&self) -> &'static str {
        match self {
            ServerEvent::Init(_) => "init",
            ServerEvent::Draw(_) => "draw",
            ServerEvent::Stroke(_) => "stroke",
            ServerEvent::Shape(_) => "shape",
            ServerEvent::Text(_) => "text",
            ServerEvent::Clear => "clear",
            ServerEvent::Rebuild(_) => "rebuild",
            ServerEvent::Cursor(_) => "cursor",
            ServerEvent::CursorLeft(_) => "cursor-left",
        }
    }
}
