//! Data Transfer Objects (DTOs) for the whiteboard.
//!
//! DTOs are organized by protocol:
//! - `websocket`: WebSocket event DTOs
//! - `http`: HTTP API response DTOs
//! - `conversion`: validation from DTOs into domain types, and back

pub mod conversion;
pub mod http;
pub mod websocket;
