//! HTTP API response DTOs.

use serde::{Deserialize, Serialize};

use super::websocket::ChatMessage;

/// Entry of `GET /api/rooms`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomSummaryDto {
    pub name: String,
    pub member_count: usize,
    pub history_length: usize,
    /// RFC 3339
    pub created_at: String,
}

/// Member entry of `GET /api/rooms/{room_name}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberDetailDto {
    pub connection_id: String,
    /// RFC 3339
    pub connected_at: String,
}

/// Body of `GET /api/rooms/{room_name}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomDetailDto {
    pub name: String,
    /// RFC 3339
    pub created_at: String,
    pub members: Vec<MemberDetailDto>,
    /// Oldest first
    pub history: Vec<ChatMessage>,
}
