//! WebSocket wire messages.
//!
//! Every frame is a JSON object tagged by `type`:
//!
//! ```text
//! {"type":"chat","sender":"A","content":"hello","timestamp":1000}
//! {"type":"history","messages":[ ...chat/system messages, oldest first... ]}
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::entity;

/// Message type tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageType {
    Chat,
    System,
    History,
}

/// Chat or system message, both directions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub r#type: MessageType,
    pub sender: String,
    pub content: String,
    pub timestamp: i64,
}

/// History envelope, relay to client only
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryMessage {
    pub r#type: MessageType,
    pub messages: Vec<ChatMessage>,
}

/// Reasons an inbound frame is discarded
#[derive(Debug, Error)]
pub enum DecodeError {
    /// Not a JSON chat message
    #[error("invalid chat message: {0}")]
    Json(#[from] serde_json::Error),

    /// `history` is only ever sent by the relay
    #[error("history envelopes are not accepted from clients")]
    HistoryFromClient,
}

/// Decode a client frame into a domain message.
pub fn decode_inbound(raw: &str) -> Result<entity::ChatMessage, DecodeError> {
    let dto = serde_json::from_str::<ChatMessage>(raw)?;
    entity::ChatMessage::try_from(dto)
}

/// Encode a single chat or system message for broadcast.
pub fn encode_message(message: &entity::ChatMessage) -> serde_json::Result<String> {
    serde_json::to_string(&ChatMessage::from(message.clone()))
}

/// Encode the history envelope sent to a newly joined connection.
pub fn encode_history(messages: &[entity::ChatMessage]) -> serde_json::Result<String> {
    let envelope = HistoryMessage {
        r#type: MessageType::History,
        messages: messages.iter().cloned().map(ChatMessage::from).collect(),
    };
    serde_json::to_string(&envelope)
}
