//! Domain error types.

use thiserror::Error;

/// Errors raised when constructing value objects from untrusted input
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueObjectError {
    /// Room name is empty
    #[error("Room name must not be empty")]
    RoomNameEmpty,

    /// Room name exceeds the maximum length
    #[error("Room name is too long (max {max} characters, got {actual})")]
    RoomNameTooLong { max: usize, actual: usize },

    /// Room name contains a character outside `[A-Za-z0-9_-]`
    #[error("Room name contains invalid character '{0}'")]
    RoomNameInvalidCharacter(char),
}

/// Errors raised when pushing a payload to a single connection
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MessagePushError {
    /// The outbound channel of the connection is closed
    #[error("Connection channel closed: {0}")]
    ChannelClosed(String),

    /// The connection stopped draining its outbound queue
    #[error("Outbound queue full ({0} payloads pending)")]
    QueueFull(usize),

    /// The connection is not a member of the room
    #[error("Connection '{0}' not found")]
    ConnectionNotFound(String),
}
