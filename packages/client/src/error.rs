//! Error types for the chat client.

use thiserror::Error;
use tokio_tungstenite::tungstenite;

/// Client-specific errors
#[derive(Debug, Error)]
pub enum ClientError {
    /// The server URL cannot be used
    #[error("Invalid server URL: {0}")]
    InvalidUrl(String),

    /// The server refused the WebSocket handshake
    #[error("Server rejected the connection with HTTP {0}")]
    Rejected(u16),

    /// Connection error
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// An established session dropped
    #[error("Connection lost")]
    ConnectionLost,

    /// Reconnection gave up
    #[error("Failed to reconnect after {0} attempts")]
    ReconnectExhausted(u32),
}

impl ClientError {
    /// Classify a failed handshake
    pub fn from_connect(error: tungstenite::Error) -> Self {
        match error {
            tungstenite::Error::Url(e) => Self::InvalidUrl(e.to_string()),
            tungstenite::Error::Http(response) if response.status().is_client_error() => {
                Self::Rejected(response.status().as_u16())
            }
            e => Self::ConnectionError(e.to_string()),
        }
    }
}
