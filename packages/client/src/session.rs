//! WebSocket client session management.

use elderscape_server::infrastructure::dto::websocket::{ChatMessage, HistoryMessage, MessageType};
use elderscape_shared::time::now_millis;
use futures_util::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use tokio_tungstenite::{connect_async, tungstenite::protocol::Message};

use crate::error::ClientError;

use super::{
    formatter::MessageFormatter,
    ui::{InputEvent, redisplay_prompt},
};

/// Render one server frame for the terminal
fn render_incoming(text: &str) -> String {
    if let Ok(history) = serde_json::from_str::<HistoryMessage>(text)
        && history.r#type == MessageType::History
    {
        MessageFormatter::format_history(&history.messages)
    } else if let Ok(message) = serde_json::from_str::<ChatMessage>(text) {
        MessageFormatter::format_chat_message(&message)
    } else {
        MessageFormatter::format_raw_message(text)
    }
}

/// Run one connection until the server goes away or the user quits.
///
/// Returns `Ok(())` when the user ended the session and an error when the
/// connection failed or dropped.
pub async fn run_client_session(
    url: &str,
    sender: &str,
    input: &mut mpsc::UnboundedReceiver<InputEvent>,
) -> Result<(), ClientError> {
    let (ws_stream, _response) = connect_async(url)
        .await
        .map_err(ClientError::from_connect)?;

    tracing::info!("Connected to chat server!");
    println!(
        "\nYou are '{}'. Type messages and press Enter to send. Press Ctrl+C to exit.\n",
        sender
    );

    let (mut write, mut read) = ws_stream.split();

    let sender_for_read = sender.to_string();
    let mut read_task = tokio::spawn(async move {
        while let Some(message) = read.next().await {
            match message {
                Ok(Message::Text(text)) => {
                    print!("{}", render_incoming(&text));
                    redisplay_prompt(&sender_for_read);
                }
                Ok(Message::Binary(data)) => {
                    print!("{}", MessageFormatter::format_binary_message(data.len()));
                    redisplay_prompt(&sender_for_read);
                }
                Ok(Message::Close(_)) => {
                    tracing::info!("Server closed the connection");
                    break;
                }
                Err(e) => {
                    tracing::warn!("WebSocket read error: {}", e);
                    break;
                }
                _ => {}
            }
        }
    });

    loop {
        tokio::select! {
            _ = &mut read_task => {
                return Err(ClientError::ConnectionLost);
            }
            event = input.recv() => {
                let line = match event {
                    Some(InputEvent::Line(line)) => line,
                    Some(InputEvent::Exit) | None => {
                        read_task.abort();
                        write.send(Message::Close(None)).await.ok();
                        return Ok(());
                    }
                };

                let msg = ChatMessage {
                    r#type: MessageType::Chat,
                    sender: sender.to_string(),
                    content: line,
                    timestamp: now_millis(),
                };

                let json = match serde_json::to_string(&msg) {
                    Ok(json) => json,
                    Err(e) => {
                        tracing::error!("Failed to serialize message: {}", e);
                        continue;
                    }
                };

                if let Err(e) = write.send(Message::Text(json.into())).await {
                    tracing::warn!("Failed to send message: {}", e);
                    read_task.abort();
                    return Err(ClientError::ConnectionLost);
                }
            }
        }
    }
}
