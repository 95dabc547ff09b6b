//! WebSocket connection handlers.

use std::{sync::Arc, time::Duration};

use axum::{
    extract::{
        Path, State,
        ws::{Message, WebSocket, WebSocketUpgrade, rejection::WebSocketUpgradeRejection},
    },
    http::StatusCode,
    response::{IntoResponse, Response},
};
use futures_util::{
    sink::SinkExt,
    stream::{SplitSink, SplitStream, StreamExt},
};
use tokio::{sync::mpsc, task::JoinHandle};
use tracing::Level;

use crate::{
    domain::{ConnectionId, RoomName},
    infrastructure::message_pusher::WebSocketMessagePusher,
    ui::state::AppState,
    usecase::IngestError,
};

/// A single frame write that takes longer than this ends the connection
const WRITE_TIMEOUT: Duration = Duration::from_secs(10);

/// Upgrade into the default (global game chat) room
pub async fn default_room_websocket_handler(
    ws: Result<WebSocketUpgrade, WebSocketUpgradeRejection>,
    State(state): State<Arc<AppState>>,
) -> Response {
    match ws {
        Ok(ws) => {
            let room_name = state.default_room.clone();
            upgrade(ws, state, room_name)
        }
        Err(rejection) => upgrade_required(rejection),
    }
}

/// Upgrade into the room named in the path
pub async fn room_websocket_handler(
    ws: Result<WebSocketUpgrade, WebSocketUpgradeRejection>,
    State(state): State<Arc<AppState>>,
    Path(room_name): Path<String>,
) -> Response {
    let ws = match ws {
        Ok(ws) => ws,
        Err(rejection) => return upgrade_required(rejection),
    };

    match RoomName::try_from(room_name.clone()) {
        Ok(room_name) => upgrade(ws, state, room_name),
        Err(e) => {
            tracing::warn!("Invalid room name '{}': {}", room_name, e);
            (StatusCode::BAD_REQUEST, e.to_string()).into_response()
        }
    }
}

fn upgrade(ws: WebSocketUpgrade, state: Arc<AppState>, room_name: RoomName) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, state, room_name))
        .into_response()
}

/// Reject a request that did not ask for a WebSocket upgrade. No room state is touched.
fn upgrade_required(rejection: WebSocketUpgradeRejection) -> Response {
    tracing::warn!("Rejecting non-upgrade request: {}", rejection);
    (StatusCode::UPGRADE_REQUIRED, "Expected WebSocket upgrade").into_response()
}

/// Spawns a task that drains the connection's outbound queue into the WebSocket sink.
///
/// The task ends on the first write error or on a write that does not finish
/// within `WRITE_TIMEOUT`. Dropping `rx` then makes every later push to this
/// connection fail, which removes it from the room.
///
/// # Arguments
///
/// * `rx` - Outbound queue filled by the room
/// * `sender` - WebSocket sink for this client
fn pusher_loop(
    mut rx: mpsc::Receiver<String>,
    mut sender: SplitSink<WebSocket, Message>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            match tokio::time::timeout(WRITE_TIMEOUT, sender.send(Message::Text(msg.into()))).await
            {
                Ok(Ok(())) => {}
                Ok(Err(e)) => {
                    tracing::debug!("WebSocket write failed: {}", e);
                    break;
                }
                Err(_) => {
                    tracing::warn!("WebSocket write stalled for {:?}, closing", WRITE_TIMEOUT);
                    break;
                }
            }
        }
    })
}

/// Spawns a task that feeds frames received from the client into the room.
fn receiver_loop(
    mut receiver: SplitStream<WebSocket>,
    state: Arc<AppState>,
    room_name: RoomName,
    connection_id: ConnectionId,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            let msg = match msg {
                Ok(msg) => msg,
                Err(e) => {
                    tracing::warn!("WebSocket error on '{}': {}", connection_id, e);
                    break;
                }
            };

            match msg {
                Message::Text(text) => {
                    tracing::debug!("Received text from '{}': {}", connection_id, text.as_str());

                    if let Err(e) = state
                        .ingest_message_usecase
                        .execute(&room_name, &connection_id, text.as_str())
                        .await
                    {
                        log_ingest_failure(&room_name, &connection_id, &e);
                    }
                }
                Message::Binary(data) => {
                    tracing::debug!(
                        "Ignoring {} byte binary frame from '{}'",
                        data.len(),
                        connection_id
                    );
                }
                Message::Close(frame) => {
                    tracing::info!("Connection '{}' requested close: {:?}", connection_id, frame);
                    break;
                }
                // Ping/pong is handled automatically by the WebSocket protocol
                Message::Ping(_) | Message::Pong(_) => {}
            }
        }
    })
}

/// Log a failed ingest, returning the level used (`None` if nothing was logged here).
fn log_ingest_failure(
    room_name: &RoomName,
    connection_id: &ConnectionId,
    error: &IngestError,
) -> Option<Level> {
    match error {
        // Already logged at warn inside the UseCase
        IngestError::Malformed(_) => None,
        IngestError::Encode(_) => {
            tracing::error!(
                "Failed to relay message from '{}' in room '{}': {}",
                connection_id,
                room_name,
                error
            );
            Some(Level::ERROR)
        }
    }
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>, room_name: RoomName) {
    let (sender, receiver) = socket.split();
    let (pusher, rx) = WebSocketMessagePusher::with_capacity(state.outbound_queue_capacity);

    // Join the room; the history envelope is queued before any broadcast can be
    let connection_id = match state
        .accept_connection_usecase
        .execute(&room_name, Box::new(pusher))
        .await
    {
        Ok(id) => id,
        Err(e) => {
            tracing::warn!("Failed to accept connection into room '{}': {}", room_name, e);
            return;
        }
    };

    let mut send_task = pusher_loop(rx, sender);
    let mut recv_task = receiver_loop(receiver, state.clone(), room_name.clone(), connection_id);

    // If any one of the tasks completes, abort the other
    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => recv_task.abort(),
    };

    state
        .handle_disconnect_usecase
        .execute(&room_name, &connection_id)
        .await;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_failure_is_logged_as_error() {
        // テスト項目: シリアライズ失敗は握りつぶされず error で記録される
        // given (前提条件):
        let error = IngestError::Encode("broken".to_string());

        // when (操作):
        let level = log_ingest_failure(&RoomName::global(), &ConnectionId::generate(), &error);

        // then (期待する結果):
        assert_eq!(level, Some(Level::ERROR));
    }

    #[test]
    fn test_malformed_payload_is_not_logged_twice() {
        // テスト項目: 不正なペイロードは UseCase 側で記録済みのため、ここでは記録しない
        // given (前提条件):
        let error = IngestError::Malformed("not json".to_string());

        // when (操作):
        let level = log_ingest_failure(&RoomName::global(), &ConnectionId::generate(), &error);

        // then (期待する結果):
        assert_eq!(level, None);
    }
}
