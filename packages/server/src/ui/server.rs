//! Server execution logic.

use std::sync::Arc;

use axum::{Router, routing::get};
use tower_http::trace::TraceLayer;

use crate::{
    domain::RoomName,
    infrastructure::message_pusher::DEFAULT_QUEUE_CAPACITY,
    usecase::{
        AcceptConnectionUseCase, GetRoomDetailUseCase, GetRoomsUseCase, HandleDisconnectUseCase,
        IngestMessageUseCase,
    },
};

use super::{
    handler::{
        default_room_websocket_handler, get_room_detail, get_rooms, health_check, not_found,
        room_websocket_handler,
    },
    signal::shutdown_signal,
    state::AppState,
};

/// WebSocket chat relay server
///
/// # Example
///
/// ```ignore
/// let server = Server::new(
///     RoomName::global(),
///     accept_connection_usecase,
///     ingest_message_usecase,
///     handle_disconnect_usecase,
///     get_rooms_usecase,
///     get_room_detail_usecase,
/// );
/// server.run("127.0.0.1".to_string(), 8080).await?;
/// ```
pub struct Server {
    state: Arc<AppState>,
}

impl Server {
    /// Create a new Server instance
    ///
    /// # Arguments
    ///
    /// * `default_room` - Room served by `/api/game_chat_ws`
    /// * `accept_connection_usecase` - UseCase for accepting connections
    /// * `ingest_message_usecase` - UseCase for ingesting and broadcasting messages
    /// * `handle_disconnect_usecase` - UseCase for disconnections
    /// * `get_rooms_usecase` - UseCase for listing rooms
    /// * `get_room_detail_usecase` - UseCase for room details
    pub fn new(
        default_room: RoomName,
        accept_connection_usecase: Arc<AcceptConnectionUseCase>,
        ingest_message_usecase: Arc<IngestMessageUseCase>,
        handle_disconnect_usecase: Arc<HandleDisconnectUseCase>,
        get_rooms_usecase: Arc<GetRoomsUseCase>,
        get_room_detail_usecase: Arc<GetRoomDetailUseCase>,
    ) -> Self {
        Self {
            state: Arc::new(AppState {
                default_room,
                outbound_queue_capacity: DEFAULT_QUEUE_CAPACITY,
                accept_connection_usecase,
                ingest_message_usecase,
                handle_disconnect_usecase,
                get_rooms_usecase,
                get_room_detail_usecase,
            }),
        }
    }

    /// Override the per-connection outbound queue size
    ///
    /// A connection with this many undelivered payloads is treated as dead and
    /// removed from its room on the next push.
    pub fn with_outbound_queue_capacity(self, capacity: usize) -> Self {
        let mut state = Arc::unwrap_or_clone(self.state);
        state.outbound_queue_capacity = capacity.max(1);
        Self {
            state: Arc::new(state),
        }
    }

    /// Build the router with all endpoints
    pub fn router(&self) -> Router {
        Router::new()
            // WebSocket エンドポイント
            .route("/api/game_chat_ws", get(default_room_websocket_handler))
            .route("/rooms/{room_name}/websocket", get(room_websocket_handler))
            // HTTP エンドポイント
            .route("/api/health", get(health_check))
            .route("/api/rooms", get(get_rooms))
            .route("/api/rooms/{room_name}", get(get_room_detail))
            .fallback(not_found)
            .layer(TraceLayer::new_for_http())
            .with_state(self.state.clone())
    }

    /// Run the WebSocket chat relay server
    ///
    /// # Arguments
    ///
    /// * `host` - The host address to bind to (e.g., "127.0.0.1")
    /// * `port` - The port number to bind to (e.g., 8080)
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind to the specified address or
    /// if there's an error during server execution.
    pub async fn run(self, host: String, port: u16) -> Result<(), Box<dyn std::error::Error>> {
        let app = self.router();

        // Bind the server to the host and port
        let bind_addr = format!("{}:{}", host, port);
        let listener = tokio::net::TcpListener::bind(&bind_addr).await?;

        tracing::info!(
            "WebSocket chat relay listening on {}",
            listener.local_addr()?
        );
        tracing::info!(
            "Connect to: ws://{}/api/game_chat_ws (room '{}')",
            bind_addr,
            self.state.default_room
        );
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        // Set up graceful shutdown signal handler
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");

        Ok(())
    }
}
