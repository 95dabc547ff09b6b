//! ElderScape global game chat relay.
//!
//! Accepts WebSocket connections, sends each new connection the recent
//! history of its room and broadcasts every message to all members.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin elderscape-server
//! cargo run --bin elderscape-server -- --host 0.0.0.0 --port 3000
//! ```

use std::sync::Arc;

use clap::Parser;
use elderscape_server::{
    domain::RoomName,
    infrastructure::{
        message_pusher::DEFAULT_QUEUE_CAPACITY, repository::InMemoryRoomRepository,
    },
    ui::Server,
    usecase::{
        AcceptConnectionUseCase, GetRoomDetailUseCase, GetRoomsUseCase, HandleDisconnectUseCase,
        IngestMessageUseCase,
    },
};
use elderscape_shared::{logger::setup_logger, time::SystemClock};

#[derive(Parser, Debug)]
#[command(name = "elderscape-server")]
#[command(about = "Global game chat relay with bounded history", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, default_value = "8080")]
    port: u16,

    /// Room served by /api/game_chat_ws
    #[arg(short = 'r', long, default_value = RoomName::GLOBAL_GAME_CHAT, value_parser = parse_room_name)]
    default_room: RoomName,

    /// Undelivered messages allowed per connection before it is dropped
    #[arg(long, default_value_t = DEFAULT_QUEUE_CAPACITY)]
    outbound_queue_capacity: usize,
}

fn parse_room_name(value: &str) -> Result<RoomName, String> {
    RoomName::new(value.to_string()).map_err(|e| e.to_string())
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_PKG_NAME"), env!("CARGO_BIN_NAME"), "debug");

    let args = Args::parse();

    // Initialize dependencies in order:
    // 1. Repository
    // 2. UseCases
    // 3. Server

    // 1. Create Repository (in-memory room registry)
    let repository = Arc::new(InMemoryRoomRepository::new());
    let clock = Arc::new(SystemClock);

    // 2. Create UseCases
    let accept_connection_usecase =
        Arc::new(AcceptConnectionUseCase::new(repository.clone(), clock));
    let ingest_message_usecase = Arc::new(IngestMessageUseCase::new(repository.clone()));
    let handle_disconnect_usecase = Arc::new(HandleDisconnectUseCase::new(repository.clone()));
    let get_rooms_usecase = Arc::new(GetRoomsUseCase::new(repository.clone()));
    let get_room_detail_usecase = Arc::new(GetRoomDetailUseCase::new(repository));

    // 3. Create and run the server
    let server = Server::new(
        args.default_room,
        accept_connection_usecase,
        ingest_message_usecase,
        handle_disconnect_usecase,
        get_rooms_usecase,
        get_room_detail_usecase,
    )
    .with_outbound_queue_capacity(args.outbound_queue_capacity);
    if let Err(e) = server.run(args.host, args.port).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
