//! Terminal client for the ElderScape game chat.
//!
//! Connects to the relay, prints the recent history, then streams live
//! messages while sending each line typed at the prompt. Reconnects every
//! 3 seconds after a dropped connection.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin elderscape-client -- --sender Alice
//! cargo run --bin elderscape-client -- -s Bob -u ws://127.0.0.1:8080/rooms/tavern/websocket
//! ```

use clap::Parser;

use elderscape_client::{ClientConfig, run_client};
use elderscape_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "elderscape-client")]
#[command(about = "Terminal client for the ElderScape game chat", long_about = None)]
struct Args {
    /// Display name attached to your messages
    #[arg(short = 's', long, default_value = "Anonymous")]
    sender: String,

    /// WebSocket server URL
    #[arg(short = 'u', long, default_value = "ws://127.0.0.1:8080/api/game_chat_ws")]
    url: String,

    /// Give up after this many consecutive failed reconnects (default: never)
    #[arg(long)]
    max_reconnect_attempts: Option<u32>,
}

#[tokio::main]
async fn main() {
    setup_logger(env!("CARGO_PKG_NAME"), env!("CARGO_BIN_NAME"), "info");

    let args = Args::parse();

    let config = ClientConfig {
        url: args.url,
        sender: args.sender,
        max_reconnect_attempts: args.max_reconnect_attempts,
    };

    if let Err(e) = run_client(config).await {
        tracing::error!("Client error: {}", e);
        std::process::exit(1);
    }
}
