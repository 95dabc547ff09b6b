//! Client execution logic with reconnection support.

use std::time::Duration;

use tokio::sync::mpsc;

use super::{
    domain::{attempts_so_far, should_attempt_reconnect, should_exit_immediately},
    error::ClientError,
    session::run_client_session,
    ui::{InputEvent, spawn_line_reader},
};

const RECONNECT_INTERVAL_SECS: u64 = 3;

/// Client settings
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// WebSocket URL of the relay
    pub url: String,
    /// Display name attached to every outgoing message
    pub sender: String,
    /// `None` keeps retrying forever
    pub max_reconnect_attempts: Option<u32>,
}

/// Wait out the reconnect interval. Returns `false` if the user quit meanwhile.
async fn wait_before_reconnect(input: &mut mpsc::UnboundedReceiver<InputEvent>) -> bool {
    let sleep = tokio::time::sleep(Duration::from_secs(RECONNECT_INTERVAL_SECS));
    tokio::pin!(sleep);

    loop {
        tokio::select! {
            _ = &mut sleep => return true,
            event = input.recv() => match event {
                Some(InputEvent::Line(_)) => {
                    tracing::warn!("Not connected, message dropped");
                }
                Some(InputEvent::Exit) | None => return false,
            },
        }
    }
}

/// Run the chat client with reconnection logic
pub async fn run_client(config: ClientConfig) -> Result<(), ClientError> {
    let mut input = spawn_line_reader(config.sender.clone());
    let mut reconnect_count = 0;

    loop {
        tracing::info!(
            "Attempting to connect to {} as '{}'",
            config.url,
            config.sender
        );

        match run_client_session(&config.url, &config.sender, &mut input).await {
            Ok(()) => {
                tracing::info!("Client session ended normally");
                break;
            }
            Err(e) => {
                if should_exit_immediately(&e) {
                    tracing::error!("{}. Exiting.", e);
                    return Err(e);
                }

                tracing::warn!("{}", e);
                reconnect_count = attempts_so_far(&e, reconnect_count);

                if !should_attempt_reconnect(&e, reconnect_count, config.max_reconnect_attempts) {
                    return Err(ClientError::ReconnectExhausted(reconnect_count));
                }
                reconnect_count += 1;

                tracing::info!(
                    "Reconnecting in {} seconds... (attempt {})",
                    RECONNECT_INTERVAL_SECS,
                    reconnect_count
                );

                if !wait_before_reconnect(&mut input).await {
                    tracing::info!("Client session ended normally");
                    break;
                }
            }
        }
    }

    Ok(())
}
