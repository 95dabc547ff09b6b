//! Domain logic for client-side operations.
//!
//! Pure reconnection decisions, kept free of I/O so they can be tested
//! directly.

use crate::error::ClientError;

/// Check if the client should exit immediately based on the error type.
///
/// A bad URL or a 4xx handshake response will not get better by retrying.
pub fn should_exit_immediately(error: &ClientError) -> bool {
    matches!(
        error,
        ClientError::InvalidUrl(_) | ClientError::Rejected(_)
    )
}

/// Check if the client should attempt to reconnect.
///
/// # Arguments
///
/// * `error` - The client error that occurred
/// * `current_attempt` - Consecutive failed attempts so far (0-indexed)
/// * `max_attempts` - Upper bound, `None` retries forever
pub fn should_attempt_reconnect(
    error: &ClientError,
    current_attempt: u32,
    max_attempts: Option<u32>,
) -> bool {
    if should_exit_immediately(error) {
        return false;
    }

    match max_attempts {
        Some(max) => current_attempt < max,
        None => true,
    }
}

/// Reconnect attempts that count against the limit after `error`.
///
/// A session that was established and then dropped starts a fresh run; only
/// consecutive handshake failures accumulate.
pub fn attempts_so_far(error: &ClientError, current_attempt: u32) -> u32 {
    match error {
        ClientError::ConnectionLost => 0,
        _ => current_attempt,
    }
}
