//! Domain logic for client-side operations.
//!
//! This module contains pure functions that implement business logic
//! without side effects, making them easy to test.

use crate::error::ClientError;

/// Build the WebSocket URL to connect to.
///
/// An explicit `url` wins; otherwise the URL is `ws://<host>/ws`.
///
/// # Errors
///
/// `ClientError::InvalidUrl` when the URL is not a `ws://` / `wss://` URL
/// or the host is empty.
pub fn resolve_url(host: &str, url: Option<&str>) -> Result<String, ClientError> {
    if let Some(url) = url {
        if url.starts_with("ws://") || url.starts_with("wss://") {
            return Ok(url.to_string());
        }
        return Err(ClientError::InvalidUrl(url.to_string()));
    }

    let host = host.trim().trim_end_matches('/');
    if host.is_empty() || host.contains("://") {
        return Err(ClientError::InvalidUrl(host.to_string()));
    }
    Ok(format!("ws://{}/ws", host))
}

/// Check if the client should exit immediately based on the error type.
///
/// # Returns
///
/// `true` if retrying cannot help (e.g., InvalidUrl), `false` otherwise
pub fn should_exit_immediately(error: &ClientError) -> bool {
    matches!(
        error,
        ClientError::InvalidUrl(_) | ClientError::ReconnectFailed(_)
    )
}

/// Check if the client should attempt to reconnect.
///
/// # Arguments
///
/// * `error` - The client error that occurred
/// * `current_attempt` - The current reconnection attempt count (0-indexed)
/// * `max_attempts` - The maximum number of reconnection attempts allowed
///
/// # Returns
///
/// `true` if reconnection should be attempted, `false` otherwise
pub fn should_attempt_reconnect(
    error: &ClientError,
    current_attempt: u32,
    max_attempts: u32,
) -> bool {
    // Don't reconnect if the error requires immediate exit
    if should_exit_immediately(error) {
        return false;
    }

    // Don't reconnect if we've exhausted all attempts
    current_attempt < max_attempts
}
