//! Client execution logic with reconnection support.

use std::time::Duration;

use crate::{
    domain::should_attempt_reconnect, error::ClientError, formatter::MessageFormatter,
    session::run_client_session, ui::spawn_input_reader,
};

pub const MAX_RECONNECT_ATTEMPTS: u32 = 5;
pub const RECONNECT_INTERVAL_SECS: u64 = 5;

/// Run the chat client with reconnection logic
///
/// # Errors
///
/// Returns `ClientError::ReconnectFailed` once every reconnect attempt has
/// failed.
pub async fn run_client(url: String) -> Result<(), ClientError> {
    let mut input = spawn_input_reader();
    let mut reconnect_count = 0;

    loop {
        match run_client_session(&url, &mut input).await {
            Ok(()) => {
                tracing::info!("Client session ended normally");
                return Ok(());
            }
            Err(e) => {
                if matches!(e, ClientError::ConnectionLost) {
                    print!("{}", MessageFormatter::format_disconnected());
                }
                tracing::warn!("{}", e);

                if !should_attempt_reconnect(&e, reconnect_count, MAX_RECONNECT_ATTEMPTS) {
                    return Err(ClientError::ReconnectFailed(MAX_RECONNECT_ATTEMPTS));
                }
                reconnect_count += 1;

                tracing::warn!(
                    "Reconnecting in {} seconds... (attempt {}/{})",
                    RECONNECT_INTERVAL_SECS,
                    reconnect_count,
                    MAX_RECONNECT_ATTEMPTS
                );
                tokio::time::sleep(Duration::from_secs(RECONNECT_INTERVAL_SECS)).await;
            }
        }
    }
}
