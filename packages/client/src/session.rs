//! WebSocket client session management.

use futures_util::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use tokio_tungstenite::{connect_async, tungstenite::protocol::Message};

use crate::{error::ClientError, formatter::MessageFormatter, ui::redisplay_prompt};

/// Run one connection to the server.
///
/// Received events are printed; lines from `input` are sent as text frames.
///
/// # Returns
///
/// `Ok(())` when the input closes (the user quit), `Err` when the
/// connection cannot be opened or is lost.
pub async fn run_client_session(
    url: &str,
    input: &mut mpsc::UnboundedReceiver<String>,
) -> Result<(), ClientError> {
    let (ws_stream, _) = connect_async(url)
        .await
        .map_err(|e| ClientError::ConnectionError(e.to_string()))?;

    tracing::info!("Connected to {}", url);
    let (mut write, mut read) = ws_stream.split();

    loop {
        tokio::select! {
            frame = read.next() => match frame {
                Some(Ok(Message::Text(text))) => {
                    print!("{}", MessageFormatter::format_frame(&text));
                    redisplay_prompt();
                }
                Some(Ok(Message::Binary(data))) => match String::from_utf8(data.to_vec()) {
                    Ok(text) => {
                        print!("{}", MessageFormatter::format_frame(&text));
                        redisplay_prompt();
                    }
                    Err(_) => tracing::debug!("Ignoring binary frame of {} bytes", data.len()),
                },
                Some(Ok(Message::Close(_))) | None => {
                    tracing::info!("Server closed the connection");
                    return Err(ClientError::ConnectionLost);
                }
                Some(Ok(_)) => {}
                Some(Err(e)) => {
                    tracing::warn!("WebSocket read error: {}", e);
                    return Err(ClientError::ConnectionLost);
                }
            },
            line = input.recv() => match line {
                Some(line) => {
                    if let Err(e) = write.send(Message::Text(line.into())).await {
                        tracing::warn!("Failed to send message: {}", e);
                        return Err(ClientError::ConnectionLost);
                    }
                }
                None => {
                    let _ = write.close().await;
                    return Ok(());
                }
            },
        }
    }
}
