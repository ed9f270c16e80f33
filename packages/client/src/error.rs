//! Error types for the snakk client.

use thiserror::Error;

/// Client-specific errors
#[derive(Debug, Error)]
pub enum ClientError {
    /// The server address cannot be turned into a WebSocket URL
    #[error("Invalid server address '{0}'")]
    InvalidUrl(String),

    /// Connection error
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// The server closed the connection or the transport failed
    #[error("Connection lost")]
    ConnectionLost,

    #[error("Failed to reconnect after {0} attempts")]
    ReconnectFailed(u32),
}
