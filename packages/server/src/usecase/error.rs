//! UseCase 層のエラー定義

use thiserror::Error;

/// Errors returned by [`super::CoordinatorHandle`]
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CoordinatorError {
    /// The coordinator task is no longer running
    #[error("room coordinator has stopped")]
    Stopped,

    /// The coordinator dropped the request without answering
    #[error("room coordinator did not answer the request")]
    NoReply,
}
