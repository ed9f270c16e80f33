//! Domain layer error definitions.

use thiserror::Error;

/// Errors related to Value Objects validation
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueObjectError {
    /// Nickname validation error
    #[error("Nickname cannot be empty")]
    NicknameEmpty,
}
