//! Users and their identity value objects.

use std::{borrow::Borrow, fmt};

use serde::{Deserialize, Serialize};

use super::{error::ValueObjectError, wire};

/// Maximum number of characters kept from a requested nickname
pub const MAX_NICKNAME_CHARS: usize = 10;

/// User identifier, assigned by the coordinator on registration.
///
/// Identifiers start at 1 and are never reused while the process runs,
/// so `0` is free to mean "absent" on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(u64);

impl UserId {
    /// Create a new UserId.
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the inner numeric value.
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Nickname value object.
///
/// Always non-empty, at most [`MAX_NICKNAME_CHARS`] characters, and free of
/// whitespace (every whitespace character is replaced by `_`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Nickname(String);

impl Nickname {
    /// Create a new Nickname from raw user input.
    ///
    /// The input is truncated to [`MAX_NICKNAME_CHARS`] characters
    /// (counting Unicode scalar values, not bytes) and whitespace is
    /// replaced with `_`.
    ///
    /// # Errors
    ///
    /// Returns `ValueObjectError::NicknameEmpty` if the input is empty
    pub fn new(raw: &str) -> Result<Self, ValueObjectError> {
        if raw.is_empty() {
            return Err(ValueObjectError::NicknameEmpty);
        }
        let cleaned = raw
            .chars()
            .take(MAX_NICKNAME_CHARS)
            .map(|c| if c.is_whitespace() { '_' } else { c })
            .collect();
        Ok(Self(cleaned))
    }

    /// Get the inner string value.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for Nickname {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Nickname {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A chat user bound to one connection.
///
/// `nickname` is `None` until the user claims one with `/nick`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "Nick", default, with = "wire::empty_as_none")]
    pub nickname: Option<Nickname>,
    #[serde(rename = "ID")]
    pub id: UserId,
}

impl User {
    /// Create a user without a nickname
    pub fn new(id: UserId) -> Self {
        Self { nickname: None, id }
    }

    /// Create a user holding the given nickname
    pub fn with_nickname(id: UserId, nickname: Nickname) -> Self {
        Self {
            nickname: Some(nickname),
            id,
        }
    }
}
