//! Registry of claimed nicknames.
//!
//! The coordinator is the only writer. HTTP handlers read it concurrently
//! (roster and status endpoints), so it sits behind a reader/writer lock.

use std::collections::HashMap;

use tokio::sync::RwLock;

use super::{Nickname, User, UserId};

/// Mapping of claimed nickname to the user holding it.
///
/// Invariant: a nickname is present iff a connected user currently holds it.
#[derive(Debug, Default)]
pub struct IdentityRegistry {
    claims: RwLock<HashMap<Nickname, UserId>>,
}

impl IdentityRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the user's nickname claim. Users without a nickname are ignored.
    pub async fn add(&self, user: &User) {
        if let Some(nick) = &user.nickname {
            self.claims.write().await.insert(nick.clone(), user.id);
        }
    }

    /// Release the user's nickname, if the claim still belongs to that user
    pub async fn remove(&self, user: &User) {
        let Some(nick) = &user.nickname else {
            return;
        };
        let mut claims = self.claims.write().await;
        if claims.get(nick) == Some(&user.id) {
            claims.remove(nick);
        }
    }

    /// Move a user's claim from `previous` to `updated` in one write.
    ///
    /// Readers see either the old claim or the new one, never neither.
    pub async fn rename(&self, previous: &User, updated: &User) {
        let mut claims = self.claims.write().await;
        if let Some(nick) = &previous.nickname
            && claims.get(nick) == Some(&previous.id)
        {
            claims.remove(nick);
        }
        if let Some(nick) = &updated.nickname {
            claims.insert(nick.clone(), updated.id);
        }
    }

    pub async fn contains(&self, nick: &str) -> bool {
        self.claims.read().await.contains_key(nick)
    }

    /// All users currently holding a nickname, sorted by id
    pub async fn snapshot(&self) -> Vec<User> {
        let claims = self.claims.read().await;
        let mut users: Vec<User> = claims
            .iter()
            .map(|(nick, id)| User::with_nickname(*id, nick.clone()))
            .collect();
        users.sort_by_key(|user| user.id);
        users
    }

    pub async fn len(&self) -> usize {
        self.claims.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.claims.read().await.is_empty()
    }

    /// Drop every claim (used when the room shuts down)
    pub async fn clear(&self) {
        self.claims.write().await.clear();
    }
}
