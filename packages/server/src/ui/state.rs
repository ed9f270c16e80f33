//! Shared state handed to every handler.

use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

use chrono::{DateTime, Utc};
use snakk_shared::time::Clock;

use crate::{domain::IdentityRegistry, usecase::CoordinatorHandle};

pub struct AppState {
    /// コーディネーターへのハンドル（ルーム操作はすべてこれを経由する）
    pub coordinator: CoordinatorHandle,
    /// ニックネームレジストリ（HTTP ハンドラから直接読み取る）
    pub registry: Arc<IdentityRegistry>,
    pub clock: Arc<dyn Clock>,
    pub started_at: DateTime<Utc>,
    /// Open WebSocket sessions
    pub connections: AtomicUsize,
    pub history_capacity: usize,
    /// `(username, password)` when basic auth is enabled
    pub basic_auth: Option<(String, String)>,
}

impl AppState {
    pub fn new(
        coordinator: CoordinatorHandle,
        registry: Arc<IdentityRegistry>,
        clock: Arc<dyn Clock>,
        history_capacity: usize,
        basic_auth: Option<(String, String)>,
    ) -> Self {
        let started_at = clock.now();
        Self {
            coordinator,
            registry,
            clock,
            started_at,
            connections: AtomicUsize::new(0),
            history_capacity,
            basic_auth,
        }
    }

    pub fn open_connections(&self) -> usize {
        self.connections.load(Ordering::Relaxed)
    }
}

/// Counts one open WebSocket session for as long as it lives
pub struct SessionGuard<'a>(&'a AtomicUsize);

impl<'a> SessionGuard<'a> {
    pub fn new(counter: &'a AtomicUsize) -> Self {
        counter.fetch_add(1, Ordering::Relaxed);
        Self(counter)
    }
}

impl Drop for SessionGuard<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::Relaxed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_guard_counts_open_sessions() {
        // テスト項目: セッションガードの生存中だけ接続数が加算される
        // given (前提条件):
        let counter = AtomicUsize::new(0);

        // when (操作):
        let first = SessionGuard::new(&counter);
        let second = SessionGuard::new(&counter);
        assert_eq!(counter.load(Ordering::Relaxed), 2);
        drop(first);

        // then (期待する結果):
        assert_eq!(counter.load(Ordering::Relaxed), 1);
        drop(second);
        assert_eq!(counter.load(Ordering::Relaxed), 0);
    }
}
