//! Events accepted by the coordinator and the handle used to send them.

use std::net::SocketAddr;

use tokio::sync::{mpsc, oneshot};

use crate::domain::{ChatEvent, User, UserId};

use super::error::CoordinatorError;

/// Per-connection outbound queue.
///
/// Bounded; the coordinator only ever uses `try_send` on it. Dropping the
/// coordinator's sender closes the queue, which ends the connection's
/// writer loop.
pub type OutboundQueue = mpsc::Sender<ChatEvent>;

/// Read-only view of the room for the initial page render
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomSnapshot {
    /// Users holding a nickname, sorted by id
    pub users: Vec<User>,
    /// History contents, oldest first
    pub history: Vec<ChatEvent>,
}

/// An event for the coordinator to apply
#[derive(Debug)]
pub enum RoomEvent {
    /// A connection finished its handshake
    Register {
        queue: OutboundQueue,
        remote: SocketAddr,
        reply: oneshot::Sender<UserId>,
    },
    /// A connection went away
    Unregister { user_id: UserId },
    /// A connection sent a line of input
    Incoming { user_id: UserId, payload: String },
    /// List users holding a nickname
    QueryUsers { reply: oneshot::Sender<Vec<User>> },
    /// Roster plus history
    QueryRoster { reply: oneshot::Sender<RoomSnapshot> },
    /// Announce shutdown and close every connection
    Shutdown { reply: oneshot::Sender<()> },
}

/// Cloneable sender side of the coordinator's event channel
#[derive(Debug, Clone)]
pub struct CoordinatorHandle {
    tx: mpsc::Sender<RoomEvent>,
}

impl CoordinatorHandle {
    pub(crate) fn new(tx: mpsc::Sender<RoomEvent>) -> Self {
        Self { tx }
    }

    async fn send(&self, event: RoomEvent) -> Result<(), CoordinatorError> {
        self.tx
            .send(event)
            .await
            .map_err(|_| CoordinatorError::Stopped)
    }

    /// Register a new connection and wait for its assigned user id
    pub async fn register(
        &self,
        queue: OutboundQueue,
        remote: SocketAddr,
    ) -> Result<UserId, CoordinatorError> {
        let (reply, rx) = oneshot::channel();
        self.send(RoomEvent::Register {
            queue,
            remote,
            reply,
        })
        .await?;
        rx.await.map_err(|_| CoordinatorError::NoReply)
    }

    pub async fn unregister(&self, user_id: UserId) -> Result<(), CoordinatorError> {
        self.send(RoomEvent::Unregister { user_id }).await
    }

    /// Forward a line of input; lines from one connection are applied in order
    pub async fn incoming(
        &self,
        user_id: UserId,
        payload: impl Into<String>,
    ) -> Result<(), CoordinatorError> {
        self.send(RoomEvent::Incoming {
            user_id,
            payload: payload.into(),
        })
        .await
    }

    pub async fn users(&self) -> Result<Vec<User>, CoordinatorError> {
        let (reply, rx) = oneshot::channel();
        self.send(RoomEvent::QueryUsers { reply }).await?;
        rx.await.map_err(|_| CoordinatorError::NoReply)
    }

    pub async fn snapshot(&self) -> Result<RoomSnapshot, CoordinatorError> {
        let (reply, rx) = oneshot::channel();
        self.send(RoomEvent::QueryRoster { reply }).await?;
        rx.await.map_err(|_| CoordinatorError::NoReply)
    }

    /// Broadcast the shutdown notice and disconnect everyone
    pub async fn shutdown(&self) -> Result<(), CoordinatorError> {
        let (reply, rx) = oneshot::channel();
        self.send(RoomEvent::Shutdown { reply }).await?;
        rx.await.map_err(|_| CoordinatorError::NoReply)
    }
}
