//! The room coordinator: single owner of membership, nicknames and history.
//!
//! Every change to room state happens inside [`Coordinator::handle`], which
//! the coordinator task calls for one [`RoomEvent`] at a time. Connections
//! talk to it only through a [`CoordinatorHandle`].

use std::{collections::BTreeMap, net::SocketAddr, sync::Arc};

use chrono::{DateTime, Utc};
use snakk_shared::time::{Clock, elapsed_since};
use tokio::{
    sync::mpsc::{self, error::TrySendError},
    task::JoinHandle,
};

use crate::domain::{
    ChatEvent, Color, DispatchContext, Effect, HistoryBuffer, IdentityRegistry, Nickname, User,
    UserId, dispatch,
};

use super::handle::{CoordinatorHandle, OutboundQueue, RoomEvent, RoomSnapshot};

/// Capacity of the coordinator's inbound event channel
pub const EVENT_CHANNEL_CAPACITY: usize = 256;

/// Lines sent to every new connection
pub const WELCOME_LINES: [&str; 2] = [
    "Welcome to snakk!",
    "Enter your nickname with /nick <name> to join the chat.",
];

pub const SHUTDOWN_NOTICE: &str = "Server is shutting down, sorry!";

/// A registered connection
#[derive(Debug)]
struct Member {
    user: User,
    queue: OutboundQueue,
    remote: SocketAddr,
}

/// Outcome of offering an event to one member's queue
enum Delivery {
    Queued,
    /// The queue is full: the client is too slow and must be dropped
    Saturated,
    /// The writer already stopped; the adapter will unregister shortly
    Closed,
}

fn offer(member: &Member, event: ChatEvent) -> Delivery {
    match member.queue.try_send(event) {
        Ok(()) => Delivery::Queued,
        Err(TrySendError::Full(_)) => Delivery::Saturated,
        Err(TrySendError::Closed(_)) => Delivery::Closed,
    }
}

/// Room state owned by the coordinator task
pub struct Coordinator {
    members: BTreeMap<UserId, Member>,
    history: HistoryBuffer<ChatEvent>,
    registry: Arc<IdentityRegistry>,
    clock: Arc<dyn Clock>,
    started_at: DateTime<Utc>,
    next_id: u64,
}

impl Coordinator {
    /// Create a coordinator with an empty room.
    ///
    /// # Arguments
    ///
    /// * `history_capacity` - Number of chat lines kept for new visitors (0 disables history)
    /// * `registry` - Nickname registry shared with the HTTP handlers
    /// * `clock` - Source of event timestamps and uptime
    pub fn new(
        history_capacity: usize,
        registry: Arc<IdentityRegistry>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let started_at = clock.now();
        Self {
            members: BTreeMap::new(),
            history: HistoryBuffer::new(history_capacity),
            registry,
            clock,
            started_at,
            next_id: 0,
        }
    }

    /// Spawn the coordinator task.
    ///
    /// The task runs until every [`CoordinatorHandle`] has been dropped.
    pub fn start(self) -> (CoordinatorHandle, JoinHandle<()>) {
        let (tx, rx) = mpsc::channel(EVENT_CHANNEL_CAPACITY);
        let task = tokio::spawn(self.run(rx));
        (CoordinatorHandle::new(tx), task)
    }

    async fn run(mut self, mut rx: mpsc::Receiver<RoomEvent>) {
        tracing::info!(
            "Room coordinator started (history capacity {})",
            self.history.capacity()
        );
        while let Some(event) = rx.recv().await {
            self.handle(event).await;
        }
        tracing::info!("Room coordinator stopped");
    }

    /// Apply one event to the room
    pub async fn handle(&mut self, event: RoomEvent) {
        match event {
            RoomEvent::Register {
                queue,
                remote,
                reply,
            } => {
                let user_id = self.register(queue, remote).await;
                if reply.send(user_id).is_err() {
                    tracing::debug!("Client {} went away before registration completed", user_id);
                    self.unregister(user_id).await;
                }
            }
            RoomEvent::Unregister { user_id } => self.unregister(user_id).await,
            RoomEvent::Incoming { user_id, payload } => self.incoming(user_id, &payload).await,
            RoomEvent::QueryUsers { reply } => {
                let _ = reply.send(self.registry.snapshot().await);
            }
            RoomEvent::QueryRoster { reply } => {
                let snapshot = RoomSnapshot {
                    users: self.registry.snapshot().await,
                    history: self.history.all(),
                };
                let _ = reply.send(snapshot);
            }
            RoomEvent::Shutdown { reply } => {
                self.shutdown().await;
                let _ = reply.send(());
            }
        }
    }

    async fn register(&mut self, queue: OutboundQueue, remote: SocketAddr) -> UserId {
        self.next_id += 1;
        let user_id = UserId::new(self.next_id);
        self.members.insert(
            user_id,
            Member {
                user: User::new(user_id),
                queue,
                remote,
            },
        );
        tracing::info!("Client {} connected from {}", user_id, remote);

        for line in WELCOME_LINES {
            self.send_direct(user_id, ChatEvent::direct(Color::Green, line))
                .await;
        }
        user_id
    }

    async fn unregister(&mut self, user_id: UserId) {
        let Some(Member { user, queue, remote }) = self.members.remove(&user_id) else {
            tracing::debug!("Client {} was already removed", user_id);
            return;
        };
        drop(queue);
        tracing::info!("Client {} ({}) disconnected", user_id, remote);

        if let Some(nick) = &user.nickname {
            self.registry.remove(&user).await;
            let notice = ChatEvent::notice(Color::Green, format!("{} has left the chat", nick))
                .with_user_left(user_id);
            self.broadcast(notice, None).await;
        }
    }

    async fn incoming(&mut self, user_id: UserId, payload: &str) {
        let Some(member) = self.members.get(&user_id) else {
            tracing::debug!("Ignoring input from unregistered client {}", user_id);
            return;
        };
        let sender = member.user.clone();
        let members: Vec<User> = self.members.values().map(|m| m.user.clone()).collect();
        let ctx = DispatchContext {
            sender: &sender,
            members: &members,
            uptime: elapsed_since(self.clock.as_ref(), self.started_at),
        };

        for effect in dispatch(payload, &ctx) {
            match effect {
                Effect::Reply(event) => self.send_direct(user_id, event).await,
                Effect::Broadcast(event) => self.broadcast(event, None).await,
                Effect::BroadcastOthers(event) => self.broadcast(event, Some(user_id)).await,
                Effect::ClaimNickname(nick) => self.claim_nickname(user_id, nick).await,
            }
            // The sender may have been evicted while its own line was delivered
            if !self.members.contains_key(&user_id) {
                tracing::debug!("Client {} left mid-command, skipping remaining effects", user_id);
                break;
            }
        }
    }

    async fn claim_nickname(&mut self, user_id: UserId, nick: Nickname) {
        let Some(member) = self.members.get_mut(&user_id) else {
            return;
        };
        let previous = member.user.clone();
        member.user.nickname = Some(nick);
        let updated = member.user.clone();

        self.registry.rename(&previous, &updated).await;
        tracing::info!(
            "Client {} is now known as '{}'",
            user_id,
            updated.nickname.as_ref().map(Nickname::as_str).unwrap_or_default()
        );
    }

    /// Stamp and deliver an event to a single connection
    async fn send_direct(&mut self, user_id: UserId, event: ChatEvent) {
        let event = event.stamped(self.clock.now());
        let Some(member) = self.members.get(&user_id) else {
            return;
        };
        if let Delivery::Saturated = offer(member, event) {
            self.evict(user_id).await;
        }
    }

    /// Stamp and deliver an event to every member (optionally skipping one),
    /// then record it in history unless it is meta.
    async fn broadcast(&mut self, event: ChatEvent, except: Option<UserId>) {
        let event = event.stamped(self.clock.now());

        let mut saturated = Vec::new();
        for (user_id, member) in &self.members {
            if Some(*user_id) == except {
                continue;
            }
            match offer(member, event.clone()) {
                Delivery::Queued => {}
                Delivery::Saturated => saturated.push(*user_id),
                Delivery::Closed => {
                    tracing::debug!("Outbound queue of client {} is closed", user_id)
                }
            }
        }
        for user_id in saturated {
            self.evict(user_id).await;
        }

        if !event.meta {
            self.history.push(event);
        }
    }

    /// Drop a client whose queue is full. Other members are not notified.
    async fn evict(&mut self, user_id: UserId) {
        if let Some(member) = self.members.remove(&user_id) {
            self.registry.remove(&member.user).await;
            tracing::warn!(
                "Dropping client {} ({}): outbound queue is full",
                user_id,
                member.remote
            );
        }
    }

    async fn shutdown(&mut self) {
        self.broadcast(ChatEvent::notice(Color::Red, SHUTDOWN_NOTICE), None)
            .await;
        let count = self.members.len();
        self.members.clear();
        self.registry.clear().await;
        tracing::info!("Room closed, disconnected {} client(s)", count);
    }

    /// Number of registered connections
    pub fn member_count(&self) -> usize {
        self.members.len()
    }

    /// The user bound to a connection, if it is still registered
    pub fn user(&self, user_id: UserId) -> Option<&User> {
        self.members.get(&user_id).map(|m| &m.user)
    }

    pub fn history(&self) -> &HistoryBuffer<ChatEvent> {
        &self.history
    }
}
