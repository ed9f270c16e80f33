//! Domain layer for the chat room.
//!
//! This module contains the room's data types and pure logic, independent
//! of the WebSocket transport and of the coordinator task.

pub mod chat_event;
pub mod command;
pub mod error;
pub mod history;
pub mod registry;
pub mod user;
mod wire;

pub use chat_event::{ChatEvent, Color};
pub use command::{DispatchContext, Effect, dispatch};
pub use error::ValueObjectError;
pub use history::HistoryBuffer;
pub use registry::IdentityRegistry;
pub use user::{Nickname, User, UserId};
