//! HTTP and WebSocket handlers.

pub mod auth;
pub mod http;
pub mod websocket;

pub use auth::require_basic_auth;
pub use http::{
    favicon, health_check, list_users, robots_txt, room_page, room_snapshot, status,
};
pub use websocket::websocket_handler;
