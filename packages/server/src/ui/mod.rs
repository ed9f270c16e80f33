//! UI 層
//!
//! axum のルーター、HTTP / WebSocket ハンドラ、シャットダウンシグナルを提供します。

pub mod handler;
pub mod server;
mod signal;
pub mod state;

pub use server::{Server, build_router};
pub use state::AppState;
