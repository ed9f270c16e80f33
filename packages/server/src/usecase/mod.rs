//! UseCase 層
//!
//! ルームの状態を唯一所有するコーディネーターと、そのハンドルを提供します。
//! UI 層（WebSocket ハンドラ、HTTP ハンドラ）はハンドル経由でのみルームを操作します。

pub mod coordinator;
pub mod error;
pub mod handle;

pub use coordinator::Coordinator;
pub use error::CoordinatorError;
pub use handle::{CoordinatorHandle, OutboundQueue, RoomEvent, RoomSnapshot};
