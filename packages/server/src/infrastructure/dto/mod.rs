//! Data Transfer Objects for the HTTP API.

pub mod http;

pub use http::{RoomSnapshotDto, StatusDto};
