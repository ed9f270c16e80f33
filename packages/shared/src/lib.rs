//! Shared utilities for the snakk chat server and client.

pub mod logger;
pub mod time;
