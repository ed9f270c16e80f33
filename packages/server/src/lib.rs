//! snakk chat server.
//!
//! A single shared room: connections send lines and slash-commands, a
//! coordinator task fans chat out to every member and keeps a bounded
//! history of recent lines.

pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;
