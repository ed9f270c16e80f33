//! Infrastructure 層
//!
//! 設定ファイルの読み込みと HTTP レスポンスの DTO を提供します。

pub mod config;
pub mod dto;

pub use config::{Config, ConfigError, load_config};
