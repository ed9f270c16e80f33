//! Server configuration loaded from a JSON file at startup.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

/// Default location of the configuration file
pub const DEFAULT_CONFIG_PATH: &str = "config.json";

const DEFAULT_LOG_LEVEL: &str = "info";
const DEFAULT_HISTORY_LINES: usize = 50;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Server settings
///
/// Keys use the PascalCase names of the JSON file, e.g.
///
/// ```json
/// { "ServePort": 8080, "LogLevel": "debug", "ChatHistoryNumLines": 100 }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Config {
    pub serve_port: u16,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Empty means log to stdout only
    #[serde(default)]
    pub log_file: String,
    #[serde(default = "default_history_lines")]
    pub chat_history_num_lines: usize,
    #[serde(default)]
    pub use_basic_auth: bool,
    #[serde(default)]
    pub basic_auth_username: String,
    #[serde(default)]
    pub basic_auth_password: String,
}

fn default_log_level() -> String {
    DEFAULT_LOG_LEVEL.to_string()
}

fn default_history_lines() -> usize {
    DEFAULT_HISTORY_LINES
}

impl Config {
    /// Parse and validate a configuration document
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.serve_port == 0 {
            return Err(ConfigError::Invalid(
                "ServePort must be a non-zero port number".to_string(),
            ));
        }
        if self.use_basic_auth && self.basic_auth_username.is_empty() {
            return Err(ConfigError::Invalid(
                "BasicAuthUsername is required when UseBasicAuth is enabled".to_string(),
            ));
        }
        Ok(())
    }

    pub fn log_file(&self) -> Option<&Path> {
        if self.log_file.is_empty() {
            None
        } else {
            Some(Path::new(&self.log_file))
        }
    }

    /// Credentials to enforce, when basic auth is enabled
    pub fn basic_auth(&self) -> Option<(String, String)> {
        self.use_basic_auth.then(|| {
            (
                self.basic_auth_username.clone(),
                self.basic_auth_password.clone(),
            )
        })
    }
}

/// Read the configuration file at `path`
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    Config::from_json_str(&raw)
}
