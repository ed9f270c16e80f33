//! Logging setup utilities for the snakk chat application.

use std::{fs::OpenOptions, path::Path, sync::Arc};

use thiserror::Error;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Log levels accepted in configuration.
const KNOWN_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Errors raised while installing the logger
#[derive(Debug, Error)]
pub enum LoggerError {
    /// The log file could not be opened for appending
    #[error("failed to open log file '{path}': {source}")]
    LogFile {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Normalize a configured log level, falling back to `info` when unknown.
///
/// # Returns
///
/// The lower-cased level and whether the input was recognized
pub fn normalize_level(level: &str) -> (String, bool) {
    let lowered = level.trim().to_ascii_lowercase();
    if KNOWN_LEVELS.contains(&lowered.as_str()) {
        (lowered, true)
    } else {
        ("info".to_string(), false)
    }
}

/// Build the default filter directive for the library crate and the binary.
fn default_directive(binary_name: &str, level: &str) -> String {
    format!(
        "{}={},{}={},tower_http={}",
        env!("CARGO_PKG_NAME").replace('-', "_"),
        level,
        binary_name.replace('-', "_"),
        level,
        level
    )
}

/// Initialize the tracing subscriber with the specified default log level.
///
/// Logs go to stdout. When `log_file` is given, the same events are also
/// appended to that file without ANSI colors. The level can be overridden
/// with the `RUST_LOG` environment variable.
///
/// # Arguments
///
/// * `binary_name` - The name of the binary (e.g., "snakk-server")
/// * `default_log_level` - The default log level (e.g., "debug", "info")
/// * `log_file` - Optional path of a file to append logs to
///
/// # Examples
///
/// ```no_run
/// use snakk_shared::logger::setup_logger;
///
/// setup_logger("snakk-server", "info", None).unwrap();
/// ```
pub fn setup_logger(
    binary_name: &str,
    default_log_level: &str,
    log_file: Option<&Path>,
) -> Result<(), LoggerError> {
    let (level, known) = normalize_level(default_log_level);

    let file_layer = match log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(|source| LoggerError::LogFile {
                    path: path.display().to_string(),
                    source,
                })?;
            Some(
                tracing_subscriber::fmt::layer()
                    .with_ansi(false)
                    .with_writer(Arc::new(file)),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_directive(binary_name, &level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .with(file_layer)
        .init();

    if !known {
        tracing::warn!(
            "Unknown log level '{}', falling back to 'info'",
            default_log_level
        );
    }

    Ok(())
}
