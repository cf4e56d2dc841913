//! Diagnostic logging to a file.
//!
//! The terminal belongs to the TUI, so `tracing` output is appended to a log
//! file instead of stderr. `RUST_LOG` overrides the default level.

use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

/// Default log file location.
pub fn default_log_path() -> Option<PathBuf> {
    crate::config::app_dir().map(|d| d.join("drum-machine.log"))
}

#[derive(Debug)]
pub enum LoggingError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    /// A global subscriber was already installed.
    AlreadyInitialized,
}

impl std::fmt::Display for LoggingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoggingError::Io { path, source } => {
                write!(f, "cannot open log file {}: {source}", path.display())
            }
            LoggingError::AlreadyInitialized => write!(f, "logging already initialized"),
        }
    }
}

impl std::error::Error for LoggingError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoggingError::Io { source, .. } => Some(source),
            LoggingError::AlreadyInitialized => None,
        }
    }
}

fn open_log(path: &Path) -> Result<File, LoggingError> {
    let io_err = |source| LoggingError::Io {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(io_err)?;
    }
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(io_err)
}

/// Install the global subscriber, appending to `path` at `default_level`
/// unless `RUST_LOG` says otherwise.
pub fn init(path: &Path, default_level: &str) -> Result<(), LoggingError> {
    let file = open_log(path)?;
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .try_init()
        .map_err(|_| LoggingError::AlreadyInitialized)
}
