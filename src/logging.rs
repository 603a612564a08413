//! Logging configuration for sql-intellisense.
//!
//! Logs go to stderr by default so stdout stays clean for completion output,
//! or to a file when the host captures stderr.

use std::fs::{self, File};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Initializes logging to a file.
///
/// Uses `path` when given, otherwise [`get_log_path`]. The file is truncated
/// on each run. Logging stays disabled if the file cannot be created.
pub fn init_file_logging(path: Option<&Path>) {
    let log_path = path.map_or_else(get_log_path, Path::to_path_buf);

    if let Some(parent) = log_path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            eprintln!("Warning: Could not create log directory: {e}");
            return;
        }
    }

    let log_file = match File::create(&log_path) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("Warning: Could not create log file: {e}");
            return;
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(log_file)
        .with_ansi(false)
        .init();
}

/// Initializes logging to stderr.
pub fn init_stderr_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(std::io::stderr)
        .init();
}

/// Returns the default log file path.
///
/// Uses the XDG state directory on Linux
/// (`~/.local/state/sql-intellisense/sqlsense.log`), or falls back to the
/// config directory on other platforms.
pub fn get_log_path() -> PathBuf {
    if let Some(state_dir) = dirs::state_dir() {
        return state_dir.join("sql-intellisense").join("sqlsense.log");
    }

    if let Some(config_dir) = dirs::config_dir() {
        return config_dir.join("sql-intellisense").join("sqlsense.log");
    }

    std::env::temp_dir().join("sqlsense.log")
}
