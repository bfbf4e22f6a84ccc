//! File-backed logging.
//!
//! The terminal UI owns stdout and stderr, so `env_logger` output is piped
//! into a log file instead. `RUST_LOG` overrides the default `info` filter.

use super::constants::{APP_DIR_NAME, LOG_FILE_NAME};
use directories::ProjectDirs;
use env_logger::{Env, Target};
use std::fs::{self, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};

/// Default log file location, e.g. `~/.local/share/lane-racer/lane-racer.log`.
pub fn default_log_path() -> io::Result<PathBuf> {
    let project_dirs = ProjectDirs::from("", "", APP_DIR_NAME).ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::NotFound,
            "Could not determine data directory",
        )
    })?;
    Ok(project_dirs.data_dir().join(LOG_FILE_NAME))
}

/// Install the global logger, appending to `path` (or the default location).
/// Returns the file actually used.
pub fn init_logging(path: Option<&Path>) -> io::Result<PathBuf> {
    let path = match path {
        Some(p) => p.to_path_buf(),
        None => default_log_path()?,
    };
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let file = OpenOptions::new().create(true).append(true).open(&path)?;

    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .target(Target::Pipe(Box::new(file)))
        .format_timestamp_millis()
        .try_init()
        .map_err(|e| io::Error::new(io::ErrorKind::AlreadyExists, e))?;

    Ok(path)
}
