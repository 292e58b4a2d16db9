//! Log setup.
//!
//! The terminal belongs to the UI, so logs go to a file in the platform data
//! directory. `TERMODORO_LOG` takes precedence over the `--log-level` flag.

use anyhow::{anyhow, Context, Result};
use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

use crate::config::project_dirs;

pub const LOG_ENV: &str = "TERMODORO_LOG";

pub fn log_path() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.data_local_dir().join("termodoro.log"))
}

fn filter(default_directive: &str) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_directive))
}

/// Installs the global subscriber and returns the log file in use, if any.
pub fn init_logging(level: &str) -> Result<Option<PathBuf>> {
    let filter = filter(level);

    let Some(path) = log_path() else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::sink)
            .try_init()
            .map_err(|e| anyhow!("Failed to install log subscriber: {e}"))?;
        return Ok(None);
    };

    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create log directory {:?}", dir))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open log file {:?}", path))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init()
        .map_err(|e| anyhow!("Failed to install log subscriber: {e}"))?;

    Ok(Some(path))
}
