//! File logging. The terminal belongs to the UI, so nothing is ever written
//! to stdout or stderr once the editor is running.

use anyhow::{Context, Result};
use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

const LOG_DIR_ENV: &str = "SCRIVO_LOG_DIR";
const LOG_FILE: &str = "scrivo.log";

pub fn log_dir() -> Option<PathBuf> {
    if let Some(dir) = std::env::var_os(LOG_DIR_ENV) {
        return Some(PathBuf::from(dir));
    }
    home::home_dir().map(|mut path| {
        path.push(".local");
        path.push("state");
        path.push("scrivo");
        path
    })
}

/// `RUST_LOG` wins over the default level when set.
pub fn env_filter(verbose: bool) -> EnvFilter {
    let default = if verbose { "scrivo=debug" } else { "scrivo=info" };
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default))
}

/// Installs the global subscriber and returns the log file path.
pub fn setup_tracing(verbose: bool) -> Result<PathBuf> {
    let dir = log_dir().context("no home directory to keep logs in")?;
    fs::create_dir_all(&dir)
        .with_context(|| format!("failed to create log directory {}", dir.display()))?;
    let path = dir.join(LOG_FILE);
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("failed to open log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter(verbose))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to install tracing subscriber: {e}"))?;

    Ok(path)
}
