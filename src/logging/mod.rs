//! Diagnostic logging to disk.
//!
//! The terminal belongs to the UI, so `tracing` output goes to a daily log
//! file named `folio_<date>.log` in the configured log directory (default:
//! `~/.local/share/folio/logs/`). The filter comes from `FOLIO_LOG_LEVEL`
//! when set, otherwise from `logging.level`.

use crate::config::LoggingConfig;
use anyhow::{Context, Result};
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::fmt::time::ChronoLocal;
use tracing_subscriber::EnvFilter;

const LEVEL_ENV: &str = "FOLIO_LOG_LEVEL";

/// Expand a leading `~` to the home directory.
pub fn expand_log_dir(log_dir: &str) -> PathBuf {
    match log_dir.strip_prefix('~') {
        Some(rest) => match dirs::home_dir() {
            Some(home) => home.join(rest.trim_start_matches('/')),
            None => PathBuf::from(log_dir),
        },
        None => PathBuf::from(log_dir),
    }
}

pub fn log_file_name(date: chrono::NaiveDate) -> String {
    format!("folio_{}.log", date.format("%Y-%m-%d"))
}

fn build_filter(level: &str) -> Result<EnvFilter> {
    let filter = match EnvFilter::try_from_env(LEVEL_ENV) {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(level)
            .with_context(|| format!("Invalid logging.level '{}'", level))?,
    };
    Ok(filter
        .add_directive("reqwest=warn".parse()?)
        .add_directive("hyper=warn".parse()?)
        .add_directive("rustls=warn".parse()?))
}

/// Install the global subscriber. Returns the log file path, or `None` when
/// logging is disabled.
pub fn init_tracing(config: &LoggingConfig) -> Result<Option<PathBuf>> {
    if !config.enabled {
        return Ok(None);
    }

    let log_dir = expand_log_dir(&config.log_dir);
    fs::create_dir_all(&log_dir)
        .with_context(|| format!("Failed to create log directory {}", log_dir.display()))?;
    let path = log_dir.join(log_file_name(chrono::Local::now().date_naive()));
    let file = open_append(&path)?;

    tracing_subscriber::fmt()
        .with_env_filter(build_filter(&config.level)?)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_timer(ChronoLocal::rfc_3339())
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to install log subscriber: {}", e))?;

    tracing::info!(path = %path.display(), "logging started");
    Ok(Some(path))
}

fn open_append(path: &Path) -> Result<fs::File> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file {}", path.display()))
}
