//! Tracing setup. The TUI owns stdout, so interactive sessions log to a file.

use std::fs::{self, OpenOptions};
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;

/// `bites.log` in the platform state directory (data directory as fallback).
pub fn default_log_path() -> PathBuf {
    let base = dirs::state_dir()
        .or_else(dirs::data_dir)
        .unwrap_or_else(|| PathBuf::from("."));
    base.join("frontend-bites").join("bites.log")
}

fn env_filter(config: &LoggingConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level))
}

/// Send logs to the configured file, appending.
///
/// Returns the path written to.
pub fn init_tracing(config: &LoggingConfig) -> io::Result<PathBuf> {
    let path = config.file.clone().unwrap_or_else(default_log_path);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(&path)?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter(config))
        .with_target(true)
        .with_level(true)
        .with_ansi(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .with_writer(Mutex::new(file))
        .init();

    Ok(path)
}

/// Log to stderr, for subcommands that print to stdout and exit.
pub fn init_stderr_tracing(config: &LoggingConfig) {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(config))
        .with_target(true)
        .with_level(true)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .with_writer(io::stderr)
        .init();
}
