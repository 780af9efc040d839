//! Logging utilities for leitung

use std::fs::{File, OpenOptions};
use std::path::Path;
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::constants::FILE_LOG_LEVEL;

/// Create log file with proper options
pub fn create_log_file(path: &Path) -> std::io::Result<File> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(path)
}

/// Install the global subscriber.
///
/// Console output goes to stderr, filtered by RUST_LOG or `level`. When
/// `log_file` is given, everything at debug level is also written there.
pub fn init(level: &str, log_file: Option<&Path>) -> std::io::Result<()> {
    let console = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_level(true)
        .with_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)));

    let file = match log_file {
        Some(path) => Some(
            fmt::layer()
                .with_writer(create_log_file(path)?)
                .with_ansi(false)
                .with_target(false)
                .with_thread_ids(false)
                .with_level(true)
                .with_filter(EnvFilter::new(FILE_LOG_LEVEL)),
        ),
        None => None,
    };

    tracing_subscriber::registry().with(console).with(file).init();
    Ok(())
}
