use anyhow::Result;
use std::path::{Path, PathBuf};
use tracing::warn;
use tracing_appender::{
    non_blocking::WorkerGuard,
    rolling::{InitError, RollingFileAppender, Rotation},
};
use tracing_subscriber::{fmt, fmt::time::ChronoLocal, prelude::*, EnvFilter};

/// Directory holding the daily rolling log files.
pub fn log_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("vecmeta")
        .join("logs")
}

fn rolling_file(dir: &Path) -> Result<RollingFileAppender, InitError> {
    RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix("vecmeta")
        .filename_suffix("log")
        .build(dir)
}

/// Logs to stderr (stdout carries command output) and to a daily rolling
/// file under [`log_dir`]. `RUST_LOG` takes precedence over `default_level`.
pub fn init_tracing(default_level: &str) -> Result<Option<WorkerGuard>> {
    init_tracing_in(&log_dir(), default_level)
}

/// Like [`init_tracing`] with an explicit log directory. When the directory
/// cannot be used only stderr logging is installed and no guard is returned.
/// Otherwise the guard flushes the file writer on drop and must outlive
/// `main`'s work.
pub fn init_tracing_in(dir: &Path, default_level: &str) -> Result<Option<WorkerGuard>> {
    let (file_layer, guard, file_error) = match rolling_file(dir) {
        Ok(appender) => {
            let (file_writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer()
                .with_writer(file_writer)
                .with_ansi(false)
                .with_timer(ChronoLocal::rfc_3339());
            (Some(layer), Some(guard), None)
        }
        Err(err) => (None, None, Some(err)),
    };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .with(file_layer)
        .try_init()?;

    if let Some(err) = file_error {
        warn!("file logging disabled, {} is unusable: {err}", dir.display());
    }

    Ok(guard)
}
