//! Tracing setup.
//!
//! The terminal form owns stdout, so events go to daily log files in the
//! platform data directory (or the system temp directory when none exists).
//! At most [`MAX_LOG_FILES`] files are kept.

use directories::ProjectDirs;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::Subscriber;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{InitError, RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, Registry, fmt, prelude::*};

/// Maximum number of log files to retain.
pub const MAX_LOG_FILES: usize = 10;
const LOG_FILE_PREFIX: &str = "zena";
const LOG_FILE_SUFFIX: &str = "log";

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("Failed to prepare log directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to create log file appender: {0}")]
    Appender(InitError),
    #[error("Failed to install global tracing subscriber: {0}")]
    SetGlobal(tracing::subscriber::SetGlobalDefaultError),
}

/// Keeps the background log writer alive.
///
/// Buffered events are flushed when this is dropped, so it has to live until
/// the process is about to exit.
#[must_use = "dropping the handle stops file logging"]
pub struct LogHandle {
    pub directory: PathBuf,
    _guard: WorkerGuard,
}

/// Installs the global subscriber.
///
/// `RUST_LOG` takes precedence over `default_level`.
pub fn init(default_level: &str) -> Result<LogHandle, LoggingError> {
    let directory = log_directory();
    let (subscriber, guard) = file_subscriber(&directory, default_level)?;
    tracing::subscriber::set_global_default(subscriber).map_err(LoggingError::SetGlobal)?;

    tracing::info!("Logging initialized; log directory {}", directory.display());
    Ok(LogHandle {
        directory,
        _guard: guard,
    })
}

pub fn log_directory() -> PathBuf {
    ProjectDirs::from("", "", "zena")
        .map(|dirs| dirs.data_local_dir().join("logs"))
        .unwrap_or_else(|| std::env::temp_dir().join("zena"))
}

fn file_subscriber(
    directory: &Path,
    default_level: &str,
) -> Result<(impl Subscriber + Send + Sync + 'static, WorkerGuard), LoggingError> {
    fs::create_dir_all(directory).map_err(|source| LoggingError::CreateDir {
        path: directory.to_path_buf(),
        source,
    })?;

    let appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(LOG_FILE_PREFIX)
        .filename_suffix(LOG_FILE_SUFFIX)
        .max_log_files(MAX_LOG_FILES)
        .build(directory)
        .map_err(LoggingError::Appender)?;
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let subscriber = Registry::default()
        .with(build_env_filter(default_level))
        .with(fmt::layer().with_ansi(false).with_writer(writer));
    Ok((subscriber, guard))
}

fn build_env_filter(default_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}
