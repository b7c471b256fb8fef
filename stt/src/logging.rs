use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use crate::error::AppError;

/// Default filter when `RUST_LOG` is not set
const DEFAULT_FILTER: &str = "info";

/// Send all tracing output to `path`, replacing the previous log.
///
/// The returned guard flushes the writer on drop and has to live until the app exits.
pub fn init(path: &Path) -> Result<WorkerGuard, AppError> {
    let directory = path
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let file_name = path
        .file_name()
        .ok_or_else(|| AppError::Logging(format!("{} is not a file", path.display())))?;

    if path.exists() {
        std::fs::remove_file(path).map_err(|error| AppError::Logging(error.to_string()))?;
    }

    let file_appender = tracing_appender::rolling::never(directory, file_name);
    let (writer, guard) = tracing_appender::non_blocking(file_appender);
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .try_init()
        .map_err(|error| AppError::Logging(error.to_string()))?;

    Ok(guard)
}
