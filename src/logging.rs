//! Tracing subscriber setup

use std::path::Path;

use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};

use crate::config::LogConfig;
use crate::error::{Error, Result};

/// Install the global subscriber described by `config`.
///
/// With a log file configured, events go through a non-blocking writer and the
/// returned guard must be held until shutdown. A subscriber that is already
/// installed is left in place.
pub fn init(config: &LogConfig) -> Result<Option<WorkerGuard>> {
    let level: Level = config
        .level
        .parse()
        .map_err(|_| Error::Config(format!("unknown log level {:?}", config.level)))?;

    let Some(path) = &config.file else {
        let _ = tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_max_level(level)
            .try_init();
        return Ok(None);
    };

    let dir = path
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let file_name = path
        .file_name()
        .ok_or_else(|| Error::Config(format!("log file {} has no file name", path.display())))?;

    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(file_name.to_string_lossy())
        .build(dir)
        .map_err(|e| Error::Config(format!("opening log file {}: {}", path.display(), e)))?;
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
    let _ = tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_max_level(level)
        .try_init();

    Ok(Some(guard))
}
