use std::io;
use std::path::{Path, PathBuf};

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

pub struct LoggingGuard {
    _guard: WorkerGuard,
    log_dir: PathBuf,
}

impl LoggingGuard {
    pub fn log_dir(&self) -> &Path {
        &self.log_dir
    }
}

/// Install the global tracing subscriber, writing to
/// `<log_dir>/viloshell.log` through a non-blocking appender. The filter
/// comes from `VILOSHELL_LOG` (default `info`). Keep the returned guard
/// alive for the process lifetime or buffered lines are lost.
pub fn init_logging(log_dir: impl Into<PathBuf>) -> io::Result<LoggingGuard> {
    let log_dir = log_dir.into();
    std::fs::create_dir_all(&log_dir)?;

    let appender = tracing_appender::rolling::never(&log_dir, "viloshell.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let filter =
        EnvFilter::try_from_env("VILOSHELL_LOG").unwrap_or_else(|_| EnvFilter::new("info"));

    // try_init: embedders (and the test harness) may already have a
    // subscriber installed; file logging is best-effort in that case.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false),
        )
        .try_init();

    Ok(LoggingGuard {
        _guard: guard,
        log_dir,
    })
}
