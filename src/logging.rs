use std::fs;
use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

/// Variable holding the log filter directive, e.g. `projman=debug`
pub const LOG_ENV: &str = "PROJMAN_LOG";

/// File name of the TUI session log inside the tool directory
pub const LOG_FILE: &str = "projman.log";

fn env_filter(default_level: &str) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new(default_level))
}

/// CLI mode: compact lines on stderr, `warn` unless `PROJMAN_LOG` says otherwise.
pub fn init_cli() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter("warn"))
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .try_init();
}

/// TUI mode: the terminal is taken, so log to `<dir>/projman.log`.
///
/// The returned guard flushes the writer on drop and must live for the whole
/// session. Returns `None` when the log directory cannot be created; the
/// session then runs without logging.
pub fn init_tui(dir: &Path) -> Option<WorkerGuard> {
    fs::create_dir_all(dir).ok()?;
    let appender = tracing_appender::rolling::never(dir, LOG_FILE);
    let (writer, guard) = tracing_appender::non_blocking(appender);
    tracing_subscriber::fmt()
        .with_env_filter(env_filter("info"))
        .with_writer(writer)
        .with_ansi(false)
        .try_init()
        .ok()?;
    Some(guard)
}
