use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Environment variable that overrides the log filter (e.g. `debug`)
pub const LOG_ENV: &str = "SYNCROTASK_LOG";
/// Log file written by the TUI inside the data directory
pub const LOG_FILE: &str = "syncrotask.log";

fn filter(default_level: &str) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("warn"))
}

/// Log to stderr. Used by CLI subcommands.
pub fn init_stderr(default_level: &str) {
    let _ = tracing_subscriber::registry()
        .with(filter(default_level))
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .try_init();
}

/// Log to `.syncrotask/syncrotask.log`. Used by the TUI, which owns the
/// terminal.
pub fn init_file(data_dir: &Path, default_level: &str) -> std::io::Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(data_dir.join(LOG_FILE))?;
    let _ = tracing_subscriber::registry()
        .with(filter(default_level))
        .with(
            fmt::layer()
                .with_ansi(false)
                .with_target(false)
                .with_writer(Mutex::new(file)),
        )
        .try_init();
    Ok(())
}
