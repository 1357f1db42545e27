//! Tracing setup
//!
//! Console output is always on. When `LOG_FILE` is set, a plain-text copy is
//! written to `logs/<basename of LOG_FILE>`; a file left by the previous run
//! is kept as `<name>.1`.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Layer};

const LOGS_DIR: &str = "logs";

/// Install the global subscriber.
///
/// The returned guard flushes the file writer on drop and must live until exit.
pub fn init(verbose: u8) -> Result<Option<WorkerGuard>> {
    let filter = match std::env::var("RUST_LOG") {
        Ok(directives) if !directives.trim().is_empty() => EnvFilter::try_new(directives)
            .context("invalid RUST_LOG directives")?,
        _ => EnvFilter::new(level_directive(
            std::env::var("LOG_LEVEL").ok().as_deref(),
            verbose,
        )),
    };

    let console_layer = fmt::layer().with_target(true).with_writer(std::io::stderr);

    let (file_layer, guard) = match std::env::var("LOG_FILE") {
        Ok(name) if !name.trim().is_empty() => {
            let path = prepare_log_file(Path::new(LOGS_DIR), &name)?;
            let file_name = path
                .file_name()
                .map(|n| n.to_os_string())
                .context("log file has no name")?;
            let appender = tracing_appender::rolling::never(LOGS_DIR, file_name);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer()
                .with_ansi(false)
                .with_target(true)
                .with_writer(writer)
                .boxed();
            (Some(layer), Some(guard))
        }
        _ => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .context("failed to install tracing subscriber")?;

    Ok(guard)
}

/// Filter directive from `LOG_LEVEL` and the `-v` count.
///
/// Unknown or missing levels mean `info`; each `-v` raises verbosity by one
/// step, never lowering an explicit level.
pub fn level_directive(log_level: Option<&str>, verbose: u8) -> &'static str {
    const LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];

    let base = match log_level.map(|l| l.trim().to_ascii_lowercase()).as_deref() {
        Some("error") => 0,
        Some("warn") => 1,
        Some("debug") => 3,
        _ => 2,
    };
    let raised = if verbose == 0 {
        base
    } else {
        base.max(2 + verbose as usize)
    };
    LEVELS[raised.min(LEVELS.len() - 1)]
}

/// Create `dir`, rotate an existing log to `.1` and return the log path
pub fn prepare_log_file(dir: &Path, name: &str) -> Result<PathBuf> {
    let base = Path::new(name)
        .file_name()
        .with_context(|| format!("LOG_FILE '{}' has no file name", name))?;

    std::fs::create_dir_all(dir)
        .with_context(|| format!("failed to create {}", dir.display()))?;

    let path = dir.join(base);
    if path.exists() {
        let mut rotated = path.clone().into_os_string();
        rotated.push(".1");
        std::fs::rename(&path, &rotated)
            .with_context(|| format!("failed to rotate {}", path.display()))?;
    }
    Ok(path)
}
