//! Logging setup shared by the reservas binaries and tests.
//!
//! Everything logs through `tracing`. [`init_from_config`] installs a stdout
//! subscriber filtered by `RUST_LOG` plus a `reservas=<level>` directive, and
//! writes a daily rolling file when `logging.directory` is configured.

use reservas_config::LoggingConfig;
use std::str::FromStr;
use tracing::{info, warn, Level};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize logging from the `[logging]` section.
///
/// The returned guard flushes the file writer on drop and must be kept alive
/// for the lifetime of the process.
pub fn init_from_config(config: &LoggingConfig) -> Option<WorkerGuard> {
    let level = Level::from_str(&config.level).unwrap_or_else(|_| {
        eprintln!("Unknown log level '{}', using info", config.level);
        Level::INFO
    });

    let (file_layer, guard) = match config.directory.as_deref() {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, "reservas.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer().with_ansi(false).with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    // Fails when a global subscriber is already installed, e.g. across tests.
    let result = tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_line_number(true))
        .with(file_layer)
        .with(env_filter(level))
        .try_init();

    if result.is_ok() {
        info!(
            "Logging initialized at level: {} (file output: {})",
            level,
            config.directory.as_deref().unwrap_or("off")
        );
    }
    guard
}

fn env_filter(level: Level) -> EnvFilter {
    let filter = EnvFilter::from_default_env();
    match format!("reservas={}", level).parse() {
        Ok(directive) => filter.add_directive(directive),
        Err(e) => {
            warn!("Invalid log directive: {}", e);
            filter
        }
    }
}
