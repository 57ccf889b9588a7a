//! Tracing subscriber bootstrap.
//!
//! `RUST_LOG` takes precedence over the configured level. When a log directory
//! is configured, a daily rolling file receives the same events without ANSI
//! colors; the returned guard must live as long as the process.

use anyhow::{bail, Context};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::LoggingConfig;

const LOG_FILE_PREFIX: &str = "librarium.log";

/// Default filter directives for a configured level
pub fn default_directives(level: &str) -> String {
    format!("librarium_server={},tower_http=debug,sqlx=warn", level)
}

pub fn init(config: &LoggingConfig) -> anyhow::Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_directives(&config.level)))
        .with_context(|| format!("Invalid log level '{}'", config.level))?;

    let (file_layer, guard) = match config.directory {
        Some(ref directory) => {
            let appender = tracing_appender::rolling::daily(directory, LOG_FILE_PREFIX);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            (
                Some(fmt::layer().with_ansi(false).with_writer(writer)),
                Some(guard),
            )
        }
        None => (None, None),
    };

    let registry = tracing_subscriber::registry().with(filter).with(file_layer);

    match config.format.as_str() {
        "json" => registry.with(fmt::layer().json()).try_init()?,
        "pretty" => registry.with(fmt::layer()).try_init()?,
        other => bail!("Unknown log format '{}', expected 'pretty' or 'json'", other),
    }

    Ok(guard)
}
