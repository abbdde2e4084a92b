//! Structured logging.
//!
//! # Responsibilities
//! - Install the process-wide tracing subscriber exactly once
//! - Select level and encoder from the server configuration
//! - Flush buffered records when the returned guard is dropped

use thiserror::Error;
use tracing::level_filters::LevelFilter;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::config::ServerConfig;

/// Error type for logger initialization.
#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("a global tracing subscriber is already installed")]
    AlreadyInitialized(#[source] tracing_subscriber::util::TryInitError),
}

/// Output encoding for log records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogEncoding {
    /// One JSON object per line.
    Json,
    /// Human-readable lines with RFC 3339 timestamps.
    Console,
}

impl LogEncoding {
    /// JSON only for production deployments that did not ask for `text`.
    pub fn select(config: &ServerConfig) -> Self {
        if config.is_production() && config.log_format != "text" {
            LogEncoding::Json
        } else {
            LogEncoding::Console
        }
    }
}

/// Map a configured level name onto a filter; unknown names mean `info`.
pub fn parse_level(level: &str) -> LevelFilter {
    match level {
        "debug" => LevelFilter::DEBUG,
        "info" => LevelFilter::INFO,
        "warn" => LevelFilter::WARN,
        "error" => LevelFilter::ERROR,
        _ => LevelFilter::INFO,
    }
}

/// Keeps the background log writer alive.
///
/// Dropping the guard flushes any records still queued for stdout, so it must
/// live until the end of `main`.
#[must_use = "dropping the guard stops the log writer"]
pub struct LogGuard {
    _worker: WorkerGuard,
}

/// Run `f` with a temporary stderr subscriber.
///
/// Covers work that happens before the configuration, and so the real
/// subscriber, is available.
pub fn with_bootstrap_logger<T>(f: impl FnOnce() -> T) -> T {
    let subscriber = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_max_level(LevelFilter::WARN)
        .finish();
    tracing::subscriber::with_default(subscriber, f)
}

/// Install the global subscriber described by `config`.
///
/// `RUST_LOG`, when set and valid, takes precedence over `LOG_LEVEL`.
pub fn init(config: &ServerConfig) -> Result<LogGuard, LoggingError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::default().add_directive(parse_level(&config.log_level).into()));

    let (writer, worker) = tracing_appender::non_blocking(std::io::stdout());

    let encoding = LogEncoding::select(config);
    let layer = match encoding {
        LogEncoding::Json => tracing_subscriber::fmt::layer()
            .json()
            .with_current_span(false)
            .with_writer(writer)
            .boxed(),
        LogEncoding::Console => tracing_subscriber::fmt::layer()
            .with_target(false)
            .with_writer(writer)
            .boxed(),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(layer)
        .try_init()
        .map_err(LoggingError::AlreadyInitialized)?;

    Ok(LogGuard { _worker: worker })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;

    fn encoding(environment: &str, format: &str) -> LogEncoding {
        let mut server = AppConfig::default().server;
        server.environment = environment.to_string();
        server.log_format = format.to_string();
        LogEncoding::select(&server)
    }

    #[test]
    fn test_production_json_by_default() {
        assert_eq!(encoding("production", "json"), LogEncoding::Json);
        assert_eq!(encoding("production", "anything"), LogEncoding::Json);
    }

    #[test]
    fn test_text_format_forces_console() {
        assert_eq!(encoding("production", "text"), LogEncoding::Console);
    }

    #[test]
    fn test_non_production_is_console() {
        assert_eq!(encoding("development", "json"), LogEncoding::Console);
        assert_eq!(encoding("staging", "text"), LogEncoding::Console);
    }

    #[test]
    fn test_bootstrap_logger_returns_result() {
        let value = with_bootstrap_logger(|| {
            tracing::warn!("emitted before the real subscriber");
            7
        });
        assert_eq!(value, 7);
    }

    #[test]
    fn test_level_names() {
        assert_eq!(parse_level("debug"), LevelFilter::DEBUG);
        assert_eq!(parse_level("warn"), LevelFilter::WARN);
        assert_eq!(parse_level("error"), LevelFilter::ERROR);
        assert_eq!(parse_level("verbose"), LevelFilter::INFO);
        assert_eq!(parse_level(""), LevelFilter::INFO);
    }
}
