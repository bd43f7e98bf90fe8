//! Structured logging with tracing
//!
//! Sets up:
//! - Console logging on stderr, text or JSON per LOG_FORMAT
//! - File logging with daily rotation, always JSON (optional)
//! - Level filtering from RUST_LOG, falling back to the configured level

use tracing_appender::non_blocking;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::daily;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use super::config::{LogFormat, MonitoringConfig};

pub const LOG_FILE_PREFIX: &str = "textprocessor.log";

/// Keeps the non-blocking file writer flushing. Dropping it stops file logging.
#[derive(Default)]
pub struct LoggingGuard {
    file: Option<WorkerGuard>,
}

impl LoggingGuard {
    pub fn has_file_writer(&self) -> bool {
        self.file.is_some()
    }
}

/// Installs the global subscriber. A subscriber installed earlier (tests,
/// embedding applications) is left in place.
pub fn init_tracing(config: &MonitoringConfig) -> std::io::Result<LoggingGuard> {
    if !config.enabled {
        return Ok(LoggingGuard::default());
    }

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    let console_enabled = config.enable_console_logging;
    let console_text = (console_enabled && config.log_format == LogFormat::Text).then(|| {
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
    });
    let console_json = (console_enabled && config.log_format == LogFormat::Json).then(|| {
        fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .with_current_span(true)
    });

    let (file_layer, file_guard) = if config.enable_file_logging {
        config.ensure_log_dir()?;
        let (writer, guard) = non_blocking(daily(&config.log_dir, LOG_FILE_PREFIX));
        let layer = fmt::layer().with_writer(writer).with_ansi(false).json();
        (Some(layer), Some(guard))
    } else {
        (None, None)
    };

    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(console_text)
        .with(console_json)
        .with(file_layer)
        .try_init();

    Ok(LoggingGuard { file: file_guard })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_returns_empty_guard() {
        let config = MonitoringConfig {
            enabled: false,
            ..MonitoringConfig::default()
        };
        let guard = init_tracing(&config).unwrap();
        assert!(!guard.has_file_writer());
    }

    #[test]
    fn test_file_logging_creates_log_dir() {
        let tmp = tempfile::tempdir().unwrap();
        let config = MonitoringConfig {
            log_dir: tmp.path().join("logs"),
            enable_file_logging: true,
            enable_console_logging: false,
            ..MonitoringConfig::default()
        };
        let guard = init_tracing(&config).unwrap();
        assert!(guard.has_file_writer());
        assert!(config.log_dir.is_dir());
    }
}
