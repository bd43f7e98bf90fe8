//! Monitoring configuration
//!
//! Loads from environment variables:
//! - MONITORING_ENABLED: Enable/disable logging setup (true/false)
//! - RUST_LOG: Tracing level (debug, info, warn, error)
//! - LOG_FORMAT: Console output format (json or text)
//! - LOG_DIR: Directory for log files (default: ~/.textprocessor/logs)
//! - LOG_TO_FILE / LOG_TO_CONSOLE: Toggle the individual outputs

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitoringConfig {
    pub enabled: bool,

    /// Log level used when RUST_LOG holds no valid filter
    pub log_level: String,

    pub log_format: LogFormat,

    pub log_dir: PathBuf,

    pub enable_file_logging: bool,

    pub enable_console_logging: bool,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum LogFormat {
    Json,
    Text,
}

impl LogFormat {
    pub fn as_str(&self) -> &str {
        match self {
            LogFormat::Json => "json",
            LogFormat::Text => "text",
        }
    }
}

impl std::str::FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(LogFormat::Json),
            "text" => Ok(LogFormat::Text),
            _ => Err(format!("Unknown log format: {}", s)),
        }
    }
}

impl Default for MonitoringConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            log_level: "info".to_string(),
            log_format: LogFormat::Text,
            log_dir: Self::default_log_dir(),
            enable_file_logging: false,
            enable_console_logging: true,
        }
    }
}

impl MonitoringConfig {
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(enabled) = env_flag("MONITORING_ENABLED") {
            config.enabled = enabled;
        }

        if let Ok(log_level) = std::env::var("RUST_LOG") {
            config.log_level = log_level;
        }

        if let Ok(log_format) = std::env::var("LOG_FORMAT") {
            match log_format.parse() {
                Ok(format) => config.log_format = format,
                Err(e) => eprintln!("{}; keeping {}", e, config.log_format.as_str()),
            }
        }

        if let Ok(log_dir) = std::env::var("LOG_DIR") {
            config.log_dir = PathBuf::from(log_dir);
        }

        if let Some(to_file) = env_flag("LOG_TO_FILE") {
            config.enable_file_logging = to_file;
        }

        if let Some(to_console) = env_flag("LOG_TO_CONSOLE") {
            config.enable_console_logging = to_console;
        }

        config
    }

    /// ~/.textprocessor/logs
    pub fn default_log_dir() -> PathBuf {
        let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
        PathBuf::from(format!("{}/.textprocessor/logs", home))
    }

    pub fn ensure_log_dir(&self) -> std::io::Result<()> {
        if !self.log_dir.exists() {
            std::fs::create_dir_all(&self.log_dir)?;

            #[cfg(unix)]
            {
                use std::os::unix::fs::PermissionsExt;
                let perms = std::fs::Permissions::from_mode(0o755);
                std::fs::set_permissions(&self.log_dir, perms)?;
            }
        }

        Ok(())
    }
}

fn env_flag(key: &str) -> Option<bool> {
    std::env::var(key)
        .ok()
        .map(|v| matches!(v.to_lowercase().as_str(), "true" | "1" | "yes"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = MonitoringConfig::default();
        assert!(config.enabled);
        assert_eq!(config.log_level, "info");
        assert_eq!(config.log_format, LogFormat::Text);
        assert!(config.enable_console_logging);
        assert!(!config.enable_file_logging);
    }

    #[test]
    fn test_log_format_parsing() {
        assert_eq!("json".parse::<LogFormat>().unwrap(), LogFormat::Json);
        assert_eq!("JSON".parse::<LogFormat>().unwrap(), LogFormat::Json);
        assert_eq!("text".parse::<LogFormat>().unwrap(), LogFormat::Text);
        assert!("invalid".parse::<LogFormat>().is_err());
    }

    #[test]
    fn test_ensure_log_dir_creates_nested_dir() {
        let tmp = tempfile::tempdir().unwrap();
        let config = MonitoringConfig {
            log_dir: tmp.path().join("nested").join("logs"),
            ..MonitoringConfig::default()
        };
        config.ensure_log_dir().unwrap();
        assert!(config.log_dir.is_dir());
    }
}
