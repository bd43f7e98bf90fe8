//! Monitoring module for textprocessor
//!
//! Provides:
//! - Structured logging with tracing
//! - Prometheus metrics collection
//! - Health checks endpoints

pub mod config;
pub mod handlers;
pub mod health;
pub mod metrics;
pub mod tracing_config;

pub use config::MonitoringConfig;
pub use health::{Component, ComponentStatus, HealthStatus};
pub use metrics::{export_prometheus, observe_split, observe_split_failure, REGISTRY};

use std::sync::Arc;
use std::time::Instant;

use crate::paragraph::{split_and_search, DEFAULT_MAIN_LIMIT, DEFAULT_SECONDARY_LIMIT};

/// Monitoring context shared across the application
#[derive(Clone)]
pub struct MonitoringContext {
    pub config: MonitoringConfig,
    pub health: Arc<health::HealthTracker>,
    pub startup_time: Instant,
    _logging: Arc<tracing_config::LoggingGuard>,
}

impl MonitoringContext {
    /// Installs logging and metrics; must run before the server starts.
    pub fn new(config: MonitoringConfig) -> std::io::Result<Self> {
        let health = Arc::new(health::HealthTracker::new());

        let logging = match tracing_config::init_tracing(&config) {
            Ok(guard) => {
                health.set_component_status(Component::Logging, ComponentStatus::Healthy);
                guard
            }
            Err(e) => {
                // keep serving without file logs
                eprintln!("Failed to initialize file logging in {}: {}", config.log_dir.display(), e);
                health.set_component_status(Component::Logging, ComponentStatus::Degraded);
                tracing_config::LoggingGuard::default()
            }
        };
        health.set_component_status(Component::Configuration, ComponentStatus::Healthy);

        metrics::init();

        let segmenter_status = if segmenter_self_check() {
            ComponentStatus::Healthy
        } else {
            ComponentStatus::Unhealthy
        };
        health.set_component_status(Component::Segmenter, segmenter_status);

        tracing::info!(
            log_format = config.log_format.as_str(),
            file_logging = config.enable_file_logging,
            "Monitoring system initialized"
        );

        Ok(Self {
            config,
            health,
            startup_time: Instant::now(),
            _logging: Arc::new(logging),
        })
    }

    /// Call after the server is listening. Stays not ready while a critical
    /// component (a failed segmenter self check) is unhealthy.
    pub fn startup_complete(&self) {
        let startup_duration = self.startup_time.elapsed();
        self.health
            .set_component_status(Component::Api, ComponentStatus::Healthy);
        if self.health_status().status == ComponentStatus::Unhealthy {
            self.health.mark_not_ready();
        } else {
            self.health.mark_ready();
        }

        tracing::info!(
            duration_ms = startup_duration.as_millis() as u64,
            "Application startup complete"
        );
    }

    pub fn health_status(&self) -> HealthStatus {
        self.health.get_status()
    }
}

/// Splits a fixed two-paragraph probe and checks the offsets.
fn segmenter_self_check() -> bool {
    match split_and_search(
        Some("probe one\n\nprobe two"),
        Some("two"),
        DEFAULT_MAIN_LIMIT,
        DEFAULT_SECONDARY_LIMIT,
    ) {
        Ok(paragraphs) => {
            paragraphs.len() == 2
                && paragraphs[1].start == 11
                && !paragraphs[0].contains
                && paragraphs[1].contains
        }
        Err(e) => {
            tracing::error!(error = %e, "Segmenter self check failed");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_monitoring_context_creation() {
        let config = MonitoringConfig {
            enabled: false,
            ..MonitoringConfig::default()
        };
        let ctx = MonitoringContext::new(config).unwrap();
        assert!(!ctx.health.is_ready());
        assert_eq!(ctx.health_status().components.segmenter, ComponentStatus::Healthy);

        ctx.startup_complete();
        assert!(ctx.health.is_ready());
        assert_eq!(ctx.health_status().status, ComponentStatus::Healthy);
    }

    #[test]
    fn test_unhealthy_segmenter_keeps_service_not_ready() {
        let config = MonitoringConfig {
            enabled: false,
            ..MonitoringConfig::default()
        };
        let ctx = MonitoringContext::new(config).unwrap();
        ctx.health
            .set_component_status(Component::Segmenter, ComponentStatus::Unhealthy);

        ctx.startup_complete();
        assert!(!ctx.health.is_ready());
        assert_eq!(ctx.health_status().status, ComponentStatus::Unhealthy);
    }

    #[test]
    fn test_segmenter_self_check() {
        assert!(segmenter_self_check());
    }
}
