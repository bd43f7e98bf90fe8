//! Health tracking
//!
//! Backs:
//! - GET /monitoring/health - Full health status
//! - GET /monitoring/ready - Readiness probe (K8s compatible)
//! - GET /monitoring/live - Liveness probe (K8s compatible)

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, Ordering};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ComponentStatus {
    #[serde(rename = "healthy")]
    Healthy,
    #[serde(rename = "degraded")]
    Degraded,
    #[serde(rename = "unhealthy")]
    Unhealthy,
}

impl std::fmt::Display for ComponentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ComponentStatus::Healthy => write!(f, "healthy"),
            ComponentStatus::Degraded => write!(f, "degraded"),
            ComponentStatus::Unhealthy => write!(f, "unhealthy"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Component {
    Api,
    Segmenter,
    Configuration,
    Logging,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: ComponentStatus,
    pub timestamp: String,
    pub uptime_seconds: f64,
    pub components: ComponentHealth,
    pub message: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComponentHealth {
    pub api: ComponentStatus,
    pub segmenter: ComponentStatus,
    pub configuration: ComponentStatus,
    pub logging: ComponentStatus,
}

impl Default for ComponentHealth {
    fn default() -> Self {
        Self {
            api: ComponentStatus::Unhealthy,
            segmenter: ComponentStatus::Unhealthy,
            configuration: ComponentStatus::Unhealthy,
            logging: ComponentStatus::Unhealthy,
        }
    }
}

impl ComponentHealth {
    /// Worst status of the components requests depend on; logging only degrades.
    fn overall(&self) -> ComponentStatus {
        let critical = [self.api, self.segmenter, self.configuration];
        if critical.contains(&ComponentStatus::Unhealthy) {
            ComponentStatus::Unhealthy
        } else if critical.contains(&ComponentStatus::Degraded)
            || self.logging != ComponentStatus::Healthy
        {
            ComponentStatus::Degraded
        } else {
            ComponentStatus::Healthy
        }
    }
}

pub struct HealthTracker {
    is_ready: AtomicBool,
    is_live: AtomicBool,
    components: parking_lot::RwLock<ComponentHealth>,
    startup_time: std::time::Instant,
}

impl HealthTracker {
    pub fn new() -> Self {
        Self {
            is_ready: AtomicBool::new(false),
            is_live: AtomicBool::new(true),
            components: parking_lot::RwLock::new(ComponentHealth::default()),
            startup_time: std::time::Instant::now(),
        }
    }

    /// Call once the server is bound; /ready answers 200 afterwards.
    pub fn mark_ready(&self) {
        self.is_ready.store(true, Ordering::SeqCst);
        tracing::info!("System marked as ready");
    }

    pub fn mark_not_ready(&self) {
        self.is_ready.store(false, Ordering::SeqCst);
        tracing::warn!("System marked as not ready");
    }

    pub fn set_component_status(&self, component: Component, status: ComponentStatus) {
        let mut components = self.components.write();
        match component {
            Component::Api => components.api = status,
            Component::Segmenter => components.segmenter = status,
            Component::Configuration => components.configuration = status,
            Component::Logging => components.logging = status,
        }
        tracing::debug!(component = ?component, status = %status, "Component status updated");
    }

    pub fn get_status(&self) -> HealthStatus {
        let components = self.components.read().clone();

        HealthStatus {
            status: components.overall(),
            timestamp: chrono::Utc::now().to_rfc3339(),
            uptime_seconds: self.startup_time.elapsed().as_secs_f64(),
            components,
            message: None,
        }
    }

    pub fn is_ready(&self) -> bool {
        self.is_ready.load(Ordering::SeqCst)
    }

    pub fn is_live(&self) -> bool {
        self.is_live.load(Ordering::SeqCst)
    }
}

impl Default for HealthTracker {
    fn default() -> Self {
        Self::new()
    }
}
