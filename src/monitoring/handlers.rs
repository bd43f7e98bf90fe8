//! HTTP handlers for monitoring endpoints
//!
//! Endpoints:
//! - GET /monitoring/health - Full health status (JSON)
//! - GET /monitoring/ready - Readiness probe (K8s compatible)
//! - GET /monitoring/live - Liveness probe (K8s compatible)
//! - GET /monitoring/metrics - Prometheus format metrics

use actix_web::{http::StatusCode, web, HttpResponse, Result as ActixResult};
use serde_json::json;

use super::health::ComponentStatus;
use super::MonitoringContext;

/// Response:
/// ```json
/// {
///   "status": "healthy",
///   "timestamp": "2025-10-26T12:30:45Z",
///   "uptime_seconds": 123.45,
///   "components": {
///     "api": "healthy",
///     "segmenter": "healthy",
///     "configuration": "healthy",
///     "logging": "healthy"
///   }
/// }
/// ```
pub async fn health_handler(ctx: web::Data<MonitoringContext>) -> ActixResult<HttpResponse> {
    let status = ctx.health_status();

    let status_code = match status.status {
        ComponentStatus::Healthy | ComponentStatus::Degraded => StatusCode::OK,
        ComponentStatus::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
    };

    Ok(HttpResponse::build(status_code).json(status))
}

pub async fn ready_handler(ctx: web::Data<MonitoringContext>) -> ActixResult<HttpResponse> {
    let ready = ctx.health.is_ready();
    let body = json!({
        "ready": ready,
        "timestamp": chrono::Utc::now().to_rfc3339(),
    });
    if ready {
        Ok(HttpResponse::Ok().json(body))
    } else {
        Ok(HttpResponse::ServiceUnavailable().json(body))
    }
}

pub async fn live_handler(ctx: web::Data<MonitoringContext>) -> ActixResult<HttpResponse> {
    let live = ctx.health.is_live();
    let body = json!({
        "live": live,
        "timestamp": chrono::Utc::now().to_rfc3339(),
    });
    if live {
        Ok(HttpResponse::Ok().json(body))
    } else {
        Ok(HttpResponse::ServiceUnavailable().json(body))
    }
}

/// Content-Type: text/plain; version=0.0.4
pub async fn metrics_handler() -> ActixResult<HttpResponse> {
    let metrics_text = super::metrics::export_prometheus();
    Ok(HttpResponse::Ok()
        .content_type("text/plain; version=0.0.4; charset=utf-8")
        .body(metrics_text))
}

pub fn register_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/monitoring")
            .route("/health", web::get().to(health_handler))
            .route("/ready", web::get().to(ready_handler))
            .route("/live", web::get().to(live_handler))
            .route("/metrics", web::get().to(metrics_handler)),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::monitoring::config::MonitoringConfig;
    use crate::monitoring::health::Component;
    use actix_web::{test, App};

    fn context() -> MonitoringContext {
        let config = MonitoringConfig {
            enabled: false,
            ..MonitoringConfig::default()
        };
        MonitoringContext::new(config).expect("Failed to create context")
    }

    #[actix_web::test]
    async fn test_health_endpoint() {
        let ctx = context();
        ctx.health.mark_ready();
        for component in [
            Component::Api,
            Component::Segmenter,
            Component::Configuration,
            Component::Logging,
        ] {
            ctx.health.set_component_status(component, ComponentStatus::Healthy);
        }

        let resp = health_handler(web::Data::new(ctx)).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn test_ready_before_and_after_startup() {
        let ctx = web::Data::new(context());
        let app = test::init_service(
            App::new()
                .app_data(ctx.clone())
                .configure(register_routes),
        )
        .await;

        let req = test::TestRequest::get().uri("/monitoring/ready").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);

        ctx.startup_complete();
        let req = test::TestRequest::get().uri("/monitoring/ready").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn test_metrics_endpoint_is_prometheus_text() {
        crate::monitoring::metrics::init();
        let resp = metrics_handler().await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let content_type = resp.headers().get("content-type").unwrap().to_str().unwrap();
        assert!(content_type.starts_with("text/plain"));
    }
}
