// src/main.rs
use textprocessor::api::start_api_server;
use textprocessor::config::ApiConfig;
use textprocessor::monitoring::{MonitoringConfig, MonitoringContext};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let config = ApiConfig::from_env()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;

    let ctx = MonitoringContext::new(MonitoringConfig::from_env())?;
    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        bind_addr = %config.bind_addr(),
        "textprocessor starting"
    );

    start_api_server(&config, ctx).await
}
