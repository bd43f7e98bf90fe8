use actix_cors::Cors;
use actix_web::{error, web, App, HttpRequest, HttpResponse, HttpServer};
use tracing::{info, warn};
use uuid::Uuid;

use crate::config::ApiConfig;
use crate::handlers::{self, ErrorResponse, SplitDefaults};
use crate::monitoring::{self, MonitoringContext};

/// Paragraph routes plus the JSON/query extractor settings they rely on.
///
/// Callers must register `web::Data<SplitDefaults>` on the app.
pub fn configure_paragraph_routes(json_payload_limit: usize) -> impl FnOnce(&mut web::ServiceConfig) {
    move |cfg: &mut web::ServiceConfig| {
        cfg.app_data(
            web::JsonConfig::default()
                .limit(json_payload_limit)
                .error_handler(|err, req| bad_request(err.to_string(), req)),
        )
        .app_data(
            web::QueryConfig::default().error_handler(|err, req| bad_request(err.to_string(), req)),
        )
        .service(
            web::scope("/paragraphs")
                .route(
                    "/splitAndSearch",
                    web::post().to(handlers::split_and_search_handler),
                )
                .route("/check", web::get().to(handlers::check)),
        );
    }
}

fn bad_request(message: String, req: &HttpRequest) -> actix_web::Error {
    let body = ErrorResponse {
        error: "bad_request".to_string(),
        message,
        request_id: Uuid::new_v4().to_string(),
    };
    warn!(path = %req.path(), request_id = %body.request_id, error = %body.message, "Malformed request");
    monitoring::observe_split_failure("bad_request");
    error::InternalError::from_response(body.message.clone(), HttpResponse::BadRequest().json(body)).into()
}

pub async fn start_api_server(config: &ApiConfig, ctx: MonitoringContext) -> std::io::Result<()> {
    // Snapshot config values for the 'static factory closure
    let bind_addr = config.bind_addr();
    let defaults = SplitDefaults::from(config);
    let json_payload_limit = config.json_payload_limit;
    let monitoring_data = web::Data::new(ctx.clone());

    info!(
        bind_addr = %bind_addr,
        default_main_limit = defaults.main_limit,
        default_secondary_limit = defaults.secondary_limit,
        json_payload_limit,
        "Starting API server"
    );

    let mut http_server = HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allowed_methods(vec!["GET", "POST"])
            .allow_any_header()
            .max_age(3600);

        App::new()
            .wrap(cors)
            .app_data(web::Data::new(defaults))
            .app_data(monitoring_data.clone())
            .configure(configure_paragraph_routes(json_payload_limit))
            .configure(monitoring::handlers::register_routes)
    });

    if let Some(workers) = config.workers {
        http_server = http_server.workers(workers);
    }

    let server = http_server.bind(&bind_addr)?.run();
    ctx.startup_complete();
    info!(bind_addr = %bind_addr, "API server listening");
    server.await
}
