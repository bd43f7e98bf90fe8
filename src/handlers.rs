// src/handlers.rs
use actix_web::{web, HttpResponse, Result as ActixResult};
use serde::{Deserialize, Serialize};
use std::time::Instant;
use uuid::Uuid;

use crate::config::ApiConfig;
use crate::monitoring::metrics;
use crate::paragraph::{split_and_search, SegmentError};

/// Request body of `POST /paragraphs/splitAndSearch`
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchCriteria {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub search_term: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LimitsQuery {
    pub main_limit: Option<i64>,
    pub secondary_limit: Option<i64>,
}

/// Limits applied when the query string leaves them out
#[derive(Debug, Clone, Copy)]
pub struct SplitDefaults {
    pub main_limit: i64,
    pub secondary_limit: i64,
}

impl From<&ApiConfig> for SplitDefaults {
    fn from(config: &ApiConfig) -> Self {
        Self {
            main_limit: config.default_main_limit,
            secondary_limit: config.default_secondary_limit,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub request_id: String,
}

// === Handlers ===

pub async fn split_and_search_handler(
    defaults: web::Data<SplitDefaults>,
    query: web::Query<LimitsQuery>,
    criteria: web::Json<SearchCriteria>,
) -> ActixResult<HttpResponse> {
    let request_id = Uuid::new_v4().to_string();
    let main_limit = query.main_limit.unwrap_or(defaults.main_limit);
    let secondary_limit = query.secondary_limit.unwrap_or(defaults.secondary_limit);
    let SearchCriteria { text, search_term } = criteria.into_inner();

    tracing::info!(
        request_id = %request_id,
        main_limit,
        secondary_limit,
        text_bytes = ?text.as_ref().map(|t| t.len()),
        search_term = ?search_term,
        "Split and search request"
    );

    let started = Instant::now();
    let input_chars = text.as_deref().map_or(0, |t| t.chars().count());
    // CPU bound on large bodies; keep it off the worker thread
    let result = web::block(move || {
        split_and_search(
            text.as_deref(),
            search_term.as_deref(),
            main_limit,
            secondary_limit,
        )
    })
    .await?;

    match result {
        Ok(paragraphs) => {
            let duration_ms = started.elapsed().as_secs_f64() * 1000.0;
            let hits = paragraphs.iter().filter(|p| p.contains).count();
            metrics::observe_split(input_chars, paragraphs.len(), hits, duration_ms);
            tracing::info!(
                request_id = %request_id,
                paragraphs = paragraphs.len(),
                hits,
                duration_ms,
                "Split and search complete"
            );
            Ok(HttpResponse::Ok().json(paragraphs))
        }
        Err(e) => {
            metrics::observe_split_failure(e.kind());
            tracing::warn!(request_id = %request_id, kind = e.kind(), error = %e, "Split and search rejected");
            Ok(HttpResponse::BadRequest().json(error_response(&e, request_id)))
        }
    }
}

pub async fn check() -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/plain; charset=utf-8")
        .body("Greetings from textprocessor!")
}

fn error_response(error: &SegmentError, request_id: String) -> ErrorResponse {
    ErrorResponse {
        error: error.kind().to_string(),
        message: error.to_string(),
        request_id,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_criteria_camel_case() {
        let criteria: SearchCriteria =
            serde_json::from_str(r#"{"text":"abc","searchTerm":"b"}"#).unwrap();
        assert_eq!(criteria.text.as_deref(), Some("abc"));
        assert_eq!(criteria.search_term.as_deref(), Some("b"));
    }

    #[test]
    fn test_search_criteria_missing_fields() {
        let criteria: SearchCriteria = serde_json::from_str("{}").unwrap();
        assert!(criteria.text.is_none());
        assert!(criteria.search_term.is_none());
    }

    #[test]
    fn test_error_response_fields() {
        let body = error_response(&SegmentError::NullArgument("The text can't be null"), "id".into());
        assert_eq!(body.error, "null_argument");
        assert_eq!(body.message, "The text can't be null");
        assert_eq!(body.request_id, "id");
    }
}
