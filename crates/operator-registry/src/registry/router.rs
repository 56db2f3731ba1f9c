use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;

use super::query::{QueryError, QueryService, DEFAULT_PAGE_SIZE};

#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    #[serde(default)]
    pub page: Option<i64>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: Option<String>,
}

/// Router exposing health, paginated listing and search over the ranked registry.
///
/// The `/api/...` paths mirror the routes existing browser clients already call.
pub fn registry_router(service: Arc<QueryService>) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/list", get(list_handler))
        .route("/search", get(search_handler))
        .route("/api/health", get(health_handler))
        .route("/api/operadoras", get(list_handler))
        .route("/api/search", get(search_handler))
        .with_state(service)
}

pub(crate) async fn health_handler(State(service): State<Arc<QueryService>>) -> Response {
    (StatusCode::OK, Json(service.health())).into_response()
}

pub(crate) async fn list_handler(
    State(service): State<Arc<QueryService>>,
    Query(params): Query<ListParams>,
) -> Response {
    let page = params.page.unwrap_or(1);
    match service.list(page, DEFAULT_PAGE_SIZE) {
        Ok(listing) => (StatusCode::OK, Json(listing)).into_response(),
        Err(error) => query_error_response(error),
    }
}

pub(crate) async fn search_handler(
    State(service): State<Arc<QueryService>>,
    Query(params): Query<SearchParams>,
) -> Response {
    let term = params.q.unwrap_or_default();
    match service.search(&term) {
        Ok(matches) => (StatusCode::OK, Json(matches)).into_response(),
        Err(error) => query_error_response(error),
    }
}

fn query_error_response(error: QueryError) -> Response {
    let status = match error {
        QueryError::DatasetUnavailable => StatusCode::INTERNAL_SERVER_ERROR,
    };
    let payload = json!({
        "error": error.to_string(),
    });
    (status, Json(payload)).into_response()
}
