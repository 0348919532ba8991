//! HTTP front for a [`storage::RecordStore`], serving album documents to
//! remote clients.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use shared::{
    error::{ApiError, ErrorCode},
    protocol::{
        InsertRecordRequest, InsertRecordResponse, ListRecordsQuery, QueryWhereRequest,
        ReplaceFieldRequest, StoredRecord,
    },
};
use tower_http::limit::RequestBodyLimitLayer;
use tracing::warn;

pub mod api;
pub mod app_state;
pub mod config;

pub use api::ApiContext;
pub use app_state::AppState;

type HttpError = (StatusCode, Json<ApiError>);

pub fn build_router(state: Arc<AppState>, max_body_bytes: usize) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route(
            "/collections/:collection/records",
            post(http_insert_record).get(http_list_records),
        )
        .route("/collections/:collection/query", post(http_query_records))
        .route("/collections/:collection/records/:id", get(http_get_record))
        .route(
            "/collections/:collection/records/:id/fields/:field",
            put(http_replace_field),
        )
        .layer(RequestBodyLimitLayer::new(max_body_bytes))
        .with_state(state)
}

fn http_error(err: ApiError) -> HttpError {
    let status = match err.code {
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::Validation => StatusCode::BAD_REQUEST,
        ErrorCode::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, Json(err))
}

async fn healthz(State(state): State<Arc<AppState>>) -> (StatusCode, &'static str) {
    match state.api.store.health_check().await {
        Ok(()) => (StatusCode::OK, "ok"),
        Err(err) => {
            warn!(error = %err, "health check failed");
            (StatusCode::SERVICE_UNAVAILABLE, "unavailable")
        }
    }
}

async fn http_insert_record(
    State(state): State<Arc<AppState>>,
    Path(collection): Path<String>,
    Json(req): Json<InsertRecordRequest>,
) -> Result<Json<InsertRecordResponse>, HttpError> {
    api::insert_record(&state.api, &collection, req.body)
        .await
        .map(Json)
        .map_err(http_error)
}

async fn http_list_records(
    State(state): State<Arc<AppState>>,
    Path(collection): Path<String>,
    Query(query): Query<ListRecordsQuery>,
) -> Result<Json<Vec<StoredRecord>>, HttpError> {
    api::list_records(&state.api, &collection, &query.order_by)
        .await
        .map(Json)
        .map_err(http_error)
}

async fn http_query_records(
    State(state): State<Arc<AppState>>,
    Path(collection): Path<String>,
    Json(req): Json<QueryWhereRequest>,
) -> Result<Json<Vec<StoredRecord>>, HttpError> {
    api::query_records(&state.api, &collection, &req.field, &req.value)
        .await
        .map(Json)
        .map_err(http_error)
}

async fn http_get_record(
    State(state): State<Arc<AppState>>,
    Path((collection, id)): Path<(String, String)>,
) -> Result<Json<StoredRecord>, HttpError> {
    api::get_record(&state.api, &collection, &id)
        .await
        .map(Json)
        .map_err(http_error)
}

async fn http_replace_field(
    State(state): State<Arc<AppState>>,
    Path((collection, id, field)): Path<(String, String, String)>,
    Json(req): Json<ReplaceFieldRequest>,
) -> Result<StatusCode, HttpError> {
    api::replace_record_field(&state.api, &collection, &id, &field, req.value)
        .await
        .map_err(http_error)?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
#[path = "tests/router_tests.rs"]
mod tests;
