use std::sync::Arc;

use serde_json::Value;
use shared::{
    error::{ApiError, ErrorCode},
    protocol::{InsertRecordResponse, StoredRecord},
};
use storage::{RecordStore, StoreError};
use tracing::error;

#[derive(Clone)]
pub struct ApiContext {
    pub store: Arc<dyn RecordStore>,
}

impl ApiContext {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }
}

pub async fn insert_record(
    ctx: &ApiContext,
    collection: &str,
    body: Value,
) -> Result<InsertRecordResponse, ApiError> {
    let id = ctx
        .store
        .insert(collection, body)
        .await
        .map_err(store_error)?;
    Ok(InsertRecordResponse { id })
}

pub async fn list_records(
    ctx: &ApiContext,
    collection: &str,
    order_by: &str,
) -> Result<Vec<StoredRecord>, ApiError> {
    ctx.store
        .query_all(collection, order_by)
        .await
        .map_err(store_error)
}

pub async fn query_records(
    ctx: &ApiContext,
    collection: &str,
    field: &str,
    value: &Value,
) -> Result<Vec<StoredRecord>, ApiError> {
    ctx.store
        .query_where(collection, field, value)
        .await
        .map_err(store_error)
}

pub async fn get_record(
    ctx: &ApiContext,
    collection: &str,
    id: &str,
) -> Result<StoredRecord, ApiError> {
    ctx.store
        .get_by_id(collection, id)
        .await
        .map_err(store_error)?
        .ok_or_else(|| {
            ApiError::new(
                ErrorCode::NotFound,
                format!("record {id} does not exist in collection {collection}"),
            )
        })
}

pub async fn replace_record_field(
    ctx: &ApiContext,
    collection: &str,
    id: &str,
    field: &str,
    value: Value,
) -> Result<(), ApiError> {
    ctx.store
        .replace_field(collection, id, field, value)
        .await
        .map_err(store_error)
}

fn store_error(err: anyhow::Error) -> ApiError {
    match err.downcast_ref::<StoreError>() {
        Some(StoreError::RecordNotFound { .. }) => ApiError::new(ErrorCode::NotFound, err.to_string()),
        Some(
            StoreError::InvalidIdentifier { .. }
            | StoreError::BodyNotAnObject
            | StoreError::UnsupportedFilterValue(_),
        ) => ApiError::new(ErrorCode::Validation, err.to_string()),
        None => {
            error!(error = %format!("{err:#}"), "record store failure");
            ApiError::new(ErrorCode::Internal, "record store failure")
        }
    }
}

#[cfg(test)]
#[path = "tests/mod_tests.rs"]
mod tests;
