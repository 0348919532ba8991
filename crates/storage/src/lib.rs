use anyhow::{Context, Result};
use async_trait::async_trait;
use serde_json::Value;
use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions, SqliteRow},
    Pool, Row, Sqlite,
};
use std::str::FromStr;
use thiserror::Error;
use tracing::debug;
use uuid::Uuid;

use shared::protocol::{is_valid_identifier, StoredRecord};

mod database_url;

pub use database_url::{normalize_database_url, prepare_database_url, DEFAULT_DATABASE_URL};

/// Document-store primitives the album workflow is written against.
///
/// Collections hold JSON object documents keyed by a store-assigned id.
/// Field arguments name a top-level key of the document.
#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn insert(&self, collection: &str, body: Value) -> Result<String>;

    /// Every record of `collection`, ascending by `order_by`, ties in insertion order.
    async fn query_all(&self, collection: &str, order_by: &str) -> Result<Vec<StoredRecord>>;

    /// Records whose `field` equals `value`, in insertion order.
    async fn query_where(
        &self,
        collection: &str,
        field: &str,
        value: &Value,
    ) -> Result<Vec<StoredRecord>>;

    async fn get_by_id(&self, collection: &str, id: &str) -> Result<Option<StoredRecord>>;

    /// Overwrites one field of an existing record.
    async fn replace_field(&self, collection: &str, id: &str, field: &str, value: Value)
        -> Result<()>;

    async fn health_check(&self) -> Result<()>;
}

/// Request-level problems, kept distinct from I/O failures so callers can
/// tell a bad request from an unavailable store.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("invalid {kind} name '{name}'")]
    InvalidIdentifier { kind: &'static str, name: String },
    #[error("record body must be a JSON object")]
    BodyNotAnObject,
    #[error("cannot filter on a {0} value")]
    UnsupportedFilterValue(&'static str),
    #[error("record {id} does not exist in collection {collection}")]
    RecordNotFound { collection: String, id: String },
}

#[derive(Clone)]
pub struct Storage {
    pool: Pool<Sqlite>,
}

impl Storage {
    pub async fn new(database_url: &str) -> Result<Self> {
        database_url::ensure_sqlite_parent_dir_exists(database_url)?;

        let connect_options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(connect_options)
            .await?;
        sqlx::migrate!("./migrations").run(&pool).await?;
        Ok(Self { pool })
    }

    /// Number of records in `collection`.
    #[cfg(test)]
    pub(crate) async fn count(&self, collection: &str) -> Result<i64> {
        check_identifier("collection", collection)?;
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM records WHERE collection = ?")
            .bind(collection)
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}

#[async_trait]
impl RecordStore for Storage {
    async fn insert(&self, collection: &str, body: Value) -> Result<String> {
        check_identifier("collection", collection)?;
        if !body.is_object() {
            return Err(StoreError::BodyNotAnObject.into());
        }

        let id = Uuid::new_v4().to_string();
        sqlx::query("INSERT INTO records (collection, id, body) VALUES (?, ?, ?)")
            .bind(collection)
            .bind(&id)
            .bind(body.to_string())
            .execute(&self.pool)
            .await
            .with_context(|| format!("failed to insert record into {collection}"))?;
        debug!(collection, %id, "inserted record");
        Ok(id)
    }

    async fn query_all(&self, collection: &str, order_by: &str) -> Result<Vec<StoredRecord>> {
        check_identifier("collection", collection)?;
        check_identifier("field", order_by)?;

        let rows = sqlx::query(
            "SELECT id, body FROM records
             WHERE collection = ?1
             ORDER BY json_extract(body, ?2) ASC, rowid ASC",
        )
        .bind(collection)
        .bind(json_path(order_by))
        .fetch_all(&self.pool)
        .await
        .with_context(|| format!("failed to list records of {collection}"))?;

        rows.into_iter().map(record_from_row).collect()
    }

    async fn query_where(
        &self,
        collection: &str,
        field: &str,
        value: &Value,
    ) -> Result<Vec<StoredRecord>> {
        check_identifier("collection", collection)?;
        check_identifier("field", field)?;

        let query = sqlx::query(
            "SELECT id, body FROM records
             WHERE collection = ?1 AND json_extract(body, ?2) = ?3
             ORDER BY rowid ASC",
        )
        .bind(collection)
        .bind(json_path(field));

        // json_extract yields SQL text/integer/real, booleans come back as 0/1.
        let query = match value {
            Value::String(text) => query.bind(text.clone()),
            Value::Bool(flag) => query.bind(i64::from(*flag)),
            Value::Number(number) => {
                if let Some(int) = number.as_i64() {
                    query.bind(int)
                } else if let Some(float) = number.as_f64() {
                    query.bind(float)
                } else {
                    return Err(StoreError::UnsupportedFilterValue("numeric").into());
                }
            }
            Value::Null => return Err(StoreError::UnsupportedFilterValue("null").into()),
            Value::Array(_) => return Err(StoreError::UnsupportedFilterValue("array").into()),
            Value::Object(_) => return Err(StoreError::UnsupportedFilterValue("object").into()),
        };

        let rows = query
            .fetch_all(&self.pool)
            .await
            .with_context(|| format!("failed to query {collection} by {field}"))?;

        rows.into_iter().map(record_from_row).collect()
    }

    async fn get_by_id(&self, collection: &str, id: &str) -> Result<Option<StoredRecord>> {
        check_identifier("collection", collection)?;

        let row = sqlx::query("SELECT id, body FROM records WHERE collection = ? AND id = ?")
            .bind(collection)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .with_context(|| format!("failed to load record {id} from {collection}"))?;

        row.map(record_from_row).transpose()
    }

    async fn replace_field(
        &self,
        collection: &str,
        id: &str,
        field: &str,
        value: Value,
    ) -> Result<()> {
        check_identifier("collection", collection)?;
        check_identifier("field", field)?;

        let result = sqlx::query(
            "UPDATE records
             SET body = json_set(body, ?1, json(?2)), updated_at = CURRENT_TIMESTAMP
             WHERE collection = ?3 AND id = ?4",
        )
        .bind(json_path(field))
        .bind(value.to_string())
        .bind(collection)
        .bind(id)
        .execute(&self.pool)
        .await
        .with_context(|| format!("failed to update field {field} of record {id}"))?;

        if result.rows_affected() == 0 {
            return Err(StoreError::RecordNotFound {
                collection: collection.to_string(),
                id: id.to_string(),
            }
            .into());
        }
        debug!(collection, id, field, "replaced record field");
        Ok(())
    }

    async fn health_check(&self) -> Result<()> {
        let _: i64 = sqlx::query_scalar("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .context("sqlite ping failed")?;
        Ok(())
    }
}

fn check_identifier(kind: &'static str, name: &str) -> Result<(), StoreError> {
    if is_valid_identifier(name) {
        Ok(())
    } else {
        Err(StoreError::InvalidIdentifier {
            kind,
            name: name.to_string(),
        })
    }
}

fn json_path(field: &str) -> String {
    format!("$.{field}")
}

fn record_from_row(row: SqliteRow) -> Result<StoredRecord> {
    let id: String = row.try_get("id")?;
    let raw: String = row.try_get("body")?;
    let body = serde_json::from_str(&raw)
        .with_context(|| format!("record {id} holds a body that is not valid JSON"))?;
    Ok(StoredRecord { id, body })
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
