//! [`RecordStore`] backed by a `record_server` reached over HTTP.

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde_json::Value;
use shared::{
    error::{ApiError, ApiException},
    protocol::{
        query_route, record_field_route, record_route, records_route, InsertRecordRequest,
        HEALTH_ROUTE,
        InsertRecordResponse, QueryWhereRequest, ReplaceFieldRequest, StoredRecord,
    },
};
use storage::RecordStore;
use url::Url;

#[derive(Clone)]
pub struct RemoteRecordStore {
    http: Client,
    base: Url,
}

impl RemoteRecordStore {
    pub fn new(server_url: &str) -> Result<Self> {
        let base = Url::parse(server_url.trim())
            .with_context(|| format!("invalid server url '{server_url}'"))?;
        if base.cannot_be_a_base() {
            return Err(anyhow!("server url '{server_url}' cannot carry a path"));
        }
        Ok(Self {
            http: Client::new(),
            base,
        })
    }

    pub fn server_url(&self) -> &str {
        self.base.as_str()
    }

    /// Appends `segments` to the server url's own path, percent-encoding each.
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|()| anyhow!("server url '{}' cannot carry a path", self.base))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

/// Turns a non-success response into an [`ApiException`] when the server sent
/// an [`ApiError`] body, otherwise into the plain HTTP status error.
async fn check_status(response: Response) -> Result<Response> {
    if response.status().is_success() {
        return Ok(response);
    }
    let status_error = response.error_for_status_ref().err();
    match response.json::<ApiError>().await {
        Ok(api_error) => Err(ApiException::from(api_error).into()),
        Err(_) => match status_error {
            Some(err) => Err(err.into()),
            None => Err(anyhow::anyhow!("unexpected response from record server")),
        },
    }
}

#[async_trait]
impl RecordStore for RemoteRecordStore {
    async fn insert(&self, collection: &str, body: Value) -> Result<String> {
        let response = self
            .http
            .post(self.endpoint(&records_route(collection))?)
            .json(&InsertRecordRequest { body })
            .send()
            .await?;
        let inserted: InsertRecordResponse = check_status(response).await?.json().await?;
        Ok(inserted.id)
    }

    async fn query_all(&self, collection: &str, order_by: &str) -> Result<Vec<StoredRecord>> {
        let response = self
            .http
            .get(self.endpoint(&records_route(collection))?)
            .query(&[("order_by", order_by)])
            .send()
            .await?;
        Ok(check_status(response).await?.json().await?)
    }

    async fn query_where(
        &self,
        collection: &str,
        field: &str,
        value: &Value,
    ) -> Result<Vec<StoredRecord>> {
        let response = self
            .http
            .post(self.endpoint(&query_route(collection))?)
            .json(&QueryWhereRequest {
                field: field.to_string(),
                value: value.clone(),
            })
            .send()
            .await?;
        Ok(check_status(response).await?.json().await?)
    }

    async fn get_by_id(&self, collection: &str, id: &str) -> Result<Option<StoredRecord>> {
        let response = self
            .http
            .get(self.endpoint(&record_route(collection, id))?)
            .send()
            .await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        Ok(Some(check_status(response).await?.json().await?))
    }

    async fn replace_field(
        &self,
        collection: &str,
        id: &str,
        field: &str,
        value: Value,
    ) -> Result<()> {
        let response = self
            .http
            .put(self.endpoint(&record_field_route(collection, id, field))?)
            .json(&ReplaceFieldRequest { value })
            .send()
            .await?;
        check_status(response).await?;
        Ok(())
    }

    async fn health_check(&self) -> Result<()> {
        self.http
            .get(self.endpoint(&HEALTH_ROUTE)?)
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "tests/remote_tests.rs"]
mod tests;
