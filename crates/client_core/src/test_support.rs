use std::sync::{
    atomic::{AtomicBool, AtomicUsize, Ordering},
    Arc,
};

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use serde_json::Value;
use shared::{
    domain::{AlbumId, Image, ImageId, ALBUMS_COLLECTION, ALBUM_IMAGES_FIELD},
    protocol::StoredRecord,
    record::{images_value, new_album_body},
};
use storage::{RecordStore, Storage};

/// In-memory store that counts calls and can be told to fail reads or writes.
pub(crate) struct ScriptedStore {
    inner: Storage,
    calls: AtomicUsize,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
}

impl ScriptedStore {
    pub(crate) async fn new() -> Arc<Self> {
        Arc::new(Self {
            inner: Storage::new("sqlite::memory:").await.expect("db"),
            calls: AtomicUsize::new(0),
            fail_reads: AtomicBool::new(false),
            fail_writes: AtomicBool::new(false),
        })
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub(crate) fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    pub(crate) fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Stores an album directly, bypassing the call counter.
    pub(crate) async fn seed_album(&self, name: &str, images: &[(u64, &str)]) -> AlbumId {
        let id = self
            .inner
            .insert(ALBUMS_COLLECTION, new_album_body(name))
            .await
            .expect("seed album");
        let images: Vec<Image> = images
            .iter()
            .map(|(id, title)| Image {
                id: ImageId(*id),
                title: title.to_string(),
                url: format!("https://example.com/{id}.jpg"),
            })
            .collect();
        self.inner
            .replace_field(ALBUMS_COLLECTION, &id, ALBUM_IMAGES_FIELD, images_value(&images))
            .await
            .expect("seed images");
        AlbumId(id)
    }

    pub(crate) async fn seed_raw(&self, body: Value) -> String {
        self.inner
            .insert(ALBUMS_COLLECTION, body)
            .await
            .expect("seed raw record")
    }

    pub(crate) async fn stored_images(&self, id: &AlbumId) -> Value {
        self.inner
            .get_by_id(ALBUMS_COLLECTION, id.as_str())
            .await
            .expect("load")
            .expect("album exists")
            .body[ALBUM_IMAGES_FIELD]
            .clone()
    }

    fn read(&self) -> Result<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(anyhow!("scripted read failure"));
        }
        Ok(())
    }

    fn write(&self) -> Result<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(anyhow!("scripted write failure"));
        }
        Ok(())
    }
}

#[async_trait]
impl RecordStore for ScriptedStore {
    async fn insert(&self, collection: &str, body: Value) -> Result<String> {
        self.write()?;
        self.inner.insert(collection, body).await
    }

    async fn query_all(&self, collection: &str, order_by: &str) -> Result<Vec<StoredRecord>> {
        self.read()?;
        self.inner.query_all(collection, order_by).await
    }

    async fn query_where(
        &self,
        collection: &str,
        field: &str,
        value: &Value,
    ) -> Result<Vec<StoredRecord>> {
        self.read()?;
        self.inner.query_where(collection, field, value).await
    }

    async fn get_by_id(&self, collection: &str, id: &str) -> Result<Option<StoredRecord>> {
        self.read()?;
        self.inner.get_by_id(collection, id).await
    }

    async fn replace_field(
        &self,
        collection: &str,
        id: &str,
        field: &str,
        value: Value,
    ) -> Result<()> {
        self.write()?;
        self.inner.replace_field(collection, id, field, value).await
    }

    async fn health_check(&self) -> Result<()> {
        self.read()?;
        self.inner.health_check().await
    }
}
