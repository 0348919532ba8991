//! Album-shaped operations over a generic [`RecordStore`].

use std::sync::Arc;

use serde_json::Value;
use shared::{
    domain::{Album, AlbumId, Image, ImageId, ALBUMS_COLLECTION, ALBUM_IMAGES_FIELD, ALBUM_NAME_FIELD},
    record::{decode_album, images_value, new_album_body},
    DecodeError,
};
use storage::RecordStore;
use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("album {0} does not exist")]
    AlbumMissing(AlbumId),
    #[error("album {album_id} has no image with id {image_id}")]
    ImageMissing { album_id: AlbumId, image_id: ImageId },
    #[error(transparent)]
    Decode(#[from] DecodeError),
    #[error(transparent)]
    Store(#[from] anyhow::Error),
}

#[derive(Clone)]
pub struct AlbumRepository {
    store: Arc<dyn RecordStore>,
}

impl AlbumRepository {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    pub async fn create_album(&self, name: &str) -> Result<AlbumId, RepositoryError> {
        let id = self
            .store
            .insert(ALBUMS_COLLECTION, new_album_body(name))
            .await?;
        info!(album = name, %id, "album created");
        Ok(AlbumId(id))
    }

    /// All albums, ascending by name.
    pub async fn list_albums(&self) -> Result<Vec<Album>, RepositoryError> {
        let records = self
            .store
            .query_all(ALBUMS_COLLECTION, ALBUM_NAME_FIELD)
            .await?;
        let albums = records
            .iter()
            .map(decode_album)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(albums)
    }

    /// Id of the earliest stored album called `name`.
    pub async fn find_album_id_by_name(
        &self,
        name: &str,
    ) -> Result<Option<AlbumId>, RepositoryError> {
        let records = self
            .store
            .query_where(
                ALBUMS_COLLECTION,
                ALBUM_NAME_FIELD,
                &Value::String(name.to_string()),
            )
            .await?;
        match records.into_iter().next() {
            Some(record) => Ok(Some(AlbumId(record.id))),
            None => {
                info!(album = name, "no album with this name");
                Ok(None)
            }
        }
    }

    /// Stores `image` at the head of the album's image list and returns the
    /// list as written.
    pub async fn add_image(
        &self,
        album_id: &AlbumId,
        image: Image,
    ) -> Result<Vec<Image>, RepositoryError> {
        let album = self.load_album(album_id).await?;
        let mut images = Vec::with_capacity(album.images.len() + 1);
        images.push(image);
        images.extend(album.images);
        self.write_images(album_id, &images).await?;
        Ok(images)
    }

    pub async fn replace_image(
        &self,
        album_id: &AlbumId,
        image: Image,
    ) -> Result<Vec<Image>, RepositoryError> {
        let mut album = self.load_album(album_id).await?;
        let slot = album
            .images
            .iter_mut()
            .find(|existing| existing.id == image.id)
            .ok_or_else(|| RepositoryError::ImageMissing {
                album_id: album_id.clone(),
                image_id: image.id,
            })?;
        *slot = image;
        self.write_images(album_id, &album.images).await?;
        Ok(album.images)
    }

    /// Drops every image with `image_id`. An unknown id rewrites the list unchanged.
    pub async fn remove_image(
        &self,
        album_id: &AlbumId,
        image_id: ImageId,
    ) -> Result<Vec<Image>, RepositoryError> {
        let mut album = self.load_album(album_id).await?;
        album.images.retain(|image| image.id != image_id);
        self.write_images(album_id, &album.images).await?;
        Ok(album.images)
    }

    async fn load_album(&self, album_id: &AlbumId) -> Result<Album, RepositoryError> {
        let record = self
            .store
            .get_by_id(ALBUMS_COLLECTION, album_id.as_str())
            .await?
            .ok_or_else(|| RepositoryError::AlbumMissing(album_id.clone()))?;
        Ok(decode_album(&record)?)
    }

    async fn write_images(&self, album_id: &AlbumId, images: &[Image]) -> Result<(), RepositoryError> {
        self.store
            .replace_field(
                ALBUMS_COLLECTION,
                album_id.as_str(),
                ALBUM_IMAGES_FIELD,
                images_value(images),
            )
            .await?;
        debug!(album_id = %album_id, count = images.len(), "wrote album images");
        Ok(())
    }
}

#[cfg(test)]
#[path = "tests/repository_tests.rs"]
mod tests;
