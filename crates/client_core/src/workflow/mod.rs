//! Album list workflow: the cached album list, the current selection and the
//! notifications raised while talking to the record store.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use shared::domain::{Album, AlbumId, Image, ImageIdPolicy};
use storage::RecordStore;
use tokio::sync::broadcast;
use tracing::{error, info, warn};

use crate::{
    error::{Operation, WorkflowError},
    repository::{AlbumRepository, RepositoryError},
};

mod images;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NotificationLevel {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Error,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkflowEvent {
    Notification(Notification),
    AlbumNotFound { name: String },
    BusyChanged(bool),
}

pub struct AlbumWorkflow {
    repo: AlbumRepository,
    albums: Vec<Album>,
    current_album: Option<String>,
    busy: bool,
    policy: ImageIdPolicy,
    events: broadcast::Sender<WorkflowEvent>,
}

impl AlbumWorkflow {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self::with_policy(store, ImageIdPolicy::default())
    }

    pub fn with_policy(store: Arc<dyn RecordStore>, policy: ImageIdPolicy) -> Self {
        let (events, _) = broadcast::channel(256);
        Self {
            repo: AlbumRepository::new(store),
            albums: Vec::new(),
            current_album: None,
            busy: false,
            policy,
            events,
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<WorkflowEvent> {
        self.events.subscribe()
    }

    pub fn albums(&self) -> &[Album] {
        &self.albums
    }

    pub fn current_album(&self) -> Option<&str> {
        self.current_album.as_deref()
    }

    /// Images of the selected album, empty when nothing is selected or the
    /// selection is not cached.
    pub fn current_images(&self) -> &[Image] {
        self.current_album
            .as_deref()
            .and_then(|name| self.albums.iter().find(|album| album.name == name))
            .map(|album| album.images.as_slice())
            .unwrap_or_default()
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn image_id_policy(&self) -> ImageIdPolicy {
        self.policy
    }

    /// Reloads every album, ordered by name.
    pub async fn list_albums(&mut self) -> Result<&[Album], WorkflowError> {
        self.set_busy(true);
        let result = self.repo.list_albums().await;
        self.set_busy(false);

        match result {
            Ok(albums) => {
                info!(count = albums.len(), "albums loaded");
                self.albums = albums;
                Ok(&self.albums)
            }
            Err(err) => Err(self.fail(fetch_error(Operation::ListAlbums, err))),
        }
    }

    pub async fn create_album(&mut self, name: &str) -> Result<Album, WorkflowError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(self.fail(WorkflowError::Validation(
                "Album name cannot be empty.".to_string(),
            )));
        }
        if self.albums.iter().any(|album| album.name == name) {
            warn!(album = name, "an album with this name already exists");
        }

        self.set_busy(true);
        let result = self.repo.create_album(name).await;
        self.set_busy(false);

        match result {
            Ok(id) => {
                let album = Album::empty(id, name);
                self.albums.insert(0, album.clone());
                self.succeed(Operation::CreateAlbum);
                Ok(album)
            }
            Err(err) => Err(self.fail(write_error(Operation::CreateAlbum, err))),
        }
    }

    /// Makes `name` the current album when the store knows it. An unknown name
    /// leaves the selection alone and returns `Ok(None)`.
    pub async fn select_album(&mut self, name: &str) -> Result<Option<AlbumId>, WorkflowError> {
        match self.repo.find_album_id_by_name(name).await {
            Ok(Some(id)) => {
                self.current_album = Some(name.to_string());
                Ok(Some(id))
            }
            Ok(None) => {
                self.notify(Notification::error("Album not found."));
                self.emit(WorkflowEvent::AlbumNotFound {
                    name: name.to_string(),
                });
                Ok(None)
            }
            Err(err) => Err(self.fail(fetch_error(Operation::SelectAlbum, err))),
        }
    }

    pub fn deselect_album(&mut self) {
        self.current_album = None;
    }

    async fn resolve_album_id(
        &self,
        op: Operation,
        name: &str,
    ) -> Result<AlbumId, WorkflowError> {
        self.repo
            .find_album_id_by_name(name)
            .await
            .map_err(|err| fetch_error(op, err))?
            .ok_or_else(|| WorkflowError::NotFound {
                op,
                name: name.to_string(),
            })
    }

    /// Puts `images` into the cached album with `album_id`.
    fn merge_images(&mut self, album_id: &AlbumId, images: Vec<Image>) {
        match self.albums.iter_mut().find(|album| &album.id == album_id) {
            Some(album) => album.images = images,
            None => warn!(%album_id, "written album is not cached"),
        }
    }

    fn set_busy(&mut self, busy: bool) {
        if self.busy != busy {
            self.busy = busy;
            self.emit(WorkflowEvent::BusyChanged(busy));
        }
    }

    fn succeed(&self, op: Operation) {
        if let Some(message) = op.success_message() {
            self.notify(Notification::success(message));
        }
    }

    fn fail(&self, err: WorkflowError) -> WorkflowError {
        match &err {
            WorkflowError::Validation(message) => warn!(%message, "rejected input"),
            other => error!(error = %format_chain(other), "album workflow step failed"),
        }
        self.notify(Notification::error(err.toast_message()));
        err
    }

    fn notify(&self, notification: Notification) {
        self.emit(WorkflowEvent::Notification(notification));
    }

    fn emit(&self, event: WorkflowEvent) {
        // No subscribers is fine.
        let _ = self.events.send(event);
    }
}

fn format_chain(err: &(dyn std::error::Error + 'static)) -> String {
    let mut text = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        text.push_str(": ");
        text.push_str(&cause.to_string());
        source = cause.source();
    }
    text
}

fn fetch_error(op: Operation, err: RepositoryError) -> WorkflowError {
    classify(op, err, |op, source| WorkflowError::Fetch { op, source })
}

fn write_error(op: Operation, err: RepositoryError) -> WorkflowError {
    classify(op, err, |op, source| WorkflowError::Write { op, source })
}

fn classify(
    op: Operation,
    err: RepositoryError,
    store_failure: impl FnOnce(Operation, anyhow::Error) -> WorkflowError,
) -> WorkflowError {
    match err {
        RepositoryError::AlbumMissing(id) => WorkflowError::NotFound {
            op,
            name: id.to_string(),
        },
        RepositoryError::ImageMissing { album_id, image_id } => WorkflowError::ImageNotFound {
            op,
            album: album_id.to_string(),
            image_id,
        },
        RepositoryError::Decode(source) => WorkflowError::Deserialization { op, source },
        RepositoryError::Store(source) => store_failure(op, source),
    }
}

#[cfg(test)]
#[path = "tests/mod_tests.rs"]
mod tests;
