//! Events sent from the backend worker to the UI thread.

use client_core::Notification;
use shared::domain::Album;

/// Decoded RGBA pixels of a downloaded image, ready to become a texture.
#[derive(Clone)]
pub struct PreviewImage {
    pub width: usize,
    pub height: usize,
    pub rgba: Vec<u8>,
}

impl std::fmt::Debug for PreviewImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PreviewImage")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}

#[derive(Debug)]
pub enum UiEvent {
    Info(String),
    BackendStartupFailed(String),
    /// Snapshot of the workflow's album cache after a successful step.
    Albums(Vec<Album>),
    AlbumOpened {
        name: String,
    },
    AlbumNotFound {
        name: String,
    },
    ImagesWritten {
        album: String,
    },
    Busy(bool),
    Toast(Notification),
    ImageLoaded {
        url: String,
        image: PreviewImage,
    },
    ImageFailed {
        url: String,
        reason: String,
    },
}
