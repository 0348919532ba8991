//! Backend commands queued from UI to backend worker.

use shared::domain::{Image, ImageDraft, ImageId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendCommand {
    ListAlbums,
    CreateAlbum {
        name: String,
    },
    SelectAlbum {
        name: String,
    },
    DeselectAlbum,
    AddImage {
        album: String,
        draft: ImageDraft,
    },
    UpdateImage {
        album: String,
        image: Image,
    },
    DeleteImage {
        album: String,
        image_id: ImageId,
    },
    FetchImage {
        url: String,
    },
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            Self::ListAlbums => "list_albums",
            Self::CreateAlbum { .. } => "create_album",
            Self::SelectAlbum { .. } => "select_album",
            Self::DeselectAlbum => "deselect_album",
            Self::AddImage { .. } => "add_image",
            Self::UpdateImage { .. } => "update_image",
            Self::DeleteImage { .. } => "delete_image",
            Self::FetchImage { .. } => "fetch_image",
        }
    }
}
