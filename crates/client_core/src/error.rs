use shared::{domain::ImageId, DecodeError};
use thiserror::Error;

/// Which workflow step a notification or error belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    ListAlbums,
    CreateAlbum,
    SelectAlbum,
    AddImage,
    UpdateImage,
    DeleteImage,
}

impl Operation {
    pub fn success_message(self) -> Option<&'static str> {
        match self {
            Self::CreateAlbum => Some("Album added successfully."),
            Self::AddImage => Some("Image added successfully."),
            Self::UpdateImage => Some("Image updated successfully."),
            Self::DeleteImage => Some("Image deleted successfully."),
            Self::ListAlbums | Self::SelectAlbum => None,
        }
    }

    pub fn failure_message(self) -> &'static str {
        match self {
            Self::ListAlbums => "Failed to fetch albums.",
            Self::CreateAlbum => "Failed to add album.",
            Self::SelectAlbum => "Failed to fetch album details.",
            Self::AddImage => "Failed to add image.",
            Self::UpdateImage => "Failed to update image.",
            Self::DeleteImage => "Failed to delete image.",
        }
    }
}

#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error("{op:?}: reading from the record store failed")]
    Fetch {
        op: Operation,
        #[source]
        source: anyhow::Error,
    },
    #[error("{op:?}: writing to the record store failed")]
    Write {
        op: Operation,
        #[source]
        source: anyhow::Error,
    },
    #[error("album '{name}' not found")]
    NotFound { op: Operation, name: String },
    #[error("album '{album}' has no image with id {image_id}")]
    ImageNotFound {
        op: Operation,
        album: String,
        image_id: ImageId,
    },
    #[error("{0}")]
    Validation(String),
    #[error("{op:?}: malformed album record")]
    Deserialization {
        op: Operation,
        #[source]
        source: DecodeError,
    },
}

impl WorkflowError {
    /// Text shown to the user for this failure.
    pub fn toast_message(&self) -> String {
        match self {
            Self::Fetch { op, .. }
            | Self::Write { op, .. }
            | Self::ImageNotFound { op, .. }
            | Self::Deserialization { op, .. } => op.failure_message().to_string(),
            Self::NotFound { .. } => "Album not found.".to_string(),
            Self::Validation(message) => message.clone(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
