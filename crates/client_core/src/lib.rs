//! Client-side album management: record store access, the album and image
//! workflows, and the view state the front ends render from.

pub mod carousel;
pub mod connection;
pub mod error;
pub mod filter;
pub mod remote;
pub mod repository;
pub mod view_state;
pub mod workflow;

pub use carousel::Carousel;
pub use connection::StoreTarget;
pub use error::{Operation, WorkflowError};
pub use filter::{filter_images, FilteredImages};
pub use remote::RemoteRecordStore;
pub use repository::{AlbumRepository, RepositoryError};
pub use view_state::{
    AlbumGridState, AlbumScreen, FormSubmission, ImageForm, ImageViewState, Screen, SearchState,
};
pub use workflow::{AlbumWorkflow, Notification, NotificationLevel, WorkflowEvent};

#[cfg(test)]
pub(crate) mod test_support;
