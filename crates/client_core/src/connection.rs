use std::sync::Arc;

use anyhow::Result;
use storage::{prepare_database_url, RecordStore, Storage};
use tracing::info;

use crate::remote::RemoteRecordStore;

/// Where a client keeps its albums.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreTarget {
    Local { database_url: String },
    Remote { server_url: String },
}

impl StoreTarget {
    pub async fn open(&self) -> Result<Arc<dyn RecordStore>> {
        match self {
            Self::Local { database_url } => {
                let database_url = prepare_database_url(database_url)?;
                info!(%database_url, "opening local album store");
                Ok(Arc::new(Storage::new(&database_url).await?))
            }
            Self::Remote { server_url } => {
                let store = RemoteRecordStore::new(server_url)?;
                info!(server_url = store.server_url(), "using remote album store");
                Ok(Arc::new(store))
            }
        }
    }
}
