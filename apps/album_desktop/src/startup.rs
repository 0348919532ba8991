use std::path::PathBuf;

use anyhow::{anyhow, Result};
use clap::Parser;
use client_core::StoreTarget;
use shared::domain::ImageIdPolicy;

#[derive(Debug, Parser)]
#[command(name = "album_desktop", about = "Browse and edit photo albums")]
pub struct Cli {
    /// Use a running record_server instead of a local database.
    #[arg(long, conflicts_with = "database_url")]
    pub server_url: Option<String>,
    #[arg(long)]
    pub database_url: Option<String>,
    #[arg(long, default_value = "count")]
    pub image_id_policy: ImageIdPolicy,
    /// Used when RUST_LOG is unset.
    #[arg(long, default_value = "info")]
    pub log_filter: String,
}

#[derive(Debug, Clone)]
pub struct StartupConfig {
    pub target: StoreTarget,
    pub policy: ImageIdPolicy,
}

impl StartupConfig {
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let target = match (&cli.server_url, &cli.database_url) {
            (Some(server_url), _) => StoreTarget::Remote {
                server_url: server_url.clone(),
            },
            (None, Some(database_url)) => StoreTarget::Local {
                database_url: database_url.clone(),
            },
            (None, None) => StoreTarget::Local {
                database_url: default_database_path()?.to_string_lossy().into_owned(),
            },
        };
        Ok(Self {
            target,
            policy: cli.image_id_policy,
        })
    }

    /// Short description of where albums live, for the window header.
    pub fn store_label(&self) -> String {
        match &self.target {
            StoreTarget::Local { database_url } => format!("Local: {database_url}"),
            StoreTarget::Remote { server_url } => format!("Server: {server_url}"),
        }
    }
}

pub fn default_database_path() -> Result<PathBuf> {
    let base = dirs::data_local_dir()
        .or_else(dirs::home_dir)
        .ok_or_else(|| anyhow!("unable to resolve local app data dir"))?;
    Ok(base.join("album_manager").join("albums.db"))
}
