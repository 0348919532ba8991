use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use client_core::{filter_images, AlbumWorkflow, StoreTarget};
use shared::domain::{Image, ImageDraft, ImageId, ImageIdPolicy};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "album-tools", about = "Administer photo albums from the command line")]
struct Cli {
    #[arg(long, default_value = storage::DEFAULT_DATABASE_URL, conflicts_with = "server_url")]
    database_url: String,
    /// Talk to a running record_server instead of opening the database.
    #[arg(long)]
    server_url: Option<String>,
    #[arg(long, default_value = "count")]
    image_id_policy: ImageIdPolicy,
    #[arg(long, default_value = "warn")]
    log_filter: String,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Albums ordered by name.
    List,
    CreateAlbum {
        name: String,
    },
    /// Images of one album, optionally filtered by title.
    Show {
        album: String,
        #[arg(long)]
        search: Option<String>,
    },
    AddImage {
        album: String,
        title: String,
        url: String,
    },
    UpdateImage {
        album: String,
        id: u64,
        title: String,
        url: String,
    },
    DeleteImage {
        album: String,
        id: u64,
    },
}

impl Cli {
    fn store_target(&self) -> StoreTarget {
        match &self.server_url {
            Some(server_url) => StoreTarget::Remote {
                server_url: server_url.clone(),
            },
            None => StoreTarget::Local {
                database_url: self.database_url.clone(),
            },
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let target = cli.store_target();
    tracing::debug!(?target, "opening album store");
    let store = target.open().await?;
    let mut workflow = AlbumWorkflow::with_policy(store, cli.image_id_policy);
    for line in run(&mut workflow, cli.command).await? {
        println!("{line}");
    }
    Ok(())
}

async fn run(workflow: &mut AlbumWorkflow, command: Command) -> Result<Vec<String>> {
    let lines = match command {
        Command::List => workflow
            .list_albums()
            .await?
            .iter()
            .map(|album| format!("{}\t{} images\t{}", album.name, album.images.len(), album.id))
            .collect(),
        Command::CreateAlbum { name } => {
            let album = workflow.create_album(&name).await?;
            vec![format!("created album '{}' id={}", album.name, album.id)]
        }
        Command::Show { album, search } => {
            if workflow.select_album(&album).await?.is_none() {
                bail!("album '{album}' not found");
            }
            workflow.list_albums().await?;
            filter_images(workflow.current_images(), search.as_deref().unwrap_or_default())
                .map(format_image)
                .collect()
        }
        Command::AddImage { album, title, url } => {
            let image = workflow
                .add_image(&album, ImageDraft::new(title, url))
                .await?;
            vec![format!("added {}", format_image(&image))]
        }
        Command::UpdateImage {
            album,
            id,
            title,
            url,
        } => {
            workflow
                .update_image(
                    &album,
                    Image {
                        id: ImageId(id),
                        title,
                        url,
                    },
                )
                .await?;
            vec![format!("updated image {id} in '{album}'")]
        }
        Command::DeleteImage { album, id } => {
            workflow.delete_image(&album, ImageId(id)).await?;
            vec![format!("deleted image {id} from '{album}'")]
        }
    };
    Ok(lines)
}

fn format_image(image: &Image) -> String {
    format!("{}\t{}\t{}", image.id, image.title, image.url)
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn workflow() -> AlbumWorkflow {
        let store = StoreTarget::Local {
            database_url: "sqlite::memory:".into(),
        }
        .open()
        .await
        .expect("store");
        AlbumWorkflow::new(store)
    }

    fn parse(args: &[&str]) -> Command {
        let mut argv = vec!["album-tools"];
        argv.extend_from_slice(args);
        Cli::parse_from(argv).command
    }

    #[tokio::test]
    async fn album_and_image_lifecycle() {
        let mut workflow = workflow().await;
        run(&mut workflow, parse(&["create-album", "Trip"]))
            .await
            .expect("create");
        run(
            &mut workflow,
            parse(&["add-image", "Trip", "Beach", "https://example.com/b.jpg"]),
        )
        .await
        .expect("add");
        run(
            &mut workflow,
            parse(&["add-image", "Trip", "Hike", "https://example.com/h.jpg"]),
        )
        .await
        .expect("add");

        let shown = run(&mut workflow, parse(&["show", "Trip"]))
            .await
            .expect("show");
        assert_eq!(
            shown,
            vec![
                "1\tHike\thttps://example.com/h.jpg".to_string(),
                "0\tBeach\thttps://example.com/b.jpg".to_string(),
            ]
        );

        run(
            &mut workflow,
            parse(&["update-image", "Trip", "0", "Sunny beach", "https://example.com/s.jpg"]),
        )
        .await
        .expect("update");
        run(&mut workflow, parse(&["delete-image", "Trip", "1"]))
            .await
            .expect("delete");

        let shown = run(&mut workflow, parse(&["show", "Trip", "--search", "SUNNY"]))
            .await
            .expect("show");
        assert_eq!(shown, vec!["0\tSunny beach\thttps://example.com/s.jpg".to_string()]);

        let listed = run(&mut workflow, parse(&["list"])).await.expect("list");
        assert_eq!(listed.len(), 1);
        assert!(listed[0].starts_with("Trip\t1 images\t"));
    }

    #[tokio::test]
    async fn showing_an_unknown_album_fails() {
        let mut workflow = workflow().await;
        let err = run(&mut workflow, parse(&["show", "Nope"]))
            .await
            .expect_err("must fail");
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn server_url_overrides_database() {
        let cli = Cli::parse_from(["album-tools", "--server-url", "http://127.0.0.1:8480", "list"]);
        assert_eq!(
            cli.store_target(),
            StoreTarget::Remote {
                server_url: "http://127.0.0.1:8480".into()
            }
        );
    }
}
