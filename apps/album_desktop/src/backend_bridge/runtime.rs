//! Runtime bridge between UI command queue and backend event intake.

use std::thread;

use client_core::{AlbumWorkflow, StoreTarget, WorkflowEvent};
use crossbeam_channel::{Receiver, Sender, TrySendError};
use shared::domain::ImageIdPolicy;
use tokio::sync::broadcast::{self, error::RecvError};
use tracing::{debug, error, info, warn};

use crate::{
    backend_bridge::commands::BackendCommand,
    controller::events::{PreviewImage, UiEvent},
};

const MAX_PREVIEW_EDGE: u32 = 1024;

pub fn launch(
    cmd_rx: Receiver<BackendCommand>,
    ui_tx: Sender<UiEvent>,
    target: StoreTarget,
    policy: ImageIdPolicy,
) {
    thread::spawn(move || {
        let _ = ui_tx.try_send(UiEvent::Info("Backend worker starting...".to_string()));
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                let _ = ui_tx.try_send(UiEvent::BackendStartupFailed(format!(
                    "failed to build backend runtime: {err}"
                )));
                error!("failed to build backend runtime: {err}");
                return;
            }
        };

        runtime.block_on(run_backend(cmd_rx, ui_tx, target, policy));
    });
}

async fn run_backend(
    cmd_rx: Receiver<BackendCommand>,
    ui_tx: Sender<UiEvent>,
    target: StoreTarget,
    policy: ImageIdPolicy,
) {
    let store = match target.open().await {
        Ok(store) => store,
        Err(err) => {
            let message = format!("could not open album store: {err:#}");
            error!("{message}");
            let _ = ui_tx.try_send(UiEvent::BackendStartupFailed(message));
            return;
        }
    };

    let mut workflow = AlbumWorkflow::with_policy(store, policy);
    tokio::spawn(forward_workflow_events(workflow.subscribe(), ui_tx.clone()));
    let http = reqwest::Client::new();
    let _ = ui_tx.try_send(UiEvent::Info("Backend worker ready".to_string()));
    info!(?policy, "album backend ready");

    while let Ok(cmd) = cmd_rx.recv() {
        debug!(command = cmd.name(), "backend command");
        handle_command(&mut workflow, &http, &ui_tx, cmd).await;
    }
    info!("ui command channel closed; backend worker stopping");
}

async fn handle_command(
    workflow: &mut AlbumWorkflow,
    http: &reqwest::Client,
    ui_tx: &Sender<UiEvent>,
    cmd: BackendCommand,
) {
    // Failures are logged and surfaced as notifications by the workflow itself.
    match cmd {
        BackendCommand::ListAlbums => {
            if workflow.list_albums().await.is_ok() {
                send_albums(workflow, ui_tx);
            }
        }
        BackendCommand::CreateAlbum { name } => {
            if workflow.create_album(&name).await.is_ok() {
                send_albums(workflow, ui_tx);
            }
        }
        BackendCommand::SelectAlbum { name } => {
            if !workflow.albums().iter().any(|album| album.name == name) {
                let _ = workflow.list_albums().await;
            }
            if let Ok(Some(_)) = workflow.select_album(&name).await {
                send_albums(workflow, ui_tx);
                let _ = ui_tx.try_send(UiEvent::AlbumOpened { name });
            }
        }
        BackendCommand::DeselectAlbum => workflow.deselect_album(),
        BackendCommand::AddImage { album, draft } => {
            if workflow.add_image(&album, draft).await.is_ok() {
                images_written(workflow, ui_tx, album);
            }
        }
        BackendCommand::UpdateImage { album, image } => {
            if workflow.update_image(&album, image).await.is_ok() {
                images_written(workflow, ui_tx, album);
            }
        }
        BackendCommand::DeleteImage { album, image_id } => {
            if workflow.delete_image(&album, image_id).await.is_ok() {
                images_written(workflow, ui_tx, album);
            }
        }
        BackendCommand::FetchImage { url } => {
            tokio::spawn(fetch_preview(http.clone(), url, ui_tx.clone()));
        }
    }
}

fn send_albums(workflow: &AlbumWorkflow, ui_tx: &Sender<UiEvent>) {
    if ui_tx
        .try_send(UiEvent::Albums(workflow.albums().to_vec()))
        .is_err()
    {
        warn!("ui event queue rejected album snapshot");
    }
}

fn images_written(workflow: &AlbumWorkflow, ui_tx: &Sender<UiEvent>, album: String) {
    send_albums(workflow, ui_tx);
    let _ = ui_tx.try_send(UiEvent::ImagesWritten { album });
}

async fn forward_workflow_events(
    mut events: broadcast::Receiver<WorkflowEvent>,
    ui_tx: Sender<UiEvent>,
) {
    loop {
        let event = match events.recv().await {
            Ok(event) => event,
            Err(RecvError::Lagged(skipped)) => {
                warn!(skipped, "dropped workflow events");
                continue;
            }
            Err(RecvError::Closed) => return,
        };
        let ui_event = match event {
            WorkflowEvent::Notification(notification) => UiEvent::Toast(notification),
            WorkflowEvent::AlbumNotFound { name } => UiEvent::AlbumNotFound { name },
            WorkflowEvent::BusyChanged(busy) => UiEvent::Busy(busy),
        };
        match ui_tx.try_send(ui_event) {
            Ok(()) => {}
            Err(TrySendError::Full(_)) => warn!("ui event queue full; dropped workflow event"),
            Err(TrySendError::Disconnected(_)) => return,
        }
    }
}

async fn fetch_preview(http: reqwest::Client, url: String, ui_tx: Sender<UiEvent>) {
    let event = match download_preview(&http, &url).await {
        Ok(image) => UiEvent::ImageLoaded { url, image },
        Err(reason) => {
            warn!(%url, %reason, "image preview failed");
            UiEvent::ImageFailed { url, reason }
        }
    };
    let _ = ui_tx.try_send(event);
}

async fn download_preview(http: &reqwest::Client, url: &str) -> Result<PreviewImage, String> {
    let bytes = http
        .get(url)
        .send()
        .await
        .and_then(|response| response.error_for_status())
        .map_err(|err| err.to_string())?
        .bytes()
        .await
        .map_err(|err| err.to_string())?;
    decode_preview_image(&bytes)
}

pub(crate) fn decode_preview_image(bytes: &[u8]) -> Result<PreviewImage, String> {
    let dynamic = image::load_from_memory(bytes).map_err(|err| err.to_string())?;
    // `thumbnail` also enlarges, so only call it for oversized images.
    let resized = if dynamic.width() > MAX_PREVIEW_EDGE || dynamic.height() > MAX_PREVIEW_EDGE {
        dynamic.thumbnail(MAX_PREVIEW_EDGE, MAX_PREVIEW_EDGE).to_rgba8()
    } else {
        dynamic.to_rgba8()
    };
    Ok(PreviewImage {
        width: resized.width() as usize,
        height: resized.height() as usize,
        rgba: resized.into_raw(),
    })
}
