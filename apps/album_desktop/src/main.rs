mod backend_bridge;
mod controller;
mod startup;
mod ui;

use clap::Parser;
use crossbeam_channel::bounded;
use eframe::egui;
use tracing_subscriber::EnvFilter;

use crate::{
    backend_bridge::commands::BackendCommand,
    controller::events::UiEvent,
    startup::{Cli, StartupConfig},
    ui::AlbumDesktopApp,
};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_filter));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let startup = StartupConfig::from_cli(&cli)?;
    let store_label = startup.store_label();
    tracing::info!(store = %store_label, policy = %startup.policy, "starting album desktop");

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(256);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(2048);
    backend_bridge::runtime::launch(cmd_rx, ui_tx, startup.target, startup.policy);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Photo Albums")
            .with_inner_size([1100.0, 760.0])
            .with_min_inner_size([720.0, 480.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Photo Albums",
        options,
        Box::new(move |_cc| Ok(Box::new(AlbumDesktopApp::new(cmd_tx, ui_rx, store_label)))),
    )
    .map_err(|err| anyhow::anyhow!("ui failed: {err}"))
}
