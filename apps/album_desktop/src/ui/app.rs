use std::collections::HashMap;

use client_core::{AlbumScreen, Screen};
use crossbeam_channel::{Receiver, Sender};
use eframe::egui;
use shared::domain::{Album, Image};

use crate::{
    backend_bridge::commands::BackendCommand,
    controller::{
        events::{PreviewImage, UiEvent},
        orchestration::dispatch_backend_command,
    },
    ui::toasts::Toasts,
};

pub(crate) enum RemoteImage {
    Loading,
    Ready {
        image: PreviewImage,
        texture: Option<egui::TextureHandle>,
    },
    Failed(String),
}

pub struct AlbumDesktopApp {
    pub(crate) cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    store_label: String,
    pub(crate) status: String,
    startup_error: Option<String>,
    pub(crate) albums: Vec<Album>,
    pub(crate) screen: AlbumScreen,
    pub(crate) images: HashMap<String, RemoteImage>,
    pub(crate) toasts: Toasts,
    albums_requested: bool,
}

impl AlbumDesktopApp {
    pub fn new(
        cmd_tx: Sender<BackendCommand>,
        ui_rx: Receiver<UiEvent>,
        store_label: String,
    ) -> Self {
        Self {
            cmd_tx,
            ui_rx,
            store_label,
            status: "Starting...".to_string(),
            startup_error: None,
            albums: Vec::new(),
            screen: AlbumScreen::default(),
            images: HashMap::new(),
            toasts: Toasts::default(),
            albums_requested: false,
        }
    }

    pub(crate) fn dispatch(&mut self, cmd: BackendCommand) {
        dispatch_backend_command(&self.cmd_tx, cmd, &mut self.status);
    }

    /// Images of the album shown in the detail view.
    pub(crate) fn current_images(&self) -> &[Image] {
        self.screen
            .current_album()
            .and_then(|name| self.albums.iter().find(|album| album.name == name))
            .map(|album| album.images.as_slice())
            .unwrap_or_default()
    }

    pub(crate) fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            self.apply_event(event);
        }
    }

    pub(crate) fn apply_event(&mut self, event: UiEvent) {
        match event {
            UiEvent::Info(message) => self.status = message,
            UiEvent::BackendStartupFailed(message) => {
                self.status = "Backend unavailable".to_string();
                self.startup_error = Some(message);
            }
            UiEvent::Albums(albums) => self.albums = albums,
            UiEvent::AlbumOpened { name } => {
                self.status = format!("Viewing {name}");
                self.screen.select(name);
            }
            UiEvent::AlbumNotFound { name } => {
                self.status = format!("Album '{name}' not found");
            }
            UiEvent::ImagesWritten { album } => {
                if !self.screen.accepts_result_for(&album) {
                    tracing::debug!(%album, "ignoring view update for an album no longer shown");
                    return;
                }
                let shown = self.screen.images.displayed(self.current_images()).count();
                if let Some(carousel) = self.screen.images.carousel {
                    if carousel.index() >= shown {
                        self.screen.images.close_carousel();
                    }
                }
                self.screen.images.unhover();
            }
            UiEvent::Busy(busy) => self.screen.busy = busy,
            UiEvent::Toast(notification) => self.toasts.push(notification),
            UiEvent::ImageLoaded { url, image } => {
                self.images.insert(
                    url,
                    RemoteImage::Ready {
                        image,
                        texture: None,
                    },
                );
            }
            UiEvent::ImageFailed { url, reason } => {
                self.images.insert(url, RemoteImage::Failed(reason));
            }
        }
    }

    /// Texture for `url`, asking the backend to download it the first time.
    pub(crate) fn texture_for(
        &mut self,
        ctx: &egui::Context,
        url: &str,
    ) -> Option<egui::TextureHandle> {
        if !self.images.contains_key(url) {
            self.images.insert(url.to_string(), RemoteImage::Loading);
            self.dispatch(BackendCommand::FetchImage {
                url: url.to_string(),
            });
            return None;
        }
        match self.images.get_mut(url) {
            Some(RemoteImage::Ready { image, texture }) => {
                let handle = texture.get_or_insert_with(|| {
                    let color_image = egui::ColorImage::from_rgba_unmultiplied(
                        [image.width, image.height],
                        &image.rgba,
                    );
                    ctx.load_texture(
                        format!("album-image:{url}"),
                        color_image,
                        egui::TextureOptions::LINEAR,
                    )
                });
                Some(handle.clone())
            }
            _ => None,
        }
    }

    fn show_header(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("album_header").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("Photo Albums");
                ui.separator();
                ui.weak(&self.store_label);
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(&self.status);
                });
            });
        });
    }

    fn show_album_grid(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            if ui.button(self.screen.grid.toggle_label()).clicked() {
                self.screen.grid.toggle_form();
            }
            if ui.button("Refresh").clicked() {
                self.dispatch(BackendCommand::ListAlbums);
            }
        });

        if self.screen.grid.form_visible {
            let mut submitted = false;
            ui.horizontal(|ui| {
                let response = ui.add(
                    egui::TextEdit::singleline(&mut self.screen.grid.name).hint_text("Album name"),
                );
                let enter = response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
                submitted = ui.button("Add").clicked() || enter;
            });
            if submitted {
                if let Some(name) = self.screen.grid.submit() {
                    self.dispatch(BackendCommand::CreateAlbum { name });
                }
            }
        }
        ui.add_space(8.0);

        if self.albums.is_empty() {
            ui.weak("No albums yet.");
            return;
        }

        let mut clicked: Option<String> = None;
        egui::ScrollArea::vertical().show(ui, |ui| {
            ui.horizontal_wrapped(|ui| {
                for album in &self.albums {
                    let card = egui::Frame::NONE
                        .fill(ui.visuals().faint_bg_color)
                        .stroke(ui.visuals().widgets.noninteractive.bg_stroke)
                        .corner_radius(8.0)
                        .inner_margin(egui::Margin::symmetric(10, 8))
                        .show(ui, |ui| {
                            ui.set_width(180.0);
                            ui.strong(&album.name);
                            ui.weak(format!("{} images", album.images.len()));
                        });
                    let response = ui.interact(
                        card.response.rect,
                        egui::Id::new(("album_card", album.id.as_str())),
                        egui::Sense::click(),
                    );
                    if response.clicked() {
                        clicked = Some(album.name.clone());
                    }
                }
            });
        });

        if let Some(name) = clicked {
            self.dispatch(BackendCommand::SelectAlbum { name });
        }
    }
}

impl eframe::App for AlbumDesktopApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();
        if !self.albums_requested {
            self.albums_requested = true;
            self.dispatch(BackendCommand::ListAlbums);
        }

        self.show_header(ctx);

        egui::CentralPanel::default().show(ctx, |ui| {
            if let Some(error) = &self.startup_error {
                ui.colored_label(ui.visuals().error_fg_color, error);
                return;
            }
            if self.screen.busy {
                ui.centered_and_justified(|ui| ui.spinner());
                return;
            }
            match self.screen.screen.clone() {
                Screen::Grid => self.show_album_grid(ui),
                Screen::AlbumDetail { name } => self.show_album_detail(ui, &name),
            }
        });

        self.show_carousel(ctx);
        self.toasts.show(ctx);
        ctx.request_repaint_after(std::time::Duration::from_millis(100));
    }
}

#[cfg(test)]
#[path = "tests/app_tests.rs"]
mod tests;
