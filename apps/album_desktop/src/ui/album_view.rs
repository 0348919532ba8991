//! Album detail: search bar, image form, image grid and the carousel window.

use client_core::{FormSubmission, ImageForm};
use eframe::egui;
use shared::domain::Image;

use crate::{
    backend_bridge::commands::BackendCommand,
    ui::app::{AlbumDesktopApp, RemoteImage},
};

const THUMBNAIL_SIZE: f32 = 160.0;

enum CardAction {
    Open(usize),
    Edit(Image),
    Delete(Image),
}

impl AlbumDesktopApp {
    pub(crate) fn show_album_detail(&mut self, ui: &mut egui::Ui, album: &str) {
        ui.horizontal(|ui| {
            if ui.button("< Albums").clicked() {
                self.screen.back();
                self.dispatch(BackendCommand::DeselectAlbum);
            }
            ui.heading(album);
        });
        if self.screen.current_album() != Some(album) {
            return;
        }

        ui.horizontal(|ui| {
            self.show_search(ui);
            if ui.button(self.screen.images.toggle_label()).clicked() {
                self.screen.images.toggle_form();
            }
        });

        if self.screen.images.form.is_visible() {
            self.show_image_form(ui, album);
        }
        ui.add_space(8.0);

        self.show_image_grid(ui, album);
    }

    fn show_search(&mut self, ui: &mut egui::Ui) {
        if !self.screen.images.search.active {
            if ui.button("Search").clicked() {
                self.screen.images.activate_search();
            }
            return;
        }

        let mut query = self.screen.images.search.query.clone();
        let response = ui.add(
            egui::TextEdit::singleline(&mut query)
                .hint_text("Search by title")
                .desired_width(220.0),
        );
        if response.changed() {
            self.screen.images.set_query(query);
        }
        if ui.button("Clear").clicked() {
            self.screen.images.clear_search();
        }
    }

    fn show_image_form(&mut self, ui: &mut egui::Ui, album: &str) {
        let submit_label = if self.screen.images.form.is_editing() {
            "Update"
        } else {
            "Add"
        };

        let mut submitted = false;
        egui::Frame::NONE
            .fill(ui.visuals().faint_bg_color)
            .corner_radius(8.0)
            .inner_margin(egui::Margin::symmetric(10, 8))
            .show(ui, |ui| {
                let Some(fields) = self.screen.images.fields_mut() else {
                    return;
                };
                egui::Grid::new("image_form").num_columns(2).show(ui, |ui| {
                    ui.label("Title");
                    ui.text_edit_singleline(&mut fields.title);
                    ui.end_row();
                    ui.label("URL");
                    ui.text_edit_singleline(&mut fields.url);
                    ui.end_row();
                });
                ui.horizontal(|ui| {
                    submitted = ui.button(submit_label).clicked();
                    if ui.button("Clear").clicked() {
                        *fields = Default::default();
                    }
                });
            });

        if !submitted {
            return;
        }
        match self.screen.images.submit() {
            Some(FormSubmission::Add(draft)) => self.dispatch(BackendCommand::AddImage {
                album: album.to_string(),
                draft,
            }),
            Some(FormSubmission::Edit(image)) => self.dispatch(BackendCommand::UpdateImage {
                album: album.to_string(),
                image,
            }),
            None => self.status = "Title and URL are required.".to_string(),
        }
    }

    fn show_image_grid(&mut self, ui: &mut egui::Ui, album: &str) {
        let shown: Vec<Image> = self
            .screen
            .images
            .displayed(self.current_images())
            .cloned()
            .collect();
        if shown.is_empty() {
            ui.weak(if self.current_images().is_empty() {
                "This album has no images yet."
            } else {
                "No images match the search."
            });
            self.screen.images.unhover();
            return;
        }

        let editing = match &self.screen.images.form {
            ImageForm::Edit { target, .. } => Some(*target),
            _ => None,
        };
        let hovered_before = self.screen.images.hover;
        let mut hovered_now = None;
        let mut action = None;

        egui::ScrollArea::vertical().show(ui, |ui| {
            ui.horizontal_wrapped(|ui| {
                for (index, image) in shown.iter().enumerate() {
                    let texture = self.texture_for(ui.ctx(), &image.url);
                    let card = egui::Frame::NONE
                        .fill(ui.visuals().faint_bg_color)
                        .stroke(if editing == Some(image.id) {
                            ui.visuals().selection.stroke
                        } else {
                            ui.visuals().widgets.noninteractive.bg_stroke
                        })
                        .corner_radius(8.0)
                        .inner_margin(egui::Margin::symmetric(8, 8))
                        .show(ui, |ui| {
                            ui.set_width(THUMBNAIL_SIZE);
                            let size = egui::vec2(THUMBNAIL_SIZE, THUMBNAIL_SIZE * 0.75);
                            let thumb = match &texture {
                                Some(texture) => ui.add(
                                    egui::Image::new(texture)
                                        .fit_to_exact_size(size)
                                        .sense(egui::Sense::click()),
                                ),
                                None => self.image_placeholder(ui, &image.url, size),
                            };
                            if thumb.clicked() {
                                action = Some(CardAction::Open(index));
                            }
                            ui.label(&image.title);
                            if hovered_before == Some(index) {
                                ui.horizontal(|ui| {
                                    if ui.small_button("Edit").clicked() {
                                        action = Some(CardAction::Edit(image.clone()));
                                    }
                                    if ui.small_button("Delete").clicked() {
                                        action = Some(CardAction::Delete(image.clone()));
                                    }
                                });
                            }
                        });
                    if card.response.contains_pointer() {
                        hovered_now = Some(index);
                    }
                }
            });
        });

        match hovered_now {
            Some(index) => self.screen.images.hover(index),
            None => self.screen.images.unhover(),
        }

        match action {
            Some(CardAction::Open(index)) => self.screen.images.open_carousel(index),
            Some(CardAction::Edit(image)) => self.screen.images.open_edit(&image),
            Some(CardAction::Delete(image)) => self.dispatch(BackendCommand::DeleteImage {
                album: album.to_string(),
                image_id: image.id,
            }),
            None => {}
        }
    }

    fn image_placeholder(
        &self,
        ui: &mut egui::Ui,
        url: &str,
        size: egui::Vec2,
    ) -> egui::Response {
        let (rect, response) = ui.allocate_exact_size(size, egui::Sense::click());
        ui.painter()
            .rect_filled(rect, 4.0, ui.visuals().extreme_bg_color);
        let (text, reason) = match self.images.get(url) {
            Some(RemoteImage::Failed(reason)) => ("Image unavailable", Some(reason.as_str())),
            _ => ("Loading...", None),
        };
        ui.painter().text(
            rect.center(),
            egui::Align2::CENTER_CENTER,
            text,
            egui::FontId::proportional(13.0),
            ui.visuals().weak_text_color(),
        );
        match reason {
            Some(reason) => response.on_hover_text(reason),
            None => response,
        }
    }

    pub(crate) fn show_carousel(&mut self, ctx: &egui::Context) {
        let Some(carousel) = self.screen.images.carousel else {
            return;
        };
        let shown: Vec<Image> = self
            .screen
            .images
            .displayed(self.current_images())
            .cloned()
            .collect();
        let Some(image) = carousel.current(&shown).cloned() else {
            self.screen.images.close_carousel();
            return;
        };
        let len = shown.len();
        let texture = self.texture_for(ctx, &image.url);

        let mut keep_open = true;
        let mut step: i8 = 0;
        egui::Window::new(image.title.as_str())
            .id(egui::Id::new("image_carousel"))
            .open(&mut keep_open)
            .resizable(true)
            .collapsible(false)
            .default_size([720.0, 560.0])
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    if ui.button("< Prev").clicked() {
                        step = -1;
                    }
                    ui.label(format!("{} / {len}", carousel.index() + 1));
                    if ui.button("Next >").clicked() {
                        step = 1;
                    }
                });
                ui.separator();
                match &texture {
                    Some(texture) => {
                        let max_size = ui.available_size();
                        let mut size = texture.size_vec2();
                        let scale = (max_size.x / size.x).min(max_size.y / size.y).min(1.0);
                        size *= scale;
                        ui.add(egui::Image::new(texture).fit_to_exact_size(size));
                    }
                    None => {
                        ui.spinner();
                    }
                }
                ui.weak(&image.url);
            });

        ctx.input(|i| {
            if i.key_pressed(egui::Key::ArrowLeft) {
                step = -1;
            } else if i.key_pressed(egui::Key::ArrowRight) {
                step = 1;
            } else if i.key_pressed(egui::Key::Escape) {
                keep_open = false;
            }
        });

        match step {
            1 => self.screen.images.carousel_next(len),
            -1 => self.screen.images.carousel_prev(len),
            _ => {}
        }
        if !keep_open {
            self.screen.images.close_carousel();
        }
    }
}
