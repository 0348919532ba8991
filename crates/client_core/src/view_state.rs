//! UI state of the album screens, kept separate from album data so a view can
//! render, serialise and reset it without touching the workflow.

use serde::{Deserialize, Serialize};
use shared::domain::{Image, ImageDraft, ImageId};

use crate::{
    carousel::Carousel,
    filter::{filter_images, FilteredImages},
};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchState {
    pub active: bool,
    pub query: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImageForm {
    #[default]
    Hidden,
    Add {
        fields: ImageDraft,
    },
    Edit {
        target: ImageId,
        fields: ImageDraft,
    },
}

impl ImageForm {
    pub fn is_visible(&self) -> bool {
        !matches!(self, Self::Hidden)
    }

    pub fn is_editing(&self) -> bool {
        matches!(self, Self::Edit { .. })
    }
}

/// What the image form produced when submitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormSubmission {
    Add(ImageDraft),
    Edit(Image),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageViewState {
    pub search: SearchState,
    pub hover: Option<usize>,
    pub form: ImageForm,
    pub carousel: Option<Carousel>,
}

impl ImageViewState {
    pub fn activate_search(&mut self) {
        self.search.active = true;
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.search.query = query.into();
    }

    pub fn clear_search(&mut self) {
        self.search = SearchState::default();
    }

    /// Images of `images` currently shown, in display order.
    pub fn displayed<'a>(&self, images: &'a [Image]) -> FilteredImages<'a> {
        filter_images(images, &self.search.query)
    }

    pub fn hover(&mut self, index: usize) {
        self.hover = Some(index);
    }

    pub fn unhover(&mut self) {
        self.hover = None;
    }

    pub fn toggle_form(&mut self) {
        self.form = match self.form {
            ImageForm::Hidden => ImageForm::Add {
                fields: ImageDraft::default(),
            },
            ImageForm::Add { .. } | ImageForm::Edit { .. } => ImageForm::Hidden,
        };
    }

    pub fn toggle_label(&self) -> &'static str {
        if self.form.is_visible() {
            "Cancel"
        } else {
            "Add Image"
        }
    }

    pub fn open_edit(&mut self, image: &Image) {
        self.form = ImageForm::Edit {
            target: image.id,
            fields: ImageDraft::new(image.title.clone(), image.url.clone()),
        };
    }

    pub fn fields_mut(&mut self) -> Option<&mut ImageDraft> {
        match &mut self.form {
            ImageForm::Hidden => None,
            ImageForm::Add { fields } | ImageForm::Edit { fields, .. } => Some(fields),
        }
    }

    pub fn clear_fields(&mut self) {
        if let Some(fields) = self.fields_mut() {
            *fields = ImageDraft::default();
        }
    }

    /// Closes the form and returns its trimmed contents. An add form with a
    /// blank title or url stays open and yields nothing.
    pub fn submit(&mut self) -> Option<FormSubmission> {
        let submission = match &self.form {
            ImageForm::Hidden => return None,
            ImageForm::Add { fields } => FormSubmission::Add(fields.trimmed()?),
            ImageForm::Edit { target, fields } => FormSubmission::Edit(
                Image {
                    id: *target,
                    title: fields.title.clone(),
                    url: fields.url.clone(),
                }
                .trimmed(),
            ),
        };
        self.form = ImageForm::Hidden;
        Some(submission)
    }

    pub fn open_carousel(&mut self, index: usize) {
        self.carousel = Some(Carousel::open(index));
    }

    pub fn close_carousel(&mut self) {
        self.carousel = None;
    }

    pub fn carousel_next(&mut self, len: usize) {
        if let Some(carousel) = &mut self.carousel {
            carousel.next(len);
        }
    }

    pub fn carousel_prev(&mut self, len: usize) {
        if let Some(carousel) = &mut self.carousel {
            carousel.prev(len);
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlbumGridState {
    pub form_visible: bool,
    pub name: String,
}

impl AlbumGridState {
    pub fn toggle_form(&mut self) {
        self.form_visible = !self.form_visible;
        if !self.form_visible {
            self.name.clear();
        }
    }

    pub fn toggle_label(&self) -> &'static str {
        if self.form_visible {
            "Cancel"
        } else {
            "Add Album"
        }
    }

    /// Trimmed album name, hiding and clearing the form. Blank input yields
    /// nothing and leaves the form as it is.
    pub fn submit(&mut self) -> Option<String> {
        let name = self.name.trim();
        if name.is_empty() {
            return None;
        }
        let name = name.to_string();
        self.name.clear();
        self.form_visible = false;
        Some(name)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Screen {
    #[default]
    Grid,
    AlbumDetail {
        name: String,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlbumScreen {
    pub screen: Screen,
    pub grid: AlbumGridState,
    pub images: ImageViewState,
    pub busy: bool,
}

impl AlbumScreen {
    pub fn select(&mut self, name: impl Into<String>) {
        self.screen = Screen::AlbumDetail { name: name.into() };
        self.images.reset();
    }

    pub fn back(&mut self) {
        self.screen = Screen::Grid;
        self.images.reset();
    }

    pub fn current_album(&self) -> Option<&str> {
        match &self.screen {
            Screen::Grid => None,
            Screen::AlbumDetail { name } => Some(name),
        }
    }

    /// Whether a result for `album_name` may still change the detail view.
    pub fn accepts_result_for(&self, album_name: &str) -> bool {
        self.current_album() == Some(album_name)
    }
}

#[cfg(test)]
#[path = "tests/view_state_tests.rs"]
mod tests;
