//! UI layer: app shell, album grid, album detail and carousel.

pub mod album_view;
pub mod app;
pub mod toasts;

pub use app::AlbumDesktopApp;
