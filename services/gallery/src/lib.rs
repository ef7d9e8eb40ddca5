//! Public photo gallery
//!
//! Fetches the photo records, derives the tag vocabulary, filters and
//! renders escaped cards, and drives the lazy image loader and the detail
//! overlay.

pub mod controller;
pub mod lazy;
pub mod overlay;
pub mod render;
pub mod repository;
pub mod tags;

pub use controller::{GalleryController, GallerySettings, ViewState};
pub use overlay::{ClickTarget, Overlay, OverlayEvent, PhotoDetail};
pub use repository::PhotoRepository;
pub use tags::{TagFilter, TagVocabulary};
