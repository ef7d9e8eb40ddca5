//! Gallery page controller
//!
//! Loads the photos once, then filters, renders and drives the lazy loader
//! and the detail overlay without going back to the backend.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use common::GalleryResult;
use common::models::Photo;
use tracing::{debug, error, info};

use crate::lazy::VisibilityObserver;
use crate::overlay::{Overlay, OverlayEvent, PhotoDetail};
use crate::render::{render_card, render_filters};
use crate::repository::PhotoRepository;
use crate::tags::{TagFilter, TagVocabulary};

/// Message shown when the photos cannot be loaded
pub const LOAD_ERROR_MESSAGE: &str = "Failed to load photos. Please try again.";

/// Which block of the page is visible
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewState {
    Loading,
    Error(String),
    Empty,
    Grid,
}

/// Gallery settings
#[derive(Debug, Clone)]
pub struct GallerySettings {
    /// Cards revealed up front when rendering outside a viewport
    pub eager_cards: usize,
}

impl Default for GallerySettings {
    fn default() -> Self {
        Self { eager_cards: 6 }
    }
}

impl GallerySettings {
    /// Create GallerySettings from environment variables
    ///
    /// # Environment Variables
    /// - `GALLERY_EAGER_CARDS`: cards revealed without a visibility event (default: 6)
    pub fn from_env() -> Self {
        let eager_cards = std::env::var("GALLERY_EAGER_CARDS")
            .unwrap_or_else(|_| "6".to_string())
            .parse()
            .unwrap_or(6);

        GallerySettings { eager_cards }
    }
}

/// Controller behind the gallery page
pub struct GalleryController {
    repository: PhotoRepository,
    photos: Vec<Photo>,
    vocabulary: TagVocabulary,
    filter: TagFilter,
    view: ViewState,
    observer: VisibilityObserver<usize>,
    /// Card positions whose image has been revealed, shared with observer callbacks
    revealed: Arc<Mutex<HashSet<usize>>>,
    overlay: Overlay,
}

impl GalleryController {
    pub fn new(repository: PhotoRepository) -> Self {
        Self {
            repository,
            photos: Vec::new(),
            vocabulary: TagVocabulary::default(),
            filter: TagFilter::All,
            view: ViewState::Loading,
            observer: VisibilityObserver::new(),
            revealed: Arc::new(Mutex::new(HashSet::new())),
            overlay: Overlay::Closed,
        }
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn photos(&self) -> &[Photo] {
        &self.photos
    }

    pub fn vocabulary(&self) -> &TagVocabulary {
        &self.vocabulary
    }

    pub fn filter(&self) -> &TagFilter {
        &self.filter
    }

    pub fn overlay(&self) -> &Overlay {
        &self.overlay
    }

    /// Photos passing the active filter, in display order
    pub fn visible(&self) -> Vec<&Photo> {
        self.filter.apply(&self.photos)
    }

    /// Fetch every photo and show them unfiltered
    pub async fn load(&mut self) -> GalleryResult<usize> {
        self.view = ViewState::Loading;

        match self.repository.list_photos().await {
            Ok(photos) => {
                self.vocabulary = TagVocabulary::from_photos(&photos);
                self.photos = photos;
                self.filter = TagFilter::All;
                info!(
                    "Gallery loaded: {} photos, {} tags",
                    self.photos.len(),
                    self.vocabulary.len()
                );
                self.render();
                Ok(self.photos.len())
            }
            Err(e) => {
                error!("Failed to load photos: {}", e);
                self.view = ViewState::Error(LOAD_ERROR_MESSAGE.to_string());
                Err(e)
            }
        }
    }

    /// Show only photos carrying the tag, or every photo for [`TagFilter::All`]
    pub fn filter_by(&mut self, filter: TagFilter) {
        debug!("Filter: {}", filter.key());
        self.filter = filter;
        self.render();
    }

    /// Filter bar markup
    pub fn filters_html(&self) -> String {
        render_filters(&self.vocabulary, &self.filter)
    }

    /// Grid markup for the visible photos
    pub fn grid_html(&self) -> String {
        self.visible()
            .into_iter()
            .enumerate()
            .map(|(position, photo)| render_card(position, photo, self.is_revealed(position)))
            .collect()
    }

    /// Deliver a visibility event for the card at `position`
    pub fn on_visibility(&mut self, position: usize, intersecting: bool) -> bool {
        self.observer.notify(&position, intersecting)
    }

    pub fn is_revealed(&self, position: usize) -> bool {
        self.revealed
            .lock()
            .map(|revealed| revealed.contains(&position))
            .unwrap_or(false)
    }

    /// Cards still waiting for a visibility event
    pub fn pending_images(&self) -> usize {
        self.observer.len()
    }

    /// Open the overlay for the card at `position`
    pub fn open_card(&mut self, position: usize) -> bool {
        let detail = match self.visible().get(position) {
            Some(photo) => PhotoDetail::from_photo(photo),
            None => return false,
        };

        self.overlay.open(detail);
        true
    }

    /// Forward an input event to the overlay; returns whether it closed
    pub fn handle_overlay(&mut self, event: &OverlayEvent) -> bool {
        self.overlay.handle(event)
    }

    fn render(&mut self) {
        self.observer.disconnect();
        if let Ok(mut revealed) = self.revealed.lock() {
            revealed.clear();
        }

        let count = self.visible().len();
        if count == 0 {
            self.view = ViewState::Empty;
            return;
        }

        for position in 0..count {
            let revealed = self.revealed.clone();
            self.observer.observe(
                position,
                Box::new(move || {
                    if let Ok(mut revealed) = revealed.lock() {
                        revealed.insert(position);
                    }
                }),
            );
        }

        self.view = ViewState::Grid;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_settings_from_env() {
        unsafe {
            std::env::remove_var("GALLERY_EAGER_CARDS");
        }
        assert_eq!(GallerySettings::from_env().eager_cards, 6);

        unsafe {
            std::env::set_var("GALLERY_EAGER_CARDS", "2");
        }
        assert_eq!(GallerySettings::from_env().eager_cards, 2);

        unsafe {
            std::env::set_var("GALLERY_EAGER_CARDS", "many");
        }
        assert_eq!(GallerySettings::from_env().eager_cards, 6);

        unsafe {
            std::env::remove_var("GALLERY_EAGER_CARDS");
        }
    }
}
