//! Photo detail overlay

use common::html::escape_html;
use common::models::Photo;

use crate::render::{detail_date, render_tags};

/// Shown when a photo has no description
pub const NO_DESCRIPTION: &str = "No description";

/// What the overlay shows for one photo
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoDetail {
    pub image_url: String,
    pub alt: String,
    pub title: String,
    pub description: String,
    /// Escaped tag chips
    pub tags_html: String,
    /// `Uploaded on ...` line, absent when the record has no timestamp
    pub uploaded: Option<String>,
}

impl PhotoDetail {
    pub fn from_photo(photo: &Photo) -> Self {
        PhotoDetail {
            image_url: photo.image_url.clone(),
            alt: photo.title.clone(),
            title: photo.title.clone(),
            description: photo
                .description
                .clone()
                .unwrap_or_else(|| NO_DESCRIPTION.to_string()),
            tags_html: render_tags(&photo.tags),
            uploaded: photo
                .created_at
                .as_ref()
                .map(|at| format!("Uploaded on {}", detail_date(at))),
        }
    }

    /// Overlay content as escaped markup
    pub fn to_html(&self) -> String {
        let uploaded = self
            .uploaded
            .as_deref()
            .map(|line| format!("<p class=\"modal-date\">{}</p>", escape_html(line)))
            .unwrap_or_default();

        format!(
            "<div class=\"modal-content\">\
             <span class=\"close\">&times;</span>\
             <img class=\"modal-image\" src=\"{}\" alt=\"{}\">\
             <h2 class=\"modal-title\">{}</h2>\
             <p class=\"modal-description\">{}</p>{}{}\
             </div>",
            escape_html(&self.image_url),
            escape_html(&self.alt),
            escape_html(&self.title),
            escape_html(&self.description),
            self.tags_html,
            uploaded
        )
    }
}

/// Where a click inside the overlay landed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickTarget {
    Backdrop,
    Content,
}

/// Input the overlay reacts to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OverlayEvent {
    CloseButton,
    Click(ClickTarget),
    KeyDown(String),
}

/// Overlay state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Overlay {
    #[default]
    Closed,
    Open(PhotoDetail),
}

impl Overlay {
    pub fn open(&mut self, detail: PhotoDetail) {
        *self = Overlay::Open(detail);
    }

    pub fn is_open(&self) -> bool {
        matches!(self, Overlay::Open(_))
    }

    pub fn detail(&self) -> Option<&PhotoDetail> {
        match self {
            Overlay::Open(detail) => Some(detail),
            Overlay::Closed => None,
        }
    }

    /// Apply an event; returns whether it closed the overlay
    pub fn handle(&mut self, event: &OverlayEvent) -> bool {
        if !self.is_open() {
            return false;
        }

        let close = match event {
            OverlayEvent::CloseButton => true,
            OverlayEvent::Click(target) => *target == ClickTarget::Backdrop,
            OverlayEvent::KeyDown(key) => key == "Escape",
        };

        if close {
            *self = Overlay::Closed;
        }
        close
    }
}
