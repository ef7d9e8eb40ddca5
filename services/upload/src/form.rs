//! Upload form fields

use chrono::{DateTime, Utc};
use common::models::NewPhoto;
use common::{GalleryError, GalleryResult};
use uuid::Uuid;

/// Text fields of the upload form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UploadForm {
    pub title: String,
    pub description: String,
    /// Comma-separated tags
    pub tags: String,
}

impl UploadForm {
    pub fn reset(&mut self) {
        *self = UploadForm::default();
    }

    /// Reject a blank title before anything is uploaded
    pub fn validate(&self) -> GalleryResult<()> {
        if self.title.trim().is_empty() {
            return Err(GalleryError::validation("Please enter a title"));
        }
        Ok(())
    }

    /// Build the insert payload for an uploaded image
    pub fn to_new_photo(
        &self,
        image_url: String,
        user_id: Option<Uuid>,
        created_at: DateTime<Utc>,
    ) -> GalleryResult<NewPhoto> {
        self.validate()?;

        let description = self.description.trim();
        Ok(NewPhoto {
            title: self.title.trim().to_string(),
            description: (!description.is_empty()).then(|| description.to_string()),
            image_url,
            tags: parse_tags(&self.tags),
            user_id,
            created_at,
        })
    }
}

/// Split on `,`, trim, drop empties
pub fn parse_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}
