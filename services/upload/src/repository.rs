//! Photo metadata writes

use common::models::{NewPhoto, PHOTOS_TABLE};
use common::{BackendClient, GalleryResult};
use reqwest::Method;
use tracing::info;

/// Photo repository for insert operations
#[derive(Clone)]
pub struct PhotoRepository {
    client: BackendClient,
}

impl PhotoRepository {
    /// Create a new photo repository
    pub fn new(client: BackendClient) -> Self {
        Self { client }
    }

    /// Insert a photo row without asking for it back
    pub async fn insert(&self, photo: &NewPhoto, access_token: Option<&str>) -> GalleryResult<()> {
        info!("Saving photo details: {}", photo.title);

        let request = self
            .client
            .request(Method::POST, &format!("/rest/v1/{}", PHOTOS_TABLE))
            .bearer_auth(self.client.bearer_or_anon(access_token))
            .header("Prefer", "return=minimal")
            .json(photo);

        self.client
            .send_empty(request, "Failed to save the photo details")
            .await
    }
}
