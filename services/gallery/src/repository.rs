//! Photo repository backed by the REST endpoint

use common::models::{PHOTOS_TABLE, Photo, PhotoRecord};
use common::{BackendClient, GalleryResult};
use reqwest::Method;
use serde_json::Value;
use tracing::{debug, info};

/// Photo repository for read operations
#[derive(Clone)]
pub struct PhotoRepository {
    client: BackendClient,
}

impl PhotoRepository {
    /// Create a new photo repository
    pub fn new(client: BackendClient) -> Self {
        Self { client }
    }

    /// Get every displayable photo, newest first
    ///
    /// The gallery is public, so the request is authenticated with the
    /// anonymous key. Rows that are not objects or lack a title or image URL
    /// are skipped without failing the rest of the load.
    pub async fn list_photos(&self) -> GalleryResult<Vec<Photo>> {
        let path = format!("/rest/v1/{}?select=*&order=created_at.desc", PHOTOS_TABLE);
        let request = self
            .client
            .request(Method::GET, &path)
            .bearer_auth(self.client.anon_key());

        let rows: Vec<Value> = self
            .client
            .send_json(request, "Failed to load photos")
            .await?;
        let total = rows.len();

        let photos: Vec<Photo> = rows
            .into_iter()
            .filter_map(|row| {
                let record = match serde_json::from_value::<PhotoRecord>(row) {
                    Ok(record) => record,
                    Err(e) => {
                        debug!("Skipping malformed photo record: {}", e);
                        return None;
                    }
                };
                match Photo::try_from(record) {
                    Ok(photo) => Some(photo),
                    Err(reason) => {
                        debug!("Skipping photo record: {}", reason);
                        None
                    }
                }
            })
            .collect();

        info!("Loaded {} of {} photo records", photos.len(), total);
        Ok(photos)
    }
}
