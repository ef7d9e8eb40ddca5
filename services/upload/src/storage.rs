//! Object storage for uploaded images

use chrono::Utc;
use common::{BackendClient, GalleryResult};
use rand::Rng;
use reqwest::Method;
use reqwest::header::CONTENT_TYPE;
use tracing::info;

use crate::selection::{SelectedFile, file_extension};

/// Bucket holding gallery images
pub const PHOTOS_BUCKET: &str = "photos";

const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const SUFFIX_LEN: usize = 6;

/// Storage client bound to one bucket
#[derive(Clone)]
pub struct ObjectStorage {
    client: BackendClient,
    bucket: String,
}

impl ObjectStorage {
    pub fn new(client: BackendClient) -> Self {
        Self::with_bucket(client, PHOTOS_BUCKET)
    }

    pub fn with_bucket(client: BackendClient, bucket: impl Into<String>) -> Self {
        Self {
            client,
            bucket: bucket.into(),
        }
    }

    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    /// Store the file under `name`; returns the object's public URL
    pub async fn upload(
        &self,
        name: &str,
        file: &SelectedFile,
        access_token: Option<&str>,
    ) -> GalleryResult<String> {
        info!("Uploading {} ({} bytes) to {}", name, file.size(), self.bucket);

        let path = format!("/storage/v1/object/{}/{}", self.bucket, name);
        let request = self
            .client
            .request(Method::POST, &path)
            .bearer_auth(self.client.bearer_or_anon(access_token))
            .header(CONTENT_TYPE, file.content_type())
            .body(file.bytes().to_vec());

        self.client
            .send_empty(request, "Failed to upload the image")
            .await?;

        Ok(self.client.public_object_url(&self.bucket, name))
    }
}

/// Fresh object name for an original file name
pub fn generate_object_name(original: &str) -> String {
    object_name(original, Utc::now().timestamp_millis(), &random_suffix())
}

/// `<millis>-<suffix>[.<ext>]`, the extension taken from the original name
pub fn object_name(original: &str, millis: i64, suffix: &str) -> String {
    match file_extension(original) {
        Some(ext) => format!("{}-{}.{}", millis, suffix, ext),
        None => format!("{}-{}", millis, suffix),
    }
}

fn random_suffix() -> String {
    let mut rng = rand::thread_rng();
    (0..SUFFIX_LEN)
        .map(|_| BASE36[rng.gen_range(0..BASE36.len())] as char)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_name() {
        assert_eq!(
            object_name("holiday.photo.JPG", 1_700_000_000_000, "k3x9za"),
            "1700000000000-k3x9za.JPG"
        );
        assert_eq!(object_name("scan", 42, "aaaaaa"), "42-aaaaaa");
    }

    #[test]
    fn test_generated_name_shape() {
        let name = generate_object_name("cat.png");
        let (stem, ext) = name.rsplit_once('.').unwrap();
        let (millis, suffix) = stem.split_once('-').unwrap();

        assert_eq!(ext, "png");
        assert!(millis.parse::<i64>().is_ok());
        assert_eq!(suffix.len(), SUFFIX_LEN);
        assert!(suffix.bytes().all(|b| BASE36.contains(&b)));
    }
}
