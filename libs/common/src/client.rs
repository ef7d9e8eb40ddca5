//! REST client for the hosted backend
//!
//! Every request carries the anonymous `apikey` header. Non-2xx responses
//! become [`GalleryError::Rejected`] with the message the backend put in
//! its JSON body, or a caller-supplied fallback.

use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::BackendConfig;
use crate::error::{GalleryError, GalleryResult};

/// Fields the backend uses for human-readable errors, in lookup order
const ERROR_MESSAGE_FIELDS: [&str; 4] = ["error_description", "msg", "message", "error"];

/// Thin wrapper over `reqwest::Client` bound to one backend
#[derive(Clone)]
pub struct BackendClient {
    http: reqwest::Client,
    config: BackendConfig,
}

impl BackendClient {
    pub fn new(config: BackendConfig) -> Self {
        Self::with_http(reqwest::Client::new(), config)
    }

    pub fn with_http(http: reqwest::Client, config: BackendConfig) -> Self {
        BackendClient { http, config }
    }

    pub fn config(&self) -> &BackendConfig {
        &self.config
    }

    pub fn anon_key(&self) -> &str {
        &self.config.anon_key
    }

    /// Absolute URL for a backend path such as `/auth/v1/user`
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.config.url, path)
    }

    /// Public URL of an object in storage
    pub fn public_object_url(&self, bucket: &str, path: &str) -> String {
        self.endpoint(&format!("/storage/v1/object/public/{}/{}", bucket, path))
    }

    /// Start a request with the `apikey` header set
    pub fn request(&self, method: Method, path: &str) -> RequestBuilder {
        debug!("{} {}", method, path);
        self.http
            .request(method, self.endpoint(path))
            .header("apikey", &self.config.anon_key)
    }

    /// The session token when there is one, otherwise the anonymous key
    pub fn bearer_or_anon<'a>(&'a self, token: Option<&'a str>) -> &'a str {
        match token {
            Some(token) if !token.is_empty() => token,
            _ => &self.config.anon_key,
        }
    }

    /// Send and decode a JSON body
    pub async fn send_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        fallback: &str,
    ) -> GalleryResult<T> {
        let response = self.send(request, fallback).await?;
        let bytes = response.bytes().await.map_err(GalleryError::Transport)?;

        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Send and ignore the response body
    pub async fn send_empty(&self, request: RequestBuilder, fallback: &str) -> GalleryResult<()> {
        self.send(request, fallback).await?;
        Ok(())
    }

    async fn send(&self, request: RequestBuilder, fallback: &str) -> GalleryResult<Response> {
        let response = request.send().await.map_err(GalleryError::Transport)?;
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = extract_error_message(&body).unwrap_or_else(|| fallback.to_string());
        warn!("Backend rejected request ({}): {}", status, message);

        Err(GalleryError::Rejected {
            status: status.as_u16(),
            message,
        })
    }
}

/// Pull the first non-empty error message out of a JSON error body
pub fn extract_error_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    let object = value.as_object()?;

    ERROR_MESSAGE_FIELDS
        .iter()
        .filter_map(|field| object.get(*field))
        .filter_map(Value::as_str)
        .find(|message| !message.trim().is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> BackendClient {
        BackendClient::new(BackendConfig::new("https://demo.example.co", "anon"))
    }

    #[test]
    fn test_extract_error_message_order() {
        assert_eq!(
            extract_error_message(r#"{"msg":"m","error_description":"desc"}"#),
            Some("desc".to_string())
        );
        assert_eq!(
            extract_error_message(r#"{"message":"Bucket not found","statusCode":"404"}"#),
            Some("Bucket not found".to_string())
        );
        assert_eq!(
            extract_error_message(r#"{"error_description":"","msg":"fallback msg"}"#),
            Some("fallback msg".to_string())
        );
    }

    #[test]
    fn test_extract_error_message_unusable_body() {
        assert_eq!(extract_error_message("<html>502</html>"), None);
        assert_eq!(extract_error_message("[]"), None);
        assert_eq!(extract_error_message(r#"{"code":42}"#), None);
    }

    #[test]
    fn test_public_object_url() {
        assert_eq!(
            client().public_object_url("photos", "1700000000000-abc123.jpg"),
            "https://demo.example.co/storage/v1/object/public/photos/1700000000000-abc123.jpg"
        );
    }

    #[test]
    fn test_bearer_or_anon() {
        let client = client();
        assert_eq!(client.bearer_or_anon(Some("user-token")), "user-token");
        assert_eq!(client.bearer_or_anon(Some("")), "anon");
        assert_eq!(client.bearer_or_anon(None), "anon");
    }
}
