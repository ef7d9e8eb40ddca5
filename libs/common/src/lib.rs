//! Common library for the photo gallery client
//!
//! This crate provides what the auth, gallery and upload controllers share:
//! the backend REST client, configuration, error types, local key-value
//! storage, page globals, HTML escaping and the photo models.

pub mod client;
pub mod config;
pub mod error;
pub mod html;
pub mod models;
pub mod notice;
pub mod page;
pub mod storage;
pub mod telemetry;

pub use client::BackendClient;
pub use config::BackendConfig;
pub use error::{ErrorCategory, GalleryError, GalleryResult};
pub use notice::{Notice, NoticeKind};

/// Example usage of the backend client
///
/// ```rust,no_run
/// use common::{BackendClient, BackendConfig};
/// use reqwest::Method;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let config = BackendConfig::load()?;
///     let client = BackendClient::new(config);
///     let request = client
///         .request(Method::GET, "/auth/v1/user")
///         .bearer_auth(client.anon_key());
///     let user: serde_json::Value = client.send_json(request, "Lookup failed").await?;
///     println!("{}", user);
///     Ok(())
/// }
/// ```
pub fn example_usage() {}
