//! Backend configuration
//!
//! The backend URL and anonymous API key come from the environment
//! (`SUPABASE_URL`, `SUPABASE_ANON_KEY`). When they are not set, the values
//! injected into the deployed site's `index.html` are used instead.

use std::path::{Path, PathBuf};

use config::{Config, Environment};
use serde::Deserialize;
use tracing::{debug, info};

use crate::error::{GalleryError, GalleryResult};
use crate::page::{PageGlobals, read_globals};

/// Connection settings for the hosted backend
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct BackendConfig {
    /// Base URL, without trailing slash
    #[serde(default)]
    pub url: String,
    /// Anonymous API key sent as `apikey` on every request
    #[serde(default)]
    pub anon_key: String,
}

impl BackendConfig {
    pub fn new(url: impl Into<String>, anon_key: impl Into<String>) -> Self {
        let url: String = url.into();
        BackendConfig {
            url: url.trim_end_matches('/').to_string(),
            anon_key: anon_key.into(),
        }
    }

    /// Create a new BackendConfig from environment variables
    ///
    /// # Environment Variables
    /// - `SUPABASE_URL`: backend base URL
    /// - `SUPABASE_ANON_KEY`: anonymous API key
    pub fn from_env() -> GalleryResult<Self> {
        let settings = Config::builder()
            .add_source(Environment::with_prefix("SUPABASE"))
            .build()
            .map_err(|e| GalleryError::Configuration(e.to_string()))?;

        let raw: BackendConfig = settings
            .try_deserialize()
            .map_err(|e| GalleryError::Configuration(e.to_string()))?;

        BackendConfig::new(raw.url, raw.anon_key).validated()
    }

    /// Read the globals injected into a deployed page
    pub fn from_page(path: &Path) -> GalleryResult<Self> {
        let html = std::fs::read_to_string(path).map_err(|e| {
            GalleryError::Configuration(format!("Failed to read {}: {}", path.display(), e))
        })?;

        let globals = read_globals(&html).ok_or_else(|| {
            GalleryError::Configuration(format!(
                "{} does not define the backend globals",
                path.display()
            ))
        })?;

        BackendConfig::from(globals).validated()
    }

    /// Environment first, then `$GALLERY_SITE_DIR/index.html` (default `.`)
    pub fn load() -> GalleryResult<Self> {
        match BackendConfig::from_env() {
            Ok(config) => {
                info!("Backend configured from environment: {}", config.url);
                Ok(config)
            }
            Err(env_err) => {
                debug!("Backend environment not usable: {}", env_err);
                let site_dir =
                    std::env::var("GALLERY_SITE_DIR").unwrap_or_else(|_| ".".to_string());
                let page = PathBuf::from(site_dir).join("index.html");

                let config = BackendConfig::from_page(&page).map_err(|page_err| {
                    GalleryError::Configuration(format!(
                        "backend variables not configured ({}; {})",
                        env_err, page_err
                    ))
                })?;
                info!("Backend configured from {}: {}", page.display(), config.url);
                Ok(config)
            }
        }
    }

    /// Reject empty values and non-HTTP URLs
    pub fn validated(self) -> GalleryResult<Self> {
        if self.url.is_empty() || self.anon_key.is_empty() {
            return Err(GalleryError::Configuration(
                "SUPABASE_URL and SUPABASE_ANON_KEY must both be set".to_string(),
            ));
        }

        if !(self.url.starts_with("http://") || self.url.starts_with("https://")) {
            return Err(GalleryError::Configuration(format!(
                "Backend URL must start with http:// or https://, got {}",
                self.url
            )));
        }

        Ok(self)
    }
}

impl From<PageGlobals> for BackendConfig {
    fn from(globals: PageGlobals) -> Self {
        BackendConfig::new(globals.url, globals.anon_key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::{Injection, inject_globals};
    use serial_test::serial;

    #[test]
    fn test_trailing_slash_trimmed() {
        let config = BackendConfig::new("https://demo.example.co/", "key");
        assert_eq!(config.url, "https://demo.example.co");
    }

    #[test]
    fn test_validation() {
        assert!(BackendConfig::new("", "key").validated().is_err());
        assert!(BackendConfig::new("https://x.example", "").validated().is_err());
        assert!(BackendConfig::new("ftp://x.example", "key").validated().is_err());
        assert!(BackendConfig::new("http://127.0.0.1:54321", "key").validated().is_ok());
    }

    #[test]
    #[serial]
    fn test_backend_config_from_env() {
        unsafe {
            std::env::set_var("SUPABASE_URL", "https://demo.example.co/");
            std::env::set_var("SUPABASE_ANON_KEY", "anon-123");
        }

        let config = BackendConfig::from_env().unwrap();
        assert_eq!(config.url, "https://demo.example.co");
        assert_eq!(config.anon_key, "anon-123");

        unsafe {
            std::env::remove_var("SUPABASE_URL");
            std::env::remove_var("SUPABASE_ANON_KEY");
        }
    }

    #[test]
    #[serial]
    fn test_backend_config_missing_env() {
        unsafe {
            std::env::remove_var("SUPABASE_URL");
            std::env::remove_var("SUPABASE_ANON_KEY");
        }

        assert!(matches!(
            BackendConfig::from_env(),
            Err(GalleryError::Configuration(_))
        ));
    }

    #[test]
    #[serial]
    fn test_load_falls_back_to_site_page() {
        let mut dir = std::env::temp_dir();
        dir.push(format!("gallery-site-{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();

        let globals = PageGlobals {
            url: "https://site.example.co".to_string(),
            anon_key: "page-key".to_string(),
        };
        let Injection::Injected(html) =
            inject_globals("<html><head></head><body></body></html>", &globals)
        else {
            panic!("expected injection");
        };
        std::fs::write(dir.join("index.html"), html).unwrap();

        unsafe {
            std::env::remove_var("SUPABASE_URL");
            std::env::remove_var("SUPABASE_ANON_KEY");
            std::env::set_var("GALLERY_SITE_DIR", &dir);
        }

        let config = BackendConfig::load().unwrap();
        assert_eq!(config, BackendConfig::new("https://site.example.co", "page-key"));

        unsafe {
            std::env::remove_var("GALLERY_SITE_DIR");
        }
        let _ = std::fs::remove_dir_all(&dir);
    }
}
