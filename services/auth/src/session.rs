//! Session persistence in local storage
//!
//! The token bundle lives under one fixed key. Login, registration and
//! logout write it; every other reader goes through the accessors here,
//! which never touch the network.

use std::sync::Arc;

use common::GalleryResult;
use common::storage::KeyValueStore;
use tracing::{info, warn};

use crate::models::{SessionToken, UserProfile};

/// Local storage key holding the serialized session token
pub const SESSION_KEY: &str = "supabase.auth.token";

/// Session manager for the persisted token bundle
#[derive(Clone)]
pub struct SessionManager {
    store: Arc<dyn KeyValueStore>,
}

impl SessionManager {
    /// Create a new session manager
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Persist a token bundle, replacing any previous one
    pub fn save(&self, token: &SessionToken) -> GalleryResult<()> {
        let user = token
            .user
            .as_ref()
            .map(|u| u.id.to_string())
            .unwrap_or_else(|| "unknown".to_string());
        info!("Saving session for user: {}", user);

        let body = serde_json::to_string(token)?;
        self.store.set(SESSION_KEY, &body)
    }

    /// Read the persisted session; unreadable data counts as no session
    pub fn load(&self) -> Option<SessionToken> {
        let raw = match self.store.get(SESSION_KEY) {
            Ok(raw) => raw?,
            Err(e) => {
                warn!("Failed to read session: {}", e);
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(token) => Some(token),
            Err(e) => {
                warn!("Ignoring corrupt session record: {}", e);
                None
            }
        }
    }

    /// Remove the persisted session
    pub fn clear(&self) -> GalleryResult<()> {
        info!("Clearing session");
        self.store.delete(SESSION_KEY)
    }

    /// Current access token, if any
    pub fn access_token(&self) -> Option<String> {
        self.load()
            .map(|token| token.access_token)
            .filter(|token| !token.is_empty())
    }

    /// Profile snapshot of the signed-in user, if any
    pub fn current_user(&self) -> Option<UserProfile> {
        self.load().and_then(|token| token.user)
    }

    /// Whether an access token is stored
    pub fn is_authenticated(&self) -> bool {
        self.access_token().is_some()
    }
}
