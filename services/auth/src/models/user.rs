//! User model and related functionality

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

/// Snapshot of the authenticated user as the backend describes it
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserProfile {
    pub id: Uuid,
    #[serde(default)]
    pub email: Option<String>,
    /// Set once the user has confirmed their email address
    #[serde(default)]
    pub confirmed_at: Option<String>,
    /// Every other field the backend sent, kept verbatim
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl UserProfile {
    pub fn is_confirmed(&self) -> bool {
        self.confirmed_at
            .as_deref()
            .is_some_and(|at| !at.trim().is_empty())
    }
}

/// Email and password sent to the token and signup endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}
